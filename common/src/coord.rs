//! Geographic coordinate module.
//!
//! Every position we get from the network ends up as one of these, so the
//! range checks live here and nowhere else.
//!

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for out-of-range coordinates.
///
#[derive(Debug, Error)]
pub enum CoordError {
    #[error("Latitude {0} out of [-90, 90]")]
    BadLatitude(f64),
    #[error("Longitude {0} out of [-180, 180]")]
    BadLongitude(f64),
}

/// A point on the globe.  Immutable once created, a new one is produced for
/// every update.
///
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Coord {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

impl Coord {
    /// Checked constructor.
    ///
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordError> {
        if !(-90. ..=90.).contains(&lat) {
            return Err(CoordError::BadLatitude(lat));
        }
        if !(-180. ..=180.).contains(&lon) {
            return Err(CoordError::BadLongitude(lon));
        }
        Ok(Coord { lat, lon })
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}
