//! Open Notify (open-notify.org) specific code.
//!
//! Two routes on the same site:
//! - `position` returns where the station currently is
//! - `roster` returns everybody in space, on any craft
//!
//! The position comes back with latitude/longitude encoded as JSON *strings*,
//! they are parsed into `f64` at the serde layer.
//!

use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use tracing::{debug, trace};

use cosmicview_common::Coord;

use crate::{agent, Site, SourceError};

/// The only craft we report crew for.
const STATION: &str = "ISS";

/// This is the Open Notify client/source struct.
///
#[derive(Clone, Debug)]
pub struct OpenNotify {
    /// Base site url taken from config
    pub base_url: String,
    /// Add this to `base_url` to fetch the current position
    pub position: String,
    /// Add this to `base_url` to fetch the roster
    pub roster: String,
    /// reqwest async client
    pub client: Client,
}

/// One crew member, as reported by the roster route.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Astronaut {
    /// Full name
    pub name: String,
    /// Which craft they are on
    pub craft: String,
}

/// `iss-now.json` reply.
///
#[derive(Debug, Deserialize)]
struct PositionReply {
    iss_position: RawPosition,
}

#[serde_as]
#[derive(Debug, Deserialize)]
struct RawPosition {
    #[serde_as(as = "DisplayFromStr")]
    latitude: f64,
    #[serde_as(as = "DisplayFromStr")]
    longitude: f64,
}

/// `astros.json` reply.
///
#[derive(Debug, Deserialize)]
struct RosterReply {
    people: Vec<Astronaut>,
}

impl OpenNotify {
    #[tracing::instrument]
    pub fn new() -> Self {
        trace!("opennotify::new");

        OpenNotify {
            base_url: "".to_owned(),
            position: "".to_owned(),
            roster: "".to_owned(),
            client: Client::new(),
        }
    }

    /// Load some data from in-memory loaded config
    ///
    #[tracing::instrument(skip(self))]
    pub fn load(&mut self, site: &Site) -> &mut Self {
        trace!("opennotify::load");

        self.base_url = site.base_url.to_owned();
        self.position = site.route("position").unwrap().to_owned();
        self.roster = site.route("roster").unwrap().to_owned();
        self
    }

    /// Single call to the position route.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn fetch_position(&self) -> Result<Coord, SourceError> {
        let url = format!("{}{}", self.base_url, self.position);
        trace!("Fetching position from {}…", url);

        let resp = self
            .client
            .get(&url)
            .header(USER_AGENT, agent())
            .send()
            .await?;

        match resp.status() {
            StatusCode::OK => (),
            code => {
                let h = resp.headers().clone();
                return Err(SourceError::Status(code.as_u16(), format!("{:?}", h)));
            }
        }

        let reply: PositionReply = resp.json().await?;
        debug!("{:?}", &reply);

        let pos = reply.iss_position;
        Ok(Coord::new(pos.latitude, pos.longitude)?)
    }

    /// Fetch everybody in space, keep only the station crew.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn fetch_crew(&self) -> Result<Vec<Astronaut>, SourceError> {
        let url = format!("{}{}", self.base_url, self.roster);
        trace!("Fetching roster from {}…", url);

        let resp = self
            .client
            .get(&url)
            .header(USER_AGENT, agent())
            .send()
            .await?;

        match resp.status() {
            StatusCode::OK => (),
            code => {
                let h = resp.headers().clone();
                return Err(SourceError::Status(code.as_u16(), format!("{:?}", h)));
            }
        }

        let reply: RosterReply = resp.json().await?;
        debug!("{} people in space", reply.people.len());

        Ok(reply
            .people
            .into_iter()
            .filter(|p| p.craft == STATION)
            .collect())
    }
}

impl Default for OpenNotify {
    fn default() -> Self {
        Self::new()
    }
}
