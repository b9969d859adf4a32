//! Module to deal with the different public endpoints we fetch space data from.
//!
//! The different submodules deal with the differences between services:
//!
//! - authentication (anonymous or API key)
//! - response shapes (every service has its own JSON layout).
//!
//! Which service lives where is configured through `sources.hcl`, with a
//! built-in default covering the usual endpoints.
//!

use clap::{crate_name, crate_version};

// Re-export these modules for a shorter import path.
//
pub use access::*;
pub use config::*;
pub use error::*;
pub use site::*;

mod access;
mod config;
mod error;
mod site;

/// Default configuration filename
const CONFIG: &str = "sources.hcl";

/// `User-Agent` sent with every request.  Nominatim rejects anonymous agents.
///
pub(crate) fn agent() -> String {
    format!("{}/{}", crate_name!(), crate_version!())
}

pub fn version() -> String {
    format!("{}/{}", crate_name!(), crate_version!())
}
