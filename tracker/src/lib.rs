//! Live station tracking runtime.
//!
//! This crate owns the one stateful loop in cosmicview: poll the station
//! position on a fixed period, keep a short trajectory behind it, resolve the
//! place it is flying over and tell the render surface what to draw.
//!
//! The state lives inside a single task; everything outside sees it through
//! a watch subscription on [`TrackerState`] and talks back through the
//! [`TrackerHandle`].
//!

pub use buffer::*;
pub use render::*;
pub use tracker::*;

mod buffer;
mod render;
mod tracker;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
