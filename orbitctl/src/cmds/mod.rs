//! All `orbitctl` sub-command implementations.
//!

pub use apod::*;
pub use crew::*;
pub use favorites::*;
pub use launches::*;
pub use list::*;
pub use mars::*;
pub use neo::*;
pub use news::*;
pub use track::*;

mod apod;
mod crew;
mod favorites;
mod launches;
mod list;
mod mars;
mod neo;
mod news;
mod track;
