//! Access modules, one per upstream service.
//!

pub use nasa::*;
pub use nominatim::*;
pub use opennotify::*;
pub use sfnews::*;
pub use spacex::*;

mod nasa;
mod nominatim;
mod opennotify;
mod sfnews;
mod spacex;
