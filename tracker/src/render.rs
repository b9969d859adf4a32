//! Seam towards whatever draws the globe.
//!
//! The runtime never knows how drawing works, it only pushes the current
//! point with its trailing arcs and, in follow mode, viewport moves.
//!

use std::time::Duration;

use cosmicview_common::Coord;

use crate::ArcSegment;

/// Consumed by the tracker, implemented by the presentation layer.
///
pub trait RenderSurface: Send + Sync {
    /// Draw the current point and the trajectory behind it.
    fn render(&self, point: Coord, arcs: &[ArcSegment]);

    /// Move the viewport so `center` is in the middle, animated over
    /// `transition`.
    fn set_view(&self, center: Coord, transition: Duration);
}
