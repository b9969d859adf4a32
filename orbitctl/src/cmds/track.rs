//! This is the module handling the `track` sub-command.
//!
//! The terminal is our render surface here: positions come out as lines,
//! viewport moves as log entries.  The loop runs until Ctrl-C or the
//! optional deadline.
//!

use std::future;
use std::time::Duration;

use eyre::Result;
use tracing::{debug, trace};

use cosmicview_common::Coord;
use cosmicview_sources::{Nominatim, OpenNotify, Sources};
use cosmicview_tracker::{ArcSegment, RenderSurface, Tracker, TrackerOpts, TrackerState};

use crate::TrackOpts;

/// Console stand-in for the globe widget.
///
#[derive(Debug, Default)]
struct ConsoleGlobe;

impl RenderSurface for ConsoleGlobe {
    fn render(&self, point: Coord, arcs: &[ArcSegment]) {
        debug!("draw point {} with {} arcs", point, arcs.len());
    }

    fn set_view(&self, center: Coord, transition: Duration) {
        debug!("viewport -> {} over {:?}", center, transition);
    }
}

/// Start the live tracking loop and print every state change.
///
#[tracing::instrument(skip(sources))]
pub async fn track(sources: &Sources, opts: &TrackOpts) -> Result<()> {
    trace!("track");

    let positions = OpenNotify::new().load(sources.site("opennotify")?).clone();
    let geocoder = Nominatim::new().load(sources.site("nominatim")?).clone();

    let topts = TrackerOpts {
        period: Duration::from_secs(opts.period),
        follow: !opts.no_follow,
        ..TrackerOpts::default()
    };
    let handle = Tracker::new(positions, geocoder, ConsoleGlobe, topts).spawn();
    let mut sub = handle.subscribe();

    eprintln!("Tracking the station every {}s, Ctrl-C to quit.", opts.period);

    // Optional deadline, otherwise run forever.
    //
    let deadline = async {
        match opts.duration {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => future::pending().await,
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            trace!("interrupted");
        },
        _ = deadline => {
            trace!("end of scheduled run");
        },
        _ = async {
            while sub.changed().await.is_ok() {
                let state = sub.borrow_and_update().clone();
                print_state(&state);
            }
        } => {},
    }

    handle.stop().await
}

/// One line per update.
///
fn print_state(state: &TrackerState) {
    match state.position {
        Some(pos) => {
            let over = if state.place.is_empty() {
                "…"
            } else {
                state.place.as_str()
            };
            println!(
                "{}  over {}  trail={} crew={} [{}]",
                pos,
                over,
                state.trajectory.len(),
                state.crew.len(),
                state.stats
            );
        }
        None => println!("waiting for first fix [{}]", state.stats),
    }
}
