//! The position poller and its state.
//!
//! A single task owns everything: the timer tick fetches the position,
//! pushes the trajectory and decides about recentering; reverse lookups run
//! on the side and come back as messages tagged with an issue number so a
//! late reply can never overwrite a fresher one.  Consumers watch the state
//! through a subscription, they never touch it directly.
//!

use std::fmt::{Display, Formatter};
use std::time::Duration;

use eyre::Result;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, trace, warn};

use cosmicview_common::Coord;
use cosmicview_sources::{Astronaut, Nominatim, OpenNotify};

use crate::{RenderSurface, TrajectoryBuffer};

/// Default polling period.
const DEF_PERIOD: Duration = Duration::from_secs(5);
/// Viewport move animation length.
const DEF_TRANSITION: Duration = Duration::from_millis(1000);
/// What we display when reverse geocoding fails.
const UNKNOWN_AREA: &str = "Unknown Area";

/// Message queue depth, lookups are slow and small.
const QUEUE: usize = 32;

/// Everything a consumer can know about the tracked station.
///
#[derive(Clone, Debug, Default)]
pub struct TrackerState {
    /// Latest known position; stays at the previous value when a poll fails
    pub position: Option<Coord>,
    /// Short trail behind the station
    pub trajectory: TrajectoryBuffer,
    /// Latest *completed* reverse lookup, may lag one poll behind `position`
    pub place: String,
    /// Crew aboard, fetched once at activation
    pub crew: Vec<Astronaut>,
    /// Whether the viewport chases the station
    pub follow: bool,
    /// Counters
    pub stats: Stats,
}

/// Statistics gathering struct.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct Stats {
    /// Successful polls
    pub ticks: u32,
    /// Failed polls
    pub err: u32,
    /// Reverse lookups discarded for being stale
    pub stale: u32,
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ticks={} errors={} stale={}",
            self.ticks, self.err, self.stale
        )
    }
}

/// Knobs for the runtime, defaults match the production cadence.
///
#[derive(Clone, Copy, Debug)]
pub struct TrackerOpts {
    /// Time between two polls
    pub period: Duration,
    /// Animation length for viewport moves
    pub transition: Duration,
    /// Initial follow mode
    pub follow: bool,
}

impl Default for TrackerOpts {
    fn default() -> Self {
        TrackerOpts {
            period: DEF_PERIOD,
            transition: DEF_TRANSITION,
            follow: true,
        }
    }
}

/// Messages into the owning task.
///
#[derive(Debug)]
enum TrackerMsg {
    /// Toggle follow mode
    Follow(bool),
    /// Completed reverse lookup, tagged with its issue number
    Place { seq: u64, name: String },
    /// Shut the loop down
    Stop,
}

/// Builder side of the runtime.
///
#[derive(Debug)]
pub struct Tracker<R: RenderSurface> {
    positions: OpenNotify,
    geocoder: Nominatim,
    render: R,
    opts: TrackerOpts,
}

impl<R: RenderSurface + 'static> Tracker<R> {
    pub fn new(positions: OpenNotify, geocoder: Nominatim, render: R, opts: TrackerOpts) -> Self {
        Tracker {
            positions,
            geocoder,
            render,
            opts,
        }
    }

    /// Start the polling task.  The first poll happens right away, then on
    /// every period until `stop()`.
    ///
    pub fn spawn(self) -> TrackerHandle {
        let state = TrackerState {
            follow: self.opts.follow,
            ..TrackerState::default()
        };
        let (state_tx, state_rx) = watch::channel(state.clone());
        let (msg_tx, msg_rx) = mpsc::channel(QUEUE);

        let rt = Runtime {
            positions: self.positions,
            geocoder: self.geocoder,
            render: self.render,
            opts: self.opts,
            state,
            state_tx,
            msg_tx: msg_tx.clone(),
            geo_seq: 0,
        };
        let task = tokio::spawn(rt.run(msg_rx));

        TrackerHandle {
            state: state_rx,
            msg: msg_tx,
            task,
        }
    }
}

/// What the outside world holds on to.
///
#[derive(Debug)]
pub struct TrackerHandle {
    state: watch::Receiver<TrackerState>,
    msg: mpsc::Sender<TrackerMsg>,
    task: JoinHandle<()>,
}

impl TrackerHandle {
    /// Subscription on the state, one snapshot per change.
    ///
    pub fn subscribe(&self) -> watch::Receiver<TrackerState> {
        self.state.clone()
    }

    /// Current snapshot.
    ///
    pub fn state(&self) -> TrackerState {
        self.state.borrow().clone()
    }

    /// Toggle follow mode.
    ///
    pub async fn follow(&self, on: bool) -> Result<()> {
        Ok(self.msg.send(TrackerMsg::Follow(on)).await?)
    }

    /// Deactivate.  No new polls are scheduled and whatever is still in
    /// flight gets discarded on arrival.
    ///
    pub async fn stop(self) -> Result<()> {
        // If the task is already gone the send fails, nothing to do then.
        //
        let _ = self.msg.send(TrackerMsg::Stop).await;
        Ok(self.task.await?)
    }
}

/// The owning task.  All state mutation happens here, timer ticks and
/// completed lookups are just interleaved events.
///
struct Runtime<R: RenderSurface> {
    positions: OpenNotify,
    geocoder: Nominatim,
    render: R,
    opts: TrackerOpts,
    state: TrackerState,
    state_tx: watch::Sender<TrackerState>,
    /// Handed out to lookup tasks so replies come back as messages
    msg_tx: mpsc::Sender<TrackerMsg>,
    /// Issue number of the most recent lookup
    geo_seq: u64,
}

impl<R: RenderSurface + 'static> Runtime<R> {
    async fn run(mut self, mut msg_rx: mpsc::Receiver<TrackerMsg>) {
        trace!("tracker::run");

        // The crew does not change between passes, fetch it once.
        //
        match self.positions.fetch_crew().await {
            Ok(crew) => {
                self.state.crew = crew;
                self.publish();
            }
            Err(e) => error!("Failed to fetch crew: {e}"),
        }

        let mut timer = tokio::time::interval(self.opts.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = timer.tick() => self.tick().await,
                msg = msg_rx.recv() => match msg {
                    Some(TrackerMsg::Stop) | None => break,
                    Some(msg) => self.handle(msg),
                },
            }
        }
        debug!("tracker stopped, {}", self.state.stats);
    }

    /// One poll: fetch, record, kick the lookup off, maybe recenter.
    ///
    async fn tick(&mut self) {
        trace!("tracker::tick");

        let pos = match self.positions.fetch_position().await {
            Ok(pos) => pos,
            Err(e) => {
                // Stale data stays on display, the next tick will try again.
                //
                error!("Position fetch failed: {e}");
                self.state.stats.err += 1;
                self.publish();
                return;
            }
        };

        self.state.position = Some(pos);
        self.state.trajectory.push(pos);
        self.state.stats.ticks += 1;

        self.resolve_place(pos);

        if self.state.follow {
            self.render.set_view(pos, self.opts.transition);
        }
        let arcs = self.state.trajectory.arcs().collect::<Vec<_>>();
        self.render.render(pos, &arcs);

        self.publish();
    }

    /// Issue a tagged lookup, the reply comes back as a message.
    ///
    fn resolve_place(&mut self, pos: Coord) {
        self.geo_seq += 1;
        let seq = self.geo_seq;
        let geocoder = self.geocoder.clone();
        let tx = self.msg_tx.clone();

        tokio::spawn(async move {
            let name = match geocoder.reverse(pos).await {
                Ok(name) => name,
                Err(e) => {
                    warn!("Reverse geocoding failed: {e}");
                    UNKNOWN_AREA.to_string()
                }
            };
            // After shutdown there is nobody left to tell, drop it.
            //
            let _ = tx.send(TrackerMsg::Place { seq, name }).await;
        });
    }

    fn handle(&mut self, msg: TrackerMsg) {
        match msg {
            TrackerMsg::Follow(on) => {
                debug!("follow = {on}");
                self.state.follow = on;
                self.publish();
            }
            TrackerMsg::Place { seq, name } => self.apply_place(seq, name),
            TrackerMsg::Stop => unreachable!("handled in run()"),
        }
    }

    /// Only the latest issued lookup may land, later-arriving older replies
    /// are discarded.
    ///
    fn apply_place(&mut self, seq: u64, name: String) {
        if seq != self.geo_seq {
            debug!("stale lookup #{seq} (latest is #{}), discarded", self.geo_seq);
            self.state.stats.stale += 1;
            return;
        }
        self.state.place = name;
        self.publish();
    }

    fn publish(&self) {
        let _ = self.state_tx.send(self.state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Records every command the runtime sends to the surface.
    ///
    #[derive(Clone, Debug, Default)]
    struct Recorder {
        views: Arc<Mutex<Vec<(Coord, Duration)>>>,
        renders: Arc<Mutex<Vec<(Coord, usize)>>>,
    }

    impl RenderSurface for Recorder {
        fn render(&self, point: Coord, arcs: &[crate::ArcSegment]) {
            self.renders.lock().unwrap().push((point, arcs.len()));
        }

        fn set_view(&self, center: Coord, transition: Duration) {
            self.views.lock().unwrap().push((center, transition));
        }
    }

    fn positions_for(server: &MockServer) -> OpenNotify {
        let mut c = OpenNotify::new();
        c.base_url = server.base_url();
        c.position = "/iss-now.json".to_string();
        c.roster = "/astros.json".to_string();
        c
    }

    fn geocoder_for(server: &MockServer) -> Nominatim {
        let mut c = Nominatim::new();
        c.base_url = server.base_url();
        c.reverse = "/reverse".to_string();
        c
    }

    fn runtime(
        positions: OpenNotify,
        geocoder: Nominatim,
        opts: TrackerOpts,
    ) -> (
        Runtime<Recorder>,
        Recorder,
        mpsc::Receiver<TrackerMsg>,
        watch::Receiver<TrackerState>,
    ) {
        let render = Recorder::default();
        let state = TrackerState {
            follow: opts.follow,
            ..TrackerState::default()
        };
        let (state_tx, state_rx) = watch::channel(state.clone());
        let (msg_tx, msg_rx) = mpsc::channel(QUEUE);
        let rt = Runtime {
            positions,
            geocoder,
            render: render.clone(),
            opts,
            state,
            state_tx,
            msg_tx,
            geo_seq: 0,
        };
        (rt, render, msg_rx, state_rx)
    }

    async fn mock_position<'a>(
        server: &'a MockServer,
        lat: &str,
        lon: &str,
    ) -> httpmock::Mock<'a> {
        server
            .mock_async(|when, then| {
                when.method(GET).path("/iss-now.json");
                then.status(200).json_body(json!({
                    "message": "success",
                    "timestamp": 1_700_000_000,
                    "iss_position": {"latitude": lat, "longitude": lon}
                }));
            })
            .await
    }

    #[tokio::test]
    async fn test_tick_success_updates_state() {
        let server = MockServer::start_async().await;
        mock_position(&server, "45.0", "-90.0").await;

        let (mut rt, render, _msg_rx, _state_rx) =
            runtime(positions_for(&server), Nominatim::new(), TrackerOpts::default());

        rt.tick().await;

        let pos = rt.state.position.unwrap();
        assert_eq!(45.0, pos.lat);
        assert_eq!(-90.0, pos.lon);
        assert_eq!(1, rt.state.trajectory.len());
        assert_eq!(1, rt.state.stats.ticks);

        // Follow is on by default so one recenter, with the default
        // transition, plus one draw.
        //
        let views = render.views.lock().unwrap();
        assert_eq!(1, views.len());
        assert_eq!(DEF_TRANSITION, views[0].1);
        assert_eq!(1, render.renders.lock().unwrap().len());
    }

    #[tokio::test]
    async fn test_tick_failure_keeps_stale_state() {
        let server = MockServer::start_async().await;
        let mut m = mock_position(&server, "10.0", "20.0").await;

        let (mut rt, _render, _msg_rx, _state_rx) =
            runtime(positions_for(&server), Nominatim::new(), TrackerOpts::default());

        rt.tick().await;
        assert_eq!(1, rt.state.trajectory.len());

        // Endpoint goes away, the previous position must survive.
        //
        m.delete_async().await;
        rt.tick().await;

        let pos = rt.state.position.unwrap();
        assert_eq!(10.0, pos.lat);
        assert_eq!(1, rt.state.trajectory.len());
        assert_eq!(1, rt.state.stats.ticks);
        assert_eq!(1, rt.state.stats.err);
    }

    #[tokio::test]
    async fn test_follow_off_never_recenters() {
        let server = MockServer::start_async().await;
        mock_position(&server, "1.0", "2.0").await;

        let opts = TrackerOpts {
            follow: false,
            ..TrackerOpts::default()
        };
        let (mut rt, render, _msg_rx, _state_rx) =
            runtime(positions_for(&server), Nominatim::new(), opts);

        for _ in 0..5 {
            rt.tick().await;
        }

        assert!(render.views.lock().unwrap().is_empty());
        assert_eq!(5, render.renders.lock().unwrap().len());
        assert_eq!(5, rt.state.trajectory.len());
    }

    #[tokio::test]
    async fn test_geocode_failure_falls_back() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/reverse");
                then.status(500);
            })
            .await;

        let (mut rt, _render, mut msg_rx, _state_rx) =
            runtime(OpenNotify::new(), geocoder_for(&server), TrackerOpts::default());

        rt.resolve_place(Coord::new(45.0, -90.0).unwrap());

        match msg_rx.recv().await.unwrap() {
            TrackerMsg::Place { seq, name } => {
                assert_eq!(1, seq);
                assert_eq!(UNKNOWN_AREA, name);
                rt.apply_place(seq, name);
            }
            msg => panic!("unexpected message {msg:?}"),
        }
        assert_eq!(UNKNOWN_AREA, rt.state.place);
    }

    #[tokio::test]
    async fn test_geocode_success_applied() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/reverse");
                then.status(200).json_body(json!({"display_name": "South Pacific Ocean"}));
            })
            .await;

        let (mut rt, _render, mut msg_rx, _state_rx) =
            runtime(OpenNotify::new(), geocoder_for(&server), TrackerOpts::default());

        rt.resolve_place(Coord::new(-40.0, -120.0).unwrap());

        match msg_rx.recv().await.unwrap() {
            TrackerMsg::Place { seq, name } => rt.apply_place(seq, name),
            msg => panic!("unexpected message {msg:?}"),
        }
        assert_eq!("South Pacific Ocean", rt.state.place);
    }

    #[tokio::test]
    async fn test_stale_geocode_discarded() {
        let (mut rt, _render, _msg_rx, _state_rx) =
            runtime(OpenNotify::new(), Nominatim::new(), TrackerOpts::default());

        // Two lookups issued, the older reply lands last and must lose.
        //
        rt.geo_seq = 2;
        rt.apply_place(2, "Fresh".to_string());
        assert_eq!("Fresh", rt.state.place);

        rt.apply_place(1, "Stale".to_string());
        assert_eq!("Fresh", rt.state.place);
        assert_eq!(1, rt.state.stats.stale);
    }

    #[tokio::test]
    async fn test_follow_toggle_publishes() {
        let (mut rt, _render, _msg_rx, state_rx) =
            runtime(OpenNotify::new(), Nominatim::new(), TrackerOpts::default());

        rt.handle(TrackerMsg::Follow(false));
        assert!(!rt.state.follow);
        assert!(!state_rx.borrow().follow);
    }

    #[tokio::test]
    async fn test_spawn_and_stop() {
        let server = MockServer::start_async().await;
        mock_position(&server, "51.0", "0.1").await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/astros.json");
                then.status(200).json_body(json!({
                    "number": 1,
                    "people": [{"name": "A", "craft": "ISS"}]
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/reverse");
                then.status(200).json_body(json!({"display_name": "Greenwich"}));
            })
            .await;

        let opts = TrackerOpts {
            period: Duration::from_millis(20),
            ..TrackerOpts::default()
        };
        let tracker = Tracker::new(
            positions_for(&server),
            geocoder_for(&server),
            Recorder::default(),
            opts,
        );
        let handle = tracker.spawn();

        tokio::time::sleep(Duration::from_millis(300)).await;

        let state = handle.state();
        assert!(state.position.is_some());
        assert!(state.trajectory.len() >= 2);
        assert_eq!(1, state.crew.len());
        assert_eq!("Greenwich", state.place);
        assert!(state.stats.ticks >= 2);

        handle.follow(false).await.unwrap();
        handle.stop().await.unwrap();
    }
}
