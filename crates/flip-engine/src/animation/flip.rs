//! Position tracker: animates keyed children across layout changes.
//!
//! Each [`PositionTracker::trigger`] runs one FLIP pass over the children of
//! a container:
//!
//! 1. Snapshot the position cache, queue an invert task for the next frame,
//!    and refresh the cache for every child that is not in flight.
//! 2. Next frame: read the new geometry of every cached child, then write a
//!    zero-duration `translate(dx, dy) scale(sx, sy)` that pins it at its old
//!    box. All reads happen before any write.
//! 3. The frame after: clear the transform with the configured timing and
//!    mark the child in flight. The host interpolates back to identity.
//!
//! Children whose box did not change get no writes at all: a no-op transition
//! never reports its end, so they would otherwise stay in flight.
//!
//! `on_transition_end` records the settled box and clears the in-flight mark.
//! Viewport resizes are debounced and resync the cache without animating.
//!
//! ```ignore
//! use flip_engine::animation::flip::{FlipOptions, PositionTracker};
//! use flip_engine::animation::types::GeometryRecord;
//! use flip_engine::testing::FakeHost;
//!
//! let mut host = FakeHost::new();
//! let list = host.add_container(GeometryRecord::new(0.0, 0.0, 300.0, 50.0));
//! let a = host.add_child(list, Some("a"), GeometryRecord::new(0.0, 0.0, 50.0, 50.0));
//!
//! let mut tracker = PositionTracker::new(list, FlipOptions::default());
//! tracker.trigger(&host);
//! tracker.frame(&mut host);
//!
//! host.set_geometry(a, GeometryRecord::new(100.0, 0.0, 50.0, 50.0));
//! tracker.trigger(&host);
//! tracker.frame(&mut host); // invert
//! tracker.frame(&mut host); // play
//! assert!(tracker.is_in_flight(a));
//! ```

use flip_config::{FlipConfig, MotionConfig};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, trace};

use super::easing::EasingFunction;
use super::events::{EngineEvent, EventQueue, FlipEvent};
use super::position_cache::PositionCache;
use super::schedule::{Clock, Debouncer, FrameQueue, SystemClock};
use super::transform::{FlipTransform, TransformOrigin};
use super::transition::TransitionTiming;
use super::types::{ElementKey, GeometryRecord, NodeId};
use crate::error::{Result, StyleParseError};
use crate::host::{LayoutHost, StyleWrite, TransformWrite};

/// Quiet period before a resize resyncs the cache.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: f64 = 500.0;

/// Inverts closer than this to identity are not written.
const IDENTITY_EPSILON: f64 = 1e-6;

/// Tuning of the play step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlipOptions {
    pub transition_ms: f64,
    pub delay_ms: f64,
    pub easing: EasingFunction,
    pub transform_origin: TransformOrigin,
}

impl Default for FlipOptions {
    fn default() -> Self {
        Self {
            transition_ms: 500.0,
            delay_ms: 0.0,
            easing: EasingFunction::Ease,
            transform_origin: TransformOrigin::center(),
        }
    }
}

impl FlipOptions {
    /// Validate and convert the `[flip]` config section.
    pub fn from_config(config: &FlipConfig) -> Result<Self> {
        Ok(Self {
            transition_ms: checked_duration(config.transition_ms)?,
            delay_ms: checked_duration(config.delay_ms)?,
            easing: EasingFunction::parse_css(&config.easing)?,
            transform_origin: TransformOrigin::parse_css(&config.transform_origin)?,
        })
    }

    /// Timing written by the play step.
    pub fn timing(&self) -> TransitionTiming {
        TransitionTiming::new(self.transition_ms)
            .with_delay(self.delay_ms)
            .with_easing(self.easing)
    }
}

fn checked_duration(ms: f64) -> Result<f64> {
    if ms.is_finite() && ms >= 0.0 {
        Ok(ms)
    } else {
        Err(StyleParseError::InvalidDuration(ms))
    }
}

/// Cached geometry of each keyed child, in child order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PositionReport {
    pub entries: Vec<PositionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionEntry {
    pub key: ElementKey,
    pub geometry: Option<GeometryRecord>,
}

impl PositionReport {
    pub fn get(&self, key: &str) -> Option<&GeometryRecord> {
        self.entries
            .iter()
            .find(|entry| entry.key.as_str() == key)
            .and_then(|entry| entry.geometry.as_ref())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Receives a [`PositionReport`] after every pass.
pub type PositionReporter = Box<dyn FnMut(&PositionReport)>;

#[derive(Debug)]
enum FlipTask {
    Invert { snapshot: PositionCache },
    Play { targets: Vec<(NodeId, ElementKey)> },
}

/// FLIP engine for the children of one container.
pub struct PositionTracker<C: Clock = SystemClock> {
    container: NodeId,
    options: FlipOptions,
    cache: PositionCache,
    in_flight: HashSet<NodeId>,
    frames: FrameQueue<FlipTask>,
    resize: Debouncer<C>,
    events: EventQueue,
    report_positions: bool,
    reporter: Option<PositionReporter>,
    attached: bool,
}

impl PositionTracker<SystemClock> {
    pub fn new(container: NodeId, options: FlipOptions) -> Self {
        Self::with_clock(container, options, SystemClock::default())
    }

    /// Build from a loaded [`MotionConfig`].
    pub fn from_config(container: NodeId, config: &MotionConfig) -> Result<Self> {
        Self::from_config_with_clock(container, config, SystemClock::default())
    }
}

impl<C: Clock> PositionTracker<C> {
    pub fn with_clock(container: NodeId, options: FlipOptions, clock: C) -> Self {
        Self {
            container,
            options,
            cache: PositionCache::new(),
            in_flight: HashSet::new(),
            frames: FrameQueue::new(),
            resize: Debouncer::new(clock, DEFAULT_RESIZE_DEBOUNCE_MS),
            events: EventQueue::new(),
            report_positions: false,
            reporter: None,
            attached: true,
        }
    }

    pub fn from_config_with_clock(
        container: NodeId,
        config: &MotionConfig,
        clock: C,
    ) -> Result<Self> {
        let options = FlipOptions::from_config(&config.flip)?;
        let mut tracker = Self::with_clock(container, options, clock);
        tracker
            .resize
            .set_window_ms(checked_duration(config.resize.debounce_ms)?);
        tracker.report_positions = config.debug.report_positions;
        Ok(tracker)
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn options(&self) -> &FlipOptions {
        &self.options
    }

    /// Applies from the next play step on.
    pub fn set_options(&mut self, options: FlipOptions) {
        self.options = options;
    }

    pub fn set_resize_debounce_ms(&mut self, window_ms: f64) {
        self.resize.set_window_ms(window_ms);
    }

    pub fn cache(&self) -> &PositionCache {
        &self.cache
    }

    pub fn is_in_flight(&self, node: NodeId) -> bool {
        self.in_flight.contains(&node)
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether the host should schedule a frame for this tracker.
    pub fn has_pending_frame(&self) -> bool {
        self.frames.has_pending()
    }

    /// Frame tasks requested over the tracker's lifetime.
    pub fn frame_requests(&self) -> u64 {
        self.frames.requested_count()
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = EngineEvent> + '_ {
        self.events.drain()
    }

    /// Install a report hook and enable reporting. `None` removes the hook;
    /// reports are then only logged while reporting stays enabled.
    pub fn set_position_reporter(&mut self, reporter: Option<PositionReporter>) {
        if reporter.is_some() {
            self.report_positions = true;
        }
        self.reporter = reporter;
    }

    pub fn set_report_positions(&mut self, enabled: bool) {
        self.report_positions = enabled;
    }

    /// Start a pass after the container's content changed.
    pub fn trigger(&mut self, host: &impl LayoutHost) {
        if !self.attached {
            trace!("trigger on detached tracker ignored");
            return;
        }
        let Some(children) = host.children(self.container) else {
            debug!(container = ?self.container, "container not mounted, skipping pass");
            return;
        };
        if children.is_empty() {
            trace!("container has no children, skipping pass");
            return;
        }

        // Nodes unmounted mid-transition never report their end.
        self.in_flight.retain(|node| children.contains(node));

        let snapshot = self.cache.snapshot();
        self.frames.request(FlipTask::Invert { snapshot });

        let refreshed = self.refresh(host, &children, false);
        trace!(children = children.len(), refreshed, "flip pass scheduled");

        self.report(host, &children);
    }

    /// Run the tasks due this frame.
    pub fn frame(&mut self, host: &mut impl LayoutHost) {
        for task in self.frames.take_due() {
            match task {
                FlipTask::Invert { snapshot } => self.invert(host, &snapshot),
                FlipTask::Play { targets } => self.play(host, targets),
            }
        }
    }

    /// The host finished a transition on `node`.
    pub fn on_transition_end(&mut self, host: &impl LayoutHost, node: NodeId) {
        if !self.attached {
            return;
        }
        let Some(key) = host.element_key(node) else {
            trace!(?node, "transition end on unkeyed node ignored");
            return;
        };
        let Some(geometry) = host.geometry(node) else {
            debug!(%key, "transition ended on unmounted node");
            self.in_flight.remove(&node);
            return;
        };

        self.cache.insert(key.clone(), geometry);
        self.in_flight.remove(&node);
        trace!(%key, "settled");
        self.events.push(FlipEvent::Settled { key, geometry });
    }

    /// The viewport was resized. Restarts the debounce window.
    pub fn on_resize(&mut self) {
        if self.attached {
            self.resize.request();
        }
    }

    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// Time until a pending resize resync, for hosts arming a timer.
    pub fn resize_remaining_ms(&self) -> Option<f64> {
        self.resize.remaining_ms()
    }

    /// Resync the cache if the resize debounce window has elapsed.
    pub fn poll_resize(&mut self, host: &impl LayoutHost) -> bool {
        if !self.resize.poll() {
            return false;
        }
        let Some(children) = host.children(self.container) else {
            debug!(container = ?self.container, "container gone before resize resync");
            return false;
        };

        let count = self.refresh(host, &children, true);
        debug!(count, "position cache resynced after resize");
        self.events.push(FlipEvent::CacheResynced { count });
        true
    }

    /// Release pending frame work and the resize timer. Later calls are
    /// ignored.
    pub fn detach(&mut self) {
        self.frames.cancel_all();
        self.resize.cancel();
        self.in_flight.clear();
        self.attached = false;
        debug!(container = ?self.container, "position tracker detached");
    }

    fn refresh(
        &mut self,
        host: &impl LayoutHost,
        children: &[NodeId],
        include_in_flight: bool,
    ) -> usize {
        let mut count = 0;
        for &node in children {
            let Some(key) = host.element_key(node) else {
                continue;
            };
            if !include_in_flight && self.in_flight.contains(&node) {
                trace!(%key, "in flight, keeping cached position");
                continue;
            }
            let Some(geometry) = host.geometry(node) else {
                continue;
            };
            self.cache.insert(key, geometry);
            count += 1;
        }
        count
    }

    fn invert(&mut self, host: &mut impl LayoutHost, snapshot: &PositionCache) {
        let Some(children) = host.children(self.container) else {
            debug!(container = ?self.container, "container unmounted before invert");
            return;
        };

        // Read every box before writing any transform.
        let measured: Vec<(NodeId, ElementKey, FlipTransform)> = children
            .iter()
            .filter_map(|&node| {
                let key = host.element_key(node)?;
                let cached = snapshot.get(key.as_str())?;
                let current = host.geometry(node)?;
                let transform = FlipTransform::between(cached, &current);
                if transform.is_identity(IDENTITY_EPSILON) {
                    trace!(%key, "unchanged, not inverting");
                    return None;
                }
                Some((node, key, transform))
            })
            .collect();

        if measured.is_empty() {
            trace!("no moved children to invert");
            return;
        }

        let mut targets = Vec::with_capacity(measured.len());
        for (node, key, transform) in measured {
            let write = StyleWrite::new()
                .transform_origin(self.options.transform_origin.clone())
                .transform(TransformWrite::Flip(transform))
                .transition(TransitionTiming::instant());
            host.apply_style(node, &write);
            trace!(%key, %transform, "inverted");
            self.events.push(FlipEvent::Inverted {
                key: key.clone(),
                transform,
            });
            targets.push((node, key));
        }

        self.frames.request(FlipTask::Play { targets });
    }

    fn play(&mut self, host: &mut impl LayoutHost, targets: Vec<(NodeId, ElementKey)>) {
        let timing = self.options.timing();
        let write = StyleWrite::new()
            .transform(TransformWrite::Clear)
            .transition(timing);

        for (node, key) in targets {
            if host.geometry(node).is_none() {
                debug!(%key, "node unmounted before play");
                continue;
            }
            host.apply_style(node, &write);
            self.in_flight.insert(node);
            self.events.push(FlipEvent::Played { key });
        }
    }

    fn report(&mut self, host: &impl LayoutHost, children: &[NodeId]) {
        if !self.report_positions {
            return;
        }
        let entries = children
            .iter()
            .filter_map(|&node| host.element_key(node))
            .map(|key| PositionEntry {
                geometry: self.cache.get(key.as_str()).copied(),
                key,
            })
            .collect();
        let report = PositionReport { entries };

        match self.reporter.as_mut() {
            Some(reporter) => reporter(&report),
            None => match report.to_json() {
                Ok(json) => debug!(report = %json, "positions"),
                Err(err) => debug!(%err, "failed to serialize position report"),
            },
        }
    }
}

impl<C: Clock> fmt::Debug for PositionTracker<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionTracker")
            .field("container", &self.container)
            .field("options", &self.options)
            .field("cached", &self.cache.len())
            .field("in_flight", &self.in_flight.len())
            .field("pending_frames", &self.frames.pending_len())
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::schedule::ManualClock;
    use crate::testing::{FakeHost, HostAccess};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn square(left: f64) -> GeometryRecord {
        GeometryRecord::new(left, 0.0, 50.0, 50.0)
    }

    fn setup() -> (FakeHost, NodeId, NodeId, PositionTracker<ManualClock>, ManualClock) {
        let mut host = FakeHost::new();
        let root = host.add_container(GeometryRecord::new(0.0, 0.0, 400.0, 50.0));
        let a = host.add_child(root, Some("a"), square(0.0));
        let clock = ManualClock::new();
        let tracker = PositionTracker::with_clock(root, FlipOptions::default(), clock.clone());
        (host, root, a, tracker, clock)
    }

    /// Record the initial layout so the next trigger has something to diff.
    fn prime(host: &mut FakeHost, tracker: &mut PositionTracker<ManualClock>) {
        tracker.trigger(&*host);
        tracker.frame(&mut *host);
        host.clear_writes();
        tracker.drain_events().for_each(drop);
    }

    #[test]
    fn test_first_pass_only_records() {
        let (mut host, _root, a, mut tracker, _clock) = setup();

        tracker.trigger(&host);
        assert_eq!(tracker.cache().get("a"), Some(&square(0.0)));
        assert!(tracker.has_pending_frame());

        tracker.frame(&mut host);
        assert!(host.writes_for(a).is_empty());
        assert!(!tracker.has_pending_frame());
    }

    #[test]
    fn test_move_inverts_then_plays() {
        let (mut host, _root, a, mut tracker, _clock) = setup();
        prime(&mut host, &mut tracker);

        host.set_geometry(a, square(100.0));
        tracker.trigger(&host);
        // Refreshed synchronously for the next diff.
        assert_eq!(tracker.cache().get("a"), Some(&square(100.0)));

        tracker.frame(&mut host);
        let invert = host.last_write(a).unwrap();
        assert_eq!(
            invert.css_declarations(),
            vec![
                ("transform-origin", "50% 50% 0".to_string()),
                ("transform", "translate(-100px, 0px) scale(1, 1)".to_string()),
                ("transition", "transform 0s".to_string()),
            ]
        );
        assert!(!tracker.is_in_flight(a));
        assert!(tracker.has_pending_frame());

        tracker.frame(&mut host);
        let play = host.last_write(a).unwrap();
        assert_eq!(play.transform, Some(TransformWrite::Clear));
        assert_eq!(
            play.transition.map(|t| t.to_css()),
            Some("transform 500ms ease 0ms, scale 500ms ease 0ms".to_string())
        );
        assert!(tracker.is_in_flight(a));

        let events: Vec<_> = tracker.drain_events().collect();
        assert!(matches!(
            events.as_slice(),
            [
                EngineEvent::Flip(FlipEvent::Inverted { .. }),
                EngineEvent::Flip(FlipEvent::Played { .. })
            ]
        ));
    }

    #[test]
    fn test_unchanged_child_is_not_animated() {
        let (mut host, root, a, mut tracker, _clock) = setup();
        let b = host.add_child(root, Some("b"), square(60.0));
        prime(&mut host, &mut tracker);

        host.set_geometry(b, square(120.0));
        tracker.trigger(&host);
        tracker.frame(&mut host);
        tracker.frame(&mut host);

        assert!(host.writes_for(a).is_empty());
        assert!(!tracker.is_in_flight(a));
        assert!(tracker.is_in_flight(b));
        assert!(tracker.events().events_for_key("a").is_empty());

        // Nothing moved at all: no play frame is requested.
        tracker.on_transition_end(&host, b);
        let requests = tracker.frame_requests();
        tracker.trigger(&host);
        tracker.frame(&mut host);
        assert_eq!(tracker.frame_requests(), requests + 1);
        assert!(!tracker.has_pending_frame());
    }

    #[test]
    fn test_invert_reads_all_boxes_before_writing() {
        let (mut host, root, a, mut tracker, _clock) = setup();
        let b = host.add_child(root, Some("b"), square(60.0));
        let c = host.add_child(root, Some("c"), square(120.0));
        prime(&mut host, &mut tracker);

        host.set_geometry(a, square(60.0));
        host.set_geometry(b, square(120.0));
        host.set_geometry(c, square(0.0));
        tracker.trigger(&host);
        host.clear_writes();
        tracker.frame(&mut host);

        let accesses = host.accesses();
        let first_write = accesses
            .iter()
            .position(|access| matches!(access, HostAccess::Write(_)))
            .unwrap();
        assert!(
            accesses[first_write..]
                .iter()
                .all(|access| matches!(access, HostAccess::Write(_))),
            "read after write: {accesses:?}"
        );
        assert_eq!(
            accesses[..first_write].to_vec(),
            vec![HostAccess::Read(a), HostAccess::Read(b), HostAccess::Read(c)]
        );
        assert_eq!(accesses.len() - first_write, 3);
    }

    #[test]
    fn test_unmounted_in_flight_nodes_are_forgotten() {
        let (mut host, root, a, mut tracker, _clock) = setup();
        prime(&mut host, &mut tracker);

        for round in 0..5 {
            let key = format!("temp-{round}");
            let node = host.add_child(root, Some(key.as_str()), square(60.0));
            tracker.trigger(&host);
            tracker.frame(&mut host);
            host.set_geometry(node, square(300.0));
            tracker.trigger(&host);
            tracker.frame(&mut host);
            tracker.frame(&mut host);
            assert!(tracker.is_in_flight(node));
            host.unmount(node);
        }

        host.set_geometry(a, square(30.0));
        tracker.trigger(&host);
        assert_eq!(tracker.in_flight_count(), 0);

        tracker.frame(&mut host);
        tracker.frame(&mut host);
        assert_eq!(tracker.in_flight_count(), 1);
        assert!(tracker.is_in_flight(a));
    }

    #[test]
    fn test_in_flight_child_keeps_cache_until_transition_end() {
        let (mut host, _root, a, mut tracker, _clock) = setup();
        prime(&mut host, &mut tracker);

        host.set_geometry(a, square(100.0));
        tracker.trigger(&host);
        tracker.frame(&mut host);
        tracker.frame(&mut host);
        assert!(tracker.is_in_flight(a));

        host.set_geometry(a, square(200.0));
        tracker.trigger(&host);
        assert_eq!(tracker.cache().get("a"), Some(&square(100.0)));

        tracker.on_transition_end(&host, a);
        assert!(!tracker.is_in_flight(a));
        assert_eq!(tracker.cache().get("a"), Some(&square(200.0)));
        assert!(
            tracker
                .events()
                .iter()
                .any(|e| matches!(e, EngineEvent::Flip(FlipEvent::Settled { .. })))
        );
    }

    #[test]
    fn test_unkeyed_children_are_ignored() {
        let (mut host, root, _a, mut tracker, _clock) = setup();
        let loose = host.add_child(root, None, square(60.0));
        prime(&mut host, &mut tracker);

        host.set_geometry(loose, square(120.0));
        tracker.trigger(&host);
        tracker.frame(&mut host);
        tracker.frame(&mut host);

        assert!(host.writes_for(loose).is_empty());
        assert_eq!(tracker.cache().len(), 1);

        tracker.on_transition_end(&host, loose);
        assert_eq!(tracker.cache().len(), 1);
    }

    #[test]
    fn test_missing_or_empty_container_is_noop() {
        let mut host = FakeHost::new();
        let empty = host.add_container(GeometryRecord::default());

        let mut unmounted = PositionTracker::new(NodeId(404), FlipOptions::default());
        unmounted.trigger(&host);
        assert_eq!(unmounted.frame_requests(), 0);

        let mut tracker = PositionTracker::new(empty, FlipOptions::default());
        tracker.trigger(&host);
        tracker.frame(&mut host);
        assert_eq!(tracker.frame_requests(), 0);
        assert!(host.writes().is_empty());
    }

    #[test]
    fn test_zero_width_skips_scale_term() {
        let (mut host, _root, a, mut tracker, _clock) = setup();
        prime(&mut host, &mut tracker);

        host.set_geometry(a, GeometryRecord::new(0.0, 0.0, 0.0, 25.0));
        tracker.trigger(&host);
        tracker.frame(&mut host);

        let Some(TransformWrite::Flip(transform)) = host.last_write(a).unwrap().transform else {
            panic!("expected an invert write");
        };
        assert_eq!(transform.scale_x, 1.0);
        assert_eq!(transform.scale_y, 2.0);
    }

    #[test]
    fn test_zero_transition_is_honored() {
        let (mut host, _root, a, mut tracker, _clock) = setup();
        tracker.set_options(FlipOptions {
            transition_ms: 0.0,
            ..FlipOptions::default()
        });
        prime(&mut host, &mut tracker);

        host.set_geometry(a, square(10.0));
        tracker.trigger(&host);
        tracker.frame(&mut host);
        tracker.frame(&mut host);

        let play = host.last_write(a).unwrap();
        assert_eq!(play.transition.map(|t| t.duration_ms), Some(0.0));
    }

    #[test]
    fn test_resize_is_debounced_and_idempotent() {
        let (mut host, _root, a, mut tracker, clock) = setup();
        prime(&mut host, &mut tracker);

        host.set_geometry(a, square(30.0));
        tracker.on_resize();
        clock.advance(400.0);
        tracker.on_resize();
        clock.advance(400.0);
        assert!(!tracker.poll_resize(&host));
        assert_eq!(tracker.cache().get("a"), Some(&square(0.0)));

        clock.advance(100.0);
        assert!(tracker.poll_resize(&host));
        assert_eq!(tracker.cache().get("a"), Some(&square(30.0)));

        let before = tracker.cache().clone();
        for _ in 0..3 {
            tracker.on_resize();
            clock.advance(500.0);
            assert!(tracker.poll_resize(&host));
        }
        assert_eq!(tracker.cache(), &before);
        assert!(host.writes().is_empty());
        assert!(!tracker.has_pending_frame());
    }

    #[test]
    fn test_detach_releases_pending_work() {
        let (mut host, _root, a, mut tracker, clock) = setup();
        prime(&mut host, &mut tracker);

        host.set_geometry(a, square(100.0));
        tracker.trigger(&host);
        tracker.on_resize();
        tracker.detach();

        assert!(!tracker.has_pending_frame());
        assert!(!tracker.resize_pending());
        clock.advance(1_000.0);
        assert!(!tracker.poll_resize(&host));

        tracker.frame(&mut host);
        tracker.trigger(&host);
        assert!(host.writes().is_empty());
        assert!(!tracker.has_pending_frame());
    }

    #[test]
    fn test_position_reporter() {
        let (mut host, root, _a, mut tracker, _clock) = setup();
        host.add_child(root, Some("b"), square(60.0));

        let reports = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&reports);
        tracker.set_position_reporter(Some(Box::new(move |report: &PositionReport| {
            sink.borrow_mut().push(report.clone());
        })));

        tracker.trigger(&host);

        let reports = reports.borrow();
        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].key.as_str(), "a");
        assert_eq!(report.get("b"), Some(&square(60.0)));

        let json = report.to_json().unwrap();
        assert!(json.starts_with("{\"entries\":[{\"key\":\"a\""));
    }

    #[test]
    fn test_options_from_config() {
        let config = FlipConfig {
            transition_ms: 250.0,
            delay_ms: 10.0,
            easing: "ease-in-out".to_string(),
            transform_origin: "top left".to_string(),
        };
        let options = FlipOptions::from_config(&config).unwrap();
        assert_eq!(options.easing, EasingFunction::EaseInOut);
        assert_eq!(options.transform_origin.as_str(), "top left");
        assert_eq!(
            options.timing().to_css(),
            "transform 250ms ease-in-out 10ms, scale 250ms ease-in-out 10ms"
        );

        let bad_easing = FlipConfig {
            easing: "bouncy".to_string(),
            ..FlipConfig::default()
        };
        assert!(matches!(
            FlipOptions::from_config(&bad_easing),
            Err(StyleParseError::UnknownEasing(_))
        ));

        let mixed = FlipConfig {
            transform_origin: "right 10px".to_string(),
            ..FlipConfig::default()
        };
        let options = FlipOptions::from_config(&mixed).unwrap();
        assert_eq!(options.transform_origin.to_css(), "right 10px");

        let bad_origin = FlipConfig {
            transform_origin: "sideways".to_string(),
            ..FlipConfig::default()
        };
        assert!(matches!(
            FlipOptions::from_config(&bad_origin),
            Err(StyleParseError::InvalidOrigin(_))
        ));

        let negative = FlipConfig {
            transition_ms: -1.0,
            ..FlipConfig::default()
        };
        assert_eq!(
            FlipOptions::from_config(&negative),
            Err(StyleParseError::InvalidDuration(-1.0))
        );
    }

    #[test]
    fn test_tracker_from_config() {
        let mut config = MotionConfig::default();
        config.resize.debounce_ms = 100.0;
        config.debug.report_positions = true;

        let clock = ManualClock::new();
        let mut tracker =
            PositionTracker::from_config_with_clock(NodeId(1), &config, clock.clone()).unwrap();
        tracker.on_resize();
        assert_eq!(tracker.resize_remaining_ms(), Some(100.0));
    }
}
