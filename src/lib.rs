//! Layout animation for keyed lists.
//!
//! Re-exports the engine and configuration crates and wires a
//! [`Reconciler`] and a [`PositionTracker`] into one [`AnimatedList`]:
//!
//! ```ignore
//! let config = flip_motion::load_config(None)?;
//! let mut list = AnimatedList::from_config(container, &config)?;
//!
//! // each render pass
//! let rendered = list.render(items);
//! host.mount(rendered);
//! list.layout_changed(&host);
//!
//! // each frame
//! list.frame(&mut host);
//! for event in list.drain_events() {
//!     host.handle(event);
//! }
//! ```

use anyhow::{Context, Result};
use std::path::Path;

pub use flip_config as config;
pub use flip_engine as engine;

pub use flip_config::MotionConfig;
pub use flip_engine::animation::{
    EngineEvent, FlipEvent, FlipOptions, PositionTracker, PresenceElement, PresenceEvent,
    PresenceOptions, PresenceState, Reconciler, RenderedChild, ScaleCompensator,
};
pub use flip_engine::{LayoutHost, StyleWrite};

use flip_engine::animation::{AnimationId, Clock, NodeId, SystemClock};

/// Load `path` (or `flip.toml` when `None`, falling back to defaults) and
/// apply `FLIP_*` environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<MotionConfig> {
    let mut config = match path {
        Some(path) => MotionConfig::load_from_file(path)
            .with_context(|| format!("loading motion config from {}", path.display()))?,
        None => MotionConfig::load_or_default(),
    };
    config.merge_with_env();
    Ok(config)
}

/// Presence and position tracking for one mounted keyed list.
#[derive(Debug)]
pub struct AnimatedList<E, C: Clock = SystemClock> {
    reconciler: Reconciler<E>,
    tracker: PositionTracker<C>,
}

impl<E: PresenceElement> AnimatedList<E> {
    pub fn from_config(container: NodeId, config: &MotionConfig) -> Result<Self> {
        Self::from_config_with_clock(container, config, SystemClock::default())
    }
}

impl<E: PresenceElement, C: Clock> AnimatedList<E, C> {
    pub fn from_config_with_clock(container: NodeId, config: &MotionConfig, clock: C) -> Result<Self> {
        let presence =
            PresenceOptions::from_config(&config.presence).context("invalid [presence] config")?;
        let tracker = PositionTracker::from_config_with_clock(container, config, clock)
            .context("invalid [flip] config")?;
        Ok(Self {
            reconciler: Reconciler::new(presence),
            tracker,
        })
    }

    /// Decide what to render for `target`.
    pub fn render(&mut self, target: Vec<E>) -> &[RenderedChild<E>] {
        self.reconciler.reconcile(target)
    }

    /// The host has laid out the last rendered list.
    pub fn layout_changed(&mut self, host: &impl LayoutHost) {
        self.tracker.trigger(host);
    }

    pub fn frame(&mut self, host: &mut impl LayoutHost) {
        self.tracker.frame(host);
    }

    pub fn has_pending_frame(&self) -> bool {
        self.tracker.has_pending_frame()
    }

    pub fn on_transition_end(&mut self, host: &impl LayoutHost, node: NodeId) {
        self.tracker.on_transition_end(host, node);
    }

    pub fn on_resize(&mut self) {
        self.tracker.on_resize();
    }

    pub fn poll_resize(&mut self, host: &impl LayoutHost) -> bool {
        self.tracker.poll_resize(host)
    }

    pub fn complete_enter(&mut self, key: &str, animation_id: AnimationId) -> bool {
        self.reconciler.complete_enter(key, animation_id)
    }

    pub fn complete_exit(&mut self, key: &str, animation_id: AnimationId) -> bool {
        self.reconciler.complete_exit(key, animation_id)
    }

    /// Presence events first, then position events.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        let mut events: Vec<EngineEvent> = self.reconciler.drain_events().collect();
        events.extend(self.tracker.drain_events());
        events
    }

    pub fn reconciler(&self) -> &Reconciler<E> {
        &self.reconciler
    }

    pub fn tracker(&self) -> &PositionTracker<C> {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut PositionTracker<C> {
        &mut self.tracker
    }

    /// Release pending frame work and timers.
    pub fn detach(&mut self) {
        self.tracker.detach();
    }
}
