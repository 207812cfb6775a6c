//! Layout animation for keyed lists.
//!
//! This module provides:
//! - **Position tracking**: FLIP transitions between a cached layout and the new one
//! - **Scale compensation**: inverse scaling of children under a scaling ancestor
//! - **Presence**: enter/exit reconciliation with animation-gated removal
//! - **Timing**: CSS easing functions and transition strings
//!
//! # Architecture
//!
//! ```text
//! Reconciler            decides the rendered list each pass
//!   └── PresenceEvent    enter/exit animations, rerender requests
//!
//! PositionTracker       diffs child geometry against the PositionCache
//!   ├── FrameQueue       invert → play across two frames
//!   └── Debouncer        resize resync
//!
//! ScaleCompensator      per-frame inverse scale while a PlayingFlag is set
//! ```

pub mod easing;
pub mod events;
pub mod flip;
pub mod keyframes;
pub mod position_cache;
pub mod presence;
pub mod scale;
pub mod schedule;
pub mod transform;
pub mod transition;
pub mod types;

pub use easing::{EasingFunction, StepPosition};
pub use events::{EngineEvent, EventQueue, FlipEvent, PresenceEvent};
pub use flip::{FlipOptions, PositionEntry, PositionReport, PositionReporter, PositionTracker};
pub use keyframes::{KeyframeSpec, StyleMap, StyleValue, fade_in, fade_out};
pub use position_cache::PositionCache;
pub use presence::{
    ChildRole, PresenceElement, PresenceOptions, PresenceState, Reconciler, RenderedChild,
};
pub use scale::ScaleCompensator;
pub use schedule::{Clock, Debouncer, FrameHandle, FrameQueue, ManualClock, SystemClock};
pub use transform::{FlipTransform, TransformOrigin, scale_ratio};
pub use transition::TransitionTiming;
pub use types::{AnimationId, ElementKey, GeometryRecord, NodeId, PlayingFlag};
