//! Engine events for host-side follow-up work.
//!
//! Engines never call back into the host directly. They push events onto an
//! `EventQueue` which the host drains after each call: start an enter/exit
//! animation, stop an interrupted one, re-render the list.
//!
//! ```ignore
//! reconciler.reconcile(items);
//! for event in reconciler.drain_events() {
//!     match event {
//!         EngineEvent::Presence(PresenceEvent::ExitStarted { key, animation_id, keyframes }) => {
//!             host.play_keyframes(&key, animation_id, &keyframes);
//!         }
//!         EngineEvent::Presence(PresenceEvent::RerenderRequested) => host.rerender(),
//!         _ => {}
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::keyframes::KeyframeSpec;
use super::transform::FlipTransform;
use super::types::{AnimationId, ElementKey, GeometryRecord};

/// Emitted by the position tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlipEvent {
    /// Corrective transform applied with zero duration.
    Inverted {
        key: ElementKey,
        transform: FlipTransform,
    },
    /// Transform cleared with the configured timing; the node is in flight.
    Played { key: ElementKey },
    /// Transition finished and the settled position was cached.
    Settled {
        key: ElementKey,
        geometry: GeometryRecord,
    },
    /// Debounced resize refreshed `count` cache entries.
    CacheResynced { count: usize },
}

impl FlipEvent {
    pub fn key(&self) -> Option<&ElementKey> {
        match self {
            Self::Inverted { key, .. } | Self::Played { key } | Self::Settled { key, .. } => {
                Some(key)
            }
            Self::CacheResynced { .. } => None,
        }
    }
}

/// Emitted by the enter/exit reconciler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PresenceEvent {
    /// A key was mounted after the first paint; play its enter keyframes.
    EnterStarted {
        key: ElementKey,
        animation_id: AnimationId,
        keyframes: KeyframeSpec,
    },
    /// A key left the target list; play its exit keyframes.
    ExitStarted {
        key: ElementKey,
        animation_id: AnimationId,
        keyframes: KeyframeSpec,
    },
    /// A key re-entered before its exit finished; stop the exit animation.
    ExitCancelled {
        key: ElementKey,
        animation_id: AnimationId,
    },
    /// The exit animation finished and the key was removed.
    ExitCompleted {
        key: ElementKey,
        animation_id: AnimationId,
    },
    /// The exit was finished early because another element took over its
    /// shared identity; jump the animation to its end state.
    ExitForceCompleted {
        key: ElementKey,
        animation_id: AnimationId,
    },
    /// No exits remain; the list should render its latest target list.
    RerenderRequested,
}

impl PresenceEvent {
    pub fn key(&self) -> Option<&ElementKey> {
        match self {
            Self::EnterStarted { key, .. }
            | Self::ExitStarted { key, .. }
            | Self::ExitCancelled { key, .. }
            | Self::ExitCompleted { key, .. }
            | Self::ExitForceCompleted { key, .. } => Some(key),
            Self::RerenderRequested => None,
        }
    }
}

/// Wrapper over both event families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineEvent {
    Flip(FlipEvent),
    Presence(PresenceEvent),
}

impl EngineEvent {
    pub fn key(&self) -> Option<&ElementKey> {
        match self {
            Self::Flip(e) => e.key(),
            Self::Presence(e) => e.key(),
        }
    }

    pub fn is_rerender_request(&self) -> bool {
        matches!(self, Self::Presence(PresenceEvent::RerenderRequested))
    }
}

impl From<FlipEvent> for EngineEvent {
    fn from(event: FlipEvent) -> Self {
        Self::Flip(event)
    }
}

impl From<PresenceEvent> for EngineEvent {
    fn from(event: PresenceEvent) -> Self {
        Self::Presence(event)
    }
}

/// FIFO of pending engine events.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<EngineEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: impl Into<EngineEvent>) {
        self.events.push_back(event.into());
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn pop(&mut self) -> Option<EngineEvent> {
        self.events.pop_front()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = EngineEvent> + '_ {
        self.events.drain(..)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EngineEvent> {
        self.events.iter()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn events_for_key(&self, key: &str) -> Vec<&EngineEvent> {
        self.events
            .iter()
            .filter(|e| e.key().is_some_and(|k| k.as_str() == key))
            .collect()
    }
}
