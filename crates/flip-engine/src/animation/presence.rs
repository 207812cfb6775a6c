//! Keyed enter/exit reconciliation.
//!
//! [`Reconciler::reconcile`] takes the target list for this render pass and
//! returns the list that should actually be rendered. Keys that left the
//! target keep rendering from their last known element as exit placeholders
//! until the host reports their exit animation finished.
//!
//! Per key:
//!
//! ```text
//!            mount              enter done
//!  absent ──────────▶ Entering ───────────▶ Present
//!                                  ▲           │ dropped from target
//!                        re-enter  │           ▼
//!                                  └──────── Exiting ──────▶ Removed
//!                                                 exit done
//! ```
//!
//! The first pass renders everything as Present with no enter animation.
//! While any key is exiting the rendered list interleaves live children and
//! placeholders; once the last exit completes it collapses back to the
//! latest target list and a [`PresenceEvent::RerenderRequested`] is queued.

use flip_config::PresenceConfig;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

use super::events::{EngineEvent, EventQueue, PresenceEvent};
use super::keyframes::{KeyframeSpec, fade_in, fade_out};
use super::types::{AnimationId, ElementKey};
use crate::error::Result;
use crate::host::{PointerEvents, StyleWrite};

/// An item of a keyed list.
pub trait PresenceElement: Clone {
    /// Identity, unique among siblings and stable across passes.
    fn key(&self) -> ElementKey;

    /// Shared visual identity used to match nodes across lists. Exit
    /// placeholders drop it.
    fn shared_id(&self) -> Option<&str> {
        None
    }
}

/// Enter and exit keyframes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceOptions {
    pub enter: KeyframeSpec,
    pub exit: KeyframeSpec,
}

impl Default for PresenceOptions {
    fn default() -> Self {
        Self {
            enter: fade_in(),
            exit: fade_out(),
        }
    }
}

impl PresenceOptions {
    /// Missing tables fall back to the built-in fades.
    pub fn from_config(config: &PresenceConfig) -> Result<Self> {
        let enter = match &config.enter {
            Some(table) => KeyframeSpec::from_config(table)?,
            None => fade_in(),
        };
        let exit = match &config.exit {
            Some(table) => KeyframeSpec::from_config(table)?,
            None => fade_out(),
        };
        Ok(Self { enter, exit })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceState {
    Entering,
    Present,
    Exiting,
    Removed,
}

/// How a rendered child is wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildRole {
    /// Live child. `animation` is set while its enter animation runs.
    Enter { animation: Option<AnimationId> },
    /// Placeholder kept mounted for its exit animation.
    Exit { animation: AnimationId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChild<E> {
    pub key: ElementKey,
    pub element: E,
    pub role: ChildRole,
}

impl<E: PresenceElement> RenderedChild<E> {
    fn settled(key: ElementKey, element: E, animation: Option<AnimationId>) -> Self {
        Self {
            key,
            element,
            role: ChildRole::Enter { animation },
        }
    }

    pub fn is_exiting(&self) -> bool {
        matches!(self.role, ChildRole::Exit { .. })
    }

    /// Exit placeholders take no input.
    pub fn pointer_events_none(&self) -> bool {
        self.is_exiting()
    }

    /// Shared identity to render, cleared on exit placeholders.
    pub fn shared_id(&self) -> Option<&str> {
        if self.is_exiting() {
            None
        } else {
            self.element.shared_id()
        }
    }

    /// Style overrides the host applies on top of the element's own style.
    pub fn style(&self) -> StyleWrite {
        if self.pointer_events_none() {
            StyleWrite::new().pointer_events(PointerEvents::None)
        } else {
            StyleWrite::new()
        }
    }
}

/// Enter/exit state of one keyed list.
#[derive(Debug)]
pub struct Reconciler<E> {
    options: PresenceOptions,
    element_cache: HashMap<ElementKey, E>,
    rendered: Vec<RenderedChild<E>>,
    latest_target: Vec<E>,
    /// In the order the exits started.
    exiting: IndexMap<ElementKey, AnimationId>,
    entering: HashMap<ElementKey, AnimationId>,
    initial_render: bool,
    events: EventQueue,
}

impl<E: PresenceElement> Default for Reconciler<E> {
    fn default() -> Self {
        Self::new(PresenceOptions::default())
    }
}

impl<E: PresenceElement> Reconciler<E> {
    pub fn new(options: PresenceOptions) -> Self {
        Self {
            options,
            element_cache: HashMap::new(),
            rendered: Vec::new(),
            latest_target: Vec::new(),
            exiting: IndexMap::new(),
            entering: HashMap::new(),
            initial_render: true,
            events: EventQueue::new(),
        }
    }

    pub fn options(&self) -> &PresenceOptions {
        &self.options
    }

    /// Applies to animations started from now on.
    pub fn set_options(&mut self, options: PresenceOptions) {
        self.options = options;
    }

    /// Compute the list to render for `target`.
    pub fn reconcile(&mut self, target: Vec<E>) -> &[RenderedChild<E>] {
        let target_keys: Vec<ElementKey> = target.iter().map(PresenceElement::key).collect();
        for (key, element) in target_keys.iter().zip(&target) {
            self.element_cache.insert(key.clone(), element.clone());
        }
        self.latest_target = target.clone();

        if self.initial_render {
            self.initial_render = false;
            debug!(count = target.len(), "initial render, enter animations suppressed");
            self.rendered = target_keys
                .into_iter()
                .zip(target)
                .map(|(key, element)| RenderedChild::settled(key, element, None))
                .collect();
            return &self.rendered;
        }

        let present_keys: Vec<ElementKey> = self.rendered.iter().map(|c| c.key.clone()).collect();
        let target_set: HashSet<&ElementKey> = target_keys.iter().collect();

        for key in &present_keys {
            if !target_set.contains(key) {
                if !self.exiting.contains_key(key) {
                    self.begin_exit(key.clone());
                }
            } else if let Some(animation_id) = self.exiting.shift_remove(key) {
                debug!(%key, "re-entered before exit finished");
                self.events.push(PresenceEvent::ExitCancelled {
                    key: key.clone(),
                    animation_id,
                });
            }
        }

        self.force_complete_collisions(&target);

        let previously_rendered: HashSet<&ElementKey> = present_keys.iter().collect();
        let mut rendered = Vec::with_capacity(target.len() + self.exiting.len());
        for (key, element) in target_keys.iter().zip(target) {
            let animation = if previously_rendered.contains(key) {
                self.entering.get(key).copied()
            } else {
                Some(self.begin_enter(key.clone()))
            };
            rendered.push(RenderedChild::settled(key.clone(), element, animation));
        }

        // Splice placeholders back at their previous index, lowest first, so
        // each index refers to the list as it was rendered last pass.
        let mut placeholders: Vec<(usize, ElementKey, AnimationId)> = self
            .exiting
            .iter()
            .map(|(key, animation)| {
                let index = present_keys
                    .iter()
                    .position(|k| k == key)
                    .unwrap_or(usize::MAX);
                (index, key.clone(), *animation)
            })
            .collect();
        placeholders.sort_by_key(|(index, _, _)| *index);

        for (index, key, animation) in placeholders {
            let Some(element) = self.element_cache.get(&key).cloned() else {
                debug!(%key, "exiting key has no cached element");
                continue;
            };
            let at = index.min(rendered.len());
            rendered.insert(
                at,
                RenderedChild {
                    key,
                    element,
                    role: ChildRole::Exit { animation },
                },
            );
        }

        trace!(
            rendered = rendered.len(),
            exiting = self.exiting.len(),
            "reconciled"
        );
        self.rendered = rendered;
        &self.rendered
    }

    /// The host finished the exit animation `animation_id` of `key`.
    ///
    /// Completions for an exit that was cancelled or already finished are
    /// ignored and return false.
    pub fn complete_exit(&mut self, key: &str, animation_id: AnimationId) -> bool {
        if self.exiting.get(key) != Some(&animation_id) {
            trace!(key, "stale exit completion ignored");
            return false;
        }
        self.finish_exit(ElementKey::from(key), animation_id, false);
        true
    }

    /// The host finished the enter animation `animation_id` of `key`.
    pub fn complete_enter(&mut self, key: &str, animation_id: AnimationId) -> bool {
        if self.entering.get(key) != Some(&animation_id) {
            return false;
        }
        self.entering.remove(key);
        trace!(key, "enter finished");
        true
    }

    pub fn state_of(&self, key: &str) -> PresenceState {
        if self.exiting.contains_key(key) {
            PresenceState::Exiting
        } else if self.entering.contains_key(key) {
            PresenceState::Entering
        } else if self.rendered.iter().any(|c| c.key.as_str() == key) {
            PresenceState::Present
        } else {
            PresenceState::Removed
        }
    }

    /// List produced by the last pass, or by the last exit completion.
    pub fn rendered(&self) -> &[RenderedChild<E>] {
        &self.rendered
    }

    pub fn is_exiting(&self, key: &str) -> bool {
        self.exiting.contains_key(key)
    }

    pub fn exiting_keys(&self) -> impl Iterator<Item = &ElementKey> {
        self.exiting.keys()
    }

    pub fn cached_element(&self, key: &str) -> Option<&E> {
        self.element_cache.get(key)
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = EngineEvent> + '_ {
        self.events.drain()
    }

    fn begin_enter(&mut self, key: ElementKey) -> AnimationId {
        let animation_id = AnimationId::new();
        self.entering.insert(key.clone(), animation_id);
        trace!(%key, "enter started");
        self.events.push(PresenceEvent::EnterStarted {
            key,
            animation_id,
            keyframes: self.options.enter.clone(),
        });
        animation_id
    }

    fn begin_exit(&mut self, key: ElementKey) {
        let animation_id = AnimationId::new();
        self.entering.remove(&key);
        self.exiting.insert(key.clone(), animation_id);
        debug!(%key, "exit started");
        self.events.push(PresenceEvent::ExitStarted {
            key,
            animation_id,
            keyframes: self.options.exit.clone(),
        });
    }

    /// An exiting element whose shared identity now belongs to a node in
    /// the target list is finished immediately, so two animated nodes never
    /// carry the same identity.
    fn force_complete_collisions(&mut self, target: &[E]) {
        let incoming: HashSet<&str> = target.iter().filter_map(|e| e.shared_id()).collect();
        if incoming.is_empty() {
            return;
        }
        let collided: Vec<(ElementKey, AnimationId)> = self
            .exiting
            .iter()
            .filter(|(key, _)| {
                self.element_cache
                    .get(*key)
                    .and_then(|e| e.shared_id())
                    .is_some_and(|id| incoming.contains(id))
            })
            .map(|(key, animation)| (key.clone(), *animation))
            .collect();

        for (key, animation_id) in collided {
            self.finish_exit(key, animation_id, true);
        }
    }

    fn finish_exit(&mut self, key: ElementKey, animation_id: AnimationId, forced: bool) {
        self.exiting.shift_remove(&key);
        if let Some(index) = self.rendered.iter().position(|c| c.key == key) {
            self.rendered.remove(index);
        }
        self.element_cache.remove(&key);

        if forced {
            debug!(%key, "exit force-completed by identity collision");
            self.events
                .push(PresenceEvent::ExitForceCompleted { key, animation_id });
        } else {
            debug!(%key, "exit completed");
            self.events
                .push(PresenceEvent::ExitCompleted { key, animation_id });
        }

        if self.exiting.is_empty() {
            self.rendered = self
                .latest_target
                .iter()
                .map(|element| {
                    let key = element.key();
                    let animation = self.entering.get(&key).copied();
                    RenderedChild::settled(key, element.clone(), animation)
                })
                .collect();
            debug!("no exits left, rerender requested");
            self.events.push(PresenceEvent::RerenderRequested);
        }
    }
}
