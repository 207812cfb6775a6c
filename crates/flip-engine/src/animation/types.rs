//! Core data types shared by the layout animation engines.
//!
//! - `ElementKey`: stable per-item identity supplied by the caller
//! - `NodeId`: host handle for a rendered visual node
//! - `GeometryRecord`: observed layout box of a node
//! - `AnimationId`: unique identifier for a started animation
//! - `PlayingFlag`: shared "is this animating" switch

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Stable identity of a list member, unique among its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementKey(String);

impl ElementKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ElementKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ElementKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Opaque handle to a node owned by the host rendering environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Layout box of a node in the host's coordinate space, as observed at one
/// point in time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometryRecord {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl GeometryRecord {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Unique identifier for an animation instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationId(pub u64);

impl AnimationId {
    /// Generate a new unique animation ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for AnimationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared boolean telling a frame loop whether its driving animation is
/// still running. Clones observe the same value.
#[derive(Debug, Clone, Default)]
pub struct PlayingFlag(Rc<Cell<bool>>);

impl PlayingFlag {
    pub fn new(playing: bool) -> Self {
        Self(Rc::new(Cell::new(playing)))
    }

    pub fn set(&self, playing: bool) {
        self.0.set(playing);
    }

    pub fn get(&self) -> bool {
        self.0.get()
    }
}
