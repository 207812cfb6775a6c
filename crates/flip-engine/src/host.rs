//! Boundary between the engines and the rendering environment.
//!
//! A host exposes its node tree through [`LayoutHost`]: child lists, layout
//! boxes, the per-node key attribute, and a way to write transform and
//! transition styles. Everything else (frame callbacks, timers, completion
//! notifications) is driven by the host calling into the engines.

use serde::{Deserialize, Serialize};

use crate::animation::transform::{FlipTransform, TransformOrigin};
use crate::animation::transition::TransitionTiming;
use crate::animation::types::{ElementKey, GeometryRecord, NodeId};

/// Node tree and style sink of the rendering environment.
pub trait LayoutHost {
    /// Children of `container` in render order, or `None` when it is not
    /// mounted.
    fn children(&self, container: NodeId) -> Option<Vec<NodeId>>;

    /// Current layout box of `node`, or `None` when it is not mounted.
    fn geometry(&self, node: NodeId) -> Option<GeometryRecord>;

    /// Identity attribute of `node`. Nodes without one are ignored by the
    /// position tracker.
    fn element_key(&self, node: NodeId) -> Option<ElementKey>;

    fn apply_style(&mut self, node: NodeId, style: &StyleWrite);
}

/// Value written to a node's `transform`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransformWrite {
    /// Remove the transform so the node renders at its layout position.
    Clear,
    /// Full `translate(..) scale(..)` pair.
    Flip(FlipTransform),
    /// Scale term only.
    Scale(FlipTransform),
}

impl TransformWrite {
    pub fn to_css(&self) -> String {
        match self {
            Self::Clear => "none".to_string(),
            Self::Flip(t) => t.to_css(),
            Self::Scale(t) => t.to_css_scale(),
        }
    }

    /// The transform this write leaves on the node.
    pub fn effective(&self) -> FlipTransform {
        match self {
            Self::Clear => FlipTransform::identity(),
            Self::Flip(t) => *t,
            Self::Scale(t) => FlipTransform::scale(t.scale_x, t.scale_y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEvents {
    Auto,
    None,
}

impl PointerEvents {
    pub fn to_css(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::None => "none",
        }
    }
}

/// One batch of style updates for a single node. Unset fields are left
/// untouched by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleWrite {
    pub transform: Option<TransformWrite>,
    pub transform_origin: Option<TransformOrigin>,
    pub transition: Option<TransitionTiming>,
    pub pointer_events: Option<PointerEvents>,
}

impl StyleWrite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(mut self, transform: TransformWrite) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn transform_origin(mut self, origin: TransformOrigin) -> Self {
        self.transform_origin = Some(origin);
        self
    }

    pub fn transition(mut self, timing: TransitionTiming) -> Self {
        self.transition = Some(timing);
        self
    }

    pub fn pointer_events(mut self, value: PointerEvents) -> Self {
        self.pointer_events = Some(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.transform.is_none()
            && self.transform_origin.is_none()
            && self.transition.is_none()
            && self.pointer_events.is_none()
    }

    /// `(property, value)` pairs for DOM-like hosts.
    pub fn css_declarations(&self) -> Vec<(&'static str, String)> {
        let mut declarations = Vec::new();
        if let Some(origin) = &self.transform_origin {
            declarations.push(("transform-origin", origin.to_css()));
        }
        if let Some(transform) = &self.transform {
            declarations.push(("transform", transform.to_css()));
        }
        if let Some(timing) = &self.transition {
            declarations.push(("transition", timing.to_css()));
        }
        if let Some(pointer_events) = self.pointer_events {
            declarations.push(("pointer-events", pointer_events.to_css().to_string()));
        }
        declarations
    }
}
