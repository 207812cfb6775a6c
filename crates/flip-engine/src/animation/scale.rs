//! Scale compensation for children of a scaling ancestor.
//!
//! While an ancestor is scaled (for example by a FLIP play step on a shared
//! container), its children are stretched with it. The compensator writes
//! the inverse scale onto each child so they keep their apparent size.
//!
//! - Static: one write of `scale(1/sx, 1/sy)` from a captured scale.
//! - Continuous: every frame while the [`PlayingFlag`] is set, measure the
//!   ancestor against its reference box and write the inverse of the
//!   instantaneous ratio.

use tracing::{debug, trace};

use super::schedule::FrameQueue;
use super::transform::{FlipTransform, scale_ratio};
use super::types::{GeometryRecord, NodeId, PlayingFlag};
use crate::host::{LayoutHost, StyleWrite, TransformWrite};

#[derive(Debug)]
struct Tick;

#[derive(Debug)]
pub struct ScaleCompensator {
    target: NodeId,
    playing: PlayingFlag,
    reference: Option<GeometryRecord>,
    captured_scale: Option<FlipTransform>,
    no_preserve: bool,
    frames: FrameQueue<Tick>,
}

impl ScaleCompensator {
    pub fn new(target: NodeId, playing: PlayingFlag) -> Self {
        Self {
            target,
            playing,
            reference: None,
            captured_scale: None,
            no_preserve: false,
            frames: FrameQueue::new(),
        }
    }

    /// Rest-state box of the ancestor.
    pub fn with_reference(mut self, reference: GeometryRecord) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn set_reference(&mut self, reference: Option<GeometryRecord>) {
        self.reference = reference;
    }

    /// Use the ancestor's current box as the reference.
    pub fn capture_reference(&mut self, host: &impl LayoutHost) -> bool {
        self.reference = host.geometry(self.target);
        self.reference.is_some()
    }

    pub fn reference(&self) -> Option<&GeometryRecord> {
        self.reference.as_ref()
    }

    /// Scale captured for static mode, e.g. at the start of a gesture.
    pub fn set_captured_scale(&mut self, scale: Option<FlipTransform>) {
        self.captured_scale = scale;
    }

    /// Disable both modes. Stops a running loop.
    pub fn set_no_preserve(&mut self, no_preserve: bool) {
        self.no_preserve = no_preserve;
        if no_preserve {
            self.stop();
        }
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frames.has_pending()
    }

    pub fn frame_requests(&self) -> u64 {
        self.frames.requested_count()
    }

    /// Write the inverse of the captured scale onto every child. Returns the
    /// number of children written.
    pub fn apply_static(&self, host: &mut impl LayoutHost) -> usize {
        if self.no_preserve {
            return 0;
        }
        let Some(scale) = self.captured_scale else {
            return 0;
        };
        let Some(children) = host.children(self.target) else {
            return 0;
        };

        let write = StyleWrite::new().transform(TransformWrite::Scale(scale.inverse_scale()));
        for &child in &children {
            host.apply_style(child, &write);
        }
        children.len()
    }

    /// Begin the per-frame loop. Nothing is scheduled when the flag is
    /// already false, the reference is missing, or the ancestor is not
    /// mounted.
    pub fn start(&mut self, host: &impl LayoutHost) -> bool {
        self.stop();
        if self.no_preserve {
            return false;
        }
        if self.reference.is_none() {
            trace!(ancestor = ?self.target, "no reference geometry, compensation skipped");
            return false;
        }
        if host.children(self.target).is_none() {
            debug!(ancestor = ?self.target, "ancestor not mounted, compensation skipped");
            return false;
        }
        if !self.playing.get() {
            return false;
        }

        debug!(ancestor = ?self.target, "scale compensation started");
        self.frames.request(Tick);
        true
    }

    pub fn frame(&mut self, host: &mut impl LayoutHost) {
        if self.frames.take_due().is_empty() {
            return;
        }
        if !self.playing.get() {
            debug!(ancestor = ?self.target, "scale compensation stopped");
            return;
        }
        let Some(reference) = self.reference else {
            return;
        };
        let (Some(current), Some(children)) =
            (host.geometry(self.target), host.children(self.target))
        else {
            debug!(ancestor = ?self.target, "ancestor unmounted, stopping compensation");
            return;
        };

        let ratio = FlipTransform::scale(
            scale_ratio(current.width, reference.width),
            scale_ratio(current.height, reference.height),
        );
        let write = StyleWrite::new().transform(TransformWrite::Scale(ratio.inverse_scale()));
        for &child in &children {
            host.apply_style(child, &write);
        }

        self.frames.request(Tick);
    }

    /// Cancel the pending frame, if any.
    pub fn stop(&mut self) {
        if self.frames.has_pending() {
            debug!(ancestor = ?self.target, "scale compensation cancelled");
        }
        self.frames.cancel_all();
    }
}
