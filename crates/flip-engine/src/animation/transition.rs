//! Transition timing for the invert and play steps.
//!
//! - `TransitionTiming`: duration, delay and easing of one transform transition
//! - `TransitionTiming::instant()`: the zero-duration timing used while inverting
//!
//! # Example
//!
//! ```
//! use flip_engine::animation::easing::EasingFunction;
//! use flip_engine::animation::transition::TransitionTiming;
//!
//! let timing = TransitionTiming::new(300.0).with_easing(EasingFunction::EaseOut);
//! assert_eq!(
//!     timing.to_css(),
//!     "transform 300ms ease-out 0ms, scale 300ms ease-out 0ms"
//! );
//! ```

use serde::{Deserialize, Serialize};

use super::easing::EasingFunction;

/// Timing of a transform transition, as written into the host's
/// `transition` style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionTiming {
    /// Duration of the transition in milliseconds.
    pub duration_ms: f64,
    /// Delay before the transition starts in milliseconds.
    pub delay_ms: f64,
    pub easing: EasingFunction,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            duration_ms: 500.0,
            delay_ms: 0.0,
            easing: EasingFunction::Ease,
        }
    }
}

impl TransitionTiming {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            ..Default::default()
        }
    }

    /// Zero-duration timing: the host applies the transform immediately.
    pub fn instant() -> Self {
        Self {
            duration_ms: 0.0,
            delay_ms: 0.0,
            easing: EasingFunction::Linear,
        }
    }

    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn is_instant(&self) -> bool {
        self.duration_ms <= 0.0 && self.delay_ms <= 0.0
    }

    /// Total time from the style write until the transition ends.
    pub fn total_ms(&self) -> f64 {
        self.duration_ms.max(0.0) + self.delay_ms.max(0.0)
    }

    /// CSS `transition` value covering `transform` and `scale`.
    pub fn to_css(&self) -> String {
        if self.is_instant() {
            return "transform 0s".to_string();
        }
        let easing = self.easing.to_css();
        format!(
            "transform {d}ms {e} {delay}ms, scale {d}ms {e} {delay}ms",
            d = self.duration_ms,
            e = easing,
            delay = self.delay_ms,
        )
    }
}
