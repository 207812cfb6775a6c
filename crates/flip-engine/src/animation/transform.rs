//! Corrective transforms and transform origins.
//!
//! `FlipTransform` is the `translate(dx, dy) scale(sx, sy)` pair written during
//! the invert step and by the scale compensator. It is computed from two
//! geometry records with [`FlipTransform::between`].
//!
//! ```
//! use flip_engine::animation::transform::FlipTransform;
//! use flip_engine::animation::types::GeometryRecord;
//!
//! let cached = GeometryRecord::new(0.0, 0.0, 50.0, 50.0);
//! let current = GeometryRecord::new(100.0, 0.0, 50.0, 50.0);
//! let invert = FlipTransform::between(&cached, &current);
//! assert_eq!(invert.to_css(), "translate(-100px, 0px) scale(1, 1)");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::types::GeometryRecord;
use crate::error::{Result, StyleParseError};

/// Ratio `previous / next`, or 1.0 when `next` is not a positive finite
/// number (the scale term is skipped instead of going non-finite).
pub fn scale_ratio(previous: f64, next: f64) -> f64 {
    if next > 0.0 && next.is_finite() && previous.is_finite() {
        previous / next
    } else {
        debug!(previous, next, "skipping scale term with degenerate denominator");
        1.0
    }
}

/// Translation followed by a non-uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlipTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for FlipTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl FlipTransform {
    pub fn identity() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    pub fn scale(scale_x: f64, scale_y: f64) -> Self {
        Self {
            scale_x,
            scale_y,
            ..Self::identity()
        }
    }

    /// Transform that makes a node laid out at `current` appear at `cached`.
    ///
    /// `dx = cached.left - current.left`, `dy = cached.top - current.top`,
    /// `sx = cached.width / current.width`, `sy = cached.height / current.height`.
    pub fn between(cached: &GeometryRecord, current: &GeometryRecord) -> Self {
        Self {
            translate_x: cached.left - current.left,
            translate_y: cached.top - current.top,
            scale_x: scale_ratio(cached.width, current.width),
            scale_y: scale_ratio(cached.height, current.height),
        }
    }

    /// Scale that cancels this transform's scale on a child. Degenerate
    /// components are left at 1.0.
    pub fn inverse_scale(&self) -> Self {
        Self::scale(scale_ratio(1.0, self.scale_x), scale_ratio(1.0, self.scale_y))
    }

    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.translate_x.abs() < epsilon
            && self.translate_y.abs() < epsilon
            && (self.scale_x - 1.0).abs() < epsilon
            && (self.scale_y - 1.0).abs() < epsilon
    }

    /// CSS `transform` value.
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({}, {})",
            self.translate_x, self.translate_y, self.scale_x, self.scale_y
        )
    }

    /// CSS `transform` value carrying only the scale term.
    pub fn to_css_scale(&self) -> String {
        format!("scale({}, {})", self.scale_x, self.scale_y)
    }
}

impl fmt::Display for FlipTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// CSS `transform-origin` value.
///
/// Validated once on construction and written through to the host as text,
/// so any origin the host's CSS accepts (keywords, mixed units, `em`,
/// `calc()`) round-trips unchanged apart from whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransformOrigin(String);

impl Default for TransformOrigin {
    fn default() -> Self {
        Self::center()
    }
}

/// Shape of one origin component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OriginComponent {
    /// `left` / `right`
    Horizontal,
    /// `top` / `bottom`
    Vertical,
    Center,
    Percentage,
    /// A length or a math function such as `calc()`.
    Length,
}

impl OriginComponent {
    fn parse(token: &str) -> Option<Self> {
        let lowered = token.to_ascii_lowercase();
        match lowered.as_str() {
            "left" | "right" => return Some(Self::Horizontal),
            "top" | "bottom" => return Some(Self::Vertical),
            "center" => return Some(Self::Center),
            _ => {}
        }

        if let Some(open) = lowered.find('(') {
            let name = &lowered[..open];
            let is_name = !name.is_empty()
                && name.chars().all(|c| c.is_ascii_alphabetic() || c == '-');
            return (is_name && lowered.ends_with(')')).then_some(Self::Length);
        }

        if let Some(number) = lowered.strip_suffix('%') {
            return number.parse::<f64>().ok().map(|_| Self::Percentage);
        }

        let number = lowered.trim_end_matches(|c: char| c.is_ascii_alphabetic());
        let value = number.parse::<f64>().ok()?;
        // Only zero may omit its unit.
        (number.len() < lowered.len() || value == 0.0).then_some(Self::Length)
    }

    fn is_length_percentage(self) -> bool {
        matches!(self, Self::Percentage | Self::Length)
    }

    fn fits_x(self) -> bool {
        !matches!(self, Self::Vertical)
    }

    fn fits_y(self) -> bool {
        !matches!(self, Self::Horizontal)
    }
}

/// Split on top-level whitespace, keeping `calc(a + b)` in one piece.
fn split_components(value: &str) -> Option<Vec<&str>> {
    let mut components = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (i, ch) in value.char_indices() {
        match ch {
            '(' => {
                depth += 1;
                start.get_or_insert(i);
            }
            ')' => depth = depth.checked_sub(1)?,
            c if c.is_whitespace() && depth == 0 => {
                if let Some(begin) = start.take() {
                    components.push(&value[begin..i]);
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }
    if depth != 0 {
        return None;
    }
    if let Some(begin) = start {
        components.push(&value[begin..]);
    }
    Some(components)
}

impl TransformOrigin {
    /// `50% 50% 0`
    pub fn center() -> Self {
        Self("50% 50% 0".to_string())
    }

    /// Parse a CSS `transform-origin` value such as `50% 50% 0`,
    /// `top left`, `right 10px` or `center calc(50% + 2px)`.
    ///
    /// A third (z) component must be a length.
    pub fn parse_css(input: &str) -> Result<Self> {
        let invalid = || StyleParseError::InvalidOrigin(input.to_string());
        let tokens = split_components(input.trim()).ok_or_else(invalid)?;
        let kinds = tokens
            .iter()
            .map(|token| OriginComponent::parse(token))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?;

        let valid = match kinds.as_slice() {
            [_] => true,
            [x, y] | [x, y, OriginComponent::Length] => {
                if x.is_length_percentage() || y.is_length_percentage() {
                    x.fits_x() && y.fits_y()
                } else {
                    // Keyword pairs may be written vertical-first.
                    (x.fits_x() && y.fits_y()) || (x.fits_y() && y.fits_x())
                }
            }
            _ => false,
        };
        if !valid {
            return Err(invalid());
        }

        Ok(Self(tokens.join(" ")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// CSS text for the `transform-origin` declaration.
    pub fn to_css(&self) -> String {
        self.0.clone()
    }
}

impl FromStr for TransformOrigin {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_css(s)
    }
}

impl TryFrom<String> for TransformOrigin {
    type Error = StyleParseError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse_css(&value)
    }
}

impl From<TransformOrigin> for String {
    fn from(origin: TransformOrigin) -> Self {
        origin.0
    }
}

impl fmt::Display for TransformOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
