//! Two-stop keyframe definitions for enter and exit animations.
//!
//! A `KeyframeSpec` is a `from` style, a `to` style and a duration, played
//! with `fill: both` by the host. The built-ins are [`fade_in`] and
//! [`fade_out`] (opacity over 500ms).
//!
//! ```
//! use flip_engine::animation::keyframes::{KeyframeSpec, StyleValue};
//!
//! let shrink = KeyframeSpec::new(300)
//!     .from("transform", "scale(1)")
//!     .to("transform", "scale(0.8)")
//!     .to("opacity", 0.0);
//! assert_eq!(shrink.to_style.get("opacity"), Some(&StyleValue::Number(0.0)));
//! ```

use flip_config::{ConfigValue, KeyframeConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, StyleParseError};

/// Duration of the built-in fades.
pub const DEFAULT_PRESENCE_DURATION_MS: u32 = 500;

/// Value of a single style property in a keyframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl StyleValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    pub fn to_css(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(t) => t.clone(),
        }
    }
}

impl From<f64> for StyleValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for StyleValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Style mapping at one end of a keyframe animation.
pub type StyleMap = BTreeMap<String, StyleValue>;

/// Start style, end style and duration of an enter or exit animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeSpec {
    pub from_style: StyleMap,
    pub to_style: StyleMap,
    pub duration_ms: u32,
}

impl KeyframeSpec {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            from_style: StyleMap::new(),
            to_style: StyleMap::new(),
            duration_ms,
        }
    }

    pub fn from(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.from_style.insert(property.into(), value.into());
        self
    }

    pub fn to(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.to_style.insert(property.into(), value.into());
        self
    }

    /// Build from a `[presence.enter]` / `[presence.exit]` config table.
    pub fn from_config(config: &KeyframeConfig) -> Result<Self> {
        Ok(Self {
            from_style: convert_styles(&config.from)?,
            to_style: convert_styles(&config.to)?,
            duration_ms: config.duration_ms,
        })
    }
}

/// Opacity 0 → 1 over 500ms.
pub fn fade_in() -> KeyframeSpec {
    KeyframeSpec::new(DEFAULT_PRESENCE_DURATION_MS)
        .from("opacity", 0.0)
        .to("opacity", 1.0)
}

/// Opacity 1 → 0 over 500ms.
pub fn fade_out() -> KeyframeSpec {
    KeyframeSpec::new(DEFAULT_PRESENCE_DURATION_MS)
        .from("opacity", 1.0)
        .to("opacity", 0.0)
}

fn convert_styles(table: &BTreeMap<String, ConfigValue>) -> Result<StyleMap> {
    table
        .iter()
        .map(|(property, value)| {
            let style = if let Some(n) = value.as_float() {
                StyleValue::Number(n)
            } else if let Some(i) = value.as_integer() {
                StyleValue::Number(i as f64)
            } else if let Some(text) = value.as_str() {
                StyleValue::Text(text.to_string())
            } else {
                return Err(StyleParseError::InvalidKeyframeValue {
                    property: property.clone(),
                });
            };
            Ok((property.clone(), style))
        })
        .collect()
}
