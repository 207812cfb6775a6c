//! CSS timing functions for the play step.
//!
//! Easing values are parsed from config strings and carried through to the
//! host as CSS text.
//!
//! ```
//! use flip_engine::animation::easing::EasingFunction;
//!
//! let ease: EasingFunction = "cubic-bezier(0.4, 0, 0.2, 1)".parse().unwrap();
//! assert_eq!(ease.to_css(), "cubic-bezier(0.4, 0, 0.2, 1)");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StyleParseError};

/// Jump position for `steps()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPosition {
    /// `jump-start` / `start`
    Start,
    /// `jump-end` / `end`
    #[default]
    End,
    /// `jump-both`
    Both,
    /// `jump-none`
    None,
}

impl StepPosition {
    fn parse_css(value: &str) -> Option<Self> {
        match value {
            "start" | "jump-start" => Some(Self::Start),
            "end" | "jump-end" => Some(Self::End),
            "jump-both" => Some(Self::Both),
            "jump-none" => Some(Self::None),
            _ => None,
        }
    }

    fn to_css(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Both => "jump-both",
            Self::None => "jump-none",
        }
    }
}

/// Timing function applied to the play transition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingFunction {
    Linear,
    /// `cubic-bezier(0.25, 0.1, 0.25, 1.0)`
    #[default]
    Ease,
    /// `cubic-bezier(0.42, 0, 1, 1)`
    EaseIn,
    /// `cubic-bezier(0, 0, 0.58, 1)`
    EaseOut,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`
    EaseInOut,
    /// Custom curve; x values are kept within [0, 1] by the parser.
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
    Steps { count: u32, position: StepPosition },
}

impl EasingFunction {
    /// Parse a CSS `<easing-function>`.
    pub fn parse_css(input: &str) -> Result<Self> {
        let value = input.trim().to_ascii_lowercase();

        match value.as_str() {
            "linear" => return Ok(Self::Linear),
            "ease" => return Ok(Self::Ease),
            "ease-in" => return Ok(Self::EaseIn),
            "ease-out" => return Ok(Self::EaseOut),
            "ease-in-out" => return Ok(Self::EaseInOut),
            "step-start" => {
                return Ok(Self::Steps {
                    count: 1,
                    position: StepPosition::Start,
                });
            }
            "step-end" => {
                return Ok(Self::Steps {
                    count: 1,
                    position: StepPosition::End,
                });
            }
            _ => {}
        }

        if let Some(args) = function_args(&value, "cubic-bezier") {
            let numbers = args
                .iter()
                .map(|a| a.parse::<f32>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|_| StyleParseError::InvalidBezier(input.to_string()))?;
            let &[x1, y1, x2, y2] = numbers.as_slice() else {
                return Err(StyleParseError::InvalidBezier(input.to_string()));
            };
            if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                return Err(StyleParseError::InvalidBezier(input.to_string()));
            }
            return Ok(Self::CubicBezier { x1, y1, x2, y2 });
        }

        if let Some(args) = function_args(&value, "steps") {
            let invalid = || StyleParseError::InvalidSteps(input.to_string());
            let count = args
                .first()
                .and_then(|c| c.parse::<u32>().ok())
                .ok_or_else(invalid)?;
            let position = match args.get(1) {
                Some(p) => StepPosition::parse_css(p).ok_or_else(invalid)?,
                None => StepPosition::End,
            };
            let min_count = if position == StepPosition::None { 2 } else { 1 };
            if args.len() > 2 || count < min_count {
                return Err(invalid());
            }
            return Ok(Self::Steps { count, position });
        }

        Err(StyleParseError::UnknownEasing(input.to_string()))
    }

    /// CSS text for a `transition` declaration.
    pub fn to_css(&self) -> String {
        match self {
            Self::Linear => "linear".to_string(),
            Self::Ease => "ease".to_string(),
            Self::EaseIn => "ease-in".to_string(),
            Self::EaseOut => "ease-out".to_string(),
            Self::EaseInOut => "ease-in-out".to_string(),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                format!("cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
            Self::Steps { count, position } => format!("steps({count}, {})", position.to_css()),
        }
    }
}

impl FromStr for EasingFunction {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_css(s)
    }
}

impl fmt::Display for EasingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Split `name(a, b, ...)` into trimmed argument strings.
fn function_args<'a>(value: &'a str, name: &str) -> Option<Vec<&'a str>> {
    let inner = value
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')?;
    Some(inner.split(',').map(str::trim).collect())
}
