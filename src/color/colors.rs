//! RGB(A) colors as consumed by the charting engine
//!
//! Colors are kept as floating point channels so that blended values such as
//! `rgb(127.5,127.5,127.5)` survive without truncation. Parsing accepts:
//! - `rgb(r, g, b)` / `rgba(r, g, b, a)` with fractional channels
//! - Hex strings (`#RRGGBB`, `#RRGGBBAA`, `#RGB`)
//! - CSS named colors and `hsl(..)` notation
//!
//! Colors always format back to the canonical `rgb(r,g,b)` / `rgba(r,g,b,a)` form.

use crate::error::{Result, RidgeplotError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGB color with an optional alpha channel
///
/// Channels are in `0..=255`, alpha in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub alpha: Option<f64>,
}

impl Color {
    /// Create an opaque color (no alpha channel)
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color {
            r,
            g,
            b,
            alpha: None,
        }
    }

    /// Create a color carrying an alpha channel
    pub fn rgba(r: f64, g: f64, b: f64, alpha: f64) -> Self {
        Color {
            r,
            g,
            b,
            alpha: Some(alpha),
        }
    }

    /// The same color without its alpha channel
    pub fn to_rgb(&self) -> Self {
        Color::rgb(self.r, self.g, self.b)
    }

    /// The same color with its alpha channel set (or replaced) to `alpha`
    pub fn apply_alpha(&self, alpha: f64) -> Self {
        Color::rgba(self.r, self.g, self.b, alpha)
    }

    /// Round every channel (alpha included) to `ndigits` decimal digits
    pub fn round(&self, ndigits: i32) -> Self {
        Color {
            r: round_to(self.r, ndigits),
            g: round_to(self.g, ndigits),
            b: round_to(self.b, ndigits),
            alpha: self.alpha.map(|a| round_to(a, ndigits)),
        }
    }

    /// Linear blend in RGB space: `t=0` gives `self`, `t=1` gives `other`
    ///
    /// Alpha is not blended, the result carries no alpha channel.
    pub fn blend(&self, other: &Color, t: f64) -> Self {
        Color::rgb(
            self.r + t * (other.r - self.r),
            self.g + t * (other.g - self.g),
            self.b + t * (other.b - self.b),
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.alpha {
            Some(a) => write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, a),
            None => write!(f, "rgb({},{},{})", self.r, self.g, self.b),
        }
    }
}

impl FromStr for Color {
    type Err = RidgeplotError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(color) = parse_rgb_function(trimmed) {
            return validate_channels(s, color);
        }

        // Everything else (hex, names, hsl, percentage rgb) goes through csscolorparser
        let parsed = csscolorparser::parse(trimmed).map_err(|e| RidgeplotError::InvalidColor {
            color: s.to_string(),
            reason: e.to_string(),
        })?;
        let [r, g, b, _] = parsed.to_rgba8();
        let alpha = if parsed.a < 1.0 { Some(parsed.a) } else { None };

        Ok(Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            alpha,
        })
    }
}

impl TryFrom<String> for Color {
    type Error = RidgeplotError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl TryFrom<&str> for Color {
    type Error = RidgeplotError;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::rgb(r as f64, g as f64, b as f64)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color::rgb(r as f64, g as f64, b as f64)
    }
}

/// Parse `rgb(r, g, b)` or `rgba(r, g, b, a)` with plain (possibly fractional) numbers
///
/// Returns None for anything else so the caller can fall back to a CSS parser.
fn parse_rgb_function(s: &str) -> Option<Color> {
    let lower = s.to_ascii_lowercase();
    let (body, n_expected) = if let Some(rest) = lower.strip_prefix("rgba(") {
        (rest, 4)
    } else if let Some(rest) = lower.strip_prefix("rgb(") {
        (rest, 3)
    } else {
        return None;
    };
    let body = body.strip_suffix(')')?;

    let values: Vec<f64> = body
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok())
        .collect::<Option<Vec<_>>>()?;
    if values.len() != n_expected {
        return None;
    }

    Some(Color {
        r: values[0],
        g: values[1],
        b: values[2],
        alpha: values.get(3).copied(),
    })
}

fn validate_channels(original: &str, color: Color) -> Result<Color> {
    let channel_ok = |v: f64| (0.0..=255.0).contains(&v);
    if !(channel_ok(color.r) && channel_ok(color.g) && channel_ok(color.b)) {
        return Err(RidgeplotError::InvalidColor {
            color: original.to_string(),
            reason: "RGB channels must be within [0, 255]".to_string(),
        });
    }
    if let Some(a) = color.alpha {
        if !(0.0..=1.0).contains(&a) {
            return Err(RidgeplotError::InvalidColor {
                color: original.to_string(),
                reason: "alpha must be within [0, 1]".to_string(),
            });
        }
    }
    Ok(color)
}

fn round_to(value: f64, ndigits: i32) -> f64 {
    let factor = 10f64.powi(ndigits);
    (value * factor).round() / factor
}
