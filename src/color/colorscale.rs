//! Colorscale validation and coercion
//!
//! A colorscale can be given as a palette name, a plain list of colors or an
//! explicit list of `(position, color)` stops. Everything is coerced into a
//! [`ColorScale`]: at least two stops, strictly ascending positions, starting
//! at 0 and ending at 1.

use super::colors::Color;
use super::palettes::{palette_registry, DEFAULT_COLORSCALE};
use crate::error::{Result, RidgeplotError};
use serde::{Deserialize, Serialize};

/// Suffix selecting the reversed version of a named colorscale (e.g. "viridis_r")
const REVERSED_SUFFIX: &str = "_r";

/// A single colorscale stop
///
/// Serializes as a `[position, color]` pair, the form charting engines expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, Color)", into = "(f64, Color)")]
pub struct ColorStop {
    /// Position in [0, 1]
    pub position: f64,
    pub color: Color,
}

impl From<(f64, Color)> for ColorStop {
    fn from((position, color): (f64, Color)) -> Self {
        ColorStop { position, color }
    }
}

impl From<ColorStop> for (f64, Color) {
    fn from(stop: ColorStop) -> Self {
        (stop.position, stop.color)
    }
}

/// A validated colorscale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColorStop>", into = "Vec<ColorStop>")]
pub struct ColorScale {
    stops: Vec<ColorStop>,
}

impl ColorScale {
    /// Validate explicit stops
    pub fn new(stops: Vec<ColorStop>) -> Result<Self> {
        if stops.len() < 2 {
            return Err(RidgeplotError::InvalidColorscale(format!(
                "A colorscale needs at least 2 stops, got {}",
                stops.len()
            )));
        }

        for stop in &stops {
            if !(0.0..=1.0).contains(&stop.position) {
                return Err(RidgeplotError::InvalidColorscale(format!(
                    "Colorscale positions must be within [0, 1], got {}",
                    stop.position
                )));
            }
        }

        if let Some(pair) = stops.windows(2).find(|w| w[0].position >= w[1].position) {
            return Err(RidgeplotError::InvalidColorscale(format!(
                "Colorscale positions must be unique and sorted in ascending order, got {} before {}",
                pair[0].position, pair[1].position
            )));
        }

        // Bounds checked above, so the length is at least 2
        let first = stops[0].position;
        let last = stops[stops.len() - 1].position;
        if first != 0.0 || last != 1.0 {
            return Err(RidgeplotError::InvalidColorscale(format!(
                "Colorscale must start at 0 and end at 1, got [{}, {}]",
                first, last
            )));
        }

        Ok(ColorScale { stops })
    }

    /// Spread a list of colors evenly over [0, 1]
    pub fn from_colors(colors: &[Color]) -> Result<Self> {
        if colors.len() < 2 {
            return Err(RidgeplotError::InvalidColorscale(format!(
                "At least 2 colors are needed to build a colorscale, got {}",
                colors.len()
            )));
        }

        let last = (colors.len() - 1) as f64;
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| ColorStop {
                // Pin the last stop to exactly 1 regardless of float error
                position: if i == colors.len() - 1 {
                    1.0
                } else {
                    i as f64 / last
                },
                color,
            })
            .collect();

        Self::new(stops)
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Replace the alpha channel of every stop color
    pub fn with_alpha(&self, alpha: f64) -> Self {
        ColorScale {
            stops: self
                .stops
                .iter()
                .map(|stop| ColorStop {
                    position: stop.position,
                    color: stop.color.apply_alpha(alpha),
                })
                .collect(),
        }
    }

    /// The same colorscale running from 1 to 0
    pub fn reversed(&self) -> Self {
        ColorScale {
            stops: self
                .stops
                .iter()
                .rev()
                .map(|stop| ColorStop {
                    position: 1.0 - stop.position,
                    color: stop.color,
                })
                .collect(),
        }
    }
}

impl TryFrom<Vec<ColorStop>> for ColorScale {
    type Error = RidgeplotError;

    fn try_from(stops: Vec<ColorStop>) -> Result<Self> {
        ColorScale::new(stops)
    }
}

impl From<ColorScale> for Vec<ColorStop> {
    fn from(colorscale: ColorScale) -> Self {
        colorscale.stops
    }
}

/// User-facing colorscale specification, prior to validation
///
/// Deserializes from JSON as a string (palette name), an array of colors,
/// or an array of `[position, color]` pairs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorscaleInput {
    /// Explicit `(position, color)` stops
    Scale(Vec<(f64, Color)>),
    /// Colors spread evenly over [0, 1]
    Colors(Vec<Color>),
    /// Name of a registered palette, optionally suffixed with "_r"
    Named(String),
}

impl From<&str> for ColorscaleInput {
    fn from(name: &str) -> Self {
        ColorscaleInput::Named(name.to_string())
    }
}

impl From<Vec<Color>> for ColorscaleInput {
    fn from(colors: Vec<Color>) -> Self {
        ColorscaleInput::Colors(colors)
    }
}

impl From<Vec<(f64, Color)>> for ColorscaleInput {
    fn from(stops: Vec<(f64, Color)>) -> Self {
        ColorscaleInput::Scale(stops)
    }
}

impl From<ColorScale> for ColorscaleInput {
    fn from(colorscale: ColorScale) -> Self {
        ColorscaleInput::Scale(colorscale.stops.into_iter().map(Into::into).collect())
    }
}

/// Resolve a colorscale specification into a validated [`ColorScale`]
///
/// `None` resolves to the default palette.
pub fn validate_and_coerce_colorscale(input: Option<&ColorscaleInput>) -> Result<ColorScale> {
    match input {
        None => named_colorscale(DEFAULT_COLORSCALE),
        Some(ColorscaleInput::Named(name)) => named_colorscale(name),
        Some(ColorscaleInput::Colors(colors)) => ColorScale::from_colors(colors),
        Some(ColorscaleInput::Scale(stops)) => {
            ColorScale::new(stops.iter().copied().map(ColorStop::from).collect())
        }
    }
}

fn named_colorscale(name: &str) -> Result<ColorScale> {
    let registry = palette_registry()?;
    let name = name.trim();
    let (base, reversed) = match name.strip_suffix(REVERSED_SUFFIX) {
        Some(base) if registry.get(name).is_none() => (base, true),
        _ => (name, false),
    };

    let palette = registry.get(base).ok_or_else(|| {
        RidgeplotError::InvalidColorscale(format!(
            "Unknown colorscale name '{}'. Available colorscales: {}",
            name,
            registry.names().join(", ")
        ))
    })?;

    log::debug!(
        "Resolved colorscale '{}' ({} colors, reversed={})",
        palette.name,
        palette.len(),
        reversed
    );

    let colorscale = palette.to_colorscale()?;
    Ok(if reversed {
        colorscale.reversed()
    } else {
        colorscale
    })
}
