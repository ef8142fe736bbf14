//! Per-trace fill styling for ridgeline plots
//!
//! Turns a colorscale, a colormode and an optional opacity into one fill
//! specification per trace. The result mirrors the rows/traces layout of the
//! densities and serializes to the style attributes the charting engine
//! consumes (`fillcolor` or `fillgradient`).

use super::colors::Color;
use super::colorscale::{validate_and_coerce_colorscale, ColorScale, ColorscaleInput};
use super::interpolation::{interpolate_color, Colormode, InterpolationContext};
use crate::error::{Result, RidgeplotError};
use serde::Serialize;
use std::sync::Arc;

/// Decimal digits solid fill colors are rounded to
///
/// Keeps the output reproducible across platforms; far below anything visible.
pub const COLOR_ROUNDING_DIGITS: i32 = 12;

/// Direction in which a fill gradient runs
///
/// Ridgelines are always shaded along the x-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientType {
    Horizontal,
}

/// Gradient fill spanning the x-range of the whole plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillGradient {
    /// Shared by every trace of the plot
    pub colorscale: Arc<ColorScale>,
    pub start: f64,
    pub stop: f64,
    #[serde(rename = "type")]
    pub gradient_type: GradientType,
}

/// Fill styling of a single trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TraceFill {
    #[serde(rename = "fillcolor")]
    FillColor(Color),
    #[serde(rename = "fillgradient")]
    FillGradient(FillGradient),
}

impl TraceFill {
    pub fn fill_color(&self) -> Option<&Color> {
        match self {
            TraceFill::FillColor(color) => Some(color),
            TraceFill::FillGradient(_) => None,
        }
    }

    pub fn fill_gradient(&self) -> Option<&FillGradient> {
        match self {
            TraceFill::FillGradient(gradient) => Some(gradient),
            TraceFill::FillColor(_) => None,
        }
    }
}

/// Compute the fill of every trace
///
/// # Arguments
/// * `colorscale` - Colorscale specification, `None` for the default palette
/// * `colormode` - `FillGradient` or one of the solid colormodes
/// * `opacity` - Alpha applied to every color, in [0, 1]
/// * `ctx` - Statistics of the densities being plotted
///
/// # Returns
/// One `TraceFill` per trace, grouped by row in the densities' order.
///
/// # Errors
/// Returns error if:
/// - The colorscale cannot be resolved or is invalid
/// - `opacity` is outside [0, 1]
/// - The solid colormode cannot be computed for these densities
pub fn compute_trace_colors(
    colorscale: Option<&ColorscaleInput>,
    colormode: Colormode,
    opacity: Option<f64>,
    ctx: &InterpolationContext<'_>,
) -> Result<Vec<Vec<TraceFill>>> {
    let mut colorscale = validate_and_coerce_colorscale(colorscale)?;

    // Fill gradients cannot carry a separate opacity, so the alpha channel
    // has to be baked into the colorscale colors themselves.
    if let Some(alpha) = opacity {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(RidgeplotError::Domain(format!(
                "opacity should be between 0 and 1, got {}",
                alpha
            )));
        }
        colorscale = colorscale.with_alpha(alpha);
    }

    log::debug!(
        "compute_trace_colors: colormode={}, opacity={:?}, {} stops, {} traces",
        colormode,
        opacity,
        colorscale.stops().len(),
        ctx.n_traces()
    );

    match colormode {
        Colormode::FillGradient => {
            let gradient = FillGradient {
                colorscale: Arc::new(colorscale),
                start: ctx.x_min(),
                stop: ctx.x_max(),
                gradient_type: GradientType::Horizontal,
            };
            Ok(ctx
                .densities()
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|_| TraceFill::FillGradient(gradient.clone()))
                        .collect()
                })
                .collect())
        }
        Colormode::Solid(mode) => {
            let interpolants = mode.interpolate(ctx)?;
            interpolants
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|&p| solid_fill_color(&colorscale, p, opacity).map(TraceFill::FillColor))
                        .collect::<Result<Vec<TraceFill>>>()
                })
                .collect()
        }
    }
}

fn solid_fill_color(colorscale: &ColorScale, p: f64, opacity: Option<f64>) -> Result<Color> {
    let mut color = interpolate_color(colorscale, p)?;
    // Blending drops the alpha channel
    if let Some(alpha) = opacity {
        color = color.apply_alpha(alpha);
    }
    Ok(color.round(COLOR_ROUNDING_DIGITS))
}
