//! Ridgeline color configuration from string properties
//!
//! Configuration is loaded from user properties (names and defaults declared
//! in ridgeplot.json) via the [`PropertyReader`].

use crate::color::{
    compute_trace_colors, Colormode, ColorscaleInput, InterpolationContext, TraceFill,
};
use crate::error::{Result, RidgeplotError};
use crate::properties::PropertyReader;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorConfig {
    /// Colorscale specification (`None` = default palette)
    pub colorscale: Option<ColorscaleInput>,

    /// "fillgradient" or one of the solid colormodes
    pub colormode: Colormode,

    /// Fill opacity in [0, 1], `None` keeps the colorscale's own alpha
    pub opacity: Option<f64>,
}

impl ColorConfig {
    /// Create config from user properties
    ///
    /// Properties not present (or empty) take their ridgeplot.json defaults.
    /// The `colorscale` property is either a palette name or a JSON array
    /// (list of colors, or list of `[position, color]` pairs).
    pub fn from_properties(properties: &HashMap<String, String>) -> Result<Self> {
        let props = PropertyReader::new(properties)?;

        let colorscale = props
            .get_optional_string("colorscale")?
            .map(|value| parse_colorscale_property(&value))
            .transpose()?;

        let colormode: Colormode = props.get_enum("colormode")?.parse()?;

        let opacity = props.get_optional_f64("opacity")?;
        if let Some(alpha) = opacity {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(RidgeplotError::Config(format!(
                    "Value {} for property 'opacity' out of range [0, 1]",
                    alpha
                )));
            }
        }

        log::debug!(
            "ColorConfig: colorscale={:?}, colormode={}, opacity={:?}",
            colorscale,
            colormode,
            opacity
        );

        Ok(Self {
            colorscale,
            colormode,
            opacity,
        })
    }

    /// Compute the per-trace fills for these settings
    pub fn compute(&self, ctx: &InterpolationContext<'_>) -> Result<Vec<Vec<TraceFill>>> {
        compute_trace_colors(self.colorscale.as_ref(), self.colormode, self.opacity, ctx)
    }
}

fn parse_colorscale_property(value: &str) -> Result<ColorscaleInput> {
    if value.starts_with('[') {
        Ok(serde_json::from_str(value)?)
    } else {
        Ok(ColorscaleInput::Named(value.to_string()))
    }
}
