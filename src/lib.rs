//! Ridgeline plot trace colors
//!
//! Assigns a fill to every density trace of a ridgeline plot: either a
//! gradient spanning the plot's x-range, or one solid color per trace picked
//! from a colorscale by a statistical colormode. The resulting styles are
//! handed to the charting engine as-is.
//!
//! ```
//! use ridgeplot_colors::{compute_trace_colors, Colormode, Density, InterpolationContext};
//!
//! let densities = vec![
//!     vec![Density::new(vec![0.0, 1.0, 2.0], vec![1.0, 3.0, 1.0]).unwrap()],
//!     vec![Density::new(vec![1.0, 2.0, 3.0], vec![1.0, 3.0, 1.0]).unwrap()],
//! ];
//! let ctx = InterpolationContext::from_densities(&densities).unwrap();
//! let colormode: Colormode = "row-index".parse().unwrap();
//! let fills = compute_trace_colors(None, colormode, Some(0.8), &ctx).unwrap();
//! assert_eq!(fills.len(), 2);
//! ```

pub mod color;
pub mod config;
pub mod densities;
pub mod error;
pub mod properties;
pub mod utils;

pub use color::{
    compute_trace_colors, interpolate_color, list_all_colorscale_names,
    validate_and_coerce_colorscale, Color, ColorScale, ColorStop, Colormode, ColorscaleInput,
    FillGradient, GradientType, InterpolationContext, SolidColormode, TraceFill,
};
pub use config::ColorConfig;
pub use densities::{Densities, Density, Row};
pub use error::{Result, RidgeplotError};
