//! Ridgeline trace coloring
//!
//! Structure:
//! - `colors.rs`: RGB(A) color type, parsing and formatting
//! - `palettes.rs`: Named colorscales loaded from palettes.json
//! - `colorscale.rs`: Colorscale validation and coercion
//! - `interpolation.rs`: Colormode strategies and colorscale sampling
//! - `color_processor.rs`: Per-trace fill computation

pub mod color_processor;
pub mod colors;
pub mod colorscale;
pub mod interpolation;
pub mod palettes;

// Re-exports for convenience
pub use color_processor::{
    compute_trace_colors, FillGradient, GradientType, TraceFill, COLOR_ROUNDING_DIGITS,
};
pub use colors::Color;
pub use colorscale::{validate_and_coerce_colorscale, ColorScale, ColorStop, ColorscaleInput};
pub use interpolation::{
    interpolate_color, Colormode, InterpolationContext, InterpolationFunc, Interpolants,
    SolidColormode,
};
pub use palettes::{list_all_colorscale_names, palette_registry, DEFAULT_COLORSCALE};
