use thiserror::Error;

/// Errors raised while assigning colors to ridgeline traces
#[derive(Debug, Error)]
pub enum RidgeplotError {
    /// Malformed densities (wrong dimensionality, empty sequences, mismatched lengths)
    #[error("Shape error: {0}")]
    Shape(String),

    /// Value outside its valid numeric domain (interpolation point, normalization bounds, opacity)
    #[error("Domain error: {0}")]
    Domain(String),

    /// Unrecognized option value (colormode name, enumerated property)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Color string that could not be parsed
    #[error("Invalid color '{color}': {reason}")]
    InvalidColor { color: String, reason: String },

    /// Colorscale that violates the stop invariants
    #[error("Invalid colorscale: {0}")]
    InvalidColorscale(String),

    /// Configuration error (malformed property values, broken embedded definitions)
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Results using RidgeplotError
pub type Result<T> = std::result::Result<T, RidgeplotError>;
