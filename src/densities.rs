//! Sampled density curves, grouped into ridgeline rows

use crate::error::{Result, RidgeplotError};

/// One trace: a sampled curve with paired x and y coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Density {
    x: Vec<f64>,
    y: Vec<f64>,
}

/// Traces sharing the same vertical position
pub type Row = Vec<Density>;

/// The whole dataset, ordered from the top row down
pub type Densities = Vec<Row>;

impl Density {
    /// Build a density from x and y coordinates
    ///
    /// Both sequences must be non-empty, of equal length and hold finite values.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.is_empty() || y.is_empty() {
            return Err(RidgeplotError::Shape(
                "A density needs at least one (x, y) sample".to_string(),
            ));
        }
        if x.len() != y.len() {
            return Err(RidgeplotError::Shape(format!(
                "Density x and y must have the same length, got {} and {}",
                x.len(),
                y.len()
            )));
        }
        if let Some(v) = x.iter().chain(y.iter()).find(|v| !v.is_finite()) {
            return Err(RidgeplotError::Shape(format!(
                "Density values must be finite, got {}",
                v
            )));
        }
        Ok(Density { x, y })
    }

    /// Build a density from `(x, y)` samples
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self> {
        let (x, y) = points.iter().copied().unzip();
        Self::new(x, y)
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The y-weighted mean of the x-coordinates: `Σ(x·y) / Σy`
    ///
    /// Fails with a domain error when the weights sum to zero.
    pub fn weighted_mean(&self) -> Result<f64> {
        let total_weight: f64 = self.y.iter().sum();
        if total_weight == 0.0 {
            return Err(RidgeplotError::Domain(
                "Cannot compute the weighted mean of a density whose y-values sum to 0"
                    .to_string(),
            ));
        }
        let weighted_sum: f64 = self.x.iter().zip(&self.y).map(|(x, y)| x * y).sum();
        Ok(weighted_sum / total_weight)
    }
}
