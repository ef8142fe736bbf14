//! Colormode strategies and colorscale interpolation
//!
//! Solid colormodes assign every trace a single position in [0, 1] (an
//! interpolant) which is then sampled from the colorscale:
//! - `row-index` / `trace-index` / `trace-index-row-wise`: position of the trace in the dataset
//! - `mean-minmax` / `mean-means`: where the trace's mass sits on the x-axis

use super::colors::Color;
use super::colorscale::ColorScale;
use crate::densities::Row;
use crate::error::{Result, RidgeplotError};
use crate::utils::{get_xy_extrema, normalise_min_max};
use std::fmt;
use std::str::FromStr;

/// One interpolant per trace, shaped like the densities (rows of traces)
pub type Interpolants = Vec<Vec<f64>>;

/// Dataset statistics shared by all colormode strategies
///
/// Built once per plot by [`InterpolationContext::from_densities`] and
/// read-only afterwards:
///
/// ```compile_fail
/// use ridgeplot_colors::InterpolationContext;
///
/// let ctx = InterpolationContext {
///     densities: &[],
///     n_rows: 0,
///     n_traces: 0,
///     x_min: 0.0,
///     x_max: 0.0,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct InterpolationContext<'a> {
    densities: &'a [Row],
    n_rows: usize,
    n_traces: usize,
    x_min: f64,
    x_max: f64,
}

impl<'a> InterpolationContext<'a> {
    /// Derive the context from the densities
    ///
    /// Fails with a shape error if there are no rows or any row has no traces.
    pub fn from_densities(densities: &'a [Row]) -> Result<Self> {
        if densities.is_empty() {
            return Err(RidgeplotError::Shape(
                "Densities must contain at least one row".to_string(),
            ));
        }
        if let Some(i) = densities.iter().position(|row| row.is_empty()) {
            return Err(RidgeplotError::Shape(format!(
                "Row {} of the densities has no traces",
                i
            )));
        }

        let (x_min, x_max, _, _) = get_xy_extrema(
            densities
                .iter()
                .flatten()
                .map(|trace| [trace.x(), trace.y()]),
        )?;

        let ctx = InterpolationContext {
            densities,
            n_rows: densities.len(),
            n_traces: densities.iter().map(Vec::len).sum(),
            x_min,
            x_max,
        };
        log::debug!(
            "InterpolationContext: {} rows, {} traces, x-range [{}, {}]",
            ctx.n_rows,
            ctx.n_traces,
            ctx.x_min,
            ctx.x_max
        );
        Ok(ctx)
    }

    pub fn densities(&self) -> &'a [Row] {
        self.densities
    }

    /// Number of rows, at least 1
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of traces across all rows, at least 1
    pub fn n_traces(&self) -> usize {
        self.n_traces
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }
}

/// A strategy computing one interpolant per trace
pub trait InterpolationFunc {
    fn interpolate(&self, ctx: &InterpolationContext<'_>) -> Result<Interpolants>;
}

/// Rows are colored top (1.0) to bottom (0.0)
#[derive(Debug, Clone, Copy, Default)]
pub struct RowIndex;

/// Traces are colored in row-major order, first (1.0) to last (0.0)
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceIndex;

/// Traces are colored by their index within their own row
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceIndexRowWise;

/// Weighted mean of each trace, normalised against the global x-range
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanMinMax;

/// Weighted mean of each trace, normalised against the range of all means
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanMeans;

/// Position of item `index` out of `count`, descending from 1 to 0
fn descending_position(index: usize, count: usize) -> f64 {
    ((count - 1) - index) as f64 / (count - 1) as f64
}

fn require_at_least_two(mode: SolidColormode, what: &str, count: usize) -> Result<()> {
    if count < 2 {
        return Err(RidgeplotError::InvalidArgument(format!(
            "The '{}' colormode requires at least 2 {}, got {}",
            mode, what, count
        )));
    }
    Ok(())
}

impl InterpolationFunc for RowIndex {
    fn interpolate(&self, ctx: &InterpolationContext<'_>) -> Result<Interpolants> {
        require_at_least_two(SolidColormode::RowIndex, "rows", ctx.n_rows)?;
        Ok(ctx
            .densities
            .iter()
            .enumerate()
            .map(|(ith_row, row)| vec![descending_position(ith_row, ctx.n_rows); row.len()])
            .collect())
    }
}

impl InterpolationFunc for TraceIndex {
    fn interpolate(&self, ctx: &InterpolationContext<'_>) -> Result<Interpolants> {
        require_at_least_two(SolidColormode::TraceIndex, "traces", ctx.n_traces)?;
        let mut ith_trace = 0;
        Ok(ctx
            .densities
            .iter()
            .map(|row| {
                row.iter()
                    .map(|_| {
                        let p = descending_position(ith_trace, ctx.n_traces);
                        ith_trace += 1;
                        p
                    })
                    .collect()
            })
            .collect())
    }
}

impl InterpolationFunc for TraceIndexRowWise {
    fn interpolate(&self, ctx: &InterpolationContext<'_>) -> Result<Interpolants> {
        let shortest = ctx.densities.iter().map(Vec::len).min().unwrap_or(0);
        require_at_least_two(
            SolidColormode::TraceIndexRowWise,
            "traces in every row",
            shortest,
        )?;
        Ok(ctx
            .densities
            .iter()
            .map(|row| {
                (0..row.len())
                    .map(|ith_row_trace| descending_position(ith_row_trace, row.len()))
                    .collect()
            })
            .collect())
    }
}

impl InterpolationFunc for MeanMinMax {
    fn interpolate(&self, ctx: &InterpolationContext<'_>) -> Result<Interpolants> {
        ctx.densities
            .iter()
            .map(|row| {
                row.iter()
                    .map(|trace| normalise_min_max(trace.weighted_mean()?, ctx.x_min, ctx.x_max))
                    .collect::<Result<Vec<f64>>>()
            })
            .collect()
    }
}

impl InterpolationFunc for MeanMeans {
    fn interpolate(&self, ctx: &InterpolationContext<'_>) -> Result<Interpolants> {
        let means: Vec<Vec<f64>> = ctx
            .densities
            .iter()
            .map(|row| {
                row.iter()
                    .map(|trace| trace.weighted_mean())
                    .collect::<Result<Vec<f64>>>()
            })
            .collect::<Result<_>>()?;

        let min_mean = means.iter().flatten().copied().fold(f64::INFINITY, f64::min);
        let max_mean = means
            .iter()
            .flatten()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        means
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&mean| normalise_min_max(mean, min_mean, max_mean))
                    .collect::<Result<Vec<f64>>>()
            })
            .collect()
    }
}

/// Colormodes that assign one solid color per trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolidColormode {
    RowIndex,
    TraceIndex,
    TraceIndexRowWise,
    MeanMinMax,
    MeanMeans,
}

impl SolidColormode {
    pub const ALL: [SolidColormode; 5] = [
        SolidColormode::RowIndex,
        SolidColormode::TraceIndex,
        SolidColormode::TraceIndexRowWise,
        SolidColormode::MeanMinMax,
        SolidColormode::MeanMeans,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SolidColormode::RowIndex => "row-index",
            SolidColormode::TraceIndex => "trace-index",
            SolidColormode::TraceIndexRowWise => "trace-index-row-wise",
            SolidColormode::MeanMinMax => "mean-minmax",
            SolidColormode::MeanMeans => "mean-means",
        }
    }

    /// The strategy implementing this colormode
    pub fn strategy(&self) -> &'static dyn InterpolationFunc {
        match self {
            SolidColormode::RowIndex => &RowIndex,
            SolidColormode::TraceIndex => &TraceIndex,
            SolidColormode::TraceIndexRowWise => &TraceIndexRowWise,
            SolidColormode::MeanMinMax => &MeanMinMax,
            SolidColormode::MeanMeans => &MeanMeans,
        }
    }

    pub fn interpolate(&self, ctx: &InterpolationContext<'_>) -> Result<Interpolants> {
        self.strategy().interpolate(ctx)
    }
}

impl fmt::Display for SolidColormode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How trace fills are colored: a shared gradient or one solid color per trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Colormode {
    #[default]
    FillGradient,
    Solid(SolidColormode),
}

impl Colormode {
    pub const FILLGRADIENT: &str = "fillgradient";

    pub fn name(&self) -> &'static str {
        match self {
            Colormode::FillGradient => Self::FILLGRADIENT,
            Colormode::Solid(mode) => mode.name(),
        }
    }

    /// Every accepted colormode name
    pub fn names() -> Vec<&'static str> {
        std::iter::once(Self::FILLGRADIENT)
            .chain(SolidColormode::ALL.iter().map(SolidColormode::name))
            .collect()
    }
}

impl fmt::Display for Colormode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colormode {
    type Err = RidgeplotError;

    fn from_str(s: &str) -> Result<Self> {
        if s == Self::FILLGRADIENT {
            return Ok(Colormode::FillGradient);
        }
        SolidColormode::ALL
            .iter()
            .find(|mode| mode.name() == s)
            .map(|&mode| Colormode::Solid(mode))
            .ok_or_else(|| {
                let solid: Vec<String> = SolidColormode::ALL
                    .iter()
                    .map(|mode| format!("'{}'", mode))
                    .collect();
                RidgeplotError::InvalidArgument(format!(
                    "The colormode argument should be '{}' or one of the solid colormodes ({}), got '{}' instead.",
                    Self::FILLGRADIENT,
                    solid.join(", "),
                    s
                ))
            })
    }
}

impl From<SolidColormode> for Colormode {
    fn from(mode: SolidColormode) -> Self {
        Colormode::Solid(mode)
    }
}

/// Sample the colorscale at `p`
///
/// An exact stop position returns that stop's color untouched. Anything else
/// is blended linearly in RGB space between the enclosing stops; the blended
/// color carries no alpha channel.
pub fn interpolate_color(colorscale: &ColorScale, p: f64) -> Result<Color> {
    if !(0.0..=1.0).contains(&p) {
        return Err(RidgeplotError::Domain(format!(
            "The interpolation point 'p' should be a float value between 0 and 1, not {}.",
            p
        )));
    }

    let stops = colorscale.stops();
    let idx = stops.partition_point(|stop| stop.position < p);
    if let Some(stop) = stops.get(idx).filter(|stop| stop.position == p) {
        return Ok(stop.color);
    }

    let (floor, ceil) = match (idx.checked_sub(1).and_then(|i| stops.get(i)), stops.get(idx)) {
        (Some(floor), Some(ceil)) => (floor, ceil),
        _ => {
            return Err(RidgeplotError::Domain(format!(
                "No colorscale stops enclose the interpolation point {}",
                p
            )))
        }
    };

    let t = normalise_min_max(p, floor.position, ceil.position)?;
    Ok(floor.color.blend(&ceil.color, t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::densities::{Densities, Density};

    fn density(x: &[f64], y: &[f64]) -> Density {
        Density::new(x.to_vec(), y.to_vec()).unwrap()
    }

    /// Three rows of (2, 1, 3) traces with distinct weighted means
    fn sample_densities() -> Densities {
        vec![
            vec![
                density(&[0.0, 1.0, 2.0], &[1.0, 1.0, 1.0]), // mean 1
                density(&[2.0, 3.0, 4.0], &[1.0, 1.0, 1.0]), // mean 3
            ],
            vec![density(&[-2.0, 0.0], &[1.0, 1.0])], // mean -1
            vec![
                density(&[5.0, 6.0], &[0.0, 1.0]),   // mean 6
                density(&[0.0, 10.0], &[1.0, 1.0]),  // mean 5
                density(&[1.0, 2.0], &[1.0, 1.0]),   // mean 1.5
            ],
        ]
    }

    fn assert_close(actual: &Interpolants, expected: &[Vec<f64>]) {
        assert_eq!(actual.len(), expected.len());
        for (a_row, e_row) in actual.iter().zip(expected) {
            assert_eq!(a_row.len(), e_row.len());
            for (a, e) in a_row.iter().zip(e_row) {
                assert!((a - e).abs() < 1e-12, "{} != {}", a, e);
            }
        }
    }

    fn grayscale() -> ColorScale {
        ColorScale::new(vec![
            (0.0, Color::rgb(0.0, 0.0, 0.0)).into(),
            (1.0, Color::rgb(255.0, 255.0, 255.0)).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_context_from_densities() {
        let densities = sample_densities();
        let ctx = InterpolationContext::from_densities(&densities).unwrap();
        assert_eq!(ctx.n_rows(), 3);
        assert_eq!(ctx.n_traces(), 6);
        assert_eq!(ctx.x_min(), -2.0);
        assert_eq!(ctx.x_max(), 10.0);
        assert!(std::ptr::eq(ctx.densities(), densities.as_slice()));
    }

    #[test]
    fn test_cloned_context_keeps_statistics() {
        let densities = sample_densities();
        let ctx = InterpolationContext::from_densities(&densities).unwrap();
        let copy = ctx.clone();
        assert_eq!(copy.n_rows(), ctx.n_rows());
        assert_eq!(copy.n_traces(), ctx.n_traces());

        // The single-trace middle row rules out trace-index-row-wise
        for mode in [
            SolidColormode::RowIndex,
            SolidColormode::TraceIndex,
            SolidColormode::MeanMinMax,
            SolidColormode::MeanMeans,
        ] {
            let interpolants = mode.interpolate(&copy).unwrap();
            assert_eq!(
                interpolants.iter().map(Vec::len).collect::<Vec<_>>(),
                vec![2, 1, 3]
            );
        }
    }

    #[test]
    fn test_context_shape_errors() {
        let empty: Densities = Vec::new();
        assert!(matches!(
            InterpolationContext::from_densities(&empty),
            Err(RidgeplotError::Shape(_))
        ));

        let empty_row: Densities = vec![vec![density(&[0.0], &[1.0])], vec![]];
        assert!(matches!(
            InterpolationContext::from_densities(&empty_row),
            Err(RidgeplotError::Shape(_))
        ));
    }

    #[test]
    fn test_row_index() {
        let densities = sample_densities();
        let ctx = InterpolationContext::from_densities(&densities).unwrap();
        let ps = RowIndex.interpolate(&ctx).unwrap();
        assert_close(&ps, &[vec![1.0, 1.0], vec![0.5], vec![0.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_trace_index() {
        let densities = sample_densities();
        let ctx = InterpolationContext::from_densities(&densities).unwrap();
        let ps = TraceIndex.interpolate(&ctx).unwrap();
        assert_close(
            &ps,
            &[vec![1.0, 0.8], vec![0.6], vec![0.4, 0.2, 0.0]],
        );
    }

    #[test]
    fn test_trace_index_row_wise() {
        let densities: Densities = vec![
            vec![density(&[0.0], &[1.0]), density(&[1.0], &[1.0])],
            vec![
                density(&[0.0], &[1.0]),
                density(&[1.0], &[1.0]),
                density(&[2.0], &[1.0]),
            ],
        ];
        let ctx = InterpolationContext::from_densities(&densities).unwrap();
        let ps = TraceIndexRowWise.interpolate(&ctx).unwrap();
        assert_close(&ps, &[vec![1.0, 0.0], vec![1.0, 0.5, 0.0]]);
    }

    #[test]
    fn test_index_modes_need_two_items() {
        let single: Densities = vec![vec![density(&[0.0, 1.0], &[1.0, 1.0])]];
        let ctx = InterpolationContext::from_densities(&single).unwrap();
        for mode in [
            SolidColormode::RowIndex,
            SolidColormode::TraceIndex,
            SolidColormode::TraceIndexRowWise,
        ] {
            let err = mode.interpolate(&ctx).unwrap_err();
            assert!(matches!(err, RidgeplotError::InvalidArgument(_)));
            assert!(err.to_string().contains(mode.name()));
        }

        // Row-wise needs two traces in every row, even when other rows are fine
        let uneven = sample_densities();
        let ctx = InterpolationContext::from_densities(&uneven).unwrap();
        assert!(TraceIndexRowWise.interpolate(&ctx).is_err());
    }

    #[test]
    fn test_mean_minmax() {
        let densities = sample_densities();
        let ctx = InterpolationContext::from_densities(&densities).unwrap();
        let ps = MeanMinMax.interpolate(&ctx).unwrap();
        // Means normalised against the global x-range [-2, 10]
        let n = |m: f64| (m + 2.0) / 12.0;
        assert_close(
            &ps,
            &[vec![n(1.0), n(3.0)], vec![n(-1.0)], vec![n(6.0), n(5.0), n(1.5)]],
        );
    }

    #[test]
    fn test_mean_means() {
        let densities = sample_densities();
        let ctx = InterpolationContext::from_densities(&densities).unwrap();
        let ps = MeanMeans.interpolate(&ctx).unwrap();
        // Means normalised against their own range [-1, 6]
        let n = |m: f64| (m + 1.0) / 7.0;
        assert_close(
            &ps,
            &[vec![n(1.0), n(3.0)], vec![0.0], vec![1.0, n(5.0), n(1.5)]],
        );
    }

    #[test]
    fn test_mean_means_scale_invariant() {
        let shifted: Densities = vec![
            vec![density(&[1000.0, 1001.0], &[1.0, 1.0])],
            vec![density(&[1010.0, 1011.0], &[1.0, 1.0])],
            vec![density(&[1005.0, 1006.0], &[1.0, 1.0])],
        ];
        let ctx = InterpolationContext::from_densities(&shifted).unwrap();
        let ps = MeanMeans.interpolate(&ctx).unwrap();
        assert_close(&ps, &[vec![0.0], vec![1.0], vec![0.5]]);
    }

    #[test]
    fn test_mean_means_identical_means() {
        let same: Densities = vec![
            vec![density(&[0.0, 2.0], &[1.0, 1.0])],
            vec![density(&[1.0], &[5.0])],
        ];
        let ctx = InterpolationContext::from_densities(&same).unwrap();
        assert!(matches!(
            MeanMeans.interpolate(&ctx),
            Err(RidgeplotError::Domain(_))
        ));
    }

    #[test]
    fn test_colormode_from_str() {
        assert_eq!(
            "fillgradient".parse::<Colormode>().unwrap(),
            Colormode::FillGradient
        );
        for mode in SolidColormode::ALL {
            assert_eq!(
                mode.name().parse::<Colormode>().unwrap(),
                Colormode::Solid(mode)
            );
        }

        let err = "rainbow".parse::<Colormode>().unwrap_err();
        assert!(matches!(err, RidgeplotError::InvalidArgument(_)));
        let message = err.to_string();
        for name in Colormode::names() {
            assert!(message.contains(name), "missing {} in {}", name, message);
        }
    }

    #[test]
    fn test_interpolate_color_exact_stops() {
        let stored = Color::rgba(12.3, 45.6, 78.9, 0.7);
        let cs = ColorScale::new(vec![
            (0.0, Color::rgb(0.0, 0.0, 0.0)).into(),
            (0.3, stored).into(),
            (1.0, Color::rgb(255.0, 255.0, 255.0)).into(),
        ])
        .unwrap();
        assert_eq!(interpolate_color(&cs, 0.3).unwrap(), stored);
        assert_eq!(interpolate_color(&cs, 0.0).unwrap(), Color::rgb(0.0, 0.0, 0.0));
        assert_eq!(
            interpolate_color(&cs, 1.0).unwrap(),
            Color::rgb(255.0, 255.0, 255.0)
        );
    }

    #[test]
    fn test_interpolate_color_midpoint() {
        let color = interpolate_color(&grayscale(), 0.5).unwrap();
        assert_eq!(color, Color::rgb(127.5, 127.5, 127.5));
    }

    #[test]
    fn test_interpolate_color_uses_tightest_bracket() {
        let cs = ColorScale::new(vec![
            (0.0, Color::rgb(0.0, 0.0, 0.0)).into(),
            (0.5, Color::rgb(100.0, 0.0, 0.0)).into(),
            (1.0, Color::rgb(100.0, 200.0, 0.0)).into(),
        ])
        .unwrap();
        let color = interpolate_color(&cs, 0.75).unwrap();
        assert!((color.r - 100.0).abs() < 1e-9);
        assert!((color.g - 100.0).abs() < 1e-9);
        assert_eq!(color.b, 0.0);
    }

    #[test]
    fn test_interpolate_color_monotonic_blend() {
        let cs = ColorScale::new(vec![
            (0.0, Color::rgb(10.0, 200.0, 30.0)).into(),
            (0.4, Color::rgb(250.0, 20.0, 30.0)).into(),
            (1.0, Color::rgb(0.0, 0.0, 255.0)).into(),
        ])
        .unwrap();
        for i in 0..=100 {
            let p = i as f64 / 100.0;
            let color = interpolate_color(&cs, p).unwrap().round(12);
            let (lo, hi) = if p <= 0.4 {
                (cs.stops()[0].color, cs.stops()[1].color)
            } else {
                (cs.stops()[1].color, cs.stops()[2].color)
            };
            for (c, a, b) in [
                (color.r, lo.r, hi.r),
                (color.g, lo.g, hi.g),
                (color.b, lo.b, hi.b),
            ] {
                assert!(c >= a.min(b) && c <= a.max(b), "p={} channel {}", p, c);
            }
        }
    }

    #[test]
    fn test_interpolate_color_out_of_domain() {
        let cs = grayscale();
        for p in [-0.01, 1.01, f64::NAN] {
            assert!(matches!(
                interpolate_color(&cs, p),
                Err(RidgeplotError::Domain(_))
            ));
        }
    }
}
