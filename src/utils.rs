//! Extrema and normalization helpers shared by the colormode strategies
//! and the color interpolation engine.

use crate::error::{Result, RidgeplotError};

/// Returns the global extrema `(x_min, x_max, y_min, y_max)` of a sequence of
/// 2D array-like objects.
///
/// Each array must hold exactly two non-empty sequences (x-values and y-values).
/// Fails with a shape error if any array is not 2D, if any of its sequences is
/// empty, or if `arrays` itself is empty.
pub fn get_xy_extrema<I, A, S, T>(arrays: I) -> Result<(T, T, T, T)>
where
    I: IntoIterator<Item = A>,
    A: AsRef<[S]>,
    S: AsRef<[T]>,
    T: PartialOrd + Copy,
{
    let mut extrema: Option<(T, T, T, T)> = None;

    for array in arrays {
        let array = array.as_ref();
        if array.len() != 2 {
            return Err(RidgeplotError::Shape(format!(
                "Expected 2D array, got {}D array instead.",
                array.len()
            )));
        }
        let (xs, ys) = (array[0].as_ref(), array[1].as_ref());
        if xs.is_empty() || ys.is_empty() {
            return Err(RidgeplotError::Shape(
                "Cannot get extrema of an empty array.".to_string(),
            ));
        }

        let (mut x_min, mut x_max, mut y_min, mut y_max) =
            extrema.unwrap_or((xs[0], xs[0], ys[0], ys[0]));
        for &x in xs {
            if x < x_min {
                x_min = x;
            }
            if x > x_max {
                x_max = x;
            }
        }
        for &y in ys {
            if y < y_min {
                y_min = y;
            }
            if y > y_max {
                y_max = y;
            }
        }
        extrema = Some((x_min, x_max, y_min, y_max));
    }

    extrema.ok_or_else(|| {
        RidgeplotError::Shape("Cannot get extrema of empty array sequence.".to_string())
    })
}

/// Linearly normalise `val` from `[min, max]` into `[0, 1]`.
///
/// Fails with a domain error if `max <= min` or if `val` lies outside `[min, max]`.
pub fn normalise_min_max(val: f64, min: f64, max: f64) -> Result<f64> {
    // Negated comparisons so that NaN bounds are rejected too
    if !(max > min) {
        return Err(RidgeplotError::Domain(format!(
            "max should be greater than min. Got max={} and min={} instead.",
            max, min
        )));
    }
    if !(min <= val && val <= max) {
        return Err(RidgeplotError::Domain(format!(
            "val ({}) is out of bounds ({}, {}).",
            val, min, max
        )));
    }
    Ok((val - min) / (max - min))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_xy_extrema() {
        let arrays: Vec<Vec<Vec<f64>>> = vec![
            vec![vec![0.0, 1.0, 2.0], vec![0.5, 3.0, 0.1]],
            vec![vec![-4.0, 7.5], vec![1.0, 2.0]],
        ];
        let extrema = get_xy_extrema(&arrays).unwrap();
        assert_eq!(extrema, (-4.0, 7.5, 0.1, 3.0));
    }

    #[test]
    fn test_get_xy_extrema_integers() {
        let arrays = vec![[vec![3, 1, 2], vec![9, 8, 7]]];
        assert_eq!(get_xy_extrema(&arrays).unwrap(), (1, 3, 7, 9));
    }

    #[test]
    fn test_get_xy_extrema_empty_collection() {
        let arrays: Vec<Vec<Vec<f64>>> = Vec::new();
        let err = get_xy_extrema(&arrays).unwrap_err();
        assert!(matches!(err, RidgeplotError::Shape(_)));
    }

    #[test]
    fn test_get_xy_extrema_empty_sequence() {
        let arrays: Vec<Vec<Vec<f64>>> = vec![vec![vec![1.0], vec![]]];
        assert!(matches!(
            get_xy_extrema(&arrays),
            Err(RidgeplotError::Shape(_))
        ));
    }

    #[test]
    fn test_get_xy_extrema_wrong_dimensionality() {
        let one_d: Vec<Vec<Vec<f64>>> = vec![vec![vec![1.0, 2.0]]];
        assert!(matches!(
            get_xy_extrema(&one_d),
            Err(RidgeplotError::Shape(_))
        ));

        let three_d: Vec<Vec<Vec<f64>>> = vec![vec![vec![1.0], vec![2.0], vec![3.0]]];
        let err = get_xy_extrema(&three_d).unwrap_err();
        assert!(err.to_string().contains("3D"));
    }

    #[test]
    fn test_normalise_min_max() {
        assert_eq!(normalise_min_max(5.0, 0.0, 10.0).unwrap(), 0.5);
        assert_eq!(normalise_min_max(0.0, 0.0, 10.0).unwrap(), 0.0);
        assert_eq!(normalise_min_max(10.0, 0.0, 10.0).unwrap(), 1.0);
        assert_eq!(normalise_min_max(-1.0, -2.0, 2.0).unwrap(), 0.25);
    }

    #[test]
    fn test_normalise_min_max_round_trip() {
        let (min, max) = (-3.7, 12.25);
        for val in [-3.7, -1.0, 0.0, 0.3, 5.5, 12.25] {
            let p = normalise_min_max(val, min, max).unwrap();
            assert!((min + p * (max - min) - val).abs() < 1e-12);
        }
    }

    #[test]
    fn test_normalise_min_max_invalid_bounds() {
        assert!(matches!(
            normalise_min_max(1.0, 1.0, 1.0),
            Err(RidgeplotError::Domain(_))
        ));
        assert!(matches!(
            normalise_min_max(1.0, 2.0, 0.0),
            Err(RidgeplotError::Domain(_))
        ));
    }

    #[test]
    fn test_normalise_min_max_out_of_bounds() {
        assert!(normalise_min_max(-0.1, 0.0, 1.0).is_err());
        assert!(normalise_min_max(1.1, 0.0, 1.0).is_err());
        assert!(normalise_min_max(f64::NAN, 0.0, 1.0).is_err());
    }
}
