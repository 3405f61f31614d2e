//! # Profile Interpolation
//!
//! Piecewise-linear interpolation on a non-decreasing coordinate array, with a
//! boundary-safety rule at both ends of the table:
//!
//! - In the first and last bracket the result is clamped into the range spanned by the
//!   two samples used. Queries outside the profile (including the region between the
//!   grid origin and the innermost radius) therefore never extrapolate past the
//!   boundary values.
//! - In interior brackets no clamping is applied; the slope is taken from the segment on
//!   the side of the located sample that contains the query point.
//!
//! The same routine backs [`ProfileTable::interpolate`](crate::profile::ProfileTable::interpolate),
//! which only supplies the table's radius and variable columns.
//!
//! ## Example
//!
//! ```rust
//! use initial_model::interpolate::{interpolate, locate};
//!
//! let r = [0.0, 1.0, 2.0];
//! let rho = [10.0, 5.0, 1.0];
//!
//! assert_eq!(locate(0.5, &r), 1);
//! assert_eq!(interpolate(0.5, &r, &rho), 7.5);
//! // Outside the table the last segment is clamped to its sample range
//! assert_eq!(interpolate(10.0, &r, &rho), 1.0);
//! ```

/// Find the bracket index used to interpolate at `x`.
///
/// Returns `0` for `x <= coords[0]` and `n - 1` for `x > coords[n - 2]`. Otherwise the
/// span `[0, n - 2]` is bisected and the upper index `i` of the bracket
/// `coords[i - 1] < x <= coords[i]` is returned. The last sample is only reachable
/// through the upper clamp.
///
/// Arrays with fewer than two coordinates always locate to `0`.
pub fn locate(x: f64, coords: &[f64]) -> usize {
    let n = coords.len();
    if n < 2 || x <= coords[0] {
        return 0;
    }
    if x > coords[n - 2] {
        return n - 1;
    }

    let mut ilo = 0;
    let mut ihi = n - 2;

    while ilo + 1 != ihi {
        let imid = (ilo + ihi) / 2;
        if x <= coords[imid] {
            ihi = imid;
        } else {
            ilo = imid;
        }
    }

    ihi
}

/// Interpolate `values` (sampled at `coords`) at `x`.
///
/// # Panics
///
/// Panics if `coords` is empty or `values` is shorter than `coords`.
pub fn interpolate(x: f64, coords: &[f64], values: &[f64]) -> f64 {
    interpolate_from(x, coords, values, locate(x, coords))
}

/// Interpolate with a bracket index the caller already obtained from [`locate`].
///
/// Useful when several variables share one coordinate array: locate once, then
/// evaluate every variable with the same index. Passing an index that `locate` would
/// not return for `x` still yields the linear formula for that index, it is just no
/// longer the bracket containing `x`.
///
/// # Panics
///
/// Panics if `coords` is empty, `index` is out of range, or `values` is shorter than
/// `coords`.
pub fn interpolate_from(x: f64, coords: &[f64], values: &[f64], index: usize) -> f64 {
    let n = coords.len();
    debug_assert!(values.len() >= n, "value array shorter than coordinate array");

    if n == 1 {
        return values[0];
    }

    let id = index;

    if id == 0 {
        let slope = (values[id + 1] - values[id]) / (coords[id + 1] - coords[id]);
        let interp = slope * (x - coords[id]) + values[id];
        clamp_between(interp, values[id], values[id + 1])
    } else if id == n - 1 {
        let slope = (values[id] - values[id - 1]) / (coords[id] - coords[id - 1]);
        let interp = slope * (x - coords[id]) + values[id];
        clamp_between(interp, values[id - 1], values[id])
    } else if x >= coords[id] {
        let slope = (values[id + 1] - values[id]) / (coords[id + 1] - coords[id]);
        slope * (x - coords[id]) + values[id]
    } else {
        let slope = (values[id] - values[id - 1]) / (coords[id] - coords[id - 1]);
        slope * (x - coords[id]) + values[id]
    }
}

#[inline]
fn clamp_between(value: f64, a: f64, b: f64) -> f64 {
    value.max(a.min(b)).min(a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: [f64; 5] = [0.0, 1.0, 2.0, 4.0, 8.0];

    #[test]
    fn test_locate_clamps_low() {
        assert_eq!(locate(-5.0, &R), 0);
        assert_eq!(locate(0.0, &R), 0);
    }

    #[test]
    fn test_locate_clamps_high() {
        // Anything past the second-to-last coordinate lands on the last index
        assert_eq!(locate(4.5, &R), 4);
        assert_eq!(locate(8.0, &R), 4);
        assert_eq!(locate(1e30, &R), 4);
    }

    #[test]
    fn test_locate_returns_upper_bracket() {
        assert_eq!(locate(0.5, &R), 1);
        assert_eq!(locate(1.0, &R), 1);
        assert_eq!(locate(1.5, &R), 2);
        assert_eq!(locate(3.0, &R), 3);
        assert_eq!(locate(4.0, &R), 3);
    }

    #[test]
    fn test_locate_short_arrays() {
        assert_eq!(locate(1.0, &[]), 0);
        assert_eq!(locate(1.0, &[3.0]), 0);
        assert_eq!(locate(-1.0, &[0.0, 1.0]), 0);
        assert_eq!(locate(0.5, &[0.0, 1.0]), 1);
    }

    #[test]
    fn test_interpolate_interior_linear() {
        let values = [0.0, 2.0, 4.0, 8.0, 16.0];
        assert!((interpolate(1.5, &R, &values) - 3.0).abs() < 1e-12);
        assert!((interpolate(3.0, &R, &values) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_interpolate_edges_are_clamped() {
        let values = [10.0, 5.0, 4.0, 3.0, 1.0];
        // Below the first coordinate the first segment would extrapolate to 15
        assert_eq!(interpolate(-1.0, &R, &values), 10.0);
        // Past the last coordinate the last segment would extrapolate below 1
        assert_eq!(interpolate(100.0, &R, &values), 1.0);
    }

    #[test]
    fn test_interpolate_interior_overshoot_is_kept() {
        // Passing the interior bracket index explicitly exercises the unclamped branch
        // with a point outside the bracket.
        let values = [0.0, 1.0, 0.0, 1.0, 0.0];
        let overshoot = interpolate_from(3.0, &R, &values, 2);
        assert!((overshoot - 0.5).abs() < 1e-12);
        let below = interpolate_from(-1.0, &R, &values, 2);
        assert!((below - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_interpolate_hint_matches_locate() {
        let values = [1.0, 3.0, 2.0, 7.0, 5.0];
        for x in [-1.0, 0.0, 0.25, 1.0, 1.7, 2.0, 3.3, 4.0, 6.0, 8.0, 9.0] {
            let id = locate(x, &R);
            assert_eq!(interpolate(x, &R, &values), interpolate_from(x, &R, &values, id));
        }
    }

    #[test]
    fn test_interpolate_exact_at_samples() {
        let values = [1.0, 3.0, 2.0, 7.0, 5.0];
        for (r, v) in R.iter().zip(values.iter()) {
            assert_eq!(interpolate(*r, &R, &values), *v);
        }
    }

    #[test]
    fn test_interpolate_single_point() {
        assert_eq!(interpolate(42.0, &[1.0], &[7.0]), 7.0);
    }

    #[test]
    fn test_end_to_end_values() {
        let r = [0.0, 1.0, 2.0];
        let rho = [10.0, 5.0, 1.0];
        let temp = [1e7, 5e6, 1e6];
        assert_eq!(interpolate(0.5, &r, &rho), 7.5);
        assert_eq!(interpolate(0.5, &r, &temp), 7.5e6);
        assert_eq!(interpolate(10.0, &r, &rho), 1.0);
        assert_eq!(interpolate(10.0, &r, &temp), 1e6);
    }
}
