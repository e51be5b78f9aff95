//! Floating-point least-squares fit (cross-check only).
//!
//! Solves the normal equations `(XᵀX) c = Xᵀy` in `f64`. With `k` points and
//! degree `k-1` this is the same interpolation problem as the exact solvers,
//! but every value is rounded to 53 bits of mantissa first. Large shares lose
//! their low digits and the reported secret drifts; the result is only shown
//! next to the exact one, never used to accept or reject anything.

use anyhow::{bail, Result};
use nalgebra::{DMatrix, DVector};
use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::point::Point;

fn to_f64(value: &BigInt) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Fits a polynomial of `degree` to `points`, lowest power first.
pub fn fit(points: &[Point], degree: usize) -> Result<Vec<f64>> {
    if points.is_empty() {
        bail!("No points provided for least-squares fit");
    }

    let cols = degree + 1;
    let design = DMatrix::from_fn(points.len(), cols, |row, col| {
        to_f64(&points[row].x).powi(col as i32)
    });
    let observations = DVector::from_iterator(points.len(), points.iter().map(|p| to_f64(&p.y)));

    let normal = design.transpose() * &design;
    let rhs = design.transpose() * observations;

    let svd = normal.svd(true, true);
    let tolerance = 1e-12;
    let rank = svd
        .singular_values
        .iter()
        .filter(|&&s| s > tolerance)
        .count();
    if rank < cols {
        bail!(
            "Normal equations are singular (rank {} < {}). Repeated x-values?",
            rank,
            cols
        );
    }

    let solution = svd
        .solve(&rhs, tolerance)
        .map_err(|e| anyhow::anyhow!("Failed to solve normal equations: {}", e))?;

    Ok(solution.iter().copied().collect())
}

/// The constant term of [`fit`] rounded to the nearest integer.
pub fn rounded_secret(coefficients: &[f64]) -> Option<f64> {
    coefficients
        .first()
        .filter(|c| c.is_finite())
        .map(|c| c.round())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_small_quadratic() {
        // f(x) = 3 + x^2
        let pts = vec![Point::new(1, 4), Point::new(2, 7), Point::new(3, 12)];
        let coeffs = fit(&pts, 2).unwrap();

        println!("least squares: {:?}", coeffs);
        for (got, want) in coeffs.iter().zip([3.0, 0.0, 1.0]) {
            assert!((got - want).abs() < 1e-6, "got {}, want {}", got, want);
        }
        assert_eq!(rounded_secret(&coeffs), Some(3.0));
    }

    #[test]
    fn test_fit_rejects_repeated_x() {
        let pts = vec![Point::new(1, 4), Point::new(1, 4)];
        assert!(fit(&pts, 1).is_err());
    }

    #[test]
    fn test_fit_empty() {
        assert!(fit(&[], 0).is_err());
        assert_eq!(rounded_secret(&[]), None);
    }
}
