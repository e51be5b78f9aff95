//! Plain reconstruction from the first `k` points.
//!
//! Runs each requested exact method on the leading `k` points of the record,
//! checks that they agree, then validates the polynomial against all `n`
//! points. Nothing is retried here: any solver error is fatal for the record,
//! and mismatching points are reported rather than worked around (that is the
//! job of [`crate::reconstruct`]).

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::interpolation::{least_squares, Method};
use crate::math::polynomial::Polynomial;
use crate::point::PointSet;
use crate::validate::{validate, Mismatch};

#[derive(Debug, Clone)]
pub struct SolveOptions {
    pub methods: Vec<Method>,
    /// Also run the floating-point least-squares fit for comparison.
    pub least_squares: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            methods: Method::ALL.to_vec(),
            least_squares: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolveReport {
    pub polynomial: Polynomial,
    /// Coefficients per method, in the order requested.
    pub by_method: Vec<(Method, Polynomial)>,
    /// Points among all `n` that the polynomial misses.
    pub mismatches: Vec<Mismatch>,
    /// Least-squares coefficients, when requested and solvable.
    pub least_squares: Option<Vec<f64>>,
}

impl SolveReport {
    pub fn secret(&self) -> num_bigint::BigInt {
        self.polynomial.secret()
    }

    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }
}

pub fn solve(set: &PointSet, options: &SolveOptions) -> Result<SolveReport> {
    let methods = if options.methods.is_empty() {
        vec![Method::default()]
    } else {
        options.methods.clone()
    };
    let leading = set.leading();

    let mut by_method = Vec::with_capacity(methods.len());
    for method in methods {
        let poly = method.interpolate(leading)?;
        info!(%method, secret = %poly.secret(), "interpolated");
        by_method.push((method, poly));
    }

    let polynomial = by_method[0].1.clone();
    if by_method.iter().any(|(_, p)| *p != polynomial) {
        return Err(Error::MethodsDisagree);
    }

    let mismatches = validate(&polynomial, set.points());
    if !mismatches.is_empty() {
        warn!(
            count = mismatches.len(),
            "points do not lie on the polynomial through the first k points"
        );
    }

    let least_squares = if options.least_squares {
        match least_squares::fit(leading, set.k() - 1) {
            Ok(coeffs) => Some(coeffs),
            Err(e) => {
                warn!("least-squares cross-check failed: {}", e);
                None
            }
        }
    } else {
        None
    };

    Ok(SolveReport {
        polynomial,
        by_method,
        mismatches,
        least_squares,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;
    use num_bigint::BigInt;

    fn set(pairs: &[(i64, i64)], k: usize) -> PointSet {
        let pts: Vec<Point> = pairs.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let n = pts.len();
        PointSet::new(pts, n, k).unwrap()
    }

    #[test]
    fn test_solve_reference_case() {
        let points = set(&[(1, 4), (2, 7), (3, 12), (6, 39)], 3);
        let options = SolveOptions {
            least_squares: true,
            ..Default::default()
        };
        let report = solve(&points, &options).unwrap();

        assert_eq!(report.secret(), BigInt::from(3));
        assert_eq!(report.by_method.len(), 3);
        assert!(report.is_consistent());

        let ls = report.least_squares.expect("least squares requested");
        assert_eq!(least_squares::rounded_secret(&ls), Some(3.0));
    }

    #[test]
    fn test_solve_reports_mismatch_beyond_k() {
        // Only (6, 40) is off the curve and it is not among the first k points
        let points = set(&[(1, 4), (2, 7), (3, 12), (6, 40)], 3);
        let report = solve(&points, &SolveOptions::default()).unwrap();

        assert_eq!(report.secret(), BigInt::from(3));
        assert_eq!(report.mismatches.len(), 1);
        assert_eq!(report.mismatches[0].point, Point::new(6, 40));
        assert_eq!(report.mismatches[0].computed, BigInt::from(39));
    }

    #[test]
    fn test_solver_error_is_fatal() {
        let points = set(&[(1, 4), (2, 7), (3, 13), (6, 39)], 3);
        assert!(solve(&points, &SolveOptions::default()).is_err());
    }

    #[test]
    fn test_single_method() {
        let points = set(&[(1, 4), (2, 7), (3, 12)], 3);
        let options = SolveOptions {
            methods: vec![Method::Newton],
            least_squares: false,
        };
        let report = solve(&points, &options).unwrap();
        assert_eq!(report.by_method.len(), 1);
        assert_eq!(report.by_method[0].0, Method::Newton);
        assert!(report.least_squares.is_none());
    }
}
