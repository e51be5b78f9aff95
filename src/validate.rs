//! Consistency Validator
//!
//! Checks a candidate polynomial against every known point with exact integer
//! evaluation. There is no tolerance: a point either lies on the curve or it
//! does not.

use num_bigint::BigInt;
use tracing::debug;

use crate::math::polynomial::Polynomial;
use crate::point::Point;

/// A point whose recorded `y` differs from the candidate polynomial's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub point: Point,
    /// `f(point.x)` under the candidate polynomial.
    pub computed: BigInt,
}

/// Returns every point in `points` that does not lie on `poly`, in input order.
///
/// Empty iff all points lie on the polynomial. Pure: repeated calls with the
/// same arguments return the same mismatches.
pub fn validate(poly: &Polynomial, points: &[Point]) -> Vec<Mismatch> {
    points
        .iter()
        .filter_map(|p| {
            let computed = poly.evaluate(&p.x);
            if computed == p.y {
                None
            } else {
                debug!(x = %p.x, expected = %p.y, got = %computed, "mismatch");
                Some(Mismatch {
                    point: p.clone(),
                    computed,
                })
            }
        })
        .collect()
}

pub fn is_consistent(poly: &Polynomial, points: &[Point]) -> bool {
    points.iter().all(|p| poly.evaluate(&p.x) == p.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> (Polynomial, Vec<Point>) {
        let poly = Polynomial::new(vec![3.into(), 0.into(), 1.into()]);
        let pts = vec![
            Point::new(1, 4),
            Point::new(2, 7),
            Point::new(3, 12),
            Point::new(6, 39),
        ];
        (poly, pts)
    }

    #[test]
    fn test_all_points_consistent() {
        let (poly, pts) = reference();
        assert!(validate(&poly, &pts).is_empty());
        assert!(is_consistent(&poly, &pts));
    }

    #[test]
    fn test_reports_expected_and_computed() {
        let (poly, mut pts) = reference();
        pts[2] = Point::new(3, 13);

        let mismatches = validate(&poly, &pts);
        assert_eq!(
            mismatches,
            vec![Mismatch {
                point: Point::new(3, 13),
                computed: BigInt::from(12),
            }]
        );
        assert!(!is_consistent(&poly, &pts));
    }

    #[test]
    fn test_validate_is_idempotent() {
        let (poly, mut pts) = reference();
        pts[0] = Point::new(1, 5);
        pts[3] = Point::new(6, 40);

        let first = validate(&poly, &pts);
        let second = validate(&poly, &pts);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
