//! Newton Divided Differences
//!
//! ```text
//! dd[i][0] = y_i
//! dd[i][j] = (dd[i+1][j-1] - dd[i][j-1]) / (x_{i+j} - x_i)
//!
//! f(x) = Σ_j dd[0][j] · Π_{m<j} (x - x_m)
//! ```
//!
//! For an integer polynomial sampled at distinct integer x-values every divided
//! difference is an integer, so each division must be exact. A remainder means
//! the points do not lie on one integer polynomial of degree `< k`.

use num_bigint::BigInt;
use num_traits::Zero;
use tracing::trace;

use super::{check_abscissas, Interpolator};
use crate::error::Result;
use crate::math::polynomial::{mul_monomial, Polynomial};
use crate::math::rational::exact_div;
use crate::point::Point;

pub struct Newton;

/// Builds the divided-difference table; row `i` holds `dd[i][0..k-i]`.
pub fn divided_differences(points: &[Point]) -> Result<Vec<Vec<BigInt>>> {
    check_abscissas(points)?;

    let k = points.len();
    let mut table: Vec<Vec<BigInt>> = points.iter().map(|p| vec![p.y.clone()]).collect();

    for j in 1..k {
        for i in 0..k - j {
            let numerator = &table[i + 1][j - 1] - &table[i][j - 1];
            let denominator = &points[i + j].x - &points[i].x;
            let value = exact_div(&numerator, &denominator)?;
            table[i].push(value);
        }
    }

    Ok(table)
}

impl Interpolator for Newton {
    fn interpolate(&self, points: &[Point]) -> Result<Polynomial> {
        let table = divided_differences(points)?;
        let k = points.len();

        let mut coefficients = vec![BigInt::zero(); k];
        // Running product Π_{m<order} (x - x_m), starting from the constant 1
        let mut basis = vec![BigInt::from(1)];

        for order in 0..k {
            if order > 0 {
                basis = mul_monomial(&basis, &points[order - 1].x);
            }
            let dd = &table[0][order];
            trace!(order, dd = %dd, "newton term");
            for (acc, b) in coefficients.iter_mut().zip(basis.iter()) {
                *acc += dd * b;
            }
        }

        Ok(Polynomial::new(coefficients))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn points(pairs: &[(i64, i64)]) -> Vec<Point> {
        pairs.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_divided_difference_table() {
        // f(x) = 3 + x^2 at 1, 2, 3
        let table = divided_differences(&points(&[(1, 4), (2, 7), (3, 12)])).unwrap();
        assert_eq!(table[0], vec![BigInt::from(4), BigInt::from(3), BigInt::from(1)]);
        assert_eq!(table[1], vec![BigInt::from(7), BigInt::from(5)]);
        assert_eq!(table[2], vec![BigInt::from(12)]);
    }

    #[test]
    fn test_interpolate_unsorted_x() {
        // f(x) = -4 + 3x - x^2 + 2x^3, points deliberately out of order
        let f = |x: i64| -4 + 3 * x - x * x + 2 * x * x * x;
        let pts: Vec<Point> = [7i64, -1, 3, 0].iter().map(|&x| Point::new(x, f(x))).collect();

        let poly = Newton.interpolate(&pts).unwrap();
        let expected: Vec<BigInt> = [-4, 3, -1, 2].iter().map(|&c| BigInt::from(c)).collect();
        assert_eq!(poly.coefficients(), expected.as_slice());
    }

    #[test]
    fn test_single_point_is_constant() {
        let poly = Newton.interpolate(&points(&[(5, 42)])).unwrap();
        assert_eq!(poly.coefficients(), &[BigInt::from(42)]);
    }

    #[test]
    fn test_inconsistent_points_fail_exact_division() {
        // (1,4),(2,7),(3,13): second difference 3 over a span of 2
        let err = Newton
            .interpolate(&points(&[(1, 4), (2, 7), (3, 13)]))
            .unwrap_err();
        assert!(matches!(err, Error::NonExactDivision { .. }), "{:?}", err);
    }

    #[test]
    fn test_duplicate_x_is_rejected() {
        let err = Newton.interpolate(&points(&[(2, 7), (2, 8)])).unwrap_err();
        assert_eq!(err, Error::DuplicateAbscissa(BigInt::from(2)));
    }
}
