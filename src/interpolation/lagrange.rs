//! Lagrange Interpolation
//!
//! ```text
//! f(x)  = Σ_i y_i · L_i(x)
//! L_i(x) = Π_{j≠i} (x - x_j) / (x_i - x_j)
//! ```
//!
//! Each basis numerator `Π_{j≠i} (x - x_j)` is an integer polynomial; only the
//! scale `y_i / Π_{j≠i} (x_i - x_j)` is fractional. Terms are summed as exact
//! rationals and converted to integers once at the end.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use tracing::trace;

use super::{check_abscissas, Interpolator};
use crate::error::{Error, Result};
use crate::math::polynomial::{from_roots, Polynomial};
use crate::math::rational::{from_integer, to_integer, to_integers};
use crate::point::Point;

pub struct Lagrange;

/// Denominator of the i-th basis polynomial: `Π_{j≠i} (x_i - x_j)`.
fn basis_denominator(i: usize, points: &[Point]) -> BigInt {
    let x_i = &points[i].x;
    points
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != i)
        .fold(BigInt::one(), |acc, (_, p)| acc * (x_i - &p.x))
}

/// Lagrange coefficient at zero.
///
/// λ_i(0) = Π_{j≠i} (0 - x_j) / (x_i - x_j)
///
/// A repeated x-value makes the denominator zero and is reported as
/// `DuplicateAbscissa`.
pub fn coefficient_at_zero(i: usize, points: &[Point]) -> Result<BigRational> {
    let denominator = basis_denominator(i, points);
    if denominator.is_zero() {
        return Err(Error::DuplicateAbscissa(points[i].x.clone()));
    }

    let numerator = points
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != i)
        .fold(BigInt::one(), |acc, (_, p)| acc * -&p.x);

    Ok(BigRational::new(numerator, denominator))
}

/// Recovers only the secret `f(0) = Σ y_i · λ_i(0)`.
pub fn secret_at_zero(points: &[Point]) -> Result<BigInt> {
    check_abscissas(points)?;

    let mut sum = BigRational::zero();
    for (i, p) in points.iter().enumerate() {
        sum += coefficient_at_zero(i, points)? * from_integer(&p.y);
    }

    to_integer(&sum)
}

impl Interpolator for Lagrange {
    fn interpolate(&self, points: &[Point]) -> Result<Polynomial> {
        check_abscissas(points)?;

        let k = points.len();
        let mut coefficients = vec![BigRational::zero(); k];

        for (i, point) in points.iter().enumerate() {
            let others = points
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, p)| &p.x);
            let numerator = from_roots(others);
            let scale = BigRational::new(point.y.clone(), basis_denominator(i, points));
            trace!(x = %point.x, scale = %scale, "lagrange basis");

            for (acc, c) in coefficients.iter_mut().zip(numerator.iter()) {
                *acc += &scale * from_integer(c);
            }
        }

        Ok(Polynomial::new(to_integers(&coefficients)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(pairs: &[(i64, i64)]) -> Vec<Point> {
        pairs.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_coefficients_at_zero_sum_to_one() {
        // Interpolating the constant 1 must give 1 at every x, including 0
        let pts = points(&[(1, 0), (3, 0), (5, 0)]);
        let sum: BigRational = (0..pts.len())
            .map(|i| coefficient_at_zero(i, &pts).unwrap())
            .sum();
        assert_eq!(sum, BigRational::one());
    }

    #[test]
    fn test_coefficient_at_zero_with_repeated_x() {
        let pts = points(&[(1, 4), (1, 5), (2, 7)]);
        assert_eq!(
            coefficient_at_zero(0, &pts).unwrap_err(),
            Error::DuplicateAbscissa(BigInt::from(1))
        );
        // Index 2 has a distinct x, but the others share one
        assert!(coefficient_at_zero(2, &pts).is_ok());
    }

    #[test]
    fn test_secret_at_zero() {
        // f(x) = 3 + x^2
        let pts = points(&[(1, 4), (2, 7), (3, 12)]);
        assert_eq!(secret_at_zero(&pts).unwrap(), BigInt::from(3));

        let pts = points(&[(2, 7), (3, 12), (6, 39)]);
        assert_eq!(secret_at_zero(&pts).unwrap(), BigInt::from(3));
    }

    #[test]
    fn test_full_coefficients() {
        // f(x) = 5 - 2x + 7x^2 - x^3
        let f = |x: i64| 5 - 2 * x + 7 * x * x - x * x * x;
        let pts: Vec<Point> = [-2i64, 1, 4, 9].iter().map(|&x| Point::new(x, f(x))).collect();

        let poly = Lagrange.interpolate(&pts).unwrap();
        let expected: Vec<BigInt> = [5, -2, 7, -1].iter().map(|&c| BigInt::from(c)).collect();
        assert_eq!(poly.coefficients(), expected.as_slice());
    }

    #[test]
    fn test_non_integer_result() {
        // Through (1,4),(2,7),(3,13) the quadratic term is 3/2
        let pts = points(&[(1, 4), (2, 7), (3, 13)]);
        assert!(matches!(
            Lagrange.interpolate(&pts),
            Err(Error::NonIntegerResult(_))
        ));
    }

    #[test]
    fn test_duplicate_x_is_rejected() {
        let pts = points(&[(1, 4), (1, 5)]);
        assert_eq!(
            secret_at_zero(&pts).unwrap_err(),
            Error::DuplicateAbscissa(BigInt::from(1))
        );
        assert!(Lagrange.interpolate(&pts).is_err());
    }
}
