//! Vandermonde System via Exact Gaussian Elimination
//!
//! ```text
//! ┌ 1  x_0  x_0²  …  x_0^{k-1} │ y_0 ┐
//! │ 1  x_1  x_1²  …  x_1^{k-1} │ y_1 │
//! │ ⋮                          │  ⋮  │
//! └ 1  x_k  …                  │ y_k ┘
//! ```
//!
//! Entries are `BigRational`, so the elimination never rounds. Partial pivoting
//! still picks the largest-magnitude pivot in each column; with exact entries
//! this only keeps intermediate numerators and denominators small.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use tracing::trace;

use super::Interpolator;
use crate::error::{Error, Result};
use crate::math::polynomial::Polynomial;
use crate::math::rational::{from_integer, to_integers};
use crate::point::Point;

pub struct Vandermonde;

/// Builds the `k × (k+1)` augmented matrix `[V | y]`.
pub fn augmented_matrix(points: &[Point]) -> Vec<Vec<BigRational>> {
    let k = points.len();
    points
        .iter()
        .map(|p| {
            let x = from_integer(&p.x);
            let mut row = Vec::with_capacity(k + 1);
            let mut power = BigRational::one();
            for _ in 0..k {
                row.push(power.clone());
                power *= &x;
            }
            row.push(from_integer(&p.y));
            row
        })
        .collect()
}

/// Solves `[A | b]` in place by forward elimination with partial pivoting
/// followed by back substitution.
pub fn solve(mut matrix: Vec<Vec<BigRational>>) -> Result<Vec<BigRational>> {
    let n = matrix.len();

    for col in 0..n {
        let mut pivot_row = col;
        for row in col + 1..n {
            if matrix[row][col].abs() > matrix[pivot_row][col].abs() {
                pivot_row = row;
            }
        }
        if matrix[pivot_row][col].is_zero() {
            return Err(Error::SingularMatrix { column: col });
        }
        matrix.swap(col, pivot_row);
        trace!(col, pivot_row, pivot = %matrix[col][col], "pivot");

        // Normalize the pivot row so the pivot becomes 1
        let pivot = matrix[col][col].clone();
        for entry in matrix[col][col..].iter_mut() {
            *entry /= &pivot;
        }

        let (upper, lower) = matrix.split_at_mut(col + 1);
        let normalized = &upper[col];
        for row in lower.iter_mut() {
            let factor = row[col].clone();
            if factor.is_zero() {
                continue;
            }
            for (entry, p) in row[col..].iter_mut().zip(normalized[col..].iter()) {
                *entry -= &factor * p;
            }
        }
    }

    let mut solution = vec![BigRational::zero(); n];
    for i in (0..n).rev() {
        let mut sum = matrix[i][n].clone();
        for j in i + 1..n {
            sum -= &matrix[i][j] * &solution[j];
        }
        solution[i] = sum;
    }

    Ok(solution)
}

impl Interpolator for Vandermonde {
    fn interpolate(&self, points: &[Point]) -> Result<Polynomial> {
        if points.is_empty() {
            return Err(Error::NoPoints);
        }
        // Repeated x-values surface as a zero pivot
        let solution = solve(augmented_matrix(points))?;
        let coefficients: Vec<BigInt> = to_integers(&solution)?;
        Ok(Polynomial::new(coefficients))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(pairs: &[(i64, i64)]) -> Vec<Point> {
        pairs.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn rat(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    #[test]
    fn test_augmented_matrix() {
        let m = augmented_matrix(&points(&[(2, 7), (3, 12)]));
        assert_eq!(m[0], vec![rat(1), rat(2), rat(7)]);
        assert_eq!(m[1], vec![rat(1), rat(3), rat(12)]);
    }

    #[test]
    fn test_solve_rational_system() {
        // x + y = 3, x - y = 0  =>  x = y = 3/2
        let m = vec![vec![rat(1), rat(1), rat(3)], vec![rat(1), rat(-1), rat(0)]];
        let half3 = BigRational::new(BigInt::from(3), BigInt::from(2));
        assert_eq!(solve(m).unwrap(), vec![half3.clone(), half3]);
    }

    #[test]
    fn test_interpolate_reference_case() {
        let poly = Vandermonde
            .interpolate(&points(&[(1, 4), (2, 7), (3, 12)]))
            .unwrap();
        let expected: Vec<BigInt> = [3, 0, 1].iter().map(|&c| BigInt::from(c)).collect();
        assert_eq!(poly.coefficients(), expected.as_slice());
    }

    #[test]
    fn test_negative_x_values() {
        // f(x) = 10 - 3x + 2x^2
        let f = |x: i64| 10 - 3 * x + 2 * x * x;
        let pts: Vec<Point> = [-5i64, 0, 4].iter().map(|&x| Point::new(x, f(x))).collect();
        let poly = Vandermonde.interpolate(&pts).unwrap();
        let expected: Vec<BigInt> = [10, -3, 2].iter().map(|&c| BigInt::from(c)).collect();
        assert_eq!(poly.coefficients(), expected.as_slice());
    }

    #[test]
    fn test_duplicate_x_is_singular() {
        let err = Vandermonde
            .interpolate(&points(&[(1, 4), (2, 7), (2, 9)]))
            .unwrap_err();
        assert!(matches!(err, Error::SingularMatrix { .. }), "{:?}", err);

        // Same y does not make the system any less singular
        let err = Vandermonde
            .interpolate(&points(&[(1, 4), (2, 7), (2, 7)]))
            .unwrap_err();
        assert!(matches!(err, Error::SingularMatrix { .. }), "{:?}", err);
    }

    #[test]
    fn test_non_integer_solution() {
        let err = Vandermonde
            .interpolate(&points(&[(1, 4), (2, 7), (3, 13)]))
            .unwrap_err();
        assert!(matches!(err, Error::NonIntegerResult(_)), "{:?}", err);
    }
}
