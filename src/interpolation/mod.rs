//! Exact Polynomial Interpolation
//!
//! Three interchangeable ways to recover `[a0, ..., a(k-1)]` from `k` points:
//!
//! | Method      | Working domain                         | Failure signals                       |
//! |-------------|----------------------------------------|---------------------------------------|
//! | Lagrange    | integer basis numerators, rational sum | `NonIntegerResult`                    |
//! | Newton      | integer divided-difference table       | `NonExactDivision`                    |
//! | Vandermonde | rational augmented matrix              | `SingularMatrix`, `NonIntegerResult`  |
//!
//! All three reject repeated x-values before doing any arithmetic. For points
//! that lie on one integer polynomial of degree `< k`, they return identical
//! coefficient vectors.
//!
//! `least_squares` is a floating-point cross-check only. It rounds, so it is
//! never used to decide anything.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::math::polynomial::Polynomial;
use crate::point::Point;

pub mod lagrange;
pub mod least_squares;
pub mod newton;
pub mod vandermonde;

pub use lagrange::Lagrange;
pub use newton::Newton;
pub use vandermonde::Vandermonde;

/// A solver producing the full coefficient vector of the unique polynomial of
/// degree `< points.len()` through `points`.
pub trait Interpolator {
    fn interpolate(&self, points: &[Point]) -> Result<Polynomial>;
}

/// Selects one of the exact solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    Lagrange,
    Newton,
    #[default]
    Vandermonde,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::Lagrange, Method::Newton, Method::Vandermonde];

    pub fn name(&self) -> &'static str {
        match self {
            Method::Lagrange => "lagrange",
            Method::Newton => "newton",
            Method::Vandermonde => "vandermonde",
        }
    }

    pub fn interpolator(&self) -> &'static dyn Interpolator {
        match self {
            Method::Lagrange => &Lagrange,
            Method::Newton => &Newton,
            Method::Vandermonde => &Vandermonde,
        }
    }

    pub fn interpolate(&self, points: &[Point]) -> Result<Polynomial> {
        self.interpolator().interpolate(points)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lagrange" => Ok(Method::Lagrange),
            "newton" => Ok(Method::Newton),
            "vandermonde" | "gauss" => Ok(Method::Vandermonde),
            other => Err(format!(
                "unknown method '{}' (expected lagrange, newton or vandermonde)",
                other
            )),
        }
    }
}

/// Rejects empty inputs and repeated x-values.
pub(crate) fn check_abscissas(points: &[Point]) -> Result<()> {
    if points.is_empty() {
        return Err(Error::NoPoints);
    }
    let mut seen = HashSet::with_capacity(points.len());
    for p in points {
        if !seen.insert(&p.x) {
            return Err(Error::DuplicateAbscissa(p.x.clone()));
        }
    }
    Ok(())
}
