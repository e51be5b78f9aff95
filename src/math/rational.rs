//! Exact Rational Arithmetic
//!
//! Interpolation over integer points produces intermediate fractions even when
//! the final polynomial has integer coefficients. Nothing here rounds: integer
//! division must be exact and fractions are carried as reduced `BigRational`s
//! until the very end.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::Zero;

use crate::error::{Error, Result};

/// Divides `dividend` by `divisor`, failing unless the remainder is zero.
///
/// A zero divisor is reported as a non-exact division: it only arises from
/// repeated x-values, which the callers reject earlier.
pub fn exact_div(dividend: &BigInt, divisor: &BigInt) -> Result<BigInt> {
    if divisor.is_zero() {
        return Err(Error::NonExactDivision {
            dividend: dividend.clone(),
            divisor: divisor.clone(),
        });
    }

    let (quotient, remainder) = dividend.div_rem(divisor);
    if !remainder.is_zero() {
        return Err(Error::NonExactDivision {
            dividend: dividend.clone(),
            divisor: divisor.clone(),
        });
    }
    Ok(quotient)
}

/// Converts a rational to an integer, failing if it has a fractional part.
pub fn to_integer(value: &BigRational) -> Result<BigInt> {
    if value.is_integer() {
        Ok(value.to_integer())
    } else {
        Err(Error::NonIntegerResult(value.to_string()))
    }
}

/// Converts every entry of `values`, stopping at the first non-integer.
pub fn to_integers(values: &[BigRational]) -> Result<Vec<BigInt>> {
    values.iter().map(to_integer).collect()
}

pub fn from_integer(value: &BigInt) -> BigRational {
    BigRational::from_integer(value.clone())
}
