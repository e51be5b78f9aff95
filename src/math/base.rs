//! Base Decoder
//!
//! Share values arrive as digit strings in mixed radices. Each string is folded
//! digit by digit into a `BigUint`, so values far beyond 64 bits decode exactly.
//!
//! ```text
//! decode("213", 4) = 2·4² + 1·4 + 3 = 39
//! ```

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::error::{Error, Result};

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

/// Decodes a non-negative digit string in `base` into an exact integer.
///
/// Digits are `0-9` followed by `a-z` (case-insensitive). Leading zeros are
/// allowed; sign characters are not.
pub fn decode(digits: &str, base: u32) -> Result<BigInt> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(Error::InvalidBase(base));
    }
    if digits.is_empty() {
        return Err(Error::EmptyValue);
    }

    let mut acc = BigUint::zero();
    for (position, digit) in digits.chars().enumerate() {
        let value = digit.to_digit(base).ok_or(Error::InvalidDigit {
            digit,
            position,
            base,
        })?;
        acc = acc * base + value;
    }

    Ok(BigInt::from(acc))
}

/// Parses the textual radix that accompanies a value in an input record.
pub fn parse_base(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    // Anything unparsable is reported with the sentinel 0, which is never valid.
    let base: u32 = trimmed.parse().map_err(|_| Error::InvalidBase(0))?;
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(Error::InvalidBase(base));
    }
    Ok(base)
}
