//! Integer polynomials as coefficient vectors.
//!
//! `coefficients[i]` is the coefficient of `x^i`; `coefficients[0]` is the secret.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// A polynomial with exact integer coefficients, lowest power first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    coefficients: Vec<BigInt>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<BigInt>) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &[BigInt] {
        &self.coefficients
    }

    pub fn into_coefficients(self) -> Vec<BigInt> {
        self.coefficients
    }

    /// The constant term `a0`; zero for an empty coefficient vector.
    pub fn secret(&self) -> BigInt {
        self.coefficients.first().cloned().unwrap_or_else(BigInt::zero)
    }

    /// Number of coefficients, i.e. the threshold `k` the polynomial was built from.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Evaluates the polynomial at `x` with Horner's rule.
    pub fn evaluate(&self, x: &BigInt) -> BigInt {
        self.coefficients
            .iter()
            .rev()
            .fold(BigInt::zero(), |acc, c| acc * x + c)
    }
}

impl From<Vec<BigInt>> for Polynomial {
    fn from(coefficients: Vec<BigInt>) -> Self {
        Self::new(coefficients)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote_any = false;
        for (power, c) in self.coefficients.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            let magnitude = c.abs();
            if wrote_any {
                write!(f, " {} ", if c.is_negative() { '-' } else { '+' })?;
            } else if c.is_negative() {
                write!(f, "-")?;
            }
            match power {
                0 => write!(f, "{}", magnitude)?,
                1 => write!(f, "{}x", magnitude)?,
                _ => write!(f, "{}x^{}", magnitude, power)?,
            }
            wrote_any = true;
        }
        if !wrote_any {
            write!(f, "0")?;
        }
        Ok(())
    }
}

/// Multiplies `poly` by the monomial `(x - root)`, returning a vector one longer.
pub fn mul_monomial(poly: &[BigInt], root: &BigInt) -> Vec<BigInt> {
    let mut product = vec![BigInt::zero(); poly.len() + 1];
    for (i, c) in poly.iter().enumerate() {
        product[i + 1] += c;
        product[i] -= c * root;
    }
    product
}

/// Expands `Π (x - root)` over `roots`; the empty product is `[1]`.
pub fn from_roots<'a>(roots: impl IntoIterator<Item = &'a BigInt>) -> Vec<BigInt> {
    roots
        .into_iter()
        .fold(vec![BigInt::from(1)], |acc, root| mul_monomial(&acc, root))
}
