//! Error taxonomy for decoding, interpolation and reconstruction.
//!
//! Solver-level errors (`NonExactDivision`, `NonIntegerResult`, `SingularMatrix`,
//! `DuplicateAbscissa`) are fatal on the plain solve path but only reject the
//! current subset during outlier-tolerant reconstruction.

use num_bigint::BigInt;
use thiserror::Error;

use crate::point::Point;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid digit {digit:?} at position {position} for base {base}")]
    InvalidDigit {
        digit: char,
        position: usize,
        base: u32,
    },

    #[error("unsupported base {0} (expected 2..=36)")]
    InvalidBase(u32),

    #[error("empty digit string")]
    EmptyValue,

    #[error("{dividend} is not exactly divisible by {divisor}")]
    NonExactDivision { dividend: BigInt, divisor: BigInt },

    #[error("result {0} is not an integer")]
    NonIntegerResult(String),

    #[error("singular matrix: zero pivot in column {column}")]
    SingularMatrix { column: usize },

    #[error("x = {0} appears more than once in the interpolation subset")]
    DuplicateAbscissa(BigInt),

    #[error("no points to interpolate")]
    NoPoints,

    #[error("interpolation methods produced different coefficients")]
    MethodsDisagree,

    #[error("no consistent polynomial found after {subsets_tried} subsets")]
    ReconstructionFailed {
        suspects: Vec<(Point, usize)>,
        subsets_tried: usize,
    },
}

impl Error {
    /// True for errors that only say something about the chosen subset, not the input.
    pub fn is_subset_rejection(&self) -> bool {
        matches!(
            self,
            Error::NonExactDivision { .. }
                | Error::NonIntegerResult(_)
                | Error::SingularMatrix { .. }
                | Error::DuplicateAbscissa(_)
        )
    }
}
