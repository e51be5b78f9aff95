//! Recovery of a polynomial secret from base-encoded shares.
//!
//! A record lists `n` points `(x, y)` of an unknown polynomial of degree
//! `k - 1`, each `y` written in its own base. The secret is the constant term.
//! [`solve`] interpolates the first `k` points with exact big-integer
//! arithmetic; [`reconstruct`] searches `k`-subsets when some points may be
//! wrong and reports which ones.

pub mod error;
pub mod input;
pub mod interpolation;
pub mod math;
pub mod point;
pub mod reconstruct;
pub mod report;
pub mod solve;
pub mod storage;
pub mod validate;

pub use error::{Error, Result};
pub use input::parse_record;
pub use interpolation::{Interpolator, Method};
pub use math::base::decode;
pub use math::polynomial::Polynomial;
pub use point::{Point, PointSet};
pub use reconstruct::{reconstruct, ReconstructOptions, Reconstruction, SearchOutcome};
pub use solve::{solve, SolveOptions, SolveReport};
