//! Exact Numeric Primitives
//!
//! Building blocks shared by every solver:
//!
//! - **base**: positional digit strings in radix 2..=36 to big integers
//! - **rational**: exact division and rational-to-integer conversion
//! - **polynomial**: coefficient vectors, Horner evaluation, monomial products

pub mod base;
pub mod polynomial;
pub mod rational;
