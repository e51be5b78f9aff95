//! Sample points and the per-record point set.

use std::fmt;

use num_bigint::BigInt;
use thiserror::Error;

/// A decoded sample `(x, y)`. Equality and hashing are structural so points can
/// key the mismatch tally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: BigInt,
    pub y: BigInt,
}

impl Point {
    pub fn new(x: impl Into<BigInt>, y: impl Into<BigInt>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// All `n` points of one input record together with the threshold `k`.
///
/// Invariants: `points.len() == n`, `1 <= k <= n`. Construct through
/// [`PointSet::new`], which checks them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointSet {
    points: Vec<Point>,
    k: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointSetError {
    #[error("record declares n = {declared} but has {actual} points")]
    CountMismatch { declared: usize, actual: usize },
    #[error("k must be at least 1")]
    ZeroThreshold,
    #[error("k = {k} exceeds the number of points n = {n}")]
    ThresholdTooLarge { k: usize, n: usize },
}

impl PointSet {
    pub fn new(points: Vec<Point>, n: usize, k: usize) -> Result<Self, PointSetError> {
        if points.len() != n {
            return Err(PointSetError::CountMismatch {
                declared: n,
                actual: points.len(),
            });
        }
        if k == 0 {
            return Err(PointSetError::ZeroThreshold);
        }
        if k > n {
            return Err(PointSetError::ThresholdTooLarge { k, n });
        }
        Ok(Self { points, k })
    }

    pub fn n(&self) -> usize {
        self.points.len()
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The points at `indices`, in index order.
    pub fn select(&self, indices: &[usize]) -> Vec<Point> {
        indices.iter().map(|&i| self.points[i].clone()).collect()
    }

    /// The first `k` points in record order.
    pub fn leading(&self) -> &[Point] {
        &self.points[..self.k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_point_is_a_structural_map_key() {
        let mut counts: HashMap<Point, usize> = HashMap::new();
        *counts.entry(Point::new(3, 12)).or_default() += 1;
        *counts.entry(Point::new(3, 12)).or_default() += 1;
        *counts.entry(Point::new(3, 13)).or_default() += 1;

        assert_eq!(counts[&Point::new(3, 12)], 2);
        assert_eq!(counts[&Point::new(3, 13)], 1);
    }

    #[test]
    fn test_point_set_invariants() {
        let pts = vec![Point::new(1, 4), Point::new(2, 7)];

        assert!(PointSet::new(pts.clone(), 2, 2).is_ok());
        assert_eq!(
            PointSet::new(pts.clone(), 3, 2).unwrap_err(),
            PointSetError::CountMismatch {
                declared: 3,
                actual: 2
            }
        );
        assert_eq!(
            PointSet::new(pts.clone(), 2, 0).unwrap_err(),
            PointSetError::ZeroThreshold
        );
        assert_eq!(
            PointSet::new(pts, 2, 3).unwrap_err(),
            PointSetError::ThresholdTooLarge { k: 3, n: 2 }
        );
    }

    #[test]
    fn test_select_and_leading() {
        let set = PointSet::new(
            vec![Point::new(1, 4), Point::new(2, 7), Point::new(3, 12)],
            3,
            2,
        )
        .unwrap();

        assert_eq!(set.leading(), &[Point::new(1, 4), Point::new(2, 7)]);
        assert_eq!(set.select(&[0, 2]), vec![Point::new(1, 4), Point::new(3, 12)]);
    }
}
