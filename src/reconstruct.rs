//! Outlier-Tolerant Reconstruction
//!
//! When some of the `n` shares are corrupted, no single polynomial passes
//! through all of them. The reconstructor walks every `k`-subset of the point
//! indices in lexicographic order, interpolates the subset, and validates the
//! candidate against the *full* point set:
//!
//! ```text
//!            ┌──────────── next subset ─────────────┐
//!            ▼                                       │
//!   Searching ── solve ── validate ── mismatches ────┤── tally each bad point
//!      │                     │                       │
//!      │                     └── none ──▶ Found      │
//!      └── no subset left / cap reached ──▶ Exhausted
//! ```
//!
//! A candidate with zero mismatches ends the walk at once. A corrupted share is
//! part of the full set, though, so with outliers present no candidate is
//! strictly consistent. Unless the search is `strict`, a completed walk then
//! settles on the best candidate: the polynomial with the fewest mismatches,
//! provided no *different* polynomial ties with it. Its mismatching points are
//! reported as outliers. A tie, or a walk cut short by `max_subsets`, ends
//! `Exhausted`.
//!
//! A solver error on a subset (non-integer coefficients, inexact division,
//! singular system, repeated x) rejects that subset and the walk continues.
//! Such rejections leave the tally untouched because no individual point was
//! tested.
//!
//! Points that fail validation under the most candidate polynomials are the
//! strongest outlier suspects. The walk visits up to C(n, k) subsets, which is
//! only practical for the small share counts this tool is built for.

use std::collections::HashMap;
use std::fmt;

use num_bigint::BigInt;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::interpolation::Method;
use crate::math::polynomial::Polynomial;
use crate::point::{Point, PointSet};
use crate::validate::validate;

// ============================================================================
// Combinations
// ============================================================================

/// The lexicographically first `k`-subset: `[0, 1, ..., k-1]`.
pub fn first_combination(k: usize) -> Vec<usize> {
    (0..k).collect()
}

/// The lexicographic successor of `current` among `k`-subsets of `0..n`, or
/// `None` when `current` is the last one or does not fit in `0..n`.
///
/// Advances the rightmost index that can still grow, then resets every index
/// to its right to the consecutive values that follow it.
pub fn next_combination(current: &[usize], n: usize) -> Option<Vec<usize>> {
    let k = current.len();
    let slack = n.checked_sub(k)?;
    let pos = (0..k).rev().find(|&i| current[i] < slack + i)?;

    let mut next = current.to_vec();
    next[pos] += 1;
    for j in pos + 1..k {
        next[j] = next[j - 1] + 1;
    }
    Some(next)
}

/// Iterator over all `k`-subsets of `0..n` in lexicographic order.
pub struct Combinations {
    n: usize,
    next: Option<Vec<usize>>,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        let next = if k <= n { Some(first_combination(k)) } else { None };
        Self { n, next }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = next_combination(&current, self.n);
        Some(current)
    }
}

// ============================================================================
// Mismatch tally
// ============================================================================

/// Per-point count of candidate polynomials the point failed to lie on.
#[derive(Debug, Clone, Default)]
pub struct MismatchTally {
    counts: HashMap<Point, usize>,
}

impl MismatchTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, point: &Point) {
        *self.counts.entry(point.clone()).or_insert(0) += 1;
    }

    pub fn count(&self, point: &Point) -> usize {
        self.counts.get(point).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Suspects by descending failure count; ties in ascending `(x, y)` order.
    pub fn ranked(&self) -> Vec<(Point, usize)> {
        let mut ranked: Vec<(Point, usize)> = self
            .counts
            .iter()
            .map(|(p, &c)| (p.clone(), c))
            .collect();
        ranked.sort_by(|(pa, ca), (pb, cb)| cb.cmp(ca).then_with(|| pa.cmp(pb)));
        ranked
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// One event of a reconstruction run, returned alongside the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    SubsetTried {
        subset: Vec<usize>,
    },
    SubsetRejected {
        subset: Vec<usize>,
        reason: Error,
    },
    Mismatch {
        subset: Vec<usize>,
        point: Point,
        computed: BigInt,
    },
    Found {
        subset: Vec<usize>,
        outliers: usize,
    },
    Exhausted {
        subsets_tried: usize,
        truncated: bool,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SubsetTried { subset } => write!(f, "trying subset {:?}", subset),
            Diagnostic::SubsetRejected { subset, reason } => {
                write!(f, "subset {:?} rejected: {}", subset, reason)
            }
            Diagnostic::Mismatch {
                point, computed, ..
            } => write!(
                f,
                "Mismatch: x={} expected={} got={}",
                point.x, point.y, computed
            ),
            Diagnostic::Found { subset, outliers } => {
                if *outliers == 0 {
                    write!(f, "subset {:?} is consistent", subset)
                } else {
                    write!(
                        f,
                        "subset {:?} accepted as best candidate ({} outliers)",
                        subset, outliers
                    )
                }
            }
            Diagnostic::Exhausted {
                subsets_tried,
                truncated,
            } => {
                if *truncated {
                    write!(f, "search stopped at the cap after {} subsets", subsets_tried)
                } else {
                    write!(f, "all {} subsets tried", subsets_tried)
                }
            }
        }
    }
}

// ============================================================================
// Reconstructor
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ReconstructOptions {
    /// Solver used on each subset.
    pub method: Method,
    /// Upper bound on the number of subsets tried; `None` walks all C(n, k).
    pub max_subsets: Option<usize>,
    /// Only accept a polynomial that every point lies on.
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Searching,
    Found,
    Exhausted,
}

/// A reconstructed polynomial and how it was found.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    pub polynomial: Polynomial,
    /// Indices into the point set of the subset that produced `polynomial`.
    pub subset: Vec<usize>,
    /// Points that do not lie on `polynomial`; empty for a strict match.
    pub outliers: Vec<Point>,
    pub subsets_tried: usize,
    /// Failure counts accumulated over every candidate tried.
    pub suspects: Vec<(Point, usize)>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Reconstruction {
    pub fn secret(&self) -> BigInt {
        self.polynomial.secret()
    }

    pub fn is_exact(&self) -> bool {
        self.outliers.is_empty()
    }
}

/// The search ended without an acceptable polynomial.
#[derive(Debug, Clone)]
pub struct Exhaustion {
    pub suspects: Vec<(Point, usize)>,
    pub subsets_tried: usize,
    /// True when `max_subsets` stopped the walk before every subset was tried.
    pub truncated: bool,
    /// True when two different polynomials shared the fewest mismatches.
    pub ambiguous: bool,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Found(Reconstruction),
    Exhausted(Exhaustion),
}

impl SearchOutcome {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            SearchOutcome::Found(r) => &r.diagnostics,
            SearchOutcome::Exhausted(e) => &e.diagnostics,
        }
    }

    pub fn into_result(self) -> Result<Reconstruction, Error> {
        match self {
            SearchOutcome::Found(r) => Ok(r),
            SearchOutcome::Exhausted(e) => Err(Error::ReconstructionFailed {
                suspects: e.suspects,
                subsets_tried: e.subsets_tried,
            }),
        }
    }
}

#[derive(Debug, Clone)]
struct Candidate {
    subset: Vec<usize>,
    polynomial: Polynomial,
    outliers: Vec<Point>,
}

/// Step-wise subset search over one point set.
pub struct Reconstructor<'a> {
    set: &'a PointSet,
    options: ReconstructOptions,
    state: SearchState,
    current: Option<Vec<usize>>,
    best: Option<Candidate>,
    tied: bool,
    accepted: Option<Candidate>,
    tally: MismatchTally,
    diagnostics: Vec<Diagnostic>,
    subsets_tried: usize,
    truncated: bool,
}

impl<'a> Reconstructor<'a> {
    pub fn new(set: &'a PointSet, options: ReconstructOptions) -> Self {
        Self {
            set,
            options,
            state: SearchState::Searching,
            current: Some(first_combination(set.k())),
            best: None,
            tied: false,
            accepted: None,
            tally: MismatchTally::new(),
            diagnostics: Vec::new(),
            subsets_tried: 0,
            truncated: false,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn tally(&self) -> &MismatchTally {
        &self.tally
    }

    pub fn subsets_tried(&self) -> usize {
        self.subsets_tried
    }

    /// Tries one subset and moves to the next state. Terminal states are sticky.
    pub fn step(&mut self) -> SearchState {
        if self.state != SearchState::Searching {
            return self.state;
        }

        if let Some(cap) = self.options.max_subsets {
            if self.subsets_tried >= cap && self.current.is_some() {
                self.truncated = true;
                self.current = None;
            }
        }

        let subset = match self.current.take() {
            Some(subset) => subset,
            None => {
                self.finish();
                return self.state;
            }
        };

        self.subsets_tried += 1;
        debug!(subset = ?subset, "trying subset");
        self.diagnostics.push(Diagnostic::SubsetTried {
            subset: subset.clone(),
        });

        let points = self.set.select(&subset);
        match self.options.method.interpolate(&points) {
            Ok(polynomial) => {
                let mismatches = validate(&polynomial, self.set.points());
                if mismatches.is_empty() {
                    self.accept(Candidate {
                        subset,
                        polynomial,
                        outliers: Vec::new(),
                    });
                    return self.state;
                }

                let mut outliers = Vec::with_capacity(mismatches.len());
                for m in mismatches {
                    self.tally.record(&m.point);
                    self.diagnostics.push(Diagnostic::Mismatch {
                        subset: subset.clone(),
                        point: m.point.clone(),
                        computed: m.computed,
                    });
                    outliers.push(m.point);
                }
                self.consider(Candidate {
                    subset: subset.clone(),
                    polynomial,
                    outliers,
                });
            }
            Err(reason) => {
                if reason.is_subset_rejection() {
                    debug!(subset = ?subset, %reason, "subset rejected");
                } else {
                    warn!(subset = ?subset, %reason, "subset failed unexpectedly");
                }
                self.diagnostics.push(Diagnostic::SubsetRejected {
                    subset: subset.clone(),
                    reason,
                });
            }
        }

        self.current = next_combination(&subset, self.set.n());
        self.state
    }

    /// Keeps track of the fewest-mismatch candidate and whether it is unique.
    fn consider(&mut self, candidate: Candidate) {
        match &self.best {
            Some(best) if candidate.outliers.len() > best.outliers.len() => {}
            Some(best) if candidate.outliers.len() == best.outliers.len() => {
                if candidate.polynomial != best.polynomial {
                    self.tied = true;
                }
            }
            _ => {
                self.best = Some(candidate);
                self.tied = false;
            }
        }
    }

    fn accept(&mut self, candidate: Candidate) {
        info!(
            subset = ?candidate.subset,
            secret = %candidate.polynomial.secret(),
            outliers = candidate.outliers.len(),
            "polynomial accepted"
        );
        self.diagnostics.push(Diagnostic::Found {
            subset: candidate.subset.clone(),
            outliers: candidate.outliers.len(),
        });
        self.accepted = Some(candidate);
        self.state = SearchState::Found;
    }

    fn finish(&mut self) {
        let settle = !self.options.strict && !self.truncated && !self.tied;
        if settle {
            if let Some(best) = self.best.take() {
                self.accept(best);
                return;
            }
        }

        info!(
            subsets_tried = self.subsets_tried,
            truncated = self.truncated,
            ambiguous = self.tied,
            "no acceptable polynomial"
        );
        self.diagnostics.push(Diagnostic::Exhausted {
            subsets_tried: self.subsets_tried,
            truncated: self.truncated,
        });
        self.state = SearchState::Exhausted;
    }

    /// Steps until a terminal state and packages the result.
    pub fn run(mut self) -> SearchOutcome {
        while self.step() == SearchState::Searching {}

        let suspects = self.tally.ranked();
        match self.accepted.take() {
            Some(c) => SearchOutcome::Found(Reconstruction {
                polynomial: c.polynomial,
                subset: c.subset,
                outliers: c.outliers,
                subsets_tried: self.subsets_tried,
                suspects,
                diagnostics: self.diagnostics,
            }),
            None => SearchOutcome::Exhausted(Exhaustion {
                suspects,
                subsets_tried: self.subsets_tried,
                truncated: self.truncated,
                ambiguous: self.tied,
                diagnostics: self.diagnostics,
            }),
        }
    }
}

/// Runs the subset search to completion.
pub fn reconstruct(set: &PointSet, options: ReconstructOptions) -> SearchOutcome {
    Reconstructor::new(set, options).run()
}
