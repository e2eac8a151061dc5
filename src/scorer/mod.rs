pub mod exact;
pub mod featured;
pub mod search;

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::MetricError;

/// One scored comparison: `(f1, precision, recall)`, each in [0, 1] or NaN.
/// NaN is the undefined sentinel: it marks scores that could not be
/// computed (an empty operand set, or a precision/recall of exactly zero),
/// as opposed to a true zero. Callers aggregating across experiments are
/// expected to filter undefined triples explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreTriple {
    pub f1: f64,
    pub precision: f64,
    pub recall: f64,
}

impl ScoreTriple {
    /// The undefined sentinel, NaN in every component.
    pub const UNDEFINED: ScoreTriple = ScoreTriple {
        f1: f64::NAN,
        precision: f64::NAN,
        recall: f64::NAN,
    };

    pub fn new(f1: f64, precision: f64, recall: f64) -> Self {
        ScoreTriple { f1, precision, recall }
    }

    /// Derive a triple from precision and recall.
    /// A precision or recall of exactly zero makes the F1 undefined rather
    /// than zero, so "no overlap at all" stays distinguishable from a low
    /// but computed score; the whole triple is promoted to the sentinel.
    pub fn from_precision_recall(precision: f64, recall: f64) -> Self {
        if precision == 0.0 || recall == 0.0 {
            return ScoreTriple::UNDEFINED;
        }
        let f1 = 2.0 / (1.0 / precision + 1.0 / recall);
        ScoreTriple { f1, precision, recall }
    }

    /// Whether any component is the undefined sentinel.
    #[inline]
    pub fn is_undefined(&self) -> bool {
        self.f1.is_nan() || self.precision.is_nan() || self.recall.is_nan()
    }

    /// Components in comparison order `(f1, precision, recall)`.
    #[inline]
    pub fn as_array(&self) -> [f64; 3] {
        [self.f1, self.precision, self.recall]
    }
}

impl From<(f64, f64, f64)> for ScoreTriple {
    fn from((f1, precision, recall): (f64, f64, f64)) -> Self {
        ScoreTriple::new(f1, precision, recall)
    }
}

/// Fail if any element appears more than once.
/// Precondition check run before a collection is treated as a set;
/// duplicates are reported via [`MetricError::NonUniqueElements`], never
/// silently merged.
pub fn ensure_unique<'a, T, I>(items: I) -> Result<(), MetricError>
where
    T: Hash + Eq + Debug + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item) {
            return Err(MetricError::NonUniqueElements {
                duplicate: format!("{item:?}"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn harmonic_mean_of_precision_and_recall() {
        let triple = ScoreTriple::from_precision_recall(0.5, 1.0);
        assert_relative_eq!(triple.f1, 2.0 / 3.0);
        assert_relative_eq!(triple.precision, 0.5);
        assert_relative_eq!(triple.recall, 1.0);
    }

    #[test]
    fn zero_precision_or_recall_is_undefined_not_zero() {
        assert!(ScoreTriple::from_precision_recall(0.0, 0.5).is_undefined());
        assert!(ScoreTriple::from_precision_recall(0.5, 0.0).is_undefined());
        assert!(ScoreTriple::UNDEFINED.is_undefined());
        assert!(!ScoreTriple::from_precision_recall(0.5, 0.5).is_undefined());
    }

    #[test]
    fn ensure_unique_accepts_distinct_elements() {
        assert!(ensure_unique(["a", "b", "c"].iter()).is_ok());
        assert!(ensure_unique(Vec::<&String>::new()).is_ok());
    }

    #[test]
    fn ensure_unique_reports_the_duplicate() {
        let err = ensure_unique(["a", "b", "a"].iter()).unwrap_err();
        assert_eq!(
            err,
            MetricError::NonUniqueElements {
                duplicate: "\"a\"".to_string()
            }
        );
    }
}
