use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use super::search::max_over_prefixes;
use super::{ensure_unique, ScoreTriple};
use crate::error::MetricError;

/// F1/precision/recall between two inventories under element identity.
///
/// Both sides must be duplicate-free (checked, not deduplicated). An empty
/// side yields the undefined triple, as does an empty intersection between
/// non-empty sides (zero precision/recall promotes to undefined).
///
/// With `search_max`, every non-empty prefix of `target` is scored against
/// the full reference and the nan-safe lexicographic best triple wins;
/// `target` is expected to arrive in descending frequency order for this
/// to be a meaningful heuristic.
pub fn set_f1_score<T>(
    reference: &[T],
    target: &[T],
    search_max: bool,
) -> Result<ScoreTriple, MetricError>
where
    T: Hash + Eq + Debug,
{
    ensure_unique(reference.iter())?;
    ensure_unique(target.iter())?;
    if reference.is_empty() || target.is_empty() {
        return Ok(ScoreTriple::UNDEFINED);
    }

    let reference_set: HashSet<&T> = reference.iter().collect();
    let score = |prefix: &[T]| -> ScoreTriple {
        let intersection = prefix
            .iter()
            .filter(|t| reference_set.contains(t))
            .count();
        let precision = intersection as f64 / prefix.len() as f64;
        let recall = intersection as f64 / reference_set.len() as f64;
        ScoreTriple::from_precision_recall(precision, recall)
    };

    if !search_max {
        Ok(score(target))
    } else {
        Ok(max_over_prefixes(target.len(), |k| score(&target[..k])))
    }
}
