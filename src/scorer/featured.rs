use std::fmt::Debug;
use std::hash::Hash;

use pathfinding::kuhn_munkres::{kuhn_munkres, Weights};

use super::search::max_over_prefixes;
use super::{ensure_unique, ScoreTriple};
use crate::error::MetricError;
use crate::features::{FeatureTable, FeatureVector};
use crate::utils::matrix::DenseMatrix;

/// Fixed-point scale for similarity weights handed to the assignment
/// solver, which works over ordered integer weights.
const WEIGHT_SCALE: f64 = 1e9;

/// Integer view of a similarity matrix for the Kuhn-Munkres solver.
struct FixedWeights {
    data: Vec<i64>,
    rows: usize,
    cols: usize,
}

impl FixedWeights {
    fn new(sim: &DenseMatrix, transposed: bool) -> Self {
        let (rows, cols) = if transposed {
            (sim.cols(), sim.rows())
        } else {
            (sim.rows(), sim.cols())
        };
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let value = if transposed { sim.at(c, r) } else { sim.at(r, c) };
                data.push((value * WEIGHT_SCALE).round() as i64);
            }
        }
        FixedWeights { data, rows, cols }
    }
}

impl Weights<i64> for FixedWeights {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.cols
    }

    fn at(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.cols + col]
    }

    fn neg(&self) -> Self {
        FixedWeights {
            data: self.data.iter().map(|v| -v).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

/// Maximum-weight one-to-one matching over a rectangular similarity
/// matrix, as `min(R, C)` (row, col) pairs.
/// The solver needs rows <= columns, so the wide orientation is solved on
/// the transpose and the pairs flipped back.
fn max_weight_assignment(sim: &DenseMatrix) -> Vec<(usize, usize)> {
    if sim.rows() == 0 || sim.cols() == 0 {
        return Vec::new();
    }
    if sim.rows() <= sim.cols() {
        let (_, assignment) = kuhn_munkres(&FixedWeights::new(sim, false));
        assignment.into_iter().enumerate().collect()
    } else {
        let (_, assignment) = kuhn_munkres(&FixedWeights::new(sim, true));
        assignment.into_iter().enumerate().map(|(c, r)| (r, c)).collect()
    }
}

/// Precision/recall over a similarity matrix: precision is the mean over
/// target columns of the best-matching reference similarity, recall the
/// mean over reference rows of the best-matching target similarity.
fn matrix_score(sim: &DenseMatrix, exclusive: bool) -> ScoreTriple {
    if exclusive {
        let matched = max_weight_assignment(sim);
        let sparse = sim.retain_cells(&matched);
        ScoreTriple::from_precision_recall(sparse.col_max_mean(), sparse.row_max_mean())
    } else {
        ScoreTriple::from_precision_recall(sim.col_max_mean(), sim.row_max_mean())
    }
}

/// F1/precision/recall between two inventories under graded feature
/// similarity.
///
/// Every token is mapped to its feature vector through `table`; tokens the
/// table does not recognize are silently dropped (a known coverage
/// limitation of phonetic feature data, deliberately not papered over with
/// fallback vectors). An empty vector list on either side yields the
/// undefined triple.
///
/// By default matches are not mutually exclusive: each target token is
/// scored by its single best reference token and vice versa, so one
/// reference phoneme may cover many target phonemes at once. With
/// `exclusive`, a maximum-weight one-to-one assignment is computed first
/// and all unmatched similarities are zeroed, which is the stricter
/// metric. Exclusive scores therefore never exceed their non-exclusive
/// counterparts.
///
/// With `search_max`, every non-empty prefix of the target vector list is
/// scored and the nan-safe lexicographic best triple wins.
pub fn set_f1_score_featured<F, T>(
    table: &F,
    reference: &[T],
    target: &[T],
    search_max: bool,
    exclusive: bool,
) -> Result<ScoreTriple, MetricError>
where
    F: FeatureTable,
    T: AsRef<str> + Hash + Eq + Debug,
{
    ensure_unique(reference.iter())?;
    ensure_unique(target.iter())?;

    let reference_segs = lookup(table, reference);
    let target_segs = lookup(table, target);
    if reference_segs.is_empty() || target_segs.is_empty() {
        return Ok(ScoreTriple::UNDEFINED);
    }

    let full = DenseMatrix::from_fn(reference_segs.len(), target_segs.len(), |i, j| {
        reference_segs[i].similarity(&target_segs[j])
    });

    if !search_max {
        Ok(matrix_score(&full, exclusive))
    } else {
        Ok(max_over_prefixes(target_segs.len(), |k| {
            matrix_score(&full.left_columns(k), exclusive)
        }))
    }
}

/// Feature vectors of the recognized tokens, via the table's scan over the
/// concatenated symbols.
fn lookup<F, T>(table: &F, tokens: &[T]) -> Vec<FeatureVector>
where
    F: FeatureTable,
    T: AsRef<str>,
{
    let joined: String = tokens.iter().map(AsRef::as_ref).collect();
    table.word_features(&joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::MapFeatureTable;
    use approx::assert_relative_eq;

    fn toks(s: &str) -> Vec<String> {
        s.chars().map(String::from).collect()
    }

    /// Four symbols over four ternary features:
    ///   sim(a,o) = 3/4, sim(a,b) = 1/4, sim(a,c) = 0,
    ///   sim(b,c) = 3/4, sim(b,o) = 0,   sim(c,o) = 1/4.
    fn table() -> MapFeatureTable {
        let mut table = MapFeatureTable::new();
        table
            .insert("a", vec![1, -1, 1, 1])
            .insert("b", vec![-1, 1, 1, -1])
            .insert("c", vec![-1, 1, -1, -1])
            .insert("o", vec![1, -1, -1, 1]);
        table
    }

    #[test]
    fn identical_inventories_score_one() {
        let triple =
            set_f1_score_featured(&table(), &toks("abc"), &toks("abc"), false, false).unwrap();
        assert_relative_eq!(triple.f1, 1.0);
        assert_relative_eq!(triple.precision, 1.0);
        assert_relative_eq!(triple.recall, 1.0);
    }

    #[test]
    fn graded_similarity_rewards_near_matches() {
        // Columns o, b, c against rows a, b, c:
        // col maxes = 3/4 (a-o), 1 (b-b), 1 (c-c); row maxes identical.
        let triple =
            set_f1_score_featured(&table(), &toks("abc"), &toks("obc"), false, false).unwrap();
        assert_relative_eq!(triple.precision, 11.0 / 12.0);
        assert_relative_eq!(triple.recall, 11.0 / 12.0);
        assert_relative_eq!(triple.f1, 11.0 / 12.0);
    }

    #[test]
    fn non_exclusive_lets_one_reference_cover_many_targets() {
        // Single reference a against targets b and o: a covers both.
        let triple =
            set_f1_score_featured(&table(), &toks("a"), &toks("bo"), false, false).unwrap();
        assert_relative_eq!(triple.precision, (0.25 + 0.75) / 2.0);
        assert_relative_eq!(triple.recall, 0.75);
        assert_relative_eq!(triple.f1, 0.6);
    }

    #[test]
    fn exclusive_enforces_one_to_one_matching() {
        // Same inputs as above: a can only be matched to o, so the b
        // column drops to zero.
        let triple =
            set_f1_score_featured(&table(), &toks("a"), &toks("bo"), false, true).unwrap();
        assert_relative_eq!(triple.precision, 0.375);
        assert_relative_eq!(triple.recall, 0.75);
        assert_relative_eq!(triple.f1, 0.5);
    }

    #[test]
    fn exclusive_handles_more_rows_than_columns() {
        // Three references, one target: the assignment is solved on the
        // transpose. Only a-o survives.
        let non_exclusive =
            set_f1_score_featured(&table(), &toks("abc"), &toks("o"), false, false).unwrap();
        assert_relative_eq!(non_exclusive.precision, 0.75);
        assert_relative_eq!(non_exclusive.recall, 1.0 / 3.0);

        let exclusive =
            set_f1_score_featured(&table(), &toks("abc"), &toks("o"), false, true).unwrap();
        assert_relative_eq!(exclusive.precision, 0.75);
        assert_relative_eq!(exclusive.recall, 0.25);
    }

    #[test]
    fn exclusive_never_exceeds_non_exclusive() {
        let table = table();
        for (reference, target) in [
            ("abc", "obc"),
            ("abc", "o"),
            ("a", "bo"),
            ("ab", "co"),
            ("abco", "ab"),
        ] {
            for search_max in [false, true] {
                let loose = set_f1_score_featured(
                    &table,
                    &toks(reference),
                    &toks(target),
                    search_max,
                    false,
                )
                .unwrap();
                let strict = set_f1_score_featured(
                    &table,
                    &toks(reference),
                    &toks(target),
                    search_max,
                    true,
                )
                .unwrap();
                if loose.is_undefined() || strict.is_undefined() {
                    continue;
                }
                assert!(strict.f1 <= loose.f1 + 1e-12, "{reference} vs {target}");
                assert!(strict.precision <= loose.precision + 1e-12);
                assert!(strict.recall <= loose.recall + 1e-12);
            }
        }
    }

    #[test]
    fn unrecognized_tokens_are_dropped() {
        // z is not in the table; the reference collapses to just a.
        let triple =
            set_f1_score_featured(&table(), &toks("za"), &toks("a"), false, false).unwrap();
        assert_relative_eq!(triple.f1, 1.0);
    }

    #[test]
    fn all_tokens_unrecognized_is_undefined() {
        let triple =
            set_f1_score_featured(&table(), &toks("z"), &toks("a"), false, false).unwrap();
        assert!(triple.is_undefined());
        let triple =
            set_f1_score_featured(&table(), &toks("a"), &toks("z"), false, false).unwrap();
        assert!(triple.is_undefined());
    }

    #[test]
    fn duplicates_are_rejected_before_lookup() {
        let err =
            set_f1_score_featured(&table(), &toks("aa"), &toks("b"), false, false).unwrap_err();
        assert!(matches!(err, MetricError::NonUniqueElements { .. }));
    }

    #[test]
    fn search_max_scores_prefixes_of_the_target() {
        // Target order [o, b, c]: the full set wins here.
        let searched =
            set_f1_score_featured(&table(), &toks("abc"), &toks("obc"), true, false).unwrap();
        assert_relative_eq!(searched.f1, 11.0 / 12.0);
    }

    #[test]
    fn assignment_prefers_the_heavier_pairing() {
        // 2x2 between {a, b} and {o, c}: the greedy pick a-o (0.75) forces
        // b-c (0.75); total 1.5 beats a-c (0) + b-o (0).
        let sim = DenseMatrix::from_fn(2, 2, |r, c| match (r, c) {
            (0, 0) => 0.75,
            (0, 1) => 0.0,
            (1, 0) => 0.0,
            (1, 1) => 0.75,
            _ => unreachable!(),
        });
        let mut matched = max_weight_assignment(&sim);
        matched.sort_unstable();
        assert_eq!(matched, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn assignment_trades_a_local_best_for_the_global_best() {
        // Row 0 prefers col 0 (0.9), but giving col 0 to row 1 is better
        // overall: 0.8 + 0.7 > 0.9 + 0.1.
        let vals = [[0.9, 0.7], [0.8, 0.1]];
        let sim = DenseMatrix::from_fn(2, 2, |r, c| vals[r][c]);
        let mut matched = max_weight_assignment(&sim);
        matched.sort_unstable();
        assert_eq!(matched, vec![(0, 1), (1, 0)]);
    }
}
