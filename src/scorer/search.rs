use std::cmp::Ordering;

use super::ScoreTriple;

/// Comparison key with NaN components demoted below every real score.
/// The substitution exists only for ordering; callers always hand back the
/// original triple.
#[inline]
fn nan_safe_key(triple: &ScoreTriple) -> [f64; 3] {
    triple.as_array().map(|x| if x.is_nan() { -1.0 } else { x })
}

#[inline]
fn cmp_keys(a: &[f64; 3], b: &[f64; 3]) -> Ordering {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x.total_cmp(y))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Lexicographic maximum of score triples, treating NaN as worse than any
/// real score (including 0).
///
/// Comparison is component-by-component over `(f1, precision, recall)`
/// with f1 as primary key. A later triple wins only when its key is
/// strictly greater, so among equal keys the earliest triple is returned;
/// in particular an all-undefined input returns its first element.
///
/// # Returns
/// * `Option<ScoreTriple>` - the winning original triple, `None` for an
///   empty slice.
pub fn max_nan_safe(candidates: &[ScoreTriple]) -> Option<ScoreTriple> {
    let mut best: Option<(usize, [f64; 3])> = None;
    for (idx, triple) in candidates.iter().enumerate() {
        let key = nan_safe_key(triple);
        match &best {
            Some((_, best_key)) if cmp_keys(&key, best_key) != Ordering::Greater => {}
            _ => best = Some((idx, key)),
        }
    }
    best.map(|(idx, _)| candidates[idx])
}

/// Score every non-empty prefix of a ranked candidate list and keep the
/// nan-safe lexicographic best.
/// `score` receives the prefix length, 1 through `len`.
pub fn max_over_prefixes<F>(len: usize, mut score: F) -> ScoreTriple
where
    F: FnMut(usize) -> ScoreTriple,
{
    let candidates: Vec<ScoreTriple> = (1..=len).map(|k| score(k)).collect();
    max_nan_safe(&candidates).unwrap_or(ScoreTriple::UNDEFINED)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAN: f64 = f64::NAN;

    fn triple(f1: f64, precision: f64, recall: f64) -> ScoreTriple {
        ScoreTriple::new(f1, precision, recall)
    }

    /// Componentwise equality with NaN equal to NaN.
    fn same(a: ScoreTriple, b: ScoreTriple) -> bool {
        a.as_array()
            .iter()
            .zip(b.as_array().iter())
            .all(|(x, y)| (x.is_nan() && y.is_nan()) || x == y)
    }

    #[test]
    fn reference_cases() {
        let cases: &[(&[ScoreTriple], ScoreTriple)] = &[
            (&[triple(0.0, 0.0, 0.0)], triple(0.0, 0.0, 0.0)),
            (&[triple(NAN, 0.0, 0.0)], triple(NAN, 0.0, 0.0)),
            (
                &[triple(1.0, 0.0, 0.0), triple(NAN, 0.0, 0.0)],
                triple(1.0, 0.0, 0.0),
            ),
            (
                &[triple(0.0, 0.0, 0.0), triple(NAN, 0.0, 0.0)],
                triple(0.0, 0.0, 0.0),
            ),
            (
                &[triple(NAN, 0.0, 0.0), triple(0.0, 0.0, 0.0)],
                triple(0.0, 0.0, 0.0),
            ),
            (
                &[triple(1.0, 0.5, 0.0), triple(1.0, 0.6, 0.0)],
                triple(1.0, 0.6, 0.0),
            ),
            (
                &[triple(1.0, 0.6, 0.0), triple(1.0, 0.5, 0.0)],
                triple(1.0, 0.6, 0.0),
            ),
        ];
        for (input, want) in cases {
            let got = max_nan_safe(input).unwrap();
            assert!(same(got, *want), "input = {input:?}, got = {got:?}");
        }
    }

    #[test]
    fn all_undefined_returns_the_first() {
        let first = ScoreTriple::UNDEFINED;
        let got = max_nan_safe(&[first, ScoreTriple::UNDEFINED]).unwrap();
        assert!(got.is_undefined());
    }

    #[test]
    fn recall_breaks_ties_after_precision() {
        let got = max_nan_safe(&[triple(1.0, 0.5, 0.2), triple(1.0, 0.5, 0.3)]).unwrap();
        assert!(same(got, triple(1.0, 0.5, 0.3)));
    }

    #[test]
    fn empty_input_is_none() {
        assert!(max_nan_safe(&[]).is_none());
    }

    #[test]
    fn prefix_search_passes_every_length() {
        let mut seen = Vec::new();
        let best = max_over_prefixes(3, |k| {
            seen.push(k);
            triple(k as f64 / 10.0, 0.0, 0.0)
        });
        assert_eq!(seen, vec![1, 2, 3]);
        assert!(same(best, triple(0.3, 0.0, 0.0)));
    }
}
