use crate::error::MetricError;
use crate::features::FeatureTable;
use crate::inventory::tokenize_corpus;
use crate::scorer::exact::set_f1_score;
use crate::scorer::featured::set_f1_score_featured;
use crate::scorer::ScoreTriple;
use crate::segment::Segmenter;
use crate::utils::setkey::SetKeyMap;

/// Qualifier tag for feature-weighted variants.
pub const TAG_FEATURED: &str = "featured";
/// Qualifier tag for one-to-one matched variants.
pub const TAG_EXCLUSIVE: &str = "exclusive";
/// Qualifier tag for best-prefix-searched variants.
pub const TAG_MAX: &str = "max";

const METRIC_NAMES: [&str; 3] = ["f1_score", "precision", "recall"];

/// Drives the full scoring pipeline over two corpora.
/// Owns the two external collaborators (segmenter and feature table) and
/// publishes every computed metric variant into one result bundle. Holds
/// no per-call state; every invocation computes from scratch.
#[derive(Debug, Clone)]
pub struct MetricEngine<S, F>
where
    S: Segmenter,
    F: FeatureTable,
{
    segmenter: S,
    feature_table: F,
}

impl<S, F> MetricEngine<S, F>
where
    S: Segmenter,
    F: FeatureTable,
{
    pub fn new(segmenter: S, feature_table: F) -> Self {
        MetricEngine {
            segmenter,
            feature_table,
        }
    }

    /// Compute every metric variant between a reference corpus and a
    /// target corpus.
    ///
    /// Both corpora are tokenized into frequency-ranked inventories, then
    /// scored three ways: exact-set, featured, and exclusive featured.
    /// With `search_max`, the best-prefix-searched variant of each is
    /// computed as well, walking prefixes of the target inventory in
    /// frequency order.
    ///
    /// Each triple lands in the bundle as three entries, keyed by its
    /// qualifier tags plus one of `f1_score` / `precision` / `recall`;
    /// keys are order-insensitive tag sets.
    pub fn metrics<I, J>(
        &self,
        reference_corpus: I,
        target_corpus: J,
        search_max: bool,
    ) -> Result<SetKeyMap<f64>, MetricError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        J: IntoIterator,
        J::Item: AsRef<str>,
    {
        let reference = tokenize_corpus(&self.segmenter, reference_corpus);
        let target = tokenize_corpus(&self.segmenter, target_corpus);

        let mut results = SetKeyMap::new();
        let mut publish = |tags: &[&str], triple: ScoreTriple| {
            for (metric, score) in METRIC_NAMES.into_iter().zip(triple.as_array()) {
                let mut key: Vec<&str> = tags.to_vec();
                key.push(metric);
                results.insert(key, score);
            }
        };

        publish(&[], set_f1_score(&reference, &target, false)?);
        publish(
            &[TAG_FEATURED],
            self.featured(&reference, &target, false, false)?,
        );
        publish(
            &[TAG_EXCLUSIVE, TAG_FEATURED],
            self.featured(&reference, &target, false, true)?,
        );

        if search_max {
            publish(&[TAG_MAX], set_f1_score(&reference, &target, true)?);
            publish(
                &[TAG_MAX, TAG_FEATURED],
                self.featured(&reference, &target, true, false)?,
            );
            publish(
                &[TAG_EXCLUSIVE, TAG_MAX, TAG_FEATURED],
                self.featured(&reference, &target, true, true)?,
            );
        }
        Ok(results)
    }

    fn featured(
        &self,
        reference: &[String],
        target: &[String],
        search_max: bool,
        exclusive: bool,
    ) -> Result<ScoreTriple, MetricError> {
        set_f1_score_featured(&self.feature_table, reference, target, search_max, exclusive)
    }
}
