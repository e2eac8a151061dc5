/// This crate scores the similarity of phonetic inventories.
pub mod error;
pub mod features;
pub mod inventory;
pub mod metrics;
pub mod scorer;
pub mod segment;
pub mod utils;

/// Metric Engine
/// The top-level struct of this crate. It tokenizes a reference corpus and
/// a target corpus into frequency-ranked inventories and scores them
/// against each other in every supported variant:
/// - exact-set F1 (element identity)
/// - featured F1 (graded phonetic-feature similarity)
/// - exclusive featured F1 (one-to-one optimal matching)
/// - optionally the best-prefix-searched version of each
///
/// `MetricEngine<S, F>` is generic over its two collaborators:
/// - `S`: the `Segmenter` splitting raw chunks into symbols
/// - `F`: the `FeatureTable` mapping symbols to feature vectors
///
/// Results come back as a `SetKeyMap<f64>` keyed by order-insensitive tag
/// sets such as `{"featured", "max", "f1_score"}`.
pub use metrics::MetricEngine;

/// Exact-set scorer
/// F1/precision/recall between two duplicate-free inventories under
/// element identity, optionally searched over target prefixes.
pub use scorer::exact::set_f1_score;

/// Feature scorer
/// F1/precision/recall under graded feature similarity, with optional
/// exclusive (one-to-one) matching and prefix search.
pub use scorer::featured::set_f1_score_featured;

/// Score triple `(f1, precision, recall)`
/// NaN components are the undefined sentinel for scores that could not be
/// computed (empty operands, zero precision/recall).
pub use scorer::ScoreTriple;

/// Uniqueness guard
/// Precondition check failing on the first duplicated element.
pub use scorer::ensure_unique;

/// Nan-safe lexicographic maximum
/// Picks the greatest score triple, demoting NaN below every real score
/// for comparison only.
pub use scorer::search::max_nan_safe;

/// Corpus tokenizer
/// Distinct tokens of a corpus ranked by descending frequency, ties in
/// first-seen order.
pub use inventory::tokenize_corpus;

/// Token occurrence counter
/// Insertion-ordered counter backing the frequency ranking.
pub use inventory::TokenFrequency;

/// Segmenter collaborator trait and a per-character implementation.
pub use segment::{CharSegmenter, Segmenter};

/// Feature-table collaborator trait, the feature vector type, and an
/// in-memory table with greedy longest-match symbol scanning.
pub use features::{FeatureTable, FeatureVector, MapFeatureTable};

/// Result bundle keyed by order-insensitive tag sets.
pub use utils::setkey::{IntoSetKey, SetKey, SetKeyMap};

/// Engine errors.
pub use error::MetricError;
