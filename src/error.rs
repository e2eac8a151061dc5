use thiserror::Error;

/// Errors produced by the scoring engine.
/// Degenerate inputs (empty sets, zero precision/recall) are not errors;
/// they surface as the undefined score sentinel instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricError {
    /// A collection that must behave as a set contains a repeated element.
    /// Duplicates are never silently dropped.
    #[error("collection has non-unique elements (first duplicate: {duplicate})")]
    NonUniqueElements {
        /// Debug rendering of the first element seen twice.
        duplicate: String,
    },
}
