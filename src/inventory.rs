use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::segment::Segmenter;

/// Insertion-ordered token occurrence counter.
/// Counts how often each token appears across a corpus while remembering
/// the order tokens were first seen, which is what makes the frequency
/// ranking stable for equal counts.
///
/// # Examples
/// ```
/// use phone_inventory_metric::TokenFrequency;
/// let mut freq = TokenFrequency::new();
/// freq.add_token("a").add_token("b").add_token("b");
/// assert_eq!(freq.by_descending_count(), vec!["b".to_string(), "a".to_string()]);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    token_count: IndexMap<String, u32>,
    total_token_count: u64,
}

impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// Count one occurrence of `token`.
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        let count = self.token_count.entry(token.to_string()).or_insert(0);
        *count += 1;
        self.total_token_count += 1;
        self
    }

    /// Count one occurrence of each token in the slice.
    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    /// Occurrence count of one token (0 if unseen).
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        *self.token_count.get(token).unwrap_or(&0)
    }

    /// Number of distinct tokens seen.
    #[inline]
    pub fn token_num(&self) -> usize {
        self.token_count.len()
    }

    /// Total occurrences across all tokens.
    #[inline]
    pub fn token_total_count(&self) -> u64 {
        self.total_token_count
    }

    #[inline]
    pub fn contains_token(&self, token: &str) -> bool {
        self.token_count.contains_key(token)
    }

    /// Distinct tokens sorted by descending occurrence count.
    /// The sort is stable over insertion order, so tokens with equal counts
    /// keep the order they were first seen. This ordering is the contract
    /// the prefix search explores.
    #[inline]
    pub fn by_descending_count(&self) -> Vec<String> {
        let mut token_list: Vec<(&str, u32)> = self
            .token_count
            .iter()
            .map(|(token, &count)| (token.as_str(), count))
            .collect();
        token_list.sort_by(|a, b| b.1.cmp(&a.1));
        token_list
            .into_iter()
            .map(|(token, _)| token.to_string())
            .collect()
    }

    /// Reset all counts.
    #[inline]
    pub fn clear(&mut self) {
        self.token_count.clear();
        self.total_token_count = 0;
    }
}

/// Tokenize a corpus into its inventory, ranked by frequency.
/// Each chunk is segmented independently; counts accumulate over the whole
/// corpus. The result contains each distinct token once, by descending
/// total count, ties in first-seen order.
pub fn tokenize_corpus<S, I>(segmenter: &S, corpus: I) -> Vec<String>
where
    S: Segmenter,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut freq = TokenFrequency::new();
    for chunk in corpus {
        freq.add_tokens(&segmenter.segment(chunk.as_ref()));
    }
    freq.by_descending_count()
}
