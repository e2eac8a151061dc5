use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Numeric encoding of one phonetic symbol.
/// Entries are ternary in practice (-1/0/+1) but the engine only relies on
/// equality between positions. Vectors coming from one `FeatureTable` are
/// expected to share a common length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector(Vec<i8>);

impl FeatureVector {
    /// Wrap a raw feature vector.
    pub fn new(features: Vec<i8>) -> Self {
        FeatureVector(features)
    }

    /// Number of features.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Normalized Hamming distance to another vector.
    ///
    /// # Returns
    /// * `f64` - value in [0, 1]; 0 for identical vectors, 1 for vectors
    ///   differing in every position. A length mismatch counts the
    ///   non-overlapping tail as differing.
    pub fn normalized_distance(&self, other: &FeatureVector) -> f64 {
        let width = self.0.len().max(other.0.len());
        if width == 0 {
            return 0.0;
        }
        let shared_mismatches = self
            .0
            .iter()
            .zip(other.0.iter())
            .filter(|(a, b)| a != b)
            .count();
        let tail = self.0.len().abs_diff(other.0.len());
        (shared_mismatches + tail) as f64 / width as f64
    }

    /// Similarity to another vector: `1 - normalized_distance`.
    #[inline]
    pub fn similarity(&self, other: &FeatureVector) -> f64 {
        1.0 - self.normalized_distance(other)
    }
}

impl From<Vec<i8>> for FeatureVector {
    fn from(features: Vec<i8>) -> Self {
        FeatureVector::new(features)
    }
}

/// Feature-table collaborator.
/// Maps a string of concatenated symbols to the feature vectors of the
/// symbols it recognizes. Unrecognized spans are simply absent from the
/// output; this is not an error, and callers must tolerate receiving fewer
/// vectors than they supplied tokens.
pub trait FeatureTable {
    /// Feature vectors of the recognized symbols in `word`, in order.
    fn word_features(&self, word: &str) -> Vec<FeatureVector>;
}

impl<F: FeatureTable + ?Sized> FeatureTable for &F {
    fn word_features(&self, word: &str) -> Vec<FeatureVector> {
        (**self).word_features(word)
    }
}

/// In-memory `FeatureTable` backed by a symbol map.
/// Scans input greedily, preferring the longest known symbol at each
/// position, so multi-character symbols ("tʃ", "kʷ") resolve before their
/// prefixes. Characters starting no known symbol are skipped without
/// notice, matching the collaborator contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapFeatureTable {
    #[serde(with = "indexmap::map::serde_seq")]
    symbols: IndexMap<String, FeatureVector>,
    /// Longest symbol length in chars, cached for the scan window.
    max_symbol_chars: usize,
}

impl MapFeatureTable {
    pub fn new() -> Self {
        MapFeatureTable {
            symbols: IndexMap::new(),
            max_symbol_chars: 0,
        }
    }

    /// Register a symbol and its feature vector.
    /// Re-inserting a symbol replaces its previous vector.
    pub fn insert(&mut self, symbol: &str, features: impl Into<FeatureVector>) -> &mut Self {
        self.max_symbol_chars = self.max_symbol_chars.max(symbol.chars().count());
        self.symbols.insert(symbol.to_string(), features.into());
        self
    }

    /// Number of registered symbols.
    #[inline]
    pub fn symbol_num(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the symbol is registered.
    #[inline]
    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.symbols.contains_key(symbol)
    }
}

impl FeatureTable for MapFeatureTable {
    fn word_features(&self, word: &str) -> Vec<FeatureVector> {
        let chars: Vec<(usize, char)> = word.char_indices().collect();
        let mut out = Vec::new();
        let mut pos = 0;
        while pos < chars.len() {
            let mut advanced = false;
            let window = self.max_symbol_chars.min(chars.len() - pos);
            for len in (1..=window).rev() {
                let start = chars[pos].0;
                let end = chars
                    .get(pos + len)
                    .map_or(word.len(), |&(byte, _)| byte);
                if let Some(features) = self.symbols.get(&word[start..end]) {
                    out.push(features.clone());
                    pos += len;
                    advanced = true;
                    break;
                }
            }
            if !advanced {
                // Unknown character, dropped per the table contract.
                pos += 1;
            }
        }
        out
    }
}
