/// Tokenizer collaborator.
/// Splits one raw text chunk into phonetic symbols.
/// Implementations must be deterministic and total: the same chunk always
/// yields the same token sequence and segmentation itself never fails.
pub trait Segmenter {
    /// Segment a single chunk into tokens, in order of appearance.
    fn segment(&self, chunk: &str) -> Vec<String>;
}

impl<S: Segmenter + ?Sized> Segmenter for &S {
    fn segment(&self, chunk: &str) -> Vec<String> {
        (**self).segment(chunk)
    }
}

/// Segmenter that emits one token per non-whitespace Unicode scalar.
/// Sufficient for inventories written as plain symbol strings; anything
/// smarter (tie bars, diacritic grouping) belongs in a dedicated
/// `Segmenter` implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharSegmenter;

impl Segmenter for CharSegmenter {
    #[inline]
    fn segment(&self, chunk: &str) -> Vec<String> {
        chunk
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(String::from)
            .collect()
    }
}
