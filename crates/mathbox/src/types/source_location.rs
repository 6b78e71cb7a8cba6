use alloc::sync::Arc;
use core::fmt;

/// Byte range of a token or expression within the typeset source.
///
/// The span keeps a shared handle to the whole input so that diagnostics can
/// quote the surrounding text long after the parser is gone. Offsets are
/// byte offsets into `input`; `start` is inclusive and `end` exclusive.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SourceSpan {
    /// The complete input the span points into.
    pub input: Arc<str>,
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl SourceSpan {
    /// Creates a span over `input[start..end]`.
    ///
    /// ```
    /// use mathbox::types::SourceSpan;
    /// use std::sync::Arc;
    ///
    /// let span = SourceSpan::new(Arc::from("x^2"), 0, 1);
    /// assert_eq!(span.text(), "x");
    /// ```
    #[must_use]
    pub const fn new(input: Arc<str>, start: usize, end: usize) -> Self {
        Self { input, start, end }
    }

    /// Convenience constructor copying `input` into a fresh shared buffer.
    #[must_use]
    pub fn from_str(input: &str, start: usize, end: usize) -> Self {
        Self::new(Arc::from(input), start, end)
    }

    /// The source text covered by this span.
    #[must_use]
    pub fn text(&self) -> &str {
        self.input.get(self.start..self.end).unwrap_or_default()
    }

    /// Length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no text (e.g. the end-of-input token).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Merges two optional spans into one covering both.
    ///
    /// Returns `None` when either side is missing or when they refer to
    /// different inputs (tokens coming from macro expansion bodies).
    #[must_use]
    pub fn range(first: Option<&Self>, last: Option<&Self>) -> Option<Self> {
        match (first, last) {
            (Some(a), Some(b)) if Arc::ptr_eq(&a.input, &b.input) => Some(Self {
                input: Arc::clone(&a.input),
                start: a.start.min(b.start),
                end: a.end.max(b.end),
            }),
            (Some(a), None) => Some(a.clone()),
            _ => None,
        }
    }
}

impl fmt::Debug for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{} {:?}", self.start, self.end, self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_covers_both_ends() {
        let input: Arc<str> = Arc::from(r"\frac{a}{b}");
        let a = SourceSpan::new(Arc::clone(&input), 0, 5);
        let b = SourceSpan::new(Arc::clone(&input), 8, 11);
        let merged = SourceSpan::range(Some(&a), Some(&b)).unwrap();
        assert_eq!(merged.start, 0);
        assert_eq!(merged.end, 11);
        assert_eq!(merged.text(), r"\frac{a}{b}");
    }

    #[test]
    fn range_across_inputs_is_dropped() {
        let a = SourceSpan::from_str("ab", 0, 1);
        let b = SourceSpan::from_str("ab", 1, 2);
        assert!(SourceSpan::range(Some(&a), Some(&b)).is_none());
    }
}
