//! Byte ranges into the statement text.

use core::fmt;

/// A half-open byte range `start..end` in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty span at `pos`, used for end-of-input positions.
    #[must_use]
    pub const fn at(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the slice of `source` covered by this span, if it is in bounds.
    #[must_use]
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len_and_empty() {
        assert_eq!(Span::new(5, 10).len(), 5);
        assert!(Span::at(7).is_empty());
        assert!(!Span::new(5, 10).is_empty());
    }

    #[test]
    fn test_span_slice() {
        let source = "CREATE TABLE t";
        assert_eq!(Span::new(7, 12).slice(source), Some("TABLE"));
        assert_eq!(Span::new(7, 99).slice(source), None);
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(3, 9).to_string(), "3..9");
    }
}
