/// A byte range `[start, end)` into a scan buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// The bytes this span covers, clamped to `data`.
    pub fn slice(self, data: &[u8]) -> &[u8] {
        let end = self.end.min(data.len());
        data.get(self.start.min(end)..end).unwrap_or_default()
    }
}
