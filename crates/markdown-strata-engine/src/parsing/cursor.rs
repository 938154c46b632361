//! Byte-level helpers shared by the block and inline scanners.
//!
//! Every recognizer works on `&[u8]` and never indexes past the end of its
//! slice; the helpers here are the only places that need to think about
//! bounds.

use super::span::Span;

/// A cursor for byte-by-byte scanning with position tracking.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The bytes being scanned.
    pub s: &'a [u8],
    /// Current index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a [u8]) -> Self {
        Self { s, i: 0 }
    }

    pub fn at(s: &'a [u8], i: usize) -> Self {
        Self { s, i }
    }

    /// Returns the current index.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.get(self.i).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.rest().starts_with(pat)
    }

    /// The unconsumed remainder.
    pub fn rest(&self) -> &'a [u8] {
        self.s.get(self.i..).unwrap_or_default()
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes, stopping at the end of input.
    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }

    /// Consumes a run of `b`, at most `max` long, returning its length.
    pub fn eat_run(&mut self, b: u8, max: usize) -> usize {
        let start = self.i;
        while self.i - start < max && self.peek() == Some(b) {
            self.i += 1;
        }
        self.i - start
    }

    /// Consumes spaces and tabs.
    pub fn skip_blanks(&mut self) -> usize {
        let start = self.i;
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.i += 1;
        }
        self.i - start
    }

    /// Moves to the `\n` ending the current line (or the end of input).
    pub fn skip_to_eol(&mut self) {
        while !matches!(self.peek(), None | Some(b'\n')) {
            self.i += 1;
        }
    }
}

/// Whitespace as the grammar sees it: space, tab, newline, CR, FF, VT.
pub fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

pub fn is_punct(c: u8) -> bool {
    c.is_ascii_punctuation()
}

pub fn is_alnum(c: u8) -> bool {
    c.is_ascii_alphanumeric()
}

/// Length of a leading whitespace-only line including its `\n`.
///
/// Returns 0 when the first line holds anything but spaces and tabs, or
/// when `data` is empty.
pub fn blank_line_len(data: &[u8]) -> usize {
    let mut i = 0;
    while i < data.len() && data[i] != b'\n' {
        if data[i] != b' ' && data[i] != b'\t' {
            return 0;
        }
        i += 1;
    }
    (i + 1).min(data.len())
}

/// True if the first line is whitespace-only. An empty remainder counts.
pub fn is_blank_line(data: &[u8]) -> bool {
    data.is_empty() || blank_line_len(data) > 0
}

/// Index just past the `\n` ending the line that contains `from`.
pub fn line_end(data: &[u8], from: usize) -> usize {
    match data.get(from..).and_then(|rest| rest.iter().position(|&c| c == b'\n')) {
        Some(n) => from + n + 1,
        None => data.len(),
    }
}

/// Number of leading spaces, capped at `max`.
pub fn leading_spaces(data: &[u8], max: usize) -> usize {
    data.iter().take(max).take_while(|&&c| c == b' ').count()
}

/// Trims ASCII whitespace from both ends.
pub fn trim(data: &[u8]) -> &[u8] {
    data.trim_ascii()
}

/// Trims trailing spaces, tabs and newlines.
pub fn trim_end(data: &[u8]) -> &[u8] {
    data.trim_ascii_end()
}

/// Iterates over the lines of `data` as spans that include their `\n`.
pub fn lines(data: &[u8]) -> impl Iterator<Item = Span> + '_ {
    let mut offset = 0usize;
    std::iter::from_fn(move || {
        if offset >= data.len() {
            return None;
        }
        let start = offset;
        offset = line_end(data, start);
        Some(Span { start, end: offset })
    })
}

/// Drops the backslash from every `\x` pair.
pub fn unescape(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut i = 0;
    while i < data.len() {
        if data[i] == b'\\' && i + 1 < data.len() {
            out.push(data[i + 1]);
            i += 2;
        } else {
            out.push(data[i]);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new(b"hello");
        assert_eq!(cur.pos(), 0);
        assert_eq!(cur.peek(), Some(b'h'));
        assert_eq!(cur.bump(), Some(b'h'));
        assert_eq!(cur.pos(), 1);
        assert_eq!(cur.rest(), b"ello");
    }

    #[test]
    fn bump_n_stops_at_end() {
        let mut cur = Cursor::new(b"hi");
        cur.bump_n(10);
        assert_eq!(cur.pos(), 2);
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.rest(), b"");
    }

    #[test]
    fn eat_run_respects_max() {
        let mut cur = Cursor::new(b"#######x");
        assert_eq!(cur.eat_run(b'#', 6), 6);
        assert_eq!(cur.peek(), Some(b'#'));
    }

    #[test]
    fn skip_to_eol_stops_on_newline() {
        let mut cur = Cursor::new(b"ab\ncd");
        cur.skip_to_eol();
        assert_eq!(cur.pos(), 2);
    }

    #[rstest]
    #[case(b"", 0)]
    #[case(b"\n", 1)]
    #[case(b"   \nx", 4)]
    #[case(b" \t ", 3)]
    #[case(b"  x\n", 0)]
    fn blank_line_lengths(#[case] input: &[u8], #[case] expected: usize) {
        assert_eq!(blank_line_len(input), expected);
    }

    #[test]
    fn empty_remainder_is_blank() {
        assert!(is_blank_line(b""));
        assert!(!is_blank_line(b"x"));
    }

    #[test]
    fn lines_include_newlines() {
        let data = b"a\nbc\n\nd";
        let got: Vec<&[u8]> = lines(data).map(|s| &data[s.start..s.end]).collect();
        assert_eq!(got, vec![&b"a\n"[..], b"bc\n", b"\n", b"d"]);
    }

    #[test]
    fn line_end_past_input_is_len() {
        assert_eq!(line_end(b"abc", 1), 3);
        assert_eq!(line_end(b"abc", 7), 3);
        assert_eq!(line_end(b"a\nb", 0), 2);
    }

    #[test]
    fn unescape_keeps_trailing_backslash() {
        assert_eq!(unescape(br"a\_b\\c\"), b"a_b\\c\\".to_vec());
    }
}
