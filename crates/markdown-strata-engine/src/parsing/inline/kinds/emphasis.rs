//! Delimiter-run matching for `*`, `_` and `~`.
//!
//! A run is classified by its length and matched by one of three routines:
//!
//! - `single` finds the closer of `*em*`;
//! - `double` finds the closer of `**strong**` (or `~~strike~~`);
//! - `triple` finds the closer of `***both***`. When the first closer it
//!   meets is shorter than three, it hands the run back to `single` or
//!   `double` with the opening run re-split, so `***a** b*` becomes
//!   emphasis around strong text and `***a* b**` strong around emphasis.
//!
//! Every routine works on the bytes after the opening run and returns the
//! bytes consumed from there, closer included. The inner text is returned
//! unscanned; the caller scans it later as a nested inline.
//!
//! The search for a closer steps over code spans and bracketed link text,
//! so `*a `*` b*` and `*[x*](y)*` close at the last delimiter.

use crate::options::Extensions;
use crate::parsing::cursor::{is_alnum, is_punct, is_space};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisStyle {
    Emphasis,
    Strong,
    /// Strong wrapping emphasis.
    StrongEmphasis,
    Strikethrough,
}

/// A matched delimiter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emphasized<'a> {
    /// Bytes from the first opening delimiter through the last closing one.
    pub len: usize,
    pub style: EmphasisStyle,
    pub inner: &'a [u8],
}

pub struct Emphasis;

impl Emphasis {
    pub const STAR: u8 = b'*';
    pub const UNDERSCORE: u8 = b'_';
    pub const TILDE: u8 = b'~';

    pub fn is_delimiter(c: u8) -> bool {
        matches!(c, Self::STAR | Self::UNDERSCORE | Self::TILDE)
    }

    /// Matches the run at the start of `data`. `prev` is the byte before
    /// the run, if any.
    pub fn scan(data: &[u8], prev: Option<u8>, ext: Extensions) -> Option<Emphasized<'_>> {
        let c = *data.first()?;
        if !Self::is_delimiter(c) {
            return None;
        }
        let no_intra = ext.contains(Extensions::NO_INTRA_EMPHASIS);
        if no_intra && c != Self::TILDE && prev.is_some_and(is_alnum) {
            return None;
        }

        if data.len() > 2 && data[1] != c {
            if c == Self::TILDE || is_space(data[1]) {
                return None;
            }
            let (len, inner) = Self::single(&data[1..], c, no_intra)?;
            return Some(Emphasized {
                len: len + 1,
                style: EmphasisStyle::Emphasis,
                inner,
            });
        }

        if data.len() > 3 && data[1] == c && data[2] != c {
            if is_space(data[2]) {
                return None;
            }
            let (len, inner) = Self::double(&data[2..], c)?;
            let style = if c == Self::TILDE {
                EmphasisStyle::Strikethrough
            } else {
                EmphasisStyle::Strong
            };
            return Some(Emphasized {
                len: len + 2,
                style,
                inner,
            });
        }

        if data.len() > 4 && data[1] == c && data[2] == c && data[3] != c {
            if c == Self::TILDE || is_space(data[3]) {
                return None;
            }
            return Self::triple(data, c, no_intra);
        }

        None
    }

    /// Closer of a single run. When `data` starts with a doubled delimiter
    /// (a run re-split by `triple`), that pair is stepped over first.
    fn single(data: &[u8], c: u8, no_intra: bool) -> Option<(usize, &[u8])> {
        let mut i = 0;
        if data.len() > 1 && data[0] == c && data[1] == c {
            i = 1;
        }
        while i < data.len() {
            let len = Self::find_delimiter(&data[i..], c);
            if len == 0 {
                return None;
            }
            i += len;
            if i >= data.len() {
                return None;
            }
            if i + 1 < data.len() && data[i + 1] == c {
                i += 1;
                continue;
            }
            if data[i] == c && !is_space(data[i - 1]) {
                if no_intra
                    && !(i + 1 == data.len() || is_space(data[i + 1]) || is_punct(data[i + 1]))
                {
                    continue;
                }
                return Some((i + 1, &data[..i]));
            }
        }
        None
    }

    fn double(data: &[u8], c: u8) -> Option<(usize, &[u8])> {
        let mut i = 0;
        while i < data.len() {
            let len = Self::find_delimiter(&data[i..], c);
            if len == 0 {
                return None;
            }
            i += len;
            if i + 1 < data.len() && data[i] == c && data[i + 1] == c && !is_space(data[i - 1]) {
                return Some((i + 2, &data[..i]));
            }
            i += 1;
        }
        None
    }

    /// `full` still holds the three opening delimiters.
    fn triple(full: &[u8], c: u8, no_intra: bool) -> Option<Emphasized<'_>> {
        let data = &full[3..];
        let mut i = 0;
        while i < data.len() {
            let len = Self::find_delimiter(&data[i..], c);
            if len == 0 {
                return None;
            }
            i += len;
            if data[i] != c || is_space(data[i - 1]) {
                continue;
            }

            if i + 2 < data.len() && data[i + 1] == c && data[i + 2] == c {
                return Some(Emphasized {
                    len: i + 6,
                    style: EmphasisStyle::StrongEmphasis,
                    inner: &data[..i],
                });
            }
            if i + 1 < data.len() && data[i + 1] == c {
                // `**` closes first: emphasis around `**strong**...`.
                let (len, inner) = Self::single(&full[1..], c, no_intra)?;
                return Some(Emphasized {
                    len: len + 1,
                    style: EmphasisStyle::Emphasis,
                    inner,
                });
            }
            // `*` closes first: strong around `*em*...`.
            let (len, inner) = Self::double(&full[2..], c)?;
            return Some(Emphasized {
                len: len + 2,
                style: EmphasisStyle::Strong,
                inner,
            });
        }
        None
    }

    /// Offset of the next unescaped `c` after position 0, skipping code
    /// spans and link text. 0 when there is none.
    ///
    /// A delimiter inside a code span or link that never closes still
    /// counts, so an unterminated span does not hide a closer.
    fn find_delimiter(data: &[u8], c: u8) -> usize {
        let mut i = 0;
        while i < data.len() {
            while i < data.len() && data[i] != c && data[i] != b'`' && data[i] != b'[' {
                i += 1;
            }
            if i >= data.len() {
                return 0;
            }
            if i > 0 && data[i - 1] == b'\\' {
                i += 1;
                continue;
            }
            if data[i] == c {
                if i > 0 {
                    return i;
                }
                i += 1;
                continue;
            }

            if data[i] == b'`' {
                let mut ticks = 0;
                while i < data.len() && data[i] == b'`' {
                    i += 1;
                    ticks += 1;
                }
                if i >= data.len() {
                    return 0;
                }
                let mut fallback = 0;
                let mut run = 0;
                while i < data.len() && run < ticks {
                    if fallback == 0 && data[i] == c {
                        fallback = i;
                    }
                    run = if data[i] == b'`' { run + 1 } else { 0 };
                    i += 1;
                }
                if run < ticks {
                    return fallback;
                }
            } else {
                let mut fallback = 0;
                i += 1;
                while i < data.len() && data[i] != b']' {
                    if fallback == 0 && data[i] == c {
                        fallback = i;
                    }
                    i += 1;
                }
                i += 1;
                while i < data.len() && matches!(data[i], b' ' | b'\n') {
                    i += 1;
                }
                if i >= data.len() {
                    return fallback;
                }
                let close = match data[i] {
                    b'[' => b']',
                    b'(' => b')',
                    _ if fallback > 0 => return fallback,
                    _ => continue,
                };
                i += 1;
                while i < data.len() && data[i] != close {
                    if fallback == 0 && data[i] == c {
                        fallback = i;
                    }
                    i += 1;
                }
                if i >= data.len() {
                    return fallback;
                }
                i += 1;
            }
        }
        0
    }
}

/// Where each delimiter could last close a run within one span.
///
/// Built in one pass before a span is scanned. An opener with no possible
/// closer after it is rejected without searching, which keeps a span full
/// of unmatched openers linear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Closers {
    /// Offset + 1 of the last `c` after a non-space byte, 0 for none.
    any: [usize; 3],
    /// As `any`, not followed by another `c`.
    single: [usize; 3],
    /// As `any`, followed by another `c`.
    double: [usize; 3],
}

impl Closers {
    pub fn of(span: &[u8]) -> Self {
        let mut closers = Closers::default();
        for p in 1..span.len() {
            let c = span[p];
            if !Emphasis::is_delimiter(c) || is_space(span[p - 1]) {
                continue;
            }
            let slot = Self::slot(c);
            closers.any[slot] = p + 1;
            if span.get(p + 1) == Some(&c) {
                closers.double[slot] = p + 1;
            } else {
                closers.single[slot] = p + 1;
            }
        }
        closers
    }

    /// Whether the run at the start of `rest`, found at offset `at` of the
    /// span, has any candidate closer after it.
    pub fn may_close(&self, rest: &[u8], at: usize) -> bool {
        let Some(&c) = rest.first() else {
            return false;
        };
        let slot = Self::slot(c);
        let run = rest.iter().take(3).take_while(|&&b| b == c).count();
        let last = match run {
            1 => self.single[slot],
            2 => self.double[slot],
            _ => self.any[slot],
        };
        last > at + run
    }

    fn slot(c: u8) -> usize {
        match c {
            Emphasis::STAR => 0,
            Emphasis::UNDERSCORE => 1,
            _ => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn scan(input: &str) -> Option<(usize, EmphasisStyle, String)> {
        scan_with(input, Extensions::COMMON)
    }

    fn scan_with(input: &str, ext: Extensions) -> Option<(usize, EmphasisStyle, String)> {
        Emphasis::scan(input.as_bytes(), None, ext).map(|e| {
            (
                e.len,
                e.style,
                String::from_utf8_lossy(e.inner).into_owned(),
            )
        })
    }

    #[rstest]
    #[case("*a*", 3, EmphasisStyle::Emphasis, "a")]
    #[case("_a b_ c", 5, EmphasisStyle::Emphasis, "a b")]
    #[case("**a**", 5, EmphasisStyle::Strong, "a")]
    #[case("__a__", 5, EmphasisStyle::Strong, "a")]
    #[case("~~a~~", 5, EmphasisStyle::Strikethrough, "a")]
    #[case("***a***", 7, EmphasisStyle::StrongEmphasis, "a")]
    #[case("*a **b** c*", 11, EmphasisStyle::Emphasis, "a **b** c")]
    fn matched_runs(
        #[case] input: &str,
        #[case] len: usize,
        #[case] style: EmphasisStyle,
        #[case] inner: &str,
    ) {
        assert_eq!(scan(input), Some((len, style, inner.to_string())));
    }

    #[test]
    fn triple_run_resplits_on_double_closer() {
        assert_eq!(
            scan("***a** b*"),
            Some((9, EmphasisStyle::Emphasis, "**a** b".to_string()))
        );
    }

    #[test]
    fn triple_run_resplits_on_single_closer() {
        assert_eq!(
            scan("***a* b**"),
            Some((9, EmphasisStyle::Strong, "*a* b".to_string()))
        );
    }

    #[rstest]
    #[case("*a")]
    #[case("* a*")]
    #[case("*a *")]
    #[case("**a*")]
    #[case("~a~")]
    #[case("~~~a~~~")]
    #[case("**")]
    fn unmatched_runs(#[case] input: &str) {
        assert_eq!(scan(input), None);
    }

    #[test]
    fn intra_word_closer_is_skipped() {
        assert_eq!(scan("_snake_case"), None);
        assert_eq!(
            scan("_a_b c_"),
            Some((7, EmphasisStyle::Emphasis, "a_b c".to_string()))
        );
        assert_eq!(
            scan_with("_snake_case", Extensions::empty()),
            Some((7, EmphasisStyle::Emphasis, "snake".to_string()))
        );
    }

    #[test]
    fn intra_word_opener_is_rejected() {
        let ext = Extensions::COMMON;
        assert!(Emphasis::scan(b"_b_", Some(b'a'), ext).is_none());
        assert!(Emphasis::scan(b"_b_", Some(b' '), ext).is_some());
        assert!(Emphasis::scan(b"*b*", Some(b'('), ext).is_some());
    }

    #[test]
    fn closer_search_skips_code_and_links() {
        assert_eq!(
            scan("*a `*` b*"),
            Some((9, EmphasisStyle::Emphasis, "a `*` b".to_string()))
        );
        assert_eq!(
            scan("*[x*](y)*"),
            Some((9, EmphasisStyle::Emphasis, "[x*](y)".to_string()))
        );
    }

    #[rstest]
    #[case("*a*", 0, true)]
    #[case("**a**", 0, true)]
    #[case("***a***", 0, true)]
    #[case("*a *b", 0, false)]
    #[case("**a **b", 4, false)]
    #[case("~~a ~~b", 0, false)]
    #[case("x *a* *b", 2, true)]
    #[case("x *a* *b", 6, false)]
    fn closers_bound_the_search(#[case] span: &str, #[case] at: usize, #[case] expected: bool) {
        let span = span.as_bytes();
        assert_eq!(Closers::of(span).may_close(&span[at..], at), expected);
    }

    #[test]
    fn closers_agree_with_the_matcher() {
        for span in ["*a*", "**a**", "***a***", "***a** b*", "***a* b**", "_a_b c_", "~~s~~"] {
            let bytes = span.as_bytes();
            assert!(Closers::of(bytes).may_close(bytes, 0), "{span}");
            assert!(Emphasis::scan(bytes, None, Extensions::COMMON).is_some(), "{span}");
        }
    }

    #[test]
    fn escaped_closer_is_skipped() {
        assert_eq!(
            scan("*a\\*b*"),
            Some((6, EmphasisStyle::Emphasis, "a\\*b".to_string()))
        );
    }
}
