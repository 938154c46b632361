use crate::options::Extensions;
use crate::parsing::cursor::{Cursor, line_end, trim};

/// A recognised heading line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading<'a> {
    pub level: u8,
    pub text: &'a [u8],
    pub id: Option<&'a [u8]>,
}

/// `#`-prefixed headings.
pub struct AtxHeading;

impl AtxHeading {
    pub const MARKER: u8 = b'#';
    pub const MAX_LEVEL: usize = 6;
    pub const ID_OPEN: &'static [u8] = b"{#";
    pub const ID_CLOSE: u8 = b'}';

    /// True if `data` starts a heading line.
    ///
    /// With `SPACE_HEADERS` the marker run (up to six) must be followed by a
    /// space or tab, so `#tag` and `#######` stay text. Without it any `#`
    /// opens a heading and runs longer than six leave the extra markers in
    /// the text of a level-6 heading.
    pub fn is_start(data: &[u8], ext: Extensions) -> bool {
        if data.first() != Some(&Self::MARKER) {
            return false;
        }
        if ext.contains(Extensions::SPACE_HEADERS) {
            let level = Cursor::new(data).eat_run(Self::MARKER, Self::MAX_LEVEL);
            if level < data.len() && !matches!(data[level], b' ' | b'\t') {
                return false;
            }
        }
        true
    }

    /// Consumes one heading line. The heading is `None` when nothing is left
    /// after stripping markers and whitespace; the line is consumed anyway.
    pub fn scan(data: &[u8], ext: Extensions) -> Option<(usize, Option<Heading<'_>>)> {
        if !Self::is_start(data, ext) {
            return None;
        }
        let mut cur = Cursor::new(data);
        let level = cur.eat_run(Self::MARKER, Self::MAX_LEVEL);
        cur.skip_blanks();
        let start = cur.pos();
        cur.skip_to_eol();
        let mut end = cur.pos();
        let consumed = line_end(data, start);

        while end > start && data[end - 1] == Self::MARKER {
            end -= 1;
        }
        while end > start && matches!(data[end - 1], b' ' | b'\t') {
            end -= 1;
        }

        let mut text = &data[start..end];
        let mut id = None;
        if ext.contains(Extensions::HEADER_IDS) {
            if let Some((rest, found)) = Self::split_id(text) {
                text = rest;
                id = Some(found);
            }
        }

        let heading = (!text.is_empty()).then_some(Heading {
            level: level as u8,
            text,
            id,
        });
        Some((consumed, heading))
    }

    /// Splits `Title {#id}` into `Title` and `id`.
    fn split_id(text: &[u8]) -> Option<(&[u8], &[u8])> {
        if text.last() != Some(&Self::ID_CLOSE) {
            return None;
        }
        let open = text
            .windows(Self::ID_OPEN.len())
            .rposition(|w| w == Self::ID_OPEN)?;
        let id = trim(&text[open + Self::ID_OPEN.len()..text.len() - 1]);
        if id.is_empty() {
            return None;
        }
        Some((trim(&text[..open]), id))
    }
}

/// `===` / `---` lines under a paragraph.
pub struct SetextUnderline;

impl SetextUnderline {
    pub const LEVEL_1: u8 = b'=';
    pub const LEVEL_2: u8 = b'-';

    /// The heading level this line underlines, if it is an underline.
    pub fn level(line: &[u8]) -> Option<u8> {
        let marker = *line.first()?;
        let level = match marker {
            Self::LEVEL_1 => 1,
            Self::LEVEL_2 => 2,
            _ => return None,
        };
        let mut cur = Cursor::new(line);
        cur.eat_run(marker, usize::MAX);
        cur.skip_blanks();
        matches!(cur.peek(), None | Some(b'\n')).then_some(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn heading(input: &str, ext: Extensions) -> Option<(u8, String)> {
        let (_, h) = AtxHeading::scan(input.as_bytes(), ext)?;
        h.map(|h| (h.level, String::from_utf8_lossy(h.text).into_owned()))
    }

    #[rstest]
    #[case("# Hello\n", Some((1, "Hello")))]
    #[case("###   Spaced   \n", Some((3, "Spaced")))]
    #[case("## Closed ##\n", Some((2, "Closed")))]
    #[case("###### Six\n", Some((6, "Six")))]
    #[case("# Trailing#\n", Some((1, "Trailing")))]
    fn atx_levels(#[case] input: &str, #[case] expected: Option<(u8, &str)>) {
        let expected = expected.map(|(l, t)| (l, t.to_string()));
        assert_eq!(heading(input, Extensions::SPACE_HEADERS), expected);
    }

    #[rstest]
    #[case("#tag\n")]
    #[case("####### Seven\n")]
    #[case("#\n")]
    fn strict_mode_rejects(#[case] input: &str) {
        assert!(AtxHeading::scan(input.as_bytes(), Extensions::SPACE_HEADERS).is_none());
    }

    #[test]
    fn lenient_mode_clamps_to_six() {
        assert_eq!(
            heading("#######Header 7\n", Extensions::empty()),
            Some((6, "#Header 7".to_string()))
        );
        assert_eq!(
            heading("#tag\n", Extensions::empty()),
            Some((1, "tag".to_string()))
        );
    }

    #[test]
    fn empty_heading_consumes_line_without_text() {
        let (consumed, h) = AtxHeading::scan(b"## ##\nnext", Extensions::SPACE_HEADERS).unwrap();
        assert_eq!(consumed, 6);
        assert!(h.is_none());
    }

    #[test]
    fn header_ids_are_split_off() {
        let (_, h) = AtxHeading::scan(b"# Intro {#start}\n", Extensions::HEADER_IDS).unwrap();
        let h = h.unwrap();
        assert_eq!(h.text, b"Intro");
        assert_eq!(h.id, Some(&b"start"[..]));
    }

    #[test]
    fn header_ids_ignored_without_extension() {
        let (_, h) = AtxHeading::scan(b"# Intro {#start}\n", Extensions::empty()).unwrap();
        assert_eq!(h.unwrap().text, b"Intro {#start}");
    }

    #[rstest]
    #[case("===\n", Some(1))]
    #[case("---   \n", Some(2))]
    #[case("=", Some(1))]
    #[case("=-=\n", None)]
    #[case(" ===\n", None)]
    #[case("--- x\n", None)]
    fn underline_levels(#[case] input: &str, #[case] expected: Option<u8>) {
        assert_eq!(SetextUnderline::level(input.as_bytes()), expected);
    }
}
