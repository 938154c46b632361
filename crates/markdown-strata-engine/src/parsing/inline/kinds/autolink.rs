use crate::parsing::cursor::{is_alnum, is_space};
use crate::render::AutoLinkKind;

/// What a `<...>` construct turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleScan {
    /// `<scheme:...>` or `<user@host>`; the address excludes the brackets.
    AutoLink { len: usize, kind: AutoLinkKind },
    /// Anything else shaped like a tag.
    Tag(usize),
}

/// Angle-bracket autolinks, raw inline tags and bare URLs.
pub struct AutoLink;

impl AutoLink {
    pub const OPEN: u8 = b'<';
    pub const CLOSE: u8 = b'>';
    /// The bare-URL trigger.
    pub const COLON: u8 = b':';
    pub const SAFE_PREFIXES: [&'static [u8]; 4] = [b"http://", b"https://", b"ftp://", b"mailto://"];
    /// Longest scheme name in `SAFE_PREFIXES`.
    pub const MAX_SCHEME: usize = 6;

    /// Scans `<...>` at the start of `data`.
    pub fn angle(data: &[u8]) -> Option<AngleScan> {
        if data.len() < 3 || data[0] != Self::OPEN {
            return None;
        }
        let mut i = if data[1] == b'/' { 2 } else { 1 };
        if !is_alnum(data[i]) {
            return None;
        }

        while i < data.len() && (is_alnum(data[i]) || matches!(data[i], b'.' | b'+' | b'-')) {
            i += 1;
        }

        if i > 1 && data.get(i) == Some(&b'@') {
            if let Some(len) = Self::email(&data[i..]) {
                return Some(AngleScan::AutoLink {
                    len: i + len,
                    kind: AutoLinkKind::Email,
                });
            }
        }

        if i > 2 && data.get(i) == Some(&Self::COLON) {
            let start = i + 1;
            let mut j = start;
            while j < data.len() {
                match data[j] {
                    b'\\' => j += 2,
                    b'>' | b'\'' | b'"' => break,
                    c if is_space(c) => break,
                    _ => j += 1,
                }
            }
            if j >= data.len() {
                return None;
            }
            if j > start && data[j] == Self::CLOSE {
                return Some(AngleScan::AutoLink {
                    len: j + 1,
                    kind: AutoLinkKind::Normal,
                });
            }
            i = j;
        }

        let close = i + data[i..].iter().position(|&c| c == Self::CLOSE)?;
        Some(AngleScan::Tag(close + 1))
    }

    /// `[-@._a-zA-Z0-9]+>` containing exactly one `@`.
    fn email(data: &[u8]) -> Option<usize> {
        let mut at = 0;
        for (i, &c) in data.iter().enumerate() {
            match c {
                b'@' => at += 1,
                b'-' | b'.' | b'_' => {}
                Self::CLOSE => return (at == 1).then_some(i + 1),
                c if is_alnum(c) => {}
                _ => return None,
            }
        }
        None
    }

    /// A bare URL around the `:` at `data[colon]`. Returns how far the URL
    /// starts before the colon and where it ends, as a byte offset into
    /// `data`. The scheme may not reach back before `floor`.
    pub fn bare(data: &[u8], colon: usize, floor: usize) -> Option<(usize, usize)> {
        if data.get(colon) != Some(&Self::COLON) || !data[colon..].starts_with(b"://") {
            return None;
        }

        let mut rewind = 0;
        while colon - rewind > floor
            && rewind <= Self::MAX_SCHEME
            && data[colon - rewind - 1].is_ascii_alphabetic()
        {
            rewind += 1;
        }
        if rewind == 0 || rewind > Self::MAX_SCHEME {
            return None;
        }
        let start = colon - rewind;
        if start > 0 && is_alnum(data[start - 1]) {
            return None;
        }

        let url = &data[start..];
        let prefix = Self::SAFE_PREFIXES
            .iter()
            .find(|p| url.len() > p.len() && url[..p.len()].eq_ignore_ascii_case(p))?;
        if !is_alnum(url[prefix.len()]) {
            return None;
        }

        let mut end = url
            .iter()
            .position(|&c| is_space(c) || c == Self::OPEN)
            .unwrap_or(url.len());
        if matches!(url[end - 1], b'.' | b',' | b';' | b':' | b'!' | b'?') {
            end -= 1;
        }
        if let Some(open) = Self::opener(url[end - 1]) {
            let close = url[end - 1];
            let body = &url[..end];
            let balanced = if open == close {
                body.iter().filter(|&&c| c == close).count() % 2 == 0
            } else {
                let opens = body.iter().filter(|&&c| c == open).count();
                let closes = body.iter().filter(|&&c| c == close).count();
                opens == closes
            };
            if !balanced {
                end -= 1;
            }
        }

        Some((rewind, start + end))
    }

    fn opener(close: u8) -> Option<u8> {
        match close {
            b'"' => Some(b'"'),
            b'\'' => Some(b'\''),
            b')' => Some(b'('),
            b']' => Some(b'['),
            b'}' => Some(b'{'),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("<http://a.b>", AngleScan::AutoLink { len: 12, kind: AutoLinkKind::Normal })]
    #[case("<me@x.org>", AngleScan::AutoLink { len: 10, kind: AutoLinkKind::Email })]
    #[case("<span class=\"x\">", AngleScan::Tag(16))]
    #[case("</em>", AngleScan::Tag(5))]
    #[case("<a href=\"http://x\">", AngleScan::Tag(19))]
    fn angle_forms(#[case] input: &str, #[case] expected: AngleScan) {
        assert_eq!(AutoLink::angle(input.as_bytes()), Some(expected));
    }

    #[rstest]
    #[case("< a>")]
    #[case("<a")]
    #[case("<>")]
    #[case("<http://a b")]
    fn not_angle(#[case] input: &str) {
        assert_eq!(AutoLink::angle(input.as_bytes()), None);
    }

    fn bare(input: &str) -> Option<String> {
        let colon = input.find(':')?;
        let (rewind, end) = AutoLink::bare(input.as_bytes(), colon, 0)?;
        Some(input[colon - rewind..end].to_string())
    }

    #[rstest]
    #[case("see http://x.org now", Some("http://x.org"))]
    #[case("HTTPS://x.org", Some("HTTPS://x.org"))]
    #[case("at http://x.org.", Some("http://x.org"))]
    #[case("(http://x.org/a_(b))", Some("http://x.org/a_(b)"))]
    #[case("(see http://x.org)", Some("http://x.org"))]
    #[case("( x http://x.org/a)", Some("http://x.org/a"))]
    #[case("say \"http://x.org/q=\"a\"\"", Some("http://x.org/q=\"a\""))]
    #[case("http://x.org/[a]", Some("http://x.org/[a]"))]
    #[case("http://x.org<br>", Some("http://x.org"))]
    #[case("x1http://x.org", None)]
    #[case("gopher://x.org", None)]
    #[case("http:// x", None)]
    #[case("javascript://x", None)]
    #[case("http:x", None)]
    fn bare_urls(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(bare(input), expected.map(String::from));
    }

    #[test]
    fn scheme_does_not_reach_before_floor() {
        assert_eq!(AutoLink::bare(b"http://x", 4, 2), None);
    }
}
