use crate::options::Extensions;
use crate::parsing::cursor::{blank_line_len, is_alnum};

/// Raw HTML blocks, passed through untouched.
///
/// Only a fixed set of block-level tags opens a block, and the block runs to
/// the matching closing tag. That tag must end its line and, unless
/// `LAX_HTML_BLOCKS` is set, be followed by a blank line. Comments and `<hr>`
/// are recognised on their own.
pub struct HtmlBlock;

impl HtmlBlock {
    pub const BLOCK_TAGS: [&'static [u8]; 22] = [
        b"p",
        b"dl",
        b"h1",
        b"h2",
        b"h3",
        b"h4",
        b"h5",
        b"h6",
        b"ol",
        b"ul",
        b"del",
        b"div",
        b"ins",
        b"pre",
        b"form",
        b"math",
        b"table",
        b"iframe",
        b"script",
        b"fieldset",
        b"noscript",
        b"blockquote",
    ];

    /// Tags that read as inline edits and never open a block.
    pub const INLINE_ONLY: [&'static [u8]; 2] = [b"ins", b"del"];

    /// Returns the length of the HTML block at the start of `data`.
    pub fn scan(data: &[u8], ext: Extensions) -> Option<usize> {
        if data.len() < 2 || data[0] != b'<' {
            return None;
        }
        let Some(tag) = Self::find_tag(&data[1..]) else {
            return Self::comment(data).or_else(|| Self::rule(data));
        };
        if Self::INLINE_ONLY.contains(&tag) {
            return None;
        }

        let lax = ext.contains(Extensions::LAX_HTML_BLOCKS);
        let mut i = 1;
        while i < data.len() {
            i += 1;
            while i < data.len() && !(data[i - 1] == b'<' && data[i] == b'/') {
                i += 1;
            }
            if i + 2 + tag.len() >= data.len() {
                break;
            }
            let j = Self::closing_len(tag, &data[i - 1..], lax);
            if j > 0 {
                return Some(i - 1 + j);
            }
        }
        None
    }

    fn find_tag(data: &[u8]) -> Option<&'static [u8]> {
        let len = data.iter().take_while(|&&c| is_alnum(c)).count();
        if len >= data.len() {
            return None;
        }
        Self::BLOCK_TAGS.iter().copied().find(|t| *t == &data[..len])
    }

    /// Length of `</tag>` plus the rest of its line and the blank line after.
    fn closing_len(tag: &[u8], data: &[u8], lax: bool) -> usize {
        if tag.len() + 3 >= data.len()
            || &data[2..2 + tag.len()] != tag
            || data[tag.len() + 2] != b'>'
        {
            return 0;
        }
        let mut i = tag.len() + 3;
        if i < data.len() {
            let w = blank_line_len(&data[i..]);
            if w == 0 {
                return 0;
            }
            i += w;
        }
        if i >= data.len() {
            return i;
        }
        let w = blank_line_len(&data[i..]);
        if w == 0 && !lax {
            return 0;
        }
        i + w
    }

    /// `<!-- ... -->` followed by the end of its line.
    fn comment(data: &[u8]) -> Option<usize> {
        if data.len() <= 5 || !data.starts_with(b"<!--") {
            return None;
        }
        let mut i = 5;
        while i < data.len() && !(data[i - 2] == b'-' && data[i - 1] == b'-' && data[i] == b'>') {
            i += 1;
        }
        i += 1;
        if i >= data.len() {
            return None;
        }
        let w = blank_line_len(&data[i..]);
        (w > 0).then_some(i + w)
    }

    /// `<hr ...>` followed by the end of its line.
    fn rule(data: &[u8]) -> Option<usize> {
        if data.len() <= 4 || !matches!(data[1], b'h' | b'H') || !matches!(data[2], b'r' | b'R') {
            return None;
        }
        let mut i = 3;
        while i < data.len() && data[i] != b'>' {
            i += 1;
        }
        if i + 1 >= data.len() {
            return None;
        }
        i += 1;
        let w = blank_line_len(&data[i..]);
        (w > 0).then_some(i + w)
    }
}
