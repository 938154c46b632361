use crate::parsing::cursor::is_space;

/// What follows the bracketed text of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// `(dest "title")`, both still escaped.
    Inline { dest: &'a [u8], title: &'a [u8] },
    /// `[id]`.
    Reference(&'a [u8]),
    /// `[]` or nothing: the text itself is the id.
    Shortcut,
}

/// A scanned `[text]...` construct, not yet resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkScan<'a> {
    pub text: &'a [u8],
    /// The text spans more than one line.
    pub multiline: bool,
    pub target: LinkTarget<'a>,
    /// Bytes consumed from the opening bracket (or `!`).
    pub len: usize,
}

/// Links, images and footnote references.
pub struct Link;

impl Link {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const IMAGE: u8 = b'!';
    pub const FOOTNOTE: u8 = b'^';
    pub const DEST_OPEN: u8 = b'(';
    pub const DEST_CLOSE: u8 = b')';

    /// Scans a link starting at `data[open]`, which must be `[`. `open` is 1
    /// for images so the `!` counts towards the length.
    pub fn scan(data: &[u8], open: usize) -> Option<LinkScan<'_>> {
        if data.get(open) != Some(&Self::OPEN) {
            return None;
        }
        let (text_end, multiline) = Self::text_end(data, open + 1)?;
        let text = &data[open + 1..text_end];

        let mut i = text_end + 1;
        while i < data.len() && is_space(data[i]) {
            i += 1;
        }

        let (target, len) = match data.get(i) {
            Some(&Self::DEST_OPEN) => Self::inline_target(data, i + 1)?,
            Some(&Self::OPEN) => {
                let start = i + 1;
                let end = start + data[start..].iter().position(|&c| c == Self::CLOSE)?;
                let target = if end == start {
                    LinkTarget::Shortcut
                } else {
                    LinkTarget::Reference(&data[start..end])
                };
                (target, end + 1)
            }
            // Whitespace after the text is not part of a shortcut link.
            _ => (LinkTarget::Shortcut, text_end + 1),
        };

        Some(LinkScan {
            text,
            multiline,
            target,
            len,
        })
    }

    /// `[^label]` at the start of `data`: the label and bytes consumed.
    pub fn footnote_ref(data: &[u8]) -> Option<(&[u8], usize)> {
        if data.first() != Some(&Self::OPEN) || data.get(1) != Some(&Self::FOOTNOTE) {
            return None;
        }
        let end = 2 + data[2..]
            .iter()
            .position(|&c| c == Self::CLOSE || c == b'\n')?;
        (data[end] == Self::CLOSE).then(|| (&data[2..end], end + 1))
    }

    /// The id a shortcut link is looked up by: its text with line breaks
    /// folded to single spaces.
    pub fn shortcut_id(text: &[u8], multiline: bool) -> Vec<u8> {
        if !multiline {
            return text.to_vec();
        }
        let mut id = Vec::with_capacity(text.len());
        for &c in text {
            if c == b'\n' {
                if id.last() != Some(&b' ') {
                    id.push(b' ');
                }
            } else {
                id.push(c);
            }
        }
        id
    }

    /// Index of the `]` matching the `[` just before `from`, honouring
    /// nested brackets and backslash escapes.
    fn text_end(data: &[u8], from: usize) -> Option<(usize, bool)> {
        let mut level = 1;
        let mut multiline = false;
        let mut i = from;
        while i < data.len() {
            match data[i] {
                b'\\' => i += 1,
                b'\n' => multiline = true,
                Self::OPEN => level += 1,
                Self::CLOSE => {
                    level -= 1;
                    if level == 0 {
                        return Some((i, multiline));
                    }
                }
                _ => {}
            }
            i += 1;
        }
        None
    }

    /// `dest "title")` starting just after the `(`. A quote only opens a
    /// title if a matching quote closes it before the `)`; otherwise it
    /// belongs to the destination.
    fn inline_target(data: &[u8], from: usize) -> Option<(LinkTarget<'_>, usize)> {
        let mut i = from;
        while i < data.len() && is_space(data[i]) {
            i += 1;
        }
        let dest_start = i;
        let mut depth = 0usize;
        while i < data.len() {
            match data[i] {
                b'\\' => i += 2,
                Self::DEST_OPEN => {
                    depth += 1;
                    i += 1;
                }
                Self::DEST_CLOSE if depth == 0 => break,
                Self::DEST_CLOSE => {
                    depth -= 1;
                    i += 1;
                }
                b'\'' | b'"' if i > dest_start => break,
                _ => i += 1,
            }
        }
        if i >= data.len() {
            return None;
        }
        let mut dest_end = i;

        let mut title: &[u8] = b"";
        if matches!(data[i], b'\'' | b'"') {
            let quote_at = i;
            i += 1;
            while i < data.len() && data[i] != Self::DEST_CLOSE {
                i += if data[i] == b'\\' { 2 } else { 1 };
            }
            if i >= data.len() {
                return None;
            }
            let mut close = i;
            while close > quote_at + 1 && is_space(data[close - 1]) {
                close -= 1;
            }
            if close > quote_at + 1 && data[close - 1] == data[quote_at] {
                title = &data[quote_at + 1..close - 1];
            } else {
                dest_end = i;
            }
        }

        while dest_end > dest_start && is_space(data[dest_end - 1]) {
            dest_end -= 1;
        }
        let mut dest = &data[dest_start..dest_end];
        if let Some(inner) = dest.strip_prefix(b"<") {
            dest = inner.strip_suffix(b">").unwrap_or(inner);
        }

        Some((LinkTarget::Inline { dest, title }, i + 1))
    }
}
