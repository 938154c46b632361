use crate::parsing::cursor::{Cursor, is_blank_line, is_space, line_end, lines, trim};

/// An opening fence line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence<'a> {
    pub marker: u8,
    pub width: usize,
    pub info: &'a [u8],
    /// Length of the opening line including its newline.
    pub line_len: usize,
}

/// A complete fenced block: info string and verbatim body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedCode<'a> {
    pub info: &'a [u8],
    pub text: Vec<u8>,
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICK: u8 = b'`';
    pub const TILDE: u8 = b'~';
    pub const MIN_WIDTH: usize = 3;

    /// Recognises an opening fence: up to three spaces, three or more
    /// identical fence characters, then an optional info string that is
    /// either a bare word or `{ ... }`. Nothing else may follow.
    pub fn open(data: &[u8]) -> Option<Fence<'_>> {
        let mut cur = Cursor::new(data);
        cur.eat_run(b' ', 3);
        let marker = cur
            .peek()
            .filter(|&c| c == Self::BACKTICK || c == Self::TILDE)?;
        let width = cur.eat_run(marker, usize::MAX);
        if width < Self::MIN_WIDTH {
            return None;
        }
        cur.skip_blanks();

        let info = if cur.peek() == Some(b'{') {
            cur.bump();
            let start = cur.pos();
            while !matches!(cur.peek(), None | Some(b'}' | b'\n')) {
                cur.bump();
            }
            if cur.peek() != Some(b'}') {
                return None;
            }
            let info = trim(&data[start..cur.pos()]);
            cur.bump();
            info
        } else {
            let start = cur.pos();
            while cur.peek().is_some_and(|c| !is_space(c)) {
                cur.bump();
            }
            &data[start..cur.pos()]
        };

        cur.skip_blanks();
        if !matches!(cur.peek(), None | Some(b'\n')) {
            return None;
        }
        Some(Fence {
            marker,
            width,
            info,
            line_len: line_end(data, cur.pos()),
        })
    }

    /// True if `line` closes `fence`: the same character, at least as many
    /// of them, and nothing but whitespace after.
    pub fn closes(fence: &Fence<'_>, line: &[u8]) -> bool {
        let mut cur = Cursor::new(line);
        cur.eat_run(b' ', 3);
        if cur.eat_run(fence.marker, usize::MAX) < fence.width {
            return false;
        }
        cur.skip_blanks();
        matches!(cur.peek(), None | Some(b'\n'))
    }

    /// Consumes a whole fenced block. A fence that is never closed is not a
    /// code block at all.
    pub fn scan(data: &[u8]) -> Option<(usize, FencedCode<'_>)> {
        let fence = Self::open(data)?;
        let mut text = Vec::new();
        for span in lines(data).skip_while(|span| span.end <= fence.line_len) {
            let line = span.slice(data);
            if Self::closes(&fence, line) {
                return Some((
                    span.end,
                    FencedCode {
                        info: fence.info,
                        text,
                    },
                ));
            }
            if is_blank_line(line) {
                text.push(b'\n');
            } else {
                text.extend_from_slice(line);
            }
        }
        None
    }

    /// Bytes a fenced block at the start of `data` would consume.
    pub fn extent(data: &[u8]) -> Option<usize> {
        Self::scan(data).map(|(len, _)| len)
    }
}
