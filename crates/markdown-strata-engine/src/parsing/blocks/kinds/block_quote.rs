use crate::parsing::cursor::{Cursor, is_blank_line, line_end};

/// Blockquote block type with owned delimiter constant.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: u8 = b'>';

    /// Length of the quote marker at the start of `line`: up to three
    /// spaces, `>`, and one optional space or tab. 0 if the line is not
    /// quoted.
    pub fn prefix_len(line: &[u8]) -> usize {
        let mut cur = Cursor::new(line);
        cur.eat_run(b' ', 3);
        if cur.peek() != Some(Self::PREFIX) {
            return 0;
        }
        cur.bump();
        if matches!(cur.peek(), Some(b' ' | b'\t')) {
            cur.bump();
        }
        cur.pos()
    }

    /// Unwraps a quote into the buffer its content is re-scanned from.
    ///
    /// Unquoted non-blank lines continue the quote lazily. A blank line
    /// ends it only when the next line is neither quoted nor blank.
    pub fn scan(data: &[u8]) -> Option<(usize, Vec<u8>)> {
        if Self::prefix_len(data) == 0 {
            return None;
        }
        let mut work = Vec::with_capacity(data.len());
        let mut pos = 0;
        while pos < data.len() {
            let end = line_end(data, pos);
            let line = &data[pos..end];
            let prefix = Self::prefix_len(line);
            if prefix > 0 {
                work.extend_from_slice(&line[prefix..]);
            } else {
                if is_blank_line(line) {
                    let next = &data[end..];
                    if next.is_empty() || (Self::prefix_len(next) == 0 && !is_blank_line(next)) {
                        pos = end;
                        break;
                    }
                }
                work.extend_from_slice(line);
            }
            pos = end;
        }
        Some((pos, work))
    }
}
