use crate::parsing::cursor::{Cursor, line_end};

/// Thematic break: three or more `*`, `-` or `_`, optionally spaced.
pub struct Rule;

impl Rule {
    pub const MARKERS: [u8; 3] = [b'*', b'-', b'_'];
    pub const MIN_MARKERS: usize = 3;

    /// True if the first line of `data` is a thematic break.
    pub fn matches(data: &[u8]) -> bool {
        let mut cur = Cursor::new(data);
        cur.eat_run(b' ', 3);
        let Some(marker) = cur.peek().filter(|c| Self::MARKERS.contains(c)) else {
            return false;
        };
        let mut n = 0;
        while let Some(c) = cur.peek() {
            match c {
                b'\n' => break,
                b' ' | b'\t' => {}
                c if c == marker => n += 1,
                _ => return false,
            }
            cur.bump();
        }
        n >= Self::MIN_MARKERS
    }

    pub fn scan(data: &[u8]) -> Option<usize> {
        Self::matches(data).then(|| line_end(data, 0))
    }
}
