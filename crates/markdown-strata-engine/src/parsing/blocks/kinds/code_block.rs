use crate::parsing::cursor::{is_blank_line, line_end};

/// Code indented by a tab or four spaces.
pub struct IndentedCode;

impl IndentedCode {
    pub const INDENT: &'static [u8] = b"    ";

    /// Length of the indentation that marks a code line, 0 if none.
    pub fn prefix_len(line: &[u8]) -> usize {
        if line.first() == Some(&b'\t') {
            1
        } else if line.starts_with(Self::INDENT) {
            Self::INDENT.len()
        } else {
            0
        }
    }

    /// Consumes indented lines and the blank lines between them. The body
    /// ends in exactly one newline.
    pub fn scan(data: &[u8]) -> Option<(usize, Vec<u8>)> {
        if Self::prefix_len(data) == 0 {
            return None;
        }
        let mut text = Vec::new();
        let mut pos = 0;
        while pos < data.len() {
            let end = line_end(data, pos);
            let line = &data[pos..end];
            let prefix = Self::prefix_len(line);
            if prefix == 0 && !is_blank_line(line) {
                break;
            }
            let content = &line[prefix..];
            if is_blank_line(content) {
                text.push(b'\n');
            } else {
                text.extend_from_slice(content);
            }
            pos = end;
        }

        while text.last() == Some(&b'\n') {
            text.pop();
        }
        text.push(b'\n');
        Some((pos, text))
    }
}
