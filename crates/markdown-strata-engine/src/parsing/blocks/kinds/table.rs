use crate::parsing::cursor::{line_end, trim};
use crate::render::Alignment;

/// Cells of one table row, already fitted to the column count.
pub type Row<'a> = Vec<&'a [u8]>;

/// A recognised pipe table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock<'a> {
    pub alignments: Vec<Alignment>,
    pub head: Row<'a>,
    pub body: Vec<Row<'a>>,
    pub foot: Vec<Row<'a>>,
}

/// Pipe tables.
///
/// ```text
/// | a | b  |      header: at least one unescaped pipe
/// |:--|---:|      separator: one cell per header cell
/// | 1 | 2  |      body rows until a line without a pipe
/// |===|====|      optional footer separator
/// | 3 | 4  |      footer rows
/// ```
pub struct Table;

impl Table {
    pub const PIPE: u8 = b'|';
    pub const RULE: u8 = b'-';
    pub const FOOT_RULE: u8 = b'=';
    pub const ALIGN: u8 = b':';

    pub fn scan(data: &[u8]) -> Option<(usize, TableBlock<'_>)> {
        let head_end = line_end(data, 0);
        if head_end >= data.len() || Self::pipe_count(&data[..head_end]) == 0 {
            return None;
        }
        let head = Self::cells(&data[..head_end]);

        let sep_end = line_end(data, head_end);
        let separator = &data[head_end..sep_end];
        if Self::pipe_count(separator) == 0 {
            return None;
        }
        let alignments = Self::alignments(separator)?;
        if alignments.len() != head.len() {
            return None;
        }
        let columns = alignments.len();

        let mut body = Vec::new();
        let mut foot = Vec::new();
        let mut in_foot = false;
        let mut pos = sep_end;
        while pos < data.len() {
            let end = line_end(data, pos);
            let line = &data[pos..end];
            if Self::pipe_count(line) == 0 {
                break;
            }
            if !in_foot && Self::is_foot_rule(line) {
                in_foot = true;
            } else if in_foot {
                foot.push(Self::fit(Self::cells(line), columns));
            } else {
                body.push(Self::fit(Self::cells(line), columns));
            }
            pos = end;
        }

        Some((
            pos,
            TableBlock {
                alignments,
                head,
                body,
                foot,
            },
        ))
    }

    /// Unescaped pipes on the line.
    pub fn pipe_count(line: &[u8]) -> usize {
        let mut n = 0;
        let mut i = 0;
        while i < line.len() {
            match line[i] {
                b'\\' => i += 1,
                Self::PIPE => n += 1,
                _ => {}
            }
            i += 1;
        }
        n
    }

    /// Splits a row on unescaped pipes, ignoring one leading and one
    /// trailing pipe, and trims every cell.
    pub fn cells(line: &[u8]) -> Row<'_> {
        let mut row = trim(line);
        if row.first() == Some(&Self::PIPE) {
            row = &row[1..];
        }
        if row.last() == Some(&Self::PIPE) && !row.ends_with(b"\\|") {
            row = &row[..row.len() - 1];
        }

        let mut cells = Vec::new();
        let mut start = 0;
        let mut i = 0;
        while i < row.len() {
            match row[i] {
                b'\\' => i += 1,
                Self::PIPE => {
                    cells.push(trim(&row[start..i]));
                    start = i + 1;
                }
                _ => {}
            }
            i += 1;
        }
        cells.push(trim(&row[start.min(row.len())..]));
        cells
    }

    fn alignments(line: &[u8]) -> Option<Vec<Alignment>> {
        Self::cells(line)
            .into_iter()
            .map(|cell| {
                let left = cell.first() == Some(&Self::ALIGN);
                let right = cell.len() > 1 && cell.last() == Some(&Self::ALIGN);
                let dashes = &cell[usize::from(left)..cell.len() - usize::from(right)];
                if dashes.is_empty() || !dashes.iter().all(|&c| c == Self::RULE) {
                    return None;
                }
                Some(match (left, right) {
                    (true, true) => Alignment::Center,
                    (true, false) => Alignment::Left,
                    (false, true) => Alignment::Right,
                    (false, false) => Alignment::None,
                })
            })
            .collect()
    }

    fn is_foot_rule(line: &[u8]) -> bool {
        Self::cells(line).into_iter().all(|cell| {
            let inner = cell.strip_prefix(&[Self::ALIGN]).unwrap_or(cell);
            let inner = inner.strip_suffix(&[Self::ALIGN]).unwrap_or(inner);
            !inner.is_empty() && inner.iter().all(|&c| c == Self::FOOT_RULE)
        })
    }

    /// Pads a short row with empty cells and drops extra cells.
    fn fit(mut row: Row<'_>, columns: usize) -> Row<'_> {
        row.resize(columns, b"");
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn strs(row: &Row<'_>) -> Vec<String> {
        row.iter()
            .map(|c| String::from_utf8_lossy(c).into_owned())
            .collect()
    }

    #[rstest]
    #[case("a|b|c", vec!["a", "b", "c"])]
    #[case("| a | b |", vec!["a", "b"])]
    #[case("|a\\|b|", vec!["a\\|b"])]
    #[case("a |", vec!["a"])]
    #[case("| |", vec![""])]
    fn split_cells(#[case] line: &str, #[case] expected: Vec<&str>) {
        assert_eq!(strs(&Table::cells(line.as_bytes())), expected);
    }

    #[test]
    fn alignment_from_separator() {
        let (_, t) = Table::scan(b"a|b|c|d\n:--|--:|:-:|-\n").unwrap();
        assert_eq!(
            t.alignments,
            vec![
                Alignment::Left,
                Alignment::Right,
                Alignment::Center,
                Alignment::None
            ]
        );
    }

    #[test]
    fn short_rows_are_padded_long_rows_truncated() {
        let (len, t) = Table::scan(b"a|b|c\n-|-|-\nd|e\nd|e|f|g\nafter\n").unwrap();
        assert_eq!(len, 24);
        assert_eq!(strs(&t.body[0]), vec!["d", "e", ""]);
        assert_eq!(strs(&t.body[1]), vec!["d", "e", "f"]);
    }

    #[test]
    fn footer_rows_follow_an_equals_rule() {
        let (_, t) = Table::scan(b"|a|b|\n|--|--|\n|1|2|\n|==|==|\n|3|4|\n").unwrap();
        assert_eq!(t.body.len(), 1);
        assert_eq!(strs(&t.foot[0]), vec!["3", "4"]);
    }

    #[rstest]
    #[case("a|b\n")]
    #[case("a|b\n--|--|--\n")]
    #[case("a|b\nx|y\n")]
    #[case("a|b\n---\n")]
    #[case("a b\n---|---\n")]
    #[case("a|b\n:|-\n")]
    fn not_tables(#[case] input: &str) {
        assert!(Table::scan(input.as_bytes()).is_none());
    }

    #[test]
    fn escaped_pipes_do_not_count() {
        assert_eq!(Table::pipe_count(b"a \\| b | c"), 1);
    }
}
