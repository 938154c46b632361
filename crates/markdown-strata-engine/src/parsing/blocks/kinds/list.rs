//! Bulleted, ordered and definition lists.
//!
//! Items are segmented up front so that tightness can be decided for the
//! whole list before anything is emitted. Each item body is copied with one
//! level of indentation removed; nested lists inside it are found again when
//! that body is block-scanned.

use super::{AtxHeading, Rule};
use crate::options::Extensions;
use crate::parsing::cursor::{Cursor, is_blank_line, leading_spaces, line_end, trim};
use crate::render::ListKind;

/// List marker recognition.
pub struct ListMarker;

impl ListMarker {
    pub const BULLETS: [u8; 3] = [b'*', b'+', b'-'];
    pub const ORDINAL_DOT: u8 = b'.';
    pub const DEFINITION: u8 = b':';

    /// `* `, `+ ` or `- ` after up to three spaces. Returns the length
    /// through the space after the marker, 0 if there is no marker.
    pub fn bullet(data: &[u8]) -> usize {
        let mut cur = Cursor::new(data);
        cur.eat_run(b' ', 3);
        if !cur.bump().is_some_and(|c| Self::BULLETS.contains(&c)) {
            return 0;
        }
        Self::spaced(&cur)
    }

    /// `12. ` after up to three spaces.
    pub fn ordinal(data: &[u8]) -> usize {
        let mut cur = Cursor::new(data);
        cur.eat_run(b' ', 3);
        let digits = cur.pos();
        while cur.peek().is_some_and(|c| c.is_ascii_digit()) {
            cur.bump();
        }
        if cur.pos() == digits || cur.bump() != Some(Self::ORDINAL_DOT) {
            return 0;
        }
        Self::spaced(&cur)
    }

    /// `: ` after up to three spaces.
    pub fn definition(data: &[u8]) -> usize {
        let mut cur = Cursor::new(data);
        cur.eat_run(b' ', 3);
        if cur.bump() != Some(Self::DEFINITION) {
            return 0;
        }
        Self::spaced(&cur)
    }

    /// The marker that opens a sibling item. Bulleted and ordered lists
    /// take either marker; the list keeps the kind of its first item.
    pub fn item(kind: ListKind, data: &[u8]) -> usize {
        match kind {
            ListKind::Definition => Self::definition(data),
            ListKind::Bulleted | ListKind::Ordered { .. } => match Self::bullet(data) {
                0 => Self::ordinal(data),
                n => n,
            },
        }
    }

    /// The number an ordered item starts with, saturating on overflow.
    pub fn start_number(data: &[u8]) -> u64 {
        let digits = trim(data).iter().take_while(|c| c.is_ascii_digit());
        digits.fold(0u64, |n, &c| {
            n.saturating_mul(10).saturating_add(u64::from(c - b'0'))
        })
    }

    fn spaced(cur: &Cursor<'_>) -> usize {
        match cur.peek() {
            Some(b' ' | b'\t') => cur.pos() + 1,
            _ => 0,
        }
    }

    /// A nested marker of either kind, not counting thematic breaks.
    fn nested(line: &[u8]) -> bool {
        (Self::bullet(line) > 0 && !Rule::matches(line)) || Self::ordinal(line) > 0
    }
}

/// An item body with one level of indentation removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemBody {
    pub work: Vec<u8>,
    /// Offset in `work` where a nested list begins, 0 when there is none.
    pub sublist: usize,
}

impl ItemBody {
    /// The text before the nested list and the nested list itself.
    pub fn split(&self) -> (&[u8], &[u8]) {
        if self.sublist > 0 && self.sublist < self.work.len() {
            self.work.split_at(self.sublist)
        } else {
            (self.work.as_slice(), &[][..])
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry<'a> {
    Term(&'a [u8]),
    Item(ItemBody),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBlock<'a> {
    pub kind: ListKind,
    pub tight: bool,
    pub entries: Vec<ListEntry<'a>>,
}

struct ItemScan {
    consumed: usize,
    body: ItemBody,
    contains_block: bool,
    /// A blank line preceded whatever stopped the item.
    blank_before_end: bool,
    end_of_list: bool,
}

pub struct List;

impl List {
    /// Consumes a bulleted or ordered list.
    pub fn scan(data: &[u8], kind: ListKind, ext: Extensions) -> Option<(usize, ListBlock<'_>)> {
        let kind = match kind {
            ListKind::Ordered { .. } if ListMarker::ordinal(data) > 0 => ListKind::Ordered {
                start: ListMarker::start_number(data),
            },
            other => other,
        };

        let mut pos = 0;
        let mut entries = Vec::new();
        let mut loose = false;
        while pos < data.len() {
            let Some(item) = Self::item(&data[pos..], kind, ext) else {
                break;
            };
            loose |= item.contains_block;
            pos += item.consumed;
            entries.push(ListEntry::Item(item.body));
            if item.end_of_list {
                break;
            }
        }

        if entries.is_empty() {
            return None;
        }
        Some((
            pos,
            ListBlock {
                kind,
                tight: !loose,
                entries,
            },
        ))
    }

    /// Consumes a definition list: terms, each followed by one or more
    /// `: definition` items.
    pub fn scan_definitions(data: &[u8], ext: Extensions) -> Option<(usize, ListBlock<'_>)> {
        let mut pos = 0;
        let mut entries = Vec::new();
        let mut loose = false;

        while Self::starts_term(&data[pos..]) {
            let term_end = line_end(data, pos);
            entries.push(ListEntry::Term(trim(&data[pos..term_end])));
            pos = term_end;

            let mut separated = false;
            while pos < data.len() {
                let Some(item) = Self::item(&data[pos..], ListKind::Definition, ext) else {
                    break;
                };
                loose |= item.contains_block;
                separated = item.blank_before_end;
                pos += item.consumed;
                entries.push(ListEntry::Item(item.body));
                if item.end_of_list {
                    break;
                }
            }
            if separated && Self::starts_term(&data[pos..]) {
                loose = true;
            }
        }

        if entries.is_empty() {
            return None;
        }
        Some((
            pos,
            ListBlock {
                kind: ListKind::Definition,
                tight: !loose,
                entries,
            },
        ))
    }

    /// A non-blank line directly followed by a `: ` line.
    pub fn starts_term(data: &[u8]) -> bool {
        if is_blank_line(data) || ListMarker::definition(data) > 0 {
            return false;
        }
        let next = line_end(data, 0);
        next < data.len() && ListMarker::definition(&data[next..]) > 0
    }

    fn item(data: &[u8], kind: ListKind, ext: Extensions) -> Option<ItemScan> {
        let baseline = leading_spaces(data, 3);
        let marker = ListMarker::item(kind, data);
        if marker == 0 {
            return None;
        }
        let mut cur = Cursor::at(data, marker);
        cur.skip_blanks();
        let first_end = line_end(data, cur.pos());

        let mut work = data[cur.pos()..first_end].to_vec();
        let mut sublist = 0;
        let mut contains_blank = false;
        let mut contains_block = false;
        let mut end_of_list = false;
        let mut pos = first_end;

        while pos < data.len() {
            let end = line_end(data, pos);
            let line = &data[pos..end];
            if is_blank_line(line) {
                contains_blank = true;
                pos = end;
                continue;
            }

            let indent = leading_spaces(line, 4);
            let chunk = &line[indent..];
            let nested = ListMarker::nested(chunk)
                || (kind == ListKind::Definition && ListMarker::definition(chunk) > 0);

            if nested {
                if contains_blank {
                    contains_block = true;
                }
                if indent == baseline {
                    break;
                }
                if sublist == 0 {
                    sublist = work.len();
                }
            } else if AtxHeading::is_start(chunk, ext) {
                if contains_blank && indent < 4 {
                    end_of_list = true;
                    break;
                }
                contains_block = true;
            } else if kind == ListKind::Definition
                && !contains_blank
                && indent == 0
                && Self::starts_term(&data[pos..])
            {
                break;
            } else if contains_blank {
                if indent < 4 {
                    end_of_list = true;
                    break;
                }
                work.push(b'\n');
                contains_block = true;
            }

            contains_blank = false;
            work.extend_from_slice(chunk);
            pos = end;
        }

        Some(ItemScan {
            consumed: pos,
            body: ItemBody { work, sublist },
            contains_block,
            blank_before_end: contains_blank,
            end_of_list,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn bodies(list: &ListBlock<'_>) -> Vec<String> {
        list.entries
            .iter()
            .map(|e| match e {
                ListEntry::Term(t) => format!("term:{}", String::from_utf8_lossy(t)),
                ListEntry::Item(b) => String::from_utf8_lossy(&b.work).into_owned(),
            })
            .collect()
    }

    #[rstest]
    #[case("* a", 2)]
    #[case("   - a", 5)]
    #[case("+\tb", 2)]
    #[case("*a", 0)]
    #[case("*\n", 0)]
    #[case("    * a", 0)]
    fn bullet_markers(#[case] input: &str, #[case] expected: usize) {
        assert_eq!(ListMarker::bullet(input.as_bytes()), expected);
    }

    #[rstest]
    #[case("1. a", 3)]
    #[case("42. a", 4)]
    #[case(". a", 0)]
    #[case("1) a", 0)]
    #[case("1.a", 0)]
    fn ordinal_markers(#[case] input: &str, #[case] expected: usize) {
        assert_eq!(ListMarker::ordinal(input.as_bytes()), expected);
    }

    #[test]
    fn start_number_saturates() {
        assert_eq!(ListMarker::start_number(b"3. x"), 3);
        assert_eq!(ListMarker::start_number(b"99999999999999999999999. x"), u64::MAX);
    }

    #[test]
    fn tight_list() {
        let (len, list) = List::scan(b"* a\n* b\n", ListKind::Bulleted, Extensions::COMMON).unwrap();
        assert_eq!(len, 8);
        assert!(list.tight);
        assert_eq!(bodies(&list), vec!["a\n", "b\n"]);
    }

    #[test]
    fn blank_between_items_makes_it_loose() {
        let (_, list) = List::scan(b"* a\n\n* b\n", ListKind::Bulleted, Extensions::COMMON).unwrap();
        assert!(!list.tight);
        assert_eq!(list.entries.len(), 2);
    }

    #[test]
    fn blank_then_unindented_text_ends_the_list() {
        let (len, list) = List::scan(b"* a\n\npara\n", ListKind::Bulleted, Extensions::COMMON).unwrap();
        assert_eq!(len, 5);
        assert!(list.tight);
        assert_eq!(bodies(&list), vec!["a\n"]);
    }

    #[test]
    fn indented_paragraph_after_blank_stays_in_item() {
        let (_, list) = List::scan(b"* a\n\n    more\n", ListKind::Bulleted, Extensions::COMMON).unwrap();
        assert!(!list.tight);
        assert_eq!(bodies(&list), vec!["a\n\nmore\n"]);
    }

    #[test]
    fn nested_marker_records_sublist() {
        let (_, list) = List::scan(b"* a\n  * b\n* c\n", ListKind::Bulleted, Extensions::COMMON).unwrap();
        assert!(list.tight);
        let ListEntry::Item(first) = &list.entries[0] else {
            panic!("expected item");
        };
        assert_eq!(first.split(), (&b"a\n"[..], &b"* b\n"[..]));
        assert_eq!(list.entries.len(), 2);
    }

    #[test]
    fn other_marker_kind_continues_the_list() {
        let (len, list) = List::scan(b"* a\n1. b\n", ListKind::Bulleted, Extensions::COMMON).unwrap();
        assert_eq!(len, 9);
        assert_eq!(list.kind, ListKind::Bulleted);
        assert_eq!(bodies(&list), vec!["a\n", "b\n"]);

        let (_, list) = List::scan(b"2. a\n- b\n", ListKind::Ordered { start: 1 }, Extensions::COMMON).unwrap();
        assert_eq!(list.kind, ListKind::Ordered { start: 2 });
        assert_eq!(list.entries.len(), 2);
    }

    #[test]
    fn ordered_start_comes_from_first_item() {
        let (_, list) = List::scan(b"3. a\n4. b\n", ListKind::Ordered { start: 1 }, Extensions::COMMON).unwrap();
        assert_eq!(list.kind, ListKind::Ordered { start: 3 });
    }

    #[test]
    fn lazy_continuation_joins_the_item() {
        let (_, list) = List::scan(b"* a\nb\n", ListKind::Bulleted, Extensions::COMMON).unwrap();
        assert_eq!(bodies(&list), vec!["a\nb\n"]);
    }

    #[test]
    fn definition_list_terms_and_items() {
        let src = b"Apple\n: fruit\n: company\nPear\n: fruit\n";
        let (len, list) = List::scan_definitions(src, Extensions::COMMON).unwrap();
        assert_eq!(len, src.len());
        assert!(list.tight);
        assert_eq!(
            bodies(&list),
            vec!["term:Apple", "fruit\n", "company\n", "term:Pear", "fruit\n"]
        );
    }

    #[test]
    fn blank_separated_definitions_are_loose() {
        let src = b"A\n: one\n\nB\n: two\n";
        let (_, list) = List::scan_definitions(src, Extensions::COMMON).unwrap();
        assert!(!list.tight);
        assert_eq!(bodies(&list), vec!["term:A", "one\n", "term:B", "two\n"]);
    }

    #[test]
    fn term_needs_a_definition() {
        assert!(!List::starts_term(b"Just text\nmore\n"));
        assert!(List::scan_definitions(b"Just text\n", Extensions::COMMON).is_none());
    }
}
