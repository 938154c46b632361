//! # Reference Table Builder
//!
//! The first pass over a document. It produces the buffer the block scanner
//! actually sees and the table every link lookup resolves against:
//!
//! - tabs are expanded to 4-column stops, `\r\n` and lone `\r` become `\n`,
//!   and the buffer always ends in `\n`;
//! - `[label]: destination "title"` lines are removed and recorded;
//! - with footnotes enabled, `[^label]: body` definitions (and their indented
//!   continuation lines) are removed and recorded.
//!
//! Labels are keyed ASCII-case-insensitively and the first definition of a
//! label wins, so a link may resolve against a definition that appears later
//! in the document.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use log::debug;

use super::blocks::kinds::{CodeFence, Rule};
use super::cursor::{Cursor, blank_line_len, is_blank_line, leading_spaces, line_end};
use crate::options::Extensions;

/// Columns per tab stop.
pub const TAB_SIZE: usize = 4;

/// The destination and title of a `[label]: ...` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    pub dest: Vec<u8>,
    pub title: Vec<u8>,
}

/// Link and footnote definitions keyed by folded label.
#[derive(Debug, Default)]
pub struct RefTable {
    links: HashMap<String, LinkRef>,
    footnotes: HashMap<String, Vec<u8>>,
}

impl RefTable {
    pub fn link(&self, label: &[u8]) -> Option<&LinkRef> {
        self.links.get(&fold_label(label))
    }

    pub fn footnote(&self, label: &[u8]) -> Option<&[u8]> {
        self.footnotes.get(&fold_label(label)).map(Vec::as_slice)
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn footnote_count(&self) -> usize {
        self.footnotes.len()
    }

    fn add_link(&mut self, label: &[u8], link: LinkRef) {
        match self.links.entry(fold_label(label)) {
            Entry::Occupied(e) => debug!("ignoring duplicate link reference {:?}", e.key()),
            Entry::Vacant(e) => {
                debug!("link reference {:?}", e.key());
                e.insert(link);
            }
        }
    }

    fn add_footnote(&mut self, label: &[u8], body: Vec<u8>) {
        match self.footnotes.entry(fold_label(label)) {
            Entry::Occupied(e) => debug!("ignoring duplicate footnote {:?}", e.key()),
            Entry::Vacant(e) => {
                debug!("footnote definition {:?}", e.key());
                e.insert(body);
            }
        }
    }
}

/// The lookup key for a label.
pub fn fold_label(label: &[u8]) -> String {
    String::from_utf8_lossy(&label.to_ascii_lowercase()).into_owned()
}

/// Runs the first pass: normalises `input` and strips every definition out
/// of it.
pub fn build(input: &[u8], ext: Extensions) -> (Vec<u8>, RefTable) {
    let normalized = normalize(input);
    extract(&normalized, ext)
}

/// Expands tabs and folds line endings, appending a final `\n`.
pub fn normalize(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len() + input.len() / 8 + 1);
    let mut i = 0;
    while i < input.len() {
        let end = input[i..]
            .iter()
            .position(|&c| c == b'\n' || c == b'\r')
            .map_or(input.len(), |n| i + n);
        expand_tabs(&mut out, &input[i..end]);
        i = end;
        if i < input.len() {
            if input[i] == b'\r' && input.get(i + 1) == Some(&b'\n') {
                i += 1;
            }
            out.push(b'\n');
            i += 1;
        }
    }
    if out.last().is_some_and(|&c| c != b'\n') {
        out.push(b'\n');
    }
    out
}

fn expand_tabs(out: &mut Vec<u8>, line: &[u8]) {
    let mut column = 0usize;
    for &c in line {
        if c == b'\t' {
            let pad = TAB_SIZE - column % TAB_SIZE;
            out.extend(std::iter::repeat_n(b' ', pad));
            column += pad;
        } else {
            out.push(c);
            // UTF-8 continuation bytes share the column of their lead byte.
            if c & 0xC0 != 0x80 {
                column += 1;
            }
        }
    }
}

fn extract(text: &[u8], ext: Extensions) -> (Vec<u8>, RefTable) {
    let mut refs = RefTable::default();
    let mut out = Vec::with_capacity(text.len());
    let mut beg = 0;

    while beg < text.len() {
        let rest = &text[beg..];

        // Definitions inside fenced code are code, not definitions.
        if ext.contains(Extensions::FENCED_CODE) {
            if let Some(len) = CodeFence::extent(rest) {
                out.extend_from_slice(&rest[..len]);
                beg += len;
                continue;
            }
        }

        if ext.contains(Extensions::FOOTNOTES) {
            if let Some((len, label, body)) = footnote_definition(rest) {
                refs.add_footnote(label, body);
                beg += len;
                continue;
            }
        }

        if let Some((len, label, link)) = link_definition(rest) {
            refs.add_link(label, link);
            beg += len;
            continue;
        }

        let end = line_end(text, beg);
        out.extend_from_slice(&text[beg..end]);
        beg = end;
    }

    (out, refs)
}

/// Recognises `[label]: dest "title"` at the start of `data`.
///
/// Returns the bytes consumed (through the newline), the raw label and the
/// definition. The destination may sit on the line after the colon and the
/// title on the line after the destination.
fn link_definition(data: &[u8]) -> Option<(usize, &[u8], LinkRef)> {
    let mut cur = Cursor::new(data);
    cur.eat_run(b' ', 3);
    if cur.bump()? != b'[' {
        return None;
    }
    let label_start = cur.pos();
    while !matches!(cur.peek(), None | Some(b'\n' | b']')) {
        cur.bump();
    }
    let label = &data[label_start..cur.pos()];
    if cur.bump()? != b']' || cur.bump()? != b':' {
        return None;
    }

    cur.skip_blanks();
    if cur.peek() == Some(b'\n') {
        cur.bump();
        cur.skip_blanks();
    }

    let angled = cur.peek() == Some(b'<');
    if angled {
        cur.bump();
    }
    let dest_start = cur.pos();
    while !matches!(cur.peek(), None | Some(b' ' | b'\t' | b'\n')) {
        cur.bump();
    }
    let mut dest_end = cur.pos();
    if angled && dest_end > dest_start && data[dest_end - 1] == b'>' {
        dest_end -= 1;
    }
    if dest_end == dest_start {
        return None;
    }

    cur.skip_blanks();
    let dest_eol = match cur.peek() {
        None | Some(b'\n') => Some(cur.pos()),
        Some(b'"' | b'\'' | b'(') => None,
        _ => return None,
    };

    let title_from = match dest_eol {
        Some(eol) if eol < data.len() => {
            let mut next = Cursor::at(data, eol + 1);
            next.skip_blanks();
            next.pos()
        }
        Some(eol) => eol,
        None => cur.pos(),
    };

    let (title, end) = match title_at(data, title_from) {
        Some((title, eol)) => (title, eol),
        // An unusable title on the next line is just the next line.
        None => (&b""[..], dest_eol?),
    };

    let link = LinkRef {
        dest: data[dest_start..dest_end].to_vec(),
        title: title.to_vec(),
    };
    Some(((end + 1).min(data.len()), label, link))
}

/// A `"title"`, `'title'` or `(title)` running to the end of its line.
fn title_at(data: &[u8], from: usize) -> Option<(&[u8], usize)> {
    let close = match *data.get(from)? {
        b'"' => b'"',
        b'\'' => b'\'',
        b'(' => b')',
        _ => return None,
    };
    let start = from + 1;
    let eol = line_end(data, from);
    let eol = if data.get(eol.wrapping_sub(1)) == Some(&b'\n') {
        eol - 1
    } else {
        eol
    };
    let mut k = eol;
    while k > start && matches!(data[k - 1], b' ' | b'\t') {
        k -= 1;
    }
    if k > start && data[k - 1] == close {
        Some((&data[start..k - 1], eol))
    } else {
        None
    }
}

/// Recognises `[^label]: body` plus its continuation lines.
///
/// Continuation lines are indented lines (one level of indentation is
/// stripped), blank lines followed by more indented lines, and lazy
/// unindented lines directly after a body line.
fn footnote_definition(data: &[u8]) -> Option<(usize, &[u8], Vec<u8>)> {
    let mut cur = Cursor::new(data);
    cur.eat_run(b' ', 3);
    if !cur.starts_with(b"[^") {
        return None;
    }
    cur.bump_n(2);
    let label_start = cur.pos();
    while !matches!(cur.peek(), None | Some(b'\n' | b']')) {
        cur.bump();
    }
    let label = &data[label_start..cur.pos()];
    if cur.bump()? != b']' || cur.bump()? != b':' {
        return None;
    }
    cur.skip_blanks();

    let first_end = line_end(data, cur.pos());
    let mut body = data[cur.pos()..first_end].to_vec();
    let mut pos = first_end;

    while pos < data.len() {
        let end = line_end(data, pos);
        let line = &data[pos..end];

        if is_blank_line(line) {
            let mut next = pos;
            let mut blanks = 0;
            while next < data.len() && blank_line_len(&data[next..]) > 0 {
                next = line_end(data, next);
                blanks += 1;
            }
            if next < data.len() && leading_spaces(&data[next..], TAB_SIZE) == TAB_SIZE {
                body.extend(std::iter::repeat_n(b'\n', blanks));
                pos = next;
                continue;
            }
            break;
        }

        let indent = leading_spaces(line, TAB_SIZE);
        if indent > 0 {
            body.extend_from_slice(&line[indent..]);
        } else if matches!(line[0], b'[' | b'#') || Rule::matches(line) {
            break;
        } else {
            body.extend_from_slice(line);
        }
        pos = end;
    }

    if body.last().is_some_and(|&c| c != b'\n') {
        body.push(b'\n');
    }
    Some((pos, label, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(s: &str) -> String {
        let (out, _) = build(s.as_bytes(), Extensions::COMMON);
        String::from_utf8(out).unwrap()
    }

    #[rstest]
    #[case("a\r\nb", "a\nb\n")]
    #[case("a\rb\n", "a\nb\n")]
    #[case("\tx", "    x\n")]
    #[case("ab\tx", "ab  x\n")]
    #[case("é\tx", "é   x\n")]
    #[case("", "")]
    #[case("a\n\n\nb\n", "a\n\n\nb\n")]
    fn normalizes_whitespace(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(text(input), expected);
    }

    #[test]
    fn strips_link_definitions() {
        let (out, refs) = build(b"Hello\n[Foo]: /url \"Title\"\nWorld\n", Extensions::COMMON);
        assert_eq!(out, b"Hello\nWorld\n");
        let link = refs.link(b"foo").unwrap();
        assert_eq!(link.dest, b"/url");
        assert_eq!(link.title, b"Title");
    }

    #[rstest]
    #[case("[a]: /u", "/u", "")]
    #[case("   [a]: </u>", "/u", "")]
    #[case("[a]:\n  /u", "/u", "")]
    #[case("[a]: /u\n  'T'", "/u", "T")]
    #[case("[a]: /u (T)", "/u", "T")]
    #[case("[a]: /u \"\"", "/u", "")]
    fn link_definition_forms(#[case] input: &str, #[case] dest: &str, #[case] title: &str) {
        let (out, refs) = build(input.as_bytes(), Extensions::COMMON);
        assert_eq!(out, b"");
        let link = refs.link(b"A").unwrap();
        assert_eq!(link.dest, dest.as_bytes());
        assert_eq!(link.title, title.as_bytes());
    }

    #[rstest]
    #[case("    [a]: /u\n")]
    #[case("[a] : /u\n")]
    #[case("[a]: /u trailing\n")]
    #[case("[a]: /u \"open\n")]
    #[case("[a]:\n\n")]
    #[case("[a\nb]: /u\n")]
    fn rejected_link_definitions(#[case] input: &str) {
        let (out, refs) = build(input.as_bytes(), Extensions::COMMON);
        assert_eq!(refs.link_count(), 0);
        assert_eq!(out, input.as_bytes());
    }

    #[test]
    fn untitled_next_line_is_kept() {
        let (out, refs) = build(b"[a]: /u\nnext\n", Extensions::COMMON);
        assert_eq!(out, b"next\n");
        assert_eq!(refs.link(b"a").unwrap().title, b"");
    }

    #[test]
    fn first_definition_wins() {
        let (_, refs) = build(b"[x]: /first\n[X]: /second\n", Extensions::COMMON);
        assert_eq!(refs.link(b"x").unwrap().dest, b"/first");
        assert_eq!(refs.link_count(), 1);
    }

    #[test]
    fn empty_label_is_accepted() {
        let (_, refs) = build(b"[]: /u\n", Extensions::COMMON);
        assert_eq!(refs.link(b"").unwrap().dest, b"/u");
    }

    #[test]
    fn definitions_inside_fences_are_code() {
        let src = "```\n[a]: /u\n```\n";
        let (out, refs) = build(src.as_bytes(), Extensions::COMMON);
        assert_eq!(out, src.as_bytes());
        assert_eq!(refs.link_count(), 0);
    }

    #[test]
    fn footnote_body_collects_indented_lines() {
        let src = "[^n]: First\n    second\n\n    third\nafter\n\nPara\n";
        let (out, refs) = build(src.as_bytes(), Extensions::COMMON);
        assert_eq!(
            String::from_utf8_lossy(refs.footnote(b"N").unwrap()),
            "First\nsecond\n\nthird\nafter\n"
        );
        assert_eq!(out, b"\nPara\n");
    }

    #[rstest]
    #[case("[^a]: note\n\n after\n", "\n after\n")]
    #[case("[^a]: note\n\n - item\n", "\n - item\n")]
    #[case("[^a]: note\n\n   three\n", "\n   three\n")]
    fn shallow_indent_after_blank_ends_footnote(#[case] src: &str, #[case] rest: &str) {
        let (out, refs) = build(src.as_bytes(), Extensions::COMMON);
        assert_eq!(refs.footnote(b"a").unwrap(), b"note\n");
        assert_eq!(String::from_utf8_lossy(&out), rest);
    }

    #[test]
    fn footnote_stops_before_next_definition() {
        let src = "[^a]: one\n[^b]: two\n";
        let (out, refs) = build(src.as_bytes(), Extensions::COMMON);
        assert_eq!(out, b"");
        assert_eq!(refs.footnote(b"a").unwrap(), b"one\n");
        assert_eq!(refs.footnote(b"b").unwrap(), b"two\n");
    }

    #[test]
    fn empty_footnote_body() {
        let (_, refs) = build(b"[^e]:\n", Extensions::COMMON);
        assert_eq!(refs.footnote(b"e").unwrap(), b"\n");
    }

    #[test]
    fn footnote_syntax_is_a_link_without_the_extension() {
        let (_, refs) = build(b"[^x]: /y\n", Extensions::empty());
        assert_eq!(refs.footnote_count(), 0);
        assert_eq!(refs.link(b"^x").unwrap().dest, b"/y");
    }
}
