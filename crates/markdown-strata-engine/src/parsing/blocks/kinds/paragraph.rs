use super::{AtxHeading, HtmlBlock, List, Rule, SetextUnderline};
use crate::options::Extensions;
use crate::parsing::cursor::{blank_line_len, line_end, trim};

/// What a run of paragraph lines turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphKind<'a> {
    Paragraph(&'a [u8]),
    /// The lines were underlined with `===` or `---`.
    Heading { level: u8, text: &'a [u8] },
}

/// Paragraph block type (marker struct).
///
/// Paragraphs have no delimiters - they are the fallback when no other
/// block opener matches, so scanning always consumes at least one line.
pub struct Paragraph;

impl Paragraph {
    /// Accumulates lines until a blank line, an underline, or a line that
    /// opens a block able to interrupt a paragraph. The returned text is
    /// trimmed.
    pub fn scan(data: &[u8], ext: Extensions) -> (usize, ParagraphKind<'_>) {
        let mut pos = 0;
        while pos < data.len() {
            let rest = &data[pos..];
            let blank = blank_line_len(rest);
            if blank > 0 {
                return (pos + blank, ParagraphKind::Paragraph(trim(&data[..pos])));
            }

            if pos > 0 {
                if let Some(level) = SetextUnderline::level(rest) {
                    return (
                        line_end(data, pos),
                        ParagraphKind::Heading {
                            level,
                            text: trim(&data[..pos]),
                        },
                    );
                }
                if Self::interrupted_by(rest, ext) {
                    return (pos, ParagraphKind::Paragraph(trim(&data[..pos])));
                }
            }

            pos = line_end(data, pos);
        }
        (pos, ParagraphKind::Paragraph(trim(&data[..pos])))
    }

    fn interrupted_by(line: &[u8], ext: Extensions) -> bool {
        (ext.contains(Extensions::LAX_HTML_BLOCKS)
            && line.first() == Some(&b'<')
            && HtmlBlock::scan(line, ext).is_some())
            || AtxHeading::is_start(line, ext)
            || Rule::matches(line)
            || (ext.contains(Extensions::DEFINITION_LISTS) && List::starts_term(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn scan(input: &str, ext: Extensions) -> (usize, ParagraphKind<'_>) {
        Paragraph::scan(input.as_bytes(), ext)
    }

    #[test]
    fn blank_line_ends_paragraph() {
        assert_eq!(
            scan("one\ntwo\n\nthree\n", Extensions::COMMON),
            (9, ParagraphKind::Paragraph(b"one\ntwo"))
        );
    }

    #[test]
    fn setext_takes_the_whole_paragraph() {
        assert_eq!(
            scan("one\ntwo\n===\nrest\n", Extensions::COMMON),
            (12, ParagraphKind::Heading { level: 1, text: b"one\ntwo" })
        );
        assert_eq!(
            scan("Title\n---\n", Extensions::COMMON),
            (10, ParagraphKind::Heading { level: 2, text: b"Title" })
        );
    }

    #[rstest]
    #[case("text\n# Heading\n")]
    #[case("text\n***\n")]
    fn interrupting_blocks(#[case] input: &str) {
        assert_eq!(
            scan(input, Extensions::COMMON),
            (5, ParagraphKind::Paragraph(b"text"))
        );
    }

    #[test]
    fn lists_do_not_interrupt() {
        assert_eq!(
            scan("text\n* item\n", Extensions::COMMON),
            (12, ParagraphKind::Paragraph(b"text\n* item"))
        );
    }

    #[test]
    fn lax_html_interrupts() {
        let src = "text\n<div>\nx\n</div>\n";
        assert_eq!(
            scan(src, Extensions::LAX_HTML_BLOCKS),
            (5, ParagraphKind::Paragraph(b"text"))
        );
        assert_eq!(scan(src, Extensions::empty()).0, src.len());
    }

    #[test]
    fn definition_term_interrupts() {
        assert_eq!(
            scan("para\nTerm\n: def\n", Extensions::DEFINITION_LISTS),
            (5, ParagraphKind::Paragraph(b"para"))
        );
    }

    #[test]
    fn first_line_is_always_consumed() {
        assert_eq!(
            scan("#tag\n", Extensions::SPACE_HEADERS),
            (5, ParagraphKind::Paragraph(b"#tag"))
        );
    }
}
