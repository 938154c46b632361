//! # Block Scanning
//!
//! The block scanner walks its input one construct at a time. At each
//! position it tries the recognisers below in order and takes the first
//! match; a paragraph is the fallback, so every step consumes at least one
//! line and the scan always terminates.
//!
//! | order | construct        | gated by          |
//! |-------|------------------|-------------------|
//! | 1     | ATX heading      |                   |
//! | 2     | raw HTML block   |                   |
//! | 3     | blank lines      |                   |
//! | 4     | thematic break   |                   |
//! | 5     | fenced code      | `FENCED_CODE`     |
//! | 6     | table            | `TABLES`          |
//! | 7     | blockquote       |                   |
//! | 8     | indented code    |                   |
//! | 9     | bulleted list    |                   |
//! | 10    | ordered list     |                   |
//! | 11    | definition list  | `DEFINITION_LISTS`|
//! | -     | paragraph        |                   |
//!
//! Recognised blocks go to the renderer as containers. Their content
//! (quote bodies, list items, cells) is only scanned when the renderer
//! descends into it.
//!
//! ## Modules
//!
//! - **`kinds`**: one marker struct per construct, owning its delimiters

pub mod kinds;

use std::borrow::Cow;

use log::trace;

use super::cursor::{blank_line_len, trim_end};
use super::{Body, ParseState};
use crate::options::Extensions;
use crate::render::{Content, Leaf, ListKind, Renderer, Tag};
use kinds::{
    AtxHeading, BlockQuote, CodeFence, FencedCode, Heading, HtmlBlock, IndentedCode, ItemBody,
    List, ListBlock, ListEntry, Paragraph, ParagraphKind, Rule, Table, TableBlock,
};

/// A recognised block, borrowing from the scanned buffer where it can.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    Heading(Heading<'a>),
    Html(&'a [u8]),
    Rule,
    FencedCode(FencedCode<'a>),
    Table(TableBlock<'a>),
    /// Quote content with the `>` markers removed.
    Quote(Vec<u8>),
    IndentedCode(Vec<u8>),
    List(ListBlock<'a>),
    Paragraph(&'a [u8]),
    /// Consumed without output: blank lines, empty headings.
    Skip,
}

type Recognizer = for<'a> fn(&'a [u8], Extensions) -> Option<(usize, Block<'a>)>;

const RECOGNIZERS: [(&str, Recognizer); 11] = [
    ("atx heading", atx_heading),
    ("html", html),
    ("blank", blank),
    ("rule", rule),
    ("fenced code", fenced_code),
    ("table", table),
    ("quote", quote),
    ("indented code", indented_code),
    ("bullet list", bullet_list),
    ("ordered list", ordered_list),
    ("definition list", definition_list),
];

/// Recognises the block at the start of `data`. Always consumes at least
/// one byte of non-empty input.
pub fn next_block(data: &[u8], ext: Extensions) -> (usize, Block<'_>) {
    for (name, recognize) in RECOGNIZERS {
        if let Some((len, block)) = recognize(data, ext) {
            if len > 0 {
                trace!("{name}: {len} bytes");
                return (len, block);
            }
        }
    }
    let (len, paragraph) = Paragraph::scan(data, ext);
    let block = match paragraph {
        ParagraphKind::Paragraph(text) if text.is_empty() => Block::Skip,
        ParagraphKind::Paragraph(text) => Block::Paragraph(text),
        ParagraphKind::Heading { level, text } => Block::Heading(Heading {
            level,
            text,
            id: None,
        }),
    };
    (len.max(1).min(data.len()), block)
}

fn atx_heading(data: &[u8], ext: Extensions) -> Option<(usize, Block<'_>)> {
    let (len, heading) = AtxHeading::scan(data, ext)?;
    Some((len, heading.map_or(Block::Skip, Block::Heading)))
}

fn html(data: &[u8], ext: Extensions) -> Option<(usize, Block<'_>)> {
    let len = HtmlBlock::scan(data, ext)?;
    Some((len, Block::Html(trim_end(&data[..len]))))
}

fn blank(data: &[u8], _: Extensions) -> Option<(usize, Block<'_>)> {
    let mut len = 0;
    loop {
        let line = blank_line_len(&data[len..]);
        if line == 0 {
            break;
        }
        len += line;
    }
    (len > 0).then_some((len, Block::Skip))
}

fn rule(data: &[u8], _: Extensions) -> Option<(usize, Block<'_>)> {
    Rule::scan(data).map(|len| (len, Block::Rule))
}

fn fenced_code(data: &[u8], ext: Extensions) -> Option<(usize, Block<'_>)> {
    if !ext.contains(Extensions::FENCED_CODE) {
        return None;
    }
    let (len, code) = CodeFence::scan(data)?;
    Some((len, Block::FencedCode(code)))
}

fn table(data: &[u8], ext: Extensions) -> Option<(usize, Block<'_>)> {
    if !ext.contains(Extensions::TABLES) {
        return None;
    }
    let (len, table) = Table::scan(data)?;
    Some((len, Block::Table(table)))
}

fn quote(data: &[u8], _: Extensions) -> Option<(usize, Block<'_>)> {
    let (len, work) = BlockQuote::scan(data)?;
    Some((len, Block::Quote(work)))
}

fn indented_code(data: &[u8], _: Extensions) -> Option<(usize, Block<'_>)> {
    let (len, text) = IndentedCode::scan(data)?;
    Some((len, Block::IndentedCode(text)))
}

fn bullet_list(data: &[u8], ext: Extensions) -> Option<(usize, Block<'_>)> {
    let (len, list) = List::scan(data, ListKind::Bulleted, ext)?;
    Some((len, Block::List(list)))
}

fn ordered_list(data: &[u8], ext: Extensions) -> Option<(usize, Block<'_>)> {
    let (len, list) = List::scan(data, ListKind::Ordered { start: 1 }, ext)?;
    Some((len, Block::List(list)))
}

fn definition_list(data: &[u8], ext: Extensions) -> Option<(usize, Block<'_>)> {
    if !ext.contains(Extensions::DEFINITION_LISTS) {
        return None;
    }
    let (len, list) = List::scan_definitions(data, ext)?;
    Some((len, Block::List(list)))
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

impl ParseState {
    /// Scans `data` as a sequence of blocks.
    pub(crate) fn block<R: Renderer + ?Sized>(&mut self, r: &mut R, data: &[u8]) {
        if !self.enter() {
            return;
        }
        let ext = self.options.extensions;
        let mut pos = 0;
        while pos < data.len() {
            let (len, block) = next_block(&data[pos..], ext);
            self.emit_block(r, block);
            pos += len;
        }
        self.leave();
    }

    fn emit_block<R: Renderer + ?Sized>(&mut self, r: &mut R, block: Block<'_>) {
        match block {
            Block::Heading(heading) => {
                let tag = Tag::Heading {
                    level: heading.level,
                    id: heading.id.map(lossy),
                };
                r.container(tag, Content::new(self, Body::Inline(heading.text)));
            }
            Block::Html(html) => r.leaf(Leaf::Html(html)),
            Block::Rule => r.leaf(Leaf::Rule),
            Block::FencedCode(code) => r.leaf(Leaf::CodeBlock {
                info: code.info,
                text: &code.text,
            }),
            Block::IndentedCode(text) => r.leaf(Leaf::CodeBlock {
                info: b"",
                text: &text,
            }),
            Block::Table(table) => {
                let tag = Tag::Table {
                    alignments: table.alignments.clone(),
                };
                r.container(tag, Content::new(self, Body::Table(table)));
            }
            Block::Quote(work) => {
                let body = Body::Blocks(Cow::Owned(work));
                r.container(Tag::BlockQuote, Content::new(self, body));
            }
            Block::List(list) => {
                let tag = Tag::List {
                    kind: list.kind,
                    tight: list.tight,
                };
                r.container(tag, Content::new(self, Body::List(list)));
            }
            Block::Paragraph(text) => {
                r.container(Tag::Paragraph, Content::new(self, Body::Inline(text)));
            }
            Block::Skip => {}
        }
    }

    pub(crate) fn render_list<R: Renderer + ?Sized>(&mut self, r: &mut R, list: ListBlock<'_>) {
        let (kind, tight) = (list.kind, list.tight);
        for entry in list.entries {
            match entry {
                ListEntry::Term(term) => {
                    r.container(Tag::Term, Content::new(self, Body::Inline(term)));
                }
                ListEntry::Item(item) => {
                    let body = Body::Item { item, tight };
                    r.container(Tag::Item { kind }, Content::new(self, body));
                }
            }
        }
    }

    /// Tight items are inline text, loose ones are blocks. A nested list
    /// is always block-scanned.
    pub(crate) fn render_item<R: Renderer + ?Sized>(&mut self, r: &mut R, item: &ItemBody, tight: bool) {
        let (head, sublist) = item.split();
        if tight {
            self.inline(r, trim_end(head));
        } else {
            self.block(r, head);
        }
        if !sublist.is_empty() {
            self.block(r, sublist);
        }
    }

    pub(crate) fn render_table<R: Renderer + ?Sized>(&mut self, r: &mut R, table: &TableBlock<'_>) {
        let alignments = table.alignments.as_slice();
        let head = Body::Rows {
            rows: std::slice::from_ref(&table.head),
            alignments,
            header: true,
        };
        r.container(Tag::TableHead, Content::new(self, head));

        if !table.body.is_empty() {
            let body = Body::Rows {
                rows: &table.body,
                alignments,
                header: false,
            };
            r.container(Tag::TableBody, Content::new(self, body));
        }
        if !table.foot.is_empty() {
            let foot = Body::Rows {
                rows: &table.foot,
                alignments,
                header: false,
            };
            r.container(Tag::TableFoot, Content::new(self, foot));
        }
    }
}
