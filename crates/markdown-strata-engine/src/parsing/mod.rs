//! # Parsing
//!
//! Two passes over one document:
//!
//! 1. **References** (`refs`): normalises the input and lifts link and
//!    footnote definitions into a [`RefTable`].
//! 2. **Blocks** (`blocks`): segments the normalised text into block
//!    constructs and hands each to the renderer as a container whose inside
//!    is scanned on demand, either by the block scanner again (quotes, list
//!    items, footnotes) or by the inline scanner (`inline`).
//!
//! All mutable state for one parse lives in [`ParseState`]. Nothing is
//! shared between parses.
//!
//! ## Modules
//!
//! - **`cursor`** / **`span`**: byte-level helpers shared by every scanner
//! - **`refs`**: the reference pass
//! - **`footnotes`**: footnote ordinals in first-use order
//! - **`blocks`**: block recognisers and the block scanner
//! - **`inline`**: inline recognisers, emphasis matching and the inline scanner
//!
//! ## Nesting
//!
//! Every block or inline scan counts as one level. Once `max_nesting`
//! levels are open, further nested content is dropped without error.

pub mod blocks;
pub mod cursor;
pub mod footnotes;
pub mod inline;
pub mod refs;
pub mod span;

use std::borrow::Cow;

use log::debug;

use crate::options::Options;
use crate::render::{Alignment, Content, Leaf, Renderer, Tag};
use blocks::kinds::{ItemBody, ListBlock, Row, TableBlock};
use footnotes::FootnoteTable;
use inline::Trigger;
use refs::RefTable;

/// Mutable state of a single parse.
pub struct ParseState {
    pub(crate) options: Options,
    pub(crate) refs: RefTable,
    pub(crate) footnotes: FootnoteTable,
    pub(crate) triggers: [Option<Trigger>; 256],
    depth: usize,
    /// Set while scanning link text; links do not nest.
    pub(crate) in_link: bool,
    truncated: bool,
}

/// What a [`Content`] continuation scans when rendered.
pub(crate) enum Body<'a> {
    /// Block content, rescanned from the top.
    Blocks(Cow<'a, [u8]>),
    Inline(&'a [u8]),
    /// Inline content of a link; nested links are not recognised.
    LinkText(&'a [u8]),
    /// Bytes passed through as a single text leaf.
    Text(&'a [u8]),
    /// The inner emphasis of a `***triple***` run.
    Emphasis(&'a [u8]),
    List(ListBlock<'a>),
    Item { item: ItemBody, tight: bool },
    Table(TableBlock<'a>),
    Rows {
        rows: &'a [Row<'a>],
        alignments: &'a [Alignment],
        header: bool,
    },
    Cells {
        cells: &'a [&'a [u8]],
        alignments: &'a [Alignment],
        header: bool,
    },
    Footnotes,
}

impl ParseState {
    pub(crate) fn new(options: Options, refs: RefTable) -> Self {
        ParseState {
            options,
            refs,
            footnotes: FootnoteTable::default(),
            triggers: inline::triggers(options.extensions),
            depth: 0,
            in_link: false,
            truncated: false,
        }
    }

    /// Opens one nesting level. Returns false, and opens nothing, once the
    /// limit is reached.
    pub(crate) fn enter(&mut self) -> bool {
        if self.depth >= self.options.max_nesting {
            if !self.truncated {
                debug!(
                    "nesting limit {} reached, dropping nested content",
                    self.options.max_nesting
                );
                self.truncated = true;
            }
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn render_body<R: Renderer + ?Sized>(&mut self, r: &mut R, body: Body<'_>) {
        match body {
            Body::Blocks(data) => self.block(r, &data),
            Body::Inline(data) => self.inline(r, data),
            Body::LinkText(data) => {
                let outer = self.in_link;
                self.in_link = true;
                self.inline(r, data);
                self.in_link = outer;
            }
            Body::Text(data) => r.leaf(Leaf::Text(data)),
            Body::Emphasis(inner) => {
                r.container(Tag::Emphasis, Content::new(self, Body::Inline(inner)))
            }
            Body::List(list) => self.render_list(r, list),
            Body::Item { item, tight } => self.render_item(r, &item, tight),
            Body::Table(table) => self.render_table(r, &table),
            Body::Rows {
                rows,
                alignments,
                header,
            } => {
                for row in rows {
                    let body = Body::Cells {
                        cells: row.as_slice(),
                        alignments,
                        header,
                    };
                    r.container(Tag::TableRow, Content::new(self, body));
                }
            }
            Body::Cells {
                cells,
                alignments,
                header,
            } => {
                for (i, cell) in cells.iter().enumerate() {
                    let tag = Tag::TableCell {
                        alignment: alignments.get(i).copied().unwrap_or_default(),
                        header,
                    };
                    r.container(tag, Content::new(self, Body::Inline(cell)));
                }
            }
            Body::Footnotes => self.render_footnotes(r),
        }
    }

    /// Footnote bodies may reference further footnotes, which are appended
    /// to the table while this loop runs.
    fn render_footnotes<R: Renderer + ?Sized>(&mut self, r: &mut R) {
        let mut index = 0;
        while let Some(note) = self.footnotes.get(index) {
            let label = String::from_utf8_lossy(&note.label).into_owned();
            let body = note.body.clone();
            index += 1;
            let tag = Tag::FootnoteItem {
                label,
                ordinal: index,
            };
            r.container(tag, Content::new(self, Body::Blocks(Cow::Owned(body))));
        }
    }
}

/// Parses `input` and feeds the whole document to `renderer`.
pub fn render_document<R: Renderer + ?Sized>(input: &[u8], options: &Options, renderer: &mut R) {
    let (text, refs) = refs::build(input, options.extensions);
    debug!(
        "{} link references, {} footnote definitions",
        refs.link_count(),
        refs.footnote_count()
    );
    let mut state = ParseState::new(*options, refs);
    state.block(renderer, &text);
    if !state.footnotes.is_empty() {
        renderer.container(Tag::Footnotes, Content::new(&mut state, Body::Footnotes));
    }
}
