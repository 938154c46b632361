//! # Render Contract
//!
//! The scanners never produce output themselves. They describe the
//! document to a [`Renderer`] as a stream of containers and leaves.
//!
//! ## Containers
//!
//! Every construct with an inside (headings, paragraphs, lists, tables,
//! emphasis, links) reaches the renderer through [`Renderer::container`],
//! together with a [`Content`] continuation. Nothing inside the container
//! has been scanned yet: the renderer decides whether to descend by calling
//! [`Content::render`], or drops the continuation to skip the subtree.
//!
//! The default `container` brackets the content with `start` and `end`,
//! which is all an event-stream renderer needs.
//!
//! ## Leaves
//!
//! Text runs, code, raw HTML, rules and breaks arrive as [`Leaf`] values
//! borrowing bytes from the scanned input. Bytes are passed through as
//! they were written; escaping for the output format is the renderer's job.

use serde::Serialize;

use crate::parsing::{Body, ParseState};

/// Column alignment from a table separator row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    None,
    Left,
    Right,
    Center,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::None => "none",
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::Center => "center",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Bulleted,
    Ordered { start: u64 },
    Definition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoLinkKind {
    /// A URL with a scheme.
    Normal,
    /// A bare address written as `<user@host>`.
    Email,
}

/// A container construct. Owned, so renderers can keep a stack of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Heading { level: u8, id: Option<String> },
    Paragraph,
    BlockQuote,
    List { kind: ListKind, tight: bool },
    Item { kind: ListKind },
    /// A definition list term.
    Term,
    Table { alignments: Vec<Alignment> },
    TableHead,
    TableBody,
    TableFoot,
    TableRow,
    TableCell { alignment: Alignment, header: bool },
    Emphasis,
    Strong,
    Strikethrough,
    Link { dest: String, title: String },
    /// The alt text arrives as a single `Text` leaf.
    Image { dest: String, title: String },
    Footnotes,
    FootnoteItem { label: String, ordinal: usize },
}

/// A construct with no inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leaf<'a> {
    Text(&'a [u8]),
    Code(&'a [u8]),
    CodeBlock { info: &'a [u8], text: &'a [u8] },
    /// A raw HTML block.
    Html(&'a [u8]),
    /// A raw HTML tag inside text.
    InlineHtml(&'a [u8]),
    Rule,
    LineBreak,
    AutoLink { dest: &'a [u8], kind: AutoLinkKind },
    Entity(&'a [u8]),
    FootnoteRef { label: &'a [u8], ordinal: usize },
}

/// Receives the structure of a document.
pub trait Renderer {
    fn start(&mut self, tag: &Tag);

    fn end(&mut self, tag: &Tag);

    fn leaf(&mut self, leaf: Leaf<'_>);

    /// Called once per container. Override to inspect `tag` before deciding
    /// whether to descend into `content`.
    fn container(&mut self, tag: Tag, content: Content<'_>) {
        self.start(&tag);
        content.render(self);
        self.end(&tag);
    }
}

/// The unscanned inside of a container.
///
/// Rendering it drives the nested scan and feeds the results to the
/// renderer. Dropping it skips that work entirely; footnotes referenced
/// only from skipped content are never numbered.
pub struct Content<'a> {
    state: &'a mut ParseState,
    body: Body<'a>,
}

impl<'a> Content<'a> {
    pub(crate) fn new(state: &'a mut ParseState, body: Body<'a>) -> Self {
        Content { state, body }
    }

    pub fn render<R: Renderer + ?Sized>(self, renderer: &mut R) {
        self.state.render_body(renderer, self.body);
    }
}

impl std::fmt::Debug for Content<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Content").finish_non_exhaustive()
    }
}
