//! # markdown-strata-engine
//!
//! A two-phase Markdown scanner. The reference pass lifts link and footnote
//! definitions out of the input; the block and inline scanners then walk
//! what is left and describe it to a [`Renderer`].
//!
//! ```
//! use markdown_strata_engine::{Options, outline, parse};
//!
//! let events = parse("# Hi *there*", &Options::default());
//! assert_eq!(outline(&events), r#"(h1 "Hi " (em "there"))"#);
//! ```

pub mod events;
pub mod options;
pub mod outline;
pub mod parsing;
pub mod render;

pub use events::{Event, EventCollector};
pub use options::{Extensions, Options};
pub use outline::outline;
pub use render::{Alignment, AutoLinkKind, Content, Leaf, ListKind, Renderer, Tag};

/// Scans `input` and drives `renderer` through the document.
pub fn render<R: Renderer + ?Sized>(input: impl AsRef<[u8]>, options: &Options, renderer: &mut R) {
    parsing::render_document(input.as_ref(), options, renderer);
}

/// Scans `input` into an owned event list.
pub fn parse(input: impl AsRef<[u8]>, options: &Options) -> Vec<Event> {
    let mut collector = EventCollector::new();
    render(input, options, &mut collector);
    collector.into_events()
}
