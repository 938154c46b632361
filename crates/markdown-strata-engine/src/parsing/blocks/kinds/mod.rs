//! # Block Kinds
//!
//! One marker struct per block construct. Each owns its delimiter constants
//! and a `scan` that returns the bytes consumed (and whatever it
//! recognised), or `None` when the construct does not start here.
//!
//! The block scanner calls these; it never hardcodes `>`, `#` or fences.

pub mod block_quote;
pub mod code_block;
pub mod code_fence;
pub mod heading;
pub mod html_block;
pub mod list;
pub mod paragraph;
pub mod rule;
pub mod table;

pub use block_quote::BlockQuote;
pub use code_block::IndentedCode;
pub use code_fence::{CodeFence, Fence, FencedCode};
pub use heading::{AtxHeading, Heading, SetextUnderline};
pub use html_block::HtmlBlock;
pub use list::{ItemBody, List, ListBlock, ListEntry, ListMarker};
pub use paragraph::{Paragraph, ParagraphKind};
pub use rule::Rule;
pub use table::{Row, Table, TableBlock};
