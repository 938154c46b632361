//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters. Each recogniser
//! here is a pure function of the bytes it is given; resolving references
//! and emitting events is left to the scanner.
//!
//! ## Types
//!
//! - **`Emphasis`**: `*`, `_`, `~` delimiter runs
//! - **`CodeSpan`**: `` ` `` runs, a raw zone
//! - **`Link`**: `[text](dest)`, `[text][id]`, `![alt](src)`, `[^note]`
//! - **`AutoLink`**: `<scheme:...>`, `<user@host>`, raw tags, bare URLs
//! - **`Escape`** / **`Entity`**: `\*` and `&amp;`

pub mod autolink;
pub mod code_span;
pub mod emphasis;
pub mod escape;
pub mod link;

pub use autolink::{AngleScan, AutoLink};
pub use code_span::{CodeSpan, CodeSpanScan};
pub use emphasis::{Closers, Emphasis, EmphasisStyle, Emphasized};
pub use escape::{Entity, Escape};
pub use link::{Link, LinkScan, LinkTarget};
