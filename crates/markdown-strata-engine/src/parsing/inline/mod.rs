//! # Inline Scanning
//!
//! A byte-driven scanner over the text of one paragraph, heading, cell or
//! tight list item.
//!
//! ## Architecture
//!
//! A 256-entry trigger table maps each byte to the recognizer it may start.
//! Runs of non-trigger bytes are collected into text. At a trigger byte the
//! recognizer either matches, in which case pending text is flushed and the
//! construct emitted, or declines and the byte is kept as text.
//!
//! | byte        | recognizer     | gated by        |
//! |-------------|----------------|-----------------|
//! | `*` `_`     | emphasis       |                 |
//! | `~`         | strikethrough  | `STRIKETHROUGH` |
//! | `` ` ``     | code span      |                 |
//! | `\n`        | hard break     |                 |
//! | `[`         | link, footnote |                 |
//! | `!`         | image          |                 |
//! | `<`         | autolink, tag  |                 |
//! | `\`         | escape         |                 |
//! | `&`         | entity         |                 |
//! | `:`         | bare URL       | `AUTOLINK`      |
//!
//! Some recognizers claim bytes already collected as text: a hard break
//! takes the spaces before the newline, a bare URL its scheme before the
//! `:`. A match reports how far it reaches back so the flushed text stops
//! short.
//!
//! ## Modules
//!
//! - **`kinds`**: one recognizer per construct, owning its delimiters

pub mod kinds;

use crate::options::Extensions;
use crate::parsing::cursor::unescape;
use crate::parsing::{Body, ParseState};
use crate::render::{AutoLinkKind, Content, Leaf, Renderer, Tag};
use kinds::{
    AngleScan, AutoLink, Closers, CodeSpan, CodeSpanScan, Emphasis, EmphasisStyle, Entity, Escape,
    Link, LinkTarget,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Emphasis,
    CodeSpan,
    LineBreak,
    Link,
    Image,
    Angle,
    Escape,
    Entity,
    AutoLink,
}

/// The trigger table for a set of extensions.
pub fn triggers(ext: Extensions) -> [Option<Trigger>; 256] {
    let mut table = [None; 256];
    table[usize::from(Emphasis::STAR)] = Some(Trigger::Emphasis);
    table[usize::from(Emphasis::UNDERSCORE)] = Some(Trigger::Emphasis);
    if ext.contains(Extensions::STRIKETHROUGH) {
        table[usize::from(Emphasis::TILDE)] = Some(Trigger::Emphasis);
    }
    table[usize::from(CodeSpan::TICK)] = Some(Trigger::CodeSpan);
    table[usize::from(b'\n')] = Some(Trigger::LineBreak);
    table[usize::from(Link::OPEN)] = Some(Trigger::Link);
    table[usize::from(Link::IMAGE)] = Some(Trigger::Image);
    table[usize::from(AutoLink::OPEN)] = Some(Trigger::Angle);
    table[usize::from(Escape::BACKSLASH)] = Some(Trigger::Escape);
    table[usize::from(Entity::AMP)] = Some(Trigger::Entity);
    if ext.contains(Extensions::AUTOLINK) {
        table[usize::from(AutoLink::COLON)] = Some(Trigger::AutoLink);
    }
    table
}

/// A recognised inline construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline<'a> {
    /// Bytes emitted as text without further scanning.
    Literal(&'a [u8]),
    Emphasis {
        style: EmphasisStyle,
        inner: &'a [u8],
    },
    Code(&'a [u8]),
    LineBreak,
    Link {
        text: &'a [u8],
        dest: Vec<u8>,
        title: Vec<u8>,
    },
    Image {
        alt: &'a [u8],
        dest: Vec<u8>,
        title: Vec<u8>,
    },
    FootnoteRef {
        label: &'a [u8],
    },
    AutoLink {
        dest: &'a [u8],
        kind: AutoLinkKind,
    },
    RawHtml(&'a [u8]),
    Entity(&'a [u8]),
}

/// A recognizer hit at position `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'a> {
    /// Bytes consumed from `i`.
    pub consumed: usize,
    /// Bytes before `i` that belong to the construct.
    pub rewind: usize,
    pub node: Inline<'a>,
}

impl<'a> Match<'a> {
    fn new(consumed: usize, node: Inline<'a>) -> Self {
        Match {
            consumed,
            rewind: 0,
            node,
        }
    }
}

impl ParseState {
    /// Scans `data` as inline text.
    pub(crate) fn inline<R: Renderer + ?Sized>(&mut self, r: &mut R, data: &[u8]) {
        if !self.enter() {
            return;
        }
        let closers = Closers::of(data);
        let mut text_start = 0;
        let mut i = 0;
        while i < data.len() {
            let Some(trigger) = self.triggers[usize::from(data[i])] else {
                i += 1;
                continue;
            };
            if trigger == Trigger::Emphasis && !closers.may_close(&data[i..], i) {
                i += 1;
                continue;
            }
            let Some(m) = self.recognize(trigger, data, i, text_start) else {
                i += 1;
                continue;
            };
            let text_end = i - m.rewind.min(i - text_start);
            if text_end > text_start {
                r.leaf(Leaf::Text(&data[text_start..text_end]));
            }
            self.emit_inline(r, m.node);
            i += m.consumed.max(1);
            text_start = i;
        }
        if text_start < data.len() {
            r.leaf(Leaf::Text(&data[text_start..]));
        }
        self.leave();
    }

    /// Runs the recognizer for `trigger` at `data[i]`. `text_start` is where
    /// the pending text run began.
    pub(crate) fn recognize<'d>(
        &self,
        trigger: Trigger,
        data: &'d [u8],
        i: usize,
        text_start: usize,
    ) -> Option<Match<'d>> {
        let rest = &data[i..];
        let ext = self.options.extensions;
        match trigger {
            Trigger::Emphasis => {
                let prev = i.checked_sub(1).map(|p| data[p]);
                let found = Emphasis::scan(rest, prev, ext)?;
                Some(Match::new(
                    found.len,
                    Inline::Emphasis {
                        style: found.style,
                        inner: found.inner,
                    },
                ))
            }
            Trigger::CodeSpan => match CodeSpan::scan(rest)? {
                CodeSpanScan::Code(len, code) => Some(Match::new(len, Inline::Code(code))),
                CodeSpanScan::Unclosed(ticks) => {
                    Some(Match::new(ticks, Inline::Literal(&rest[..ticks])))
                }
            },
            Trigger::LineBreak => {
                let spaces = data[text_start..i]
                    .iter()
                    .rev()
                    .take_while(|&&c| c == b' ')
                    .count();
                (spaces >= 2).then(|| Match {
                    consumed: 1,
                    rewind: spaces,
                    node: Inline::LineBreak,
                })
            }
            Trigger::Link => self.footnote_ref(rest).or_else(|| self.link(rest, false)),
            Trigger::Image => self.link(rest, true),
            Trigger::Angle => match AutoLink::angle(rest)? {
                AngleScan::AutoLink { len, kind } => {
                    if self.in_link {
                        return None;
                    }
                    Some(Match::new(
                        len,
                        Inline::AutoLink {
                            dest: &rest[1..len - 1],
                            kind,
                        },
                    ))
                }
                AngleScan::Tag(len) => Some(Match::new(len, Inline::RawHtml(&rest[..len]))),
            },
            Trigger::Escape => {
                let escaped = Escape::scan(rest)?;
                Some(Match::new(2, Inline::Literal(escaped)))
            }
            Trigger::Entity => {
                let len = Entity::scan(rest)?;
                Some(Match::new(len, Inline::Entity(&rest[..len])))
            }
            Trigger::AutoLink => {
                if self.in_link {
                    return None;
                }
                let (rewind, end) = AutoLink::bare(data, i, text_start)?;
                Some(Match {
                    consumed: end - i,
                    rewind,
                    node: Inline::AutoLink {
                        dest: &data[i - rewind..end],
                        kind: AutoLinkKind::Normal,
                    },
                })
            }
        }
    }

    fn footnote_ref<'d>(&self, rest: &'d [u8]) -> Option<Match<'d>> {
        if !self.options.has(Extensions::FOOTNOTES) {
            return None;
        }
        let (label, len) = Link::footnote_ref(rest)?;
        self.refs.footnote(label)?;
        Some(Match::new(len, Inline::FootnoteRef { label }))
    }

    /// `[text](dest)`, `[text][id]` or `[text]`, and the `!` forms. Links
    /// inside link text are left as text; images are not.
    fn link<'d>(&self, rest: &'d [u8], image: bool) -> Option<Match<'d>> {
        if !image && self.in_link {
            return None;
        }
        let scan = Link::scan(rest, usize::from(image))?;
        let (dest, title) = match scan.target {
            LinkTarget::Inline { dest, title } => (unescape(dest), unescape(title)),
            LinkTarget::Reference(id) => {
                let found = self.refs.link(id)?;
                (unescape(&found.dest), unescape(&found.title))
            }
            LinkTarget::Shortcut => {
                let id = Link::shortcut_id(scan.text, scan.multiline);
                let found = self.refs.link(&id)?;
                (unescape(&found.dest), unescape(&found.title))
            }
        };
        let node = if image {
            Inline::Image {
                alt: scan.text,
                dest,
                title,
            }
        } else {
            Inline::Link {
                text: scan.text,
                dest,
                title,
            }
        };
        Some(Match::new(scan.len, node))
    }

    fn emit_inline<R: Renderer + ?Sized>(&mut self, r: &mut R, node: Inline<'_>) {
        match node {
            Inline::Literal(text) => r.leaf(Leaf::Text(text)),
            Inline::Emphasis { style, inner } => {
                let (tag, body) = match style {
                    EmphasisStyle::Emphasis => (Tag::Emphasis, Body::Inline(inner)),
                    EmphasisStyle::Strong => (Tag::Strong, Body::Inline(inner)),
                    EmphasisStyle::StrongEmphasis => (Tag::Strong, Body::Emphasis(inner)),
                    EmphasisStyle::Strikethrough => (Tag::Strikethrough, Body::Inline(inner)),
                };
                r.container(tag, Content::new(self, body));
            }
            Inline::Code(code) => r.leaf(Leaf::Code(code)),
            Inline::LineBreak => r.leaf(Leaf::LineBreak),
            Inline::Link { text, dest, title } => {
                let tag = Tag::Link {
                    dest: lossy(&dest),
                    title: lossy(&title),
                };
                r.container(tag, Content::new(self, Body::LinkText(text)));
            }
            Inline::Image { alt, dest, title } => {
                let tag = Tag::Image {
                    dest: lossy(&dest),
                    title: lossy(&title),
                };
                r.container(tag, Content::new(self, Body::Text(alt)));
            }
            Inline::FootnoteRef { label } => {
                let body = self.refs.footnote(label).unwrap_or_default().to_vec();
                let ordinal = self.footnotes.ordinal(label, &body);
                r.leaf(Leaf::FootnoteRef { label, ordinal });
            }
            Inline::AutoLink { dest, kind } => {
                let dest = unescape(dest);
                r.leaf(Leaf::AutoLink { dest: &dest, kind });
            }
            Inline::RawHtml(html) => r.leaf(Leaf::InlineHtml(html)),
            Inline::Entity(entity) => r.leaf(Leaf::Entity(entity)),
        }
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::parsing::refs;
    use rstest::rstest;

    fn state(input: &str) -> ParseState {
        let (_, table) = refs::build(input.as_bytes(), Extensions::COMMON);
        ParseState::new(Options::default(), table)
    }

    fn recognize<'d>(st: &ParseState, data: &'d str, i: usize) -> Option<Match<'d>> {
        let data = data.as_bytes();
        let trigger = st.triggers[usize::from(data[i])]?;
        st.recognize(trigger, data, i, 0)
    }

    #[test]
    fn trigger_table_follows_extensions() {
        let common = triggers(Extensions::COMMON);
        assert_eq!(common[usize::from(b'~')], Some(Trigger::Emphasis));
        assert_eq!(common[usize::from(b':')], Some(Trigger::AutoLink));
        assert_eq!(common[usize::from(b'a')], None);

        let bare = triggers(Extensions::empty());
        assert_eq!(bare[usize::from(b'~')], None);
        assert_eq!(bare[usize::from(b':')], None);
        assert_eq!(bare[usize::from(b'*')], Some(Trigger::Emphasis));
    }

    #[rstest]
    #[case("a  \nb", 3, 2)]
    #[case("a   \nb", 4, 3)]
    fn hard_break_claims_trailing_spaces(#[case] input: &str, #[case] at: usize, #[case] rewind: usize) {
        let st = state("");
        let m = recognize(&st, input, at).unwrap();
        assert_eq!(m.node, Inline::LineBreak);
        assert_eq!(m.rewind, rewind);
    }

    #[test]
    fn single_space_is_not_a_break() {
        assert_eq!(recognize(&state(""), "a \nb", 2), None);
    }

    #[test]
    fn reference_links_resolve() {
        let st = state("[ID]: /url \"T\"\n");
        let m = recognize(&st, "[x][id]", 0).unwrap();
        assert_eq!(
            m.node,
            Inline::Link {
                text: b"x",
                dest: b"/url".to_vec(),
                title: b"T".to_vec()
            }
        );
        assert_eq!(recognize(&st, "[x][nope]", 0), None);
    }

    #[test]
    fn links_do_not_nest() {
        let mut st = state("");
        st.in_link = true;
        assert_eq!(recognize(&st, "[a](b)", 0), None);
        assert!(recognize(&st, "![a](b)", 0).is_some());
        assert_eq!(recognize(&st, "<http://x>", 0), None);
    }

    #[test]
    fn unresolved_footnote_is_not_a_reference() {
        let st = state("[^a]: note\n");
        assert_eq!(
            recognize(&st, "[^a]", 0).map(|m| m.node),
            Some(Inline::FootnoteRef { label: b"a" })
        );
        assert_eq!(recognize(&st, "[^b]", 0), None);
    }

    #[test]
    fn bare_url_rewinds_over_scheme() {
        let st = state("");
        let m = recognize(&st, "see http://x.org", 8).unwrap();
        assert_eq!(m.rewind, 4);
        assert_eq!(m.consumed, 8);
        assert_eq!(
            m.node,
            Inline::AutoLink {
                dest: b"http://x.org",
                kind: AutoLinkKind::Normal
            }
        );
    }

    #[test]
    fn escaped_destination_is_unescaped() {
        let st = state("");
        let m = recognize(&st, "[a](b\\_c)", 0).unwrap();
        let Inline::Link { dest, .. } = m.node else {
            panic!("expected link");
        };
        assert_eq!(dest, b"b_c");
    }
}
