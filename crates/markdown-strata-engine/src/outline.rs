//! # Outline
//!
//! A one-line S-expression rendering of an event stream, for tests and
//! debugging:
//!
//! ```text
//! # Hi *there*        (h1 "Hi " (em "there"))
//! * a                 (ul tight (li "a"))
//! 3. x                (ol@3 tight (li "x"))
//! [a](/u "t")         (p (a href="/u" title="t" "a"))
//! ```
//!
//! Strings are quoted with Rust's `Debug` escaping. Alignment is written
//! only on cells that have one: `(td right "1")`.

use crate::events::Event;
use crate::render::{Alignment, AutoLinkKind, ListKind, Tag};

/// Renders `events` as an outline.
pub fn outline(events: &[Event]) -> String {
    let mut out = String::new();
    let mut first = true;
    for event in events {
        if let Event::End(_) = event {
            out.push(')');
            continue;
        }
        if !first && !out.ends_with('(') {
            out.push(' ');
        }
        first = false;
        match event {
            Event::Start(tag) => {
                out.push('(');
                out.push_str(&head(tag));
            }
            Event::End(_) => {}
            Event::Text(text) => quoted(&mut out, text),
            Event::Code(code) => atom(&mut out, "code", code),
            Event::CodeBlock { info, text } => {
                out.push_str("(pre ");
                if !info.is_empty() {
                    out.push_str(&format!("lang={info:?} "));
                }
                quoted(&mut out, text);
                out.push(')');
            }
            Event::Html(html) => atom(&mut out, "html", html),
            Event::InlineHtml(html) => atom(&mut out, "tag", html),
            Event::Rule => out.push_str("(hr)"),
            Event::LineBreak => out.push_str("(br)"),
            Event::AutoLink { dest, kind } => match kind {
                AutoLinkKind::Normal => atom(&mut out, "autolink", dest),
                AutoLinkKind::Email => atom(&mut out, "autolink email", dest),
            },
            Event::Entity(entity) => atom(&mut out, "entity", entity),
            Event::FootnoteRef { label, ordinal } => {
                out.push_str(&format!("(fnref {ordinal} {label:?})"));
            }
        }
    }
    out
}

fn head(tag: &Tag) -> String {
    match tag {
        Tag::Heading { level, id: None } => format!("h{level}"),
        Tag::Heading {
            level,
            id: Some(id),
        } => format!("h{level} id={id:?}"),
        Tag::Paragraph => "p".to_string(),
        Tag::BlockQuote => "quote".to_string(),
        Tag::List { kind, tight } => {
            let tightness = if *tight { "tight" } else { "loose" };
            match kind {
                ListKind::Bulleted => format!("ul {tightness}"),
                ListKind::Ordered { start: 1 } => format!("ol {tightness}"),
                ListKind::Ordered { start } => format!("ol@{start} {tightness}"),
                ListKind::Definition => format!("dl {tightness}"),
            }
        }
        Tag::Item {
            kind: ListKind::Definition,
        } => "dd".to_string(),
        Tag::Item { .. } => "li".to_string(),
        Tag::Term => "dt".to_string(),
        Tag::Table { .. } => "table".to_string(),
        Tag::TableHead => "thead".to_string(),
        Tag::TableBody => "tbody".to_string(),
        Tag::TableFoot => "tfoot".to_string(),
        Tag::TableRow => "tr".to_string(),
        Tag::TableCell { alignment, header } => {
            let cell = if *header { "th" } else { "td" };
            match alignment {
                Alignment::None => cell.to_string(),
                other => format!("{cell} {}", other.as_str()),
            }
        }
        Tag::Emphasis => "em".to_string(),
        Tag::Strong => "strong".to_string(),
        Tag::Strikethrough => "del".to_string(),
        Tag::Link { dest, title } => format!("a href={dest:?}{}", titled(title)),
        Tag::Image { dest, title } => format!("img src={dest:?}{}", titled(title)),
        Tag::Footnotes => "footnotes".to_string(),
        Tag::FootnoteItem { label, ordinal } => format!("fn {ordinal} {label:?}"),
    }
}

fn titled(title: &str) -> String {
    if title.is_empty() {
        String::new()
    } else {
        format!(" title={title:?}")
    }
}

fn quoted(out: &mut String, text: &str) {
    out.push_str(&format!("{text:?}"));
}

fn atom(out: &mut String, name: &str, text: &str) {
    out.push_str(&format!("({name} {text:?})"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nests_and_spaces_children() {
        let events = vec![
            Event::Start(Tag::Heading { level: 1, id: None }),
            Event::Text("Hi ".into()),
            Event::Start(Tag::Emphasis),
            Event::Text("there".into()),
            Event::End(Tag::Emphasis),
            Event::End(Tag::Heading { level: 1, id: None }),
            Event::Rule,
        ];
        assert_eq!(outline(&events), r#"(h1 "Hi " (em "there")) (hr)"#);
    }

    #[test]
    fn cells_show_alignment() {
        let cell = Tag::TableCell {
            alignment: Alignment::Right,
            header: false,
        };
        let events = vec![
            Event::Start(cell.clone()),
            Event::Text("1".into()),
            Event::End(cell),
        ];
        assert_eq!(outline(&events), r#"(td right "1")"#);
    }

    #[test]
    fn titles_and_atoms() {
        let link = Tag::Link {
            dest: "/u".into(),
            title: "t".into(),
        };
        let events = vec![
            Event::Start(link.clone()),
            Event::Text("a".into()),
            Event::End(link),
            Event::FootnoteRef {
                label: "n".into(),
                ordinal: 2,
            },
            Event::CodeBlock {
                info: "rust".into(),
                text: "x\n".into(),
            },
        ];
        assert_eq!(
            outline(&events),
            r#"(a href="/u" title="t" "a") (fnref 2 "n") (pre lang="rust" "x\n")"#
        );
    }

    #[test]
    fn empty_container() {
        let events = vec![Event::Start(Tag::Paragraph), Event::End(Tag::Paragraph)];
        assert_eq!(outline(&events), "(p)");
    }
}
