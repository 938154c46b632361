//! Owned event stream, for consumers that want the whole document at once.

use serde::Serialize;

use crate::render::{AutoLinkKind, Leaf, Renderer, Tag};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Start(Tag),
    End(Tag),
    Text(String),
    Code(String),
    CodeBlock { info: String, text: String },
    Html(String),
    InlineHtml(String),
    Rule,
    LineBreak,
    AutoLink { dest: String, kind: AutoLinkKind },
    Entity(String),
    FootnoteRef { label: String, ordinal: usize },
}

impl Event {
    fn from_leaf(leaf: Leaf<'_>) -> Self {
        match leaf {
            Leaf::Text(text) => Event::Text(lossy(text)),
            Leaf::Code(code) => Event::Code(lossy(code)),
            Leaf::CodeBlock { info, text } => Event::CodeBlock {
                info: lossy(info),
                text: lossy(text),
            },
            Leaf::Html(html) => Event::Html(lossy(html)),
            Leaf::InlineHtml(html) => Event::InlineHtml(lossy(html)),
            Leaf::Rule => Event::Rule,
            Leaf::LineBreak => Event::LineBreak,
            Leaf::AutoLink { dest, kind } => Event::AutoLink {
                dest: lossy(dest),
                kind,
            },
            Leaf::Entity(entity) => Event::Entity(lossy(entity)),
            Leaf::FootnoteRef { label, ordinal } => Event::FootnoteRef {
                label: lossy(label),
                ordinal,
            },
        }
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// A renderer that descends into everything and records what it sees.
/// Adjacent text runs are merged into one `Text` event.
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<Event>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl Renderer for EventCollector {
    fn start(&mut self, tag: &Tag) {
        self.events.push(Event::Start(tag.clone()));
    }

    fn end(&mut self, tag: &Tag) {
        self.events.push(Event::End(tag.clone()));
    }

    fn leaf(&mut self, leaf: Leaf<'_>) {
        if let Leaf::Text(text) = leaf {
            if let Some(Event::Text(last)) = self.events.last_mut() {
                last.push_str(&String::from_utf8_lossy(text));
                return;
            }
        }
        self.events.push(Event::from_leaf(leaf));
    }
}
