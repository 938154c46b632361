use super::refs::fold_label;

/// A footnote that has been referenced at least once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsedFootnote {
    pub label: Vec<u8>,
    pub body: Vec<u8>,
    key: String,
}

/// Footnotes in first-use order. The ordinal of a footnote is its 1-based
/// position here.
#[derive(Debug, Default)]
pub struct FootnoteTable {
    used: Vec<UsedFootnote>,
}

impl FootnoteTable {
    /// Ordinal for `label`, assigning the next one on first use.
    pub fn ordinal(&mut self, label: &[u8], body: &[u8]) -> usize {
        let key = fold_label(label);
        if let Some(i) = self.used.iter().position(|f| f.key == key) {
            return i + 1;
        }
        self.used.push(UsedFootnote {
            label: label.to_vec(),
            body: body.to_vec(),
            key,
        });
        self.used.len()
    }

    pub fn get(&self, index: usize) -> Option<&UsedFootnote> {
        self.used.get(index)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
