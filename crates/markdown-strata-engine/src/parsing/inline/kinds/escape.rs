use crate::parsing::cursor::is_alnum;

/// Backslash escapes.
pub struct Escape;

impl Escape {
    pub const BACKSLASH: u8 = b'\\';
    pub const ESCAPABLE: &'static [u8] = b"\\`*_{}[]()#+-.!:|&<>";

    /// The escaped byte if `data` starts with `\` and an escapable byte.
    pub fn scan(data: &[u8]) -> Option<&[u8]> {
        match data {
            [Self::BACKSLASH, c, ..] if Self::ESCAPABLE.contains(c) => Some(&data[1..2]),
            _ => None,
        }
    }
}

/// Character references: `&name;`, `&#123;`, `&#x1F;`.
pub struct Entity;

impl Entity {
    pub const AMP: u8 = b'&';
    pub const HASH: u8 = b'#';
    pub const SEMI: u8 = b';';

    /// Length of the entity at the start of `data`.
    pub fn scan(data: &[u8]) -> Option<usize> {
        if data.first() != Some(&Self::AMP) {
            return None;
        }
        let mut end = 1;
        if data.get(end) == Some(&Self::HASH) {
            end += 1;
        }
        let name = end;
        while end < data.len() && is_alnum(data[end]) {
            end += 1;
        }
        (end > name && data.get(end) == Some(&Self::SEMI)).then_some(end + 1)
    }
}
