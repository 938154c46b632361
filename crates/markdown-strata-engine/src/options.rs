use bitflags::bitflags;

bitflags! {
    /// Optional grammar rules. Each flag switches on one construct (or one
    /// stricter reading of a core construct) independently of the others.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Extensions: u32 {
        /// A closing emphasis delimiter must be followed by whitespace,
        /// punctuation or the end of the span, so `snake_case_name` stays text.
        const NO_INTRA_EMPHASIS = 1 << 0;
        /// Pipe tables.
        const TABLES = 1 << 1;
        /// Fenced code blocks with ``` or ~~~.
        const FENCED_CODE = 1 << 2;
        /// Bare `http://...` URLs become autolinks.
        const AUTOLINK = 1 << 3;
        /// `~~text~~`.
        const STRIKETHROUGH = 1 << 4;
        /// Raw HTML blocks may end without a following blank line and may
        /// interrupt a paragraph.
        const LAX_HTML_BLOCKS = 1 << 5;
        /// ATX headings need a space after the `#` run.
        const SPACE_HEADERS = 1 << 6;
        /// `# Heading {#id}` reports `id`.
        const HEADER_IDS = 1 << 7;
        /// `[^label]` references and `[^label]: body` definitions.
        const FOOTNOTES = 1 << 8;
        /// `Term` followed by `: definition` lines.
        const DEFINITION_LISTS = 1 << 9;

        const COMMON = Self::NO_INTRA_EMPHASIS.bits()
            | Self::TABLES.bits()
            | Self::FENCED_CODE.bits()
            | Self::AUTOLINK.bits()
            | Self::STRIKETHROUGH.bits()
            | Self::SPACE_HEADERS.bits()
            | Self::HEADER_IDS.bits()
            | Self::FOOTNOTES.bits()
            | Self::DEFINITION_LISTS.bits();
    }
}

impl Default for Extensions {
    fn default() -> Self {
        Self::COMMON
    }
}

/// Everything a parse call needs besides the input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub extensions: Extensions,
    /// Maximum depth of nested block and inline scans. Content past this
    /// depth is dropped silently.
    pub max_nesting: usize,
}

impl Options {
    pub const DEFAULT_MAX_NESTING: usize = 16;

    pub fn new(extensions: Extensions) -> Self {
        Self {
            extensions,
            max_nesting: Self::DEFAULT_MAX_NESTING,
        }
    }

    #[must_use]
    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }

    pub fn has(&self, ext: Extensions) -> bool {
        self.extensions.contains(ext)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new(Extensions::COMMON)
    }
}
