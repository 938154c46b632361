/// Code span inline type with owned delimiter constant.
///
/// Code spans are "raw zones": no other inline parsing occurs inside them.
pub struct CodeSpan;

/// Result of scanning a backtick run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSpanScan<'a> {
    /// A closed span: bytes consumed and the code inside.
    Code(usize, &'a [u8]),
    /// No closing run of the same width. The opening run is plain text.
    Unclosed(usize),
}

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    /// Scans the backtick run at the start of `data` and looks for a closing
    /// run of exactly the same width. One space just inside each delimiter
    /// is dropped when both sides have one, so ``` `` `a` `` ``` holds `` `a` ``.
    pub fn scan(data: &[u8]) -> Option<CodeSpanScan<'_>> {
        let ticks = data.iter().take_while(|&&c| c == Self::TICK).count();
        if ticks == 0 {
            return None;
        }

        let mut i = ticks;
        while i < data.len() {
            if data[i] != Self::TICK {
                i += 1;
                continue;
            }
            let start = i;
            while i < data.len() && data[i] == Self::TICK {
                i += 1;
            }
            if i - start == ticks {
                let mut inner = &data[ticks..start];
                if inner.len() >= 2 && inner[0] == b' ' && inner[inner.len() - 1] == b' ' {
                    inner = &inner[1..inner.len() - 1];
                }
                return Some(CodeSpanScan::Code(i, inner));
            }
        }
        Some(CodeSpanScan::Unclosed(ticks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("`a`", 3, "a")]
    #[case("`a` rest", 3, "a")]
    #[case("``a ` b``", 9, "a ` b")]
    #[case("`` `a` ``", 9, "`a`")]
    #[case("` a`", 4, " a")]
    #[case("``a```b``", 9, "a```b")]
    #[case("` `", 3, " ")]
    fn closed_spans(#[case] input: &str, #[case] len: usize, #[case] code: &str) {
        assert_eq!(
            CodeSpan::scan(input.as_bytes()),
            Some(CodeSpanScan::Code(len, code.as_bytes()))
        );
    }

    #[rstest]
    #[case("`a", 1)]
    #[case("``a`", 2)]
    #[case("```", 3)]
    fn unclosed_runs(#[case] input: &str, #[case] ticks: usize) {
        assert_eq!(
            CodeSpan::scan(input.as_bytes()),
            Some(CodeSpanScan::Unclosed(ticks))
        );
    }

    #[test]
    fn not_a_tick() {
        assert_eq!(CodeSpan::scan(b"a`"), None);
    }
}
