//! Terminal display width of characters
//!
//! The cursor under a query has to line up with what a terminal draws, so the
//! locator asks a [`DisplayWidth`] strategy how many columns each character
//! occupies instead of counting characters.

/// Number of terminal columns a character occupies.
///
/// Implementations must be pure: the same character always yields the same
/// width, and lookups may run from many threads at once.
pub trait DisplayWidth: Send + Sync {
    fn width(&self, ch: char) -> usize;

    /// Total columns of a string.
    fn str_width(&self, text: &str) -> usize {
        text.chars().map(|ch| self.width(ch)).sum()
    }
}

impl<F> DisplayWidth for F
where
    F: Fn(char) -> usize + Send + Sync,
{
    fn width(&self, ch: char) -> usize {
        self(ch)
    }
}

/// Default width strategy.
///
/// Uses the Unicode East Asian Width tables from the `unicode-width` crate
/// when the `unicode-width` feature is on, and [`NarrowColumns`] otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeColumns;

impl DisplayWidth for UnicodeColumns {
    #[cfg(feature = "unicode-width")]
    fn width(&self, ch: char) -> usize {
        unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0)
    }

    #[cfg(not(feature = "unicode-width"))]
    fn width(&self, ch: char) -> usize {
        NarrowColumns.width(ch)
    }
}

/// Small built-in table: control characters and common combining marks take
/// no columns, the main CJK, Hangul, fullwidth and emoji blocks take two,
/// everything else one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NarrowColumns;

const ZERO_WIDTH: &[(u32, u32)] = &[
    (0x0300, 0x036F),
    (0x200B, 0x200F),
    (0x20D0, 0x20FF),
    (0xFE00, 0xFE0F),
    (0xFE20, 0xFE2F),
];

const DOUBLE_WIDTH: &[(u32, u32)] = &[
    (0x1100, 0x115F),
    (0x2E80, 0x303E),
    (0x3041, 0x33FF),
    (0x3400, 0x4DBF),
    (0x4E00, 0x9FFF),
    (0xA000, 0xA4CF),
    (0xAC00, 0xD7A3),
    (0xF900, 0xFAFF),
    (0xFE30, 0xFE4F),
    (0xFF00, 0xFF60),
    (0xFFE0, 0xFFE6),
    (0x1F300, 0x1F64F),
    (0x1F900, 0x1F9FF),
    (0x20000, 0x2FFFD),
    (0x30000, 0x3FFFD),
];

fn in_table(table: &[(u32, u32)], cp: u32) -> bool {
    table.iter().any(|&(lo, hi)| cp >= lo && cp <= hi)
}

impl DisplayWidth for NarrowColumns {
    fn width(&self, ch: char) -> usize {
        let cp = ch as u32;
        if ch.is_control() || in_table(ZERO_WIDTH, cp) {
            0
        } else if in_table(DOUBLE_WIDTH, cp) {
            2
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_table_widths() {
        assert_eq!(NarrowColumns.width('a'), 1);
        assert_eq!(NarrowColumns.width('\t'), 0);
        assert_eq!(NarrowColumns.width('\u{0301}'), 0);
        assert_eq!(NarrowColumns.width('日'), 2);
        assert_eq!(NarrowColumns.width('Ｓ'), 2);
        assert_eq!(NarrowColumns.str_width("a日b"), 4);
    }

    #[test]
    fn unicode_columns_agree_on_common_characters() {
        assert_eq!(UnicodeColumns.width('x'), 1);
        assert_eq!(UnicodeColumns.width('表'), 2);
        assert_eq!(UnicodeColumns.width('\u{0301}'), 0);
    }

    #[test]
    fn closures_are_width_strategies() {
        let everything_is_three = |_: char| -> usize { 3 };
        assert_eq!(everything_is_three.str_width("ab"), 6);
    }
}
