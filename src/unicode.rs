//! Character classes used by the normalizers.

use unicode_categories::UnicodeCategories;

/// Whitespace as BERT sees it: the Unicode White_Space property, which
/// already covers tab, newline and carriage return.
pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace()
}

/// Characters dropped by BERT text cleaning.
///
/// Category Cc minus tab/newline/carriage return (those count as whitespace),
/// plus NUL and the replacement character left behind by lossy decoding.
pub fn is_bert_removable(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => false,
        '\u{0000}' | '\u{FFFD}' => true,
        _ => c.is_other_control(),
    }
}

/// Check if character is a CJK ideograph (for BERT)
pub fn is_chinese_char(c: char) -> bool {
    let code = c as u32;
    matches!(code,
        0x4E00..=0x9FFF |    // CJK Unified Ideographs
        0x3400..=0x4DBF |    // CJK Extension A
        0x20000..=0x2A6DF | // CJK Extension B
        0x2A700..=0x2B73F | // CJK Extension C
        0x2B740..=0x2B81F | // CJK Extension D
        0x2B820..=0x2CEAF | // CJK Extension E
        0xF900..=0xFAFF |   // CJK Compatibility Ideographs
        0x2F800..=0x2FA1F   // CJK Compatibility Supplement
    )
}

/// Non-spacing combining mark (category Mn)
pub fn is_nonspacing_mark(c: char) -> bool {
    c.is_mark_nonspacing()
}

/// What the NMT normalizer does with a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NmtAction {
    Keep,
    Drop,
    Space,
}

pub fn nmt_action(c: char) -> NmtAction {
    match c as u32 {
        0x0001..=0x0008 | 0x000B | 0x000E..=0x001F | 0x007F | 0x008F | 0x009F => NmtAction::Drop,
        0x0009 | 0x000A | 0x000C | 0x000D | 0x1680 | 0x200B..=0x200F | 0x2028 | 0x2029
        | 0x2581 | 0xFEFF | 0xFFFD => NmtAction::Space,
        _ => NmtAction::Keep,
    }
}
