//! Text normalizers - Unicode normalization, lowercase, strip, BERT cleanup, etc.
//!
//! Every normalizer edits a `NormalizedString` in place, so anything found in
//! the normalized text can be traced back to the input.

use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, trace};

use crate::config::BertConfig;
use crate::error::{NormalizeError, Result};
use crate::normalized::NormalizedString;
use crate::unicode::{
    is_bert_removable, is_chinese_char, is_nonspacing_mark, is_whitespace, nmt_action, NmtAction,
};

/// Normalizer types
#[derive(Debug, Clone)]
pub enum Normalizer {
    /// BERT-style normalizer (clean text + handle chinese chars + strip accents + lowercase)
    Bert(BertNormalizer),
    /// Strip leading and/or trailing whitespace
    Strip { left: bool, right: bool },
    /// Strip accents (decompose + remove non-spacing marks)
    StripAccents,
    /// Unicode NFC normalization (canonical decomposition + canonical composition)
    NFC,
    /// Unicode NFD normalization (canonical decomposition)
    NFD,
    /// Unicode NFKC normalization (compatibility decomposition + canonical composition)
    NFKC,
    /// Unicode NFKD normalization (compatibility decomposition)
    NFKD,
    /// Convert to lowercase
    Lowercase,
    /// Convert to uppercase
    Uppercase,
    /// NMT cleanup: drop control codes, map odd separators to space
    Nmt,
    /// Prepend a string
    Prepend(String),
    /// Append a string
    Append(String),
    /// Replace a literal pattern
    ReplaceLiteral(LiteralReplace),
    /// Replace regex matches, with capture group substitution
    ReplaceRegex(RegexReplace),
    /// Precompiled character map: each `(from, to)` pair replaced in order
    Precompiled(Vec<(String, String)>),
    /// Sequence of normalizers, applied left to right
    Sequence(Vec<Normalizer>),
}

impl Normalizer {
    /// BERT normalizer; the strip-accents flag is resolved here
    pub fn bert(config: BertConfig) -> Self {
        Normalizer::Bert(BertNormalizer::new(&config))
    }

    /// Whitespace strip on either side
    pub fn strip(left: bool, right: bool) -> Self {
        Normalizer::Strip { left, right }
    }

    /// Accent stripping
    pub fn strip_accents() -> Self {
        Normalizer::StripAccents
    }

    /// NFC normalizer
    pub fn nfc() -> Self {
        Normalizer::NFC
    }

    /// NFD normalizer
    pub fn nfd() -> Self {
        Normalizer::NFD
    }

    /// NFKC normalizer
    pub fn nfkc() -> Self {
        Normalizer::NFKC
    }

    /// NFKD normalizer
    pub fn nfkd() -> Self {
        Normalizer::NFKD
    }

    /// Lowercase normalizer
    pub fn lowercase() -> Self {
        Normalizer::Lowercase
    }

    /// Uppercase normalizer
    pub fn uppercase() -> Self {
        Normalizer::Uppercase
    }

    /// NMT cleanup normalizer
    pub fn nmt() -> Self {
        Normalizer::Nmt
    }

    /// Prepend `s` to non-empty text
    pub fn prepend(s: impl Into<String>) -> Self {
        Normalizer::Prepend(s.into())
    }

    /// Append `s` to non-empty text
    pub fn append(s: impl Into<String>) -> Self {
        Normalizer::Append(s.into())
    }

    /// Literal replacement; fails on an empty pattern
    pub fn replace_literal(pattern: &str, content: &str) -> Result<Self> {
        Ok(Normalizer::ReplaceLiteral(LiteralReplace::new(pattern, content)?))
    }

    /// Regex replacement; the pattern is compiled here, never at apply time
    pub fn replace_regex(pattern: &str, content: &str) -> Result<Self> {
        Ok(Normalizer::ReplaceRegex(RegexReplace::new(pattern, content)?))
    }

    /// Precompiled character map; fails on an empty `from` entry
    pub fn precompiled(charsmap: Vec<(String, String)>) -> Result<Self> {
        if charsmap.iter().any(|(from, _)| from.is_empty()) {
            debug!("rejected empty charsmap entry");
            return Err(NormalizeError::EmptyPattern);
        }
        Ok(Normalizer::Precompiled(charsmap))
    }

    /// Apply `normalizers` left to right
    pub fn sequence(normalizers: Vec<Normalizer>) -> Self {
        Normalizer::Sequence(normalizers)
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Normalizer::Bert(_) => "bert",
            Normalizer::Strip { .. } => "strip",
            Normalizer::StripAccents => "strip_accents",
            Normalizer::NFC => "nfc",
            Normalizer::NFD => "nfd",
            Normalizer::NFKC => "nfkc",
            Normalizer::NFKD => "nfkd",
            Normalizer::Lowercase => "lowercase",
            Normalizer::Uppercase => "uppercase",
            Normalizer::Nmt => "nmt",
            Normalizer::Prepend(_) => "prepend",
            Normalizer::Append(_) => "append",
            Normalizer::ReplaceLiteral(_) => "replace_literal",
            Normalizer::ReplaceRegex(_) => "replace_regex",
            Normalizer::Precompiled(_) => "precompiled",
            Normalizer::Sequence(_) => "sequence",
        }
    }

    /// Apply normalization in place.
    ///
    /// Each variant commits its edit as a whole. A `Sequence` stops at the
    /// first failing step and keeps the effect of the steps before it.
    pub fn normalize(&self, normalized: &mut NormalizedString) -> Result<()> {
        let before = normalized.len();
        match self {
            Normalizer::Bert(bert) => bert.normalize(normalized),
            Normalizer::Strip { left, right } => match (left, right) {
                (true, true) => {
                    normalized.strip();
                }
                (true, false) => {
                    normalized.lstrip();
                }
                (false, true) => {
                    normalized.rstrip();
                }
                (false, false) => {}
            },
            Normalizer::StripAccents => strip_accents(normalized),
            Normalizer::NFC => {
                normalized.nfc();
            }
            Normalizer::NFD => {
                normalized.nfd();
            }
            Normalizer::NFKC => {
                normalized.nfkc();
            }
            Normalizer::NFKD => {
                normalized.nfkd();
            }
            Normalizer::Lowercase => {
                normalized.lowercase();
            }
            Normalizer::Uppercase => {
                normalized.uppercase();
            }
            Normalizer::Nmt => nmt_normalize(normalized),
            Normalizer::Prepend(s) => {
                if !normalized.is_empty() {
                    normalized.prepend(s);
                }
            }
            Normalizer::Append(s) => {
                if !normalized.is_empty() {
                    normalized.append(s);
                }
            }
            Normalizer::ReplaceLiteral(replace) => {
                normalized.replace_literal(&replace.pattern, &replace.content);
            }
            Normalizer::ReplaceRegex(replace) => {
                normalized.replace_regex(&replace.regex, &replace.content);
            }
            Normalizer::Precompiled(charsmap) => {
                for (from, to) in charsmap {
                    normalized.replace_literal(from, to);
                }
            }
            Normalizer::Sequence(normalizers) => {
                for (index, normalizer) in normalizers.iter().enumerate() {
                    normalizer.normalize(normalized).map_err(|e| {
                        debug!(index, error = %e, "sequence step failed");
                        NormalizeError::SequenceStepFailed {
                            index,
                            source: Box::new(e),
                        }
                    })?;
                }
            }
        }
        trace!(normalizer = self.name(), before, after = normalized.len(), "normalized");
        Ok(())
    }

    /// Normalize a fresh string built from `text`
    pub fn normalize_str(&self, text: &str) -> Result<NormalizedString> {
        let mut normalized = NormalizedString::new(text);
        self.normalize(&mut normalized)?;
        Ok(normalized)
    }

    /// Normalize a batch of texts (parallel).
    ///
    /// On failure the error of the earliest failing input is returned.
    pub fn normalize_batch(&self, texts: &[&str]) -> Result<Vec<NormalizedString>> {
        texts
            .par_iter()
            .map(|t| self.normalize_str(t))
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    }
}

/// Apply a normalizer to a normalized string
pub fn apply(normalizer: &Normalizer, normalized: &mut NormalizedString) -> Result<()> {
    normalizer.normalize(normalized)
}

/// BERT normalizer with its strip-accents flag already resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BertNormalizer {
    clean_text: bool,
    handle_chinese_chars: bool,
    strip_accents: bool,
    lowercase: bool,
}

impl BertNormalizer {
    pub fn new(config: &BertConfig) -> Self {
        Self {
            clean_text: config.clean_text,
            handle_chinese_chars: config.handle_chinese_chars,
            strip_accents: config.strip_accents.resolve(config.lowercase),
            lowercase: config.lowercase,
        }
    }

    pub fn clean_text(&self) -> bool {
        self.clean_text
    }

    pub fn handle_chinese_chars(&self) -> bool {
        self.handle_chinese_chars
    }

    pub fn strip_accents(&self) -> bool {
        self.strip_accents
    }

    pub fn lowercase(&self) -> bool {
        self.lowercase
    }

    /// Sub-steps run in a fixed order, each over the whole string
    fn normalize(&self, normalized: &mut NormalizedString) {
        if self.clean_text {
            bert_clean_text(normalized);
        }
        if self.handle_chinese_chars {
            bert_handle_chinese_chars(normalized);
        }
        if self.strip_accents {
            strip_accents(normalized);
        }
        if self.lowercase {
            normalized.lowercase();
        }
    }
}

/// Literal pattern replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralReplace {
    pattern: String,
    content: String,
}

impl LiteralReplace {
    pub fn new(pattern: &str, content: &str) -> Result<Self> {
        if pattern.is_empty() {
            debug!("rejected empty replace pattern");
            return Err(NormalizeError::EmptyPattern);
        }
        Ok(Self {
            pattern: pattern.to_owned(),
            content: content.to_owned(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Regex replacement; `content` may use `$1` / `${name}` references
#[derive(Debug, Clone)]
pub struct RegexReplace {
    regex: Regex,
    content: String,
}

impl RegexReplace {
    pub fn new(pattern: &str, content: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| {
            debug!(pattern, error = %source, "invalid replace pattern");
            NormalizeError::InvalidPattern {
                pattern: pattern.to_owned(),
                source,
            }
        })?;
        Ok(Self {
            regex,
            content: content.to_owned(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Strip accents by decomposing and removing non-spacing marks
fn strip_accents(normalized: &mut NormalizedString) {
    normalized.nfd().filter(|c| !is_nonspacing_mark(c));
}

/// BERT clean text: remove control characters, collapse whitespace runs to one space
fn bert_clean_text(normalized: &mut NormalizedString) {
    normalized.rewrite(|rw| {
        let source = rw.source();
        let mut run: Option<std::ops::Range<usize>> = None;
        for (i, c) in source.char_indices() {
            let end = i + c.len_utf8();
            if is_bert_removable(c) {
                continue;
            }
            if is_whitespace(c) {
                run = Some(match run {
                    Some(r) => r.start..end,
                    None => i..end,
                });
                continue;
            }
            if let Some(r) = run.take() {
                rw.replace(r, " ");
            }
            rw.copy(i..end);
        }
        if let Some(r) = run {
            rw.replace(r, " ");
        }
    });
}

/// BERT handle Chinese characters: add spaces around Chinese chars
fn bert_handle_chinese_chars(normalized: &mut NormalizedString) {
    if !normalized.get().chars().any(is_chinese_char) {
        return;
    }
    normalized.rewrite(|rw| {
        let source = rw.source();
        for (i, c) in source.char_indices() {
            let end = i + c.len_utf8();
            if is_chinese_char(c) {
                rw.insert(i, " ");
                rw.copy(i..end);
                rw.insert(end, " ");
            } else {
                rw.copy(i..end);
            }
        }
    });
}

fn nmt_normalize(normalized: &mut NormalizedString) {
    normalized
        .filter(|c| nmt_action(c) != NmtAction::Drop)
        .map(|c| match nmt_action(c) {
            NmtAction::Space => ' ',
            _ => c,
        });
}

/// Default normalizer (NFC)
pub fn default_normalizer() -> Normalizer {
    Normalizer::NFC
}

/// Create a BERT-style normalizer with the usual uncased settings
pub fn bert_normalizer() -> Normalizer {
    Normalizer::bert(BertConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BertStripAccents;

    fn normalize(normalizer: &Normalizer, text: &str) -> String {
        normalizer.normalize_str(text).unwrap().get().to_owned()
    }

    fn aligned(n: &NormalizedString) -> Vec<(std::ops::Range<usize>, std::ops::Range<usize>)> {
        n.alignments().map(|a| (a.normalized, a.original)).collect()
    }

    #[test]
    fn test_nfc() {
        let normalizer = Normalizer::NFC;
        // é as e + combining accent should become single é
        let text = "e\u{0301}"; // e + combining acute accent
        assert_eq!(normalize(&normalizer, text), "é");
    }

    #[test]
    fn test_nfd_nfkc_nfkd() {
        assert_eq!(normalize(&Normalizer::nfd(), "é"), "e\u{301}");
        assert_eq!(normalize(&Normalizer::nfkc(), "ﬁ①"), "fi1");
        assert_eq!(normalize(&Normalizer::nfkd(), "Ⅻé"), "XIIe\u{301}");
    }

    #[test]
    fn test_lowercase() {
        let normalizer = Normalizer::Lowercase;
        assert_eq!(normalize(&normalizer, "HELLO World"), "hello world");
    }

    #[test]
    fn test_uppercase() {
        assert_eq!(normalize(&Normalizer::uppercase(), "hello"), "HELLO");
    }

    #[test]
    fn test_strip_accents() {
        let normalizer = Normalizer::StripAccents;
        assert_eq!(normalize(&normalizer, "café"), "cafe");
        assert_eq!(normalize(&normalizer, "naïve"), "naive");
        // Casing is untouched
        assert_eq!(normalize(&normalizer, "ÉCOLE"), "ECOLE");
    }

    #[test]
    fn test_strip_accents_keeps_spacing_marks() {
        // Devanagari vowel sign I (Mc) survives
        assert_eq!(normalize(&Normalizer::strip_accents(), "कि"), "कि");
    }

    #[test]
    fn test_strip() {
        assert_eq!(normalize(&Normalizer::strip(true, true), "  a b  "), "a b");
        assert_eq!(normalize(&Normalizer::strip(true, false), "  a b  "), "a b  ");
        assert_eq!(normalize(&Normalizer::strip(false, true), "  a b  "), "  a b");
        assert_eq!(normalize(&Normalizer::strip(false, false), "  a b  "), "  a b  ");
    }

    #[test]
    fn test_sequence() {
        let normalizer = Normalizer::sequence(vec![
            Normalizer::NFC,
            Normalizer::Lowercase,
            Normalizer::StripAccents,
            Normalizer::strip(true, true),
        ]);
        assert_eq!(normalize(&normalizer, "  CAFÉ  "), "cafe");
    }

    #[test]
    fn test_sequence_order() {
        let replace = Normalizer::replace_literal("A", "b").unwrap();
        let first = Normalizer::sequence(vec![replace.clone(), Normalizer::lowercase()]);
        let second = Normalizer::sequence(vec![Normalizer::lowercase(), replace]);
        assert_eq!(normalize(&first, "AB"), "bb");
        assert_eq!(normalize(&second, "AB"), "ab");
    }

    #[test]
    fn test_sequence_with_invalid_pattern_fails_to_build() {
        let built = Normalizer::replace_regex("(", "x")
            .map(|replace| Normalizer::sequence(vec![Normalizer::lowercase(), replace]));
        assert!(matches!(built, Err(NormalizeError::InvalidPattern { ref pattern, .. }) if pattern == "("));
    }

    #[test]
    fn test_bert_normalizer() {
        let normalizer = Normalizer::bert(BertConfig {
            clean_text: true,
            handle_chinese_chars: true,
            strip_accents: BertStripAccents::True,
            lowercase: true,
        });
        assert_eq!(normalize(&normalizer, "HELLO"), "hello");
        assert_eq!(normalize(&normalizer, "Café"), "cafe");
    }

    #[test]
    fn test_bert_composition() {
        let normalizer = bert_normalizer();
        let n = normalizer.normalize_str("H\u{e9}llo   WORLD\u{1F600}").unwrap();
        assert_eq!(n.get(), "hello world😀");
        // Collapsed space points at the whole whitespace run
        assert_eq!(n.original_range(5..6), Some(6..9));
        assert_eq!(n.original_range(1..2), Some(1..3));
        assert_eq!(n.original_range(6..11), Some(9..14));
        assert_eq!(n.original_range(11..15), Some(14..18));
    }

    #[test]
    fn test_bert_normalizer_chinese() {
        let normalizer = Normalizer::bert(BertConfig {
            clean_text: true,
            handle_chinese_chars: true,
            strip_accents: BertStripAccents::DeterminedByLowercase,
            lowercase: true,
        });
        let result = normalize(&normalizer, "Hello世界");
        assert!(result.contains(" 世 "));
        assert_eq!(result, "hello 世  界 ");
    }

    #[test]
    fn test_bert_chinese_chars_inserted_spaces() {
        let normalizer = Normalizer::bert(BertConfig {
            clean_text: false,
            handle_chinese_chars: true,
            strip_accents: BertStripAccents::False,
            lowercase: false,
        });
        let n = normalizer.normalize_str("a中b").unwrap();
        assert_eq!(n.get(), "a 中 b");
        assert_eq!(
            aligned(&n),
            vec![(0..1, 0..1), (1..2, 1..1), (2..5, 1..4), (5..6, 4..4), (6..7, 4..5)]
        );
        let inserted: Vec<_> = n.alignments().filter(|a| a.is_inserted()).collect();
        assert_eq!(inserted.len(), 2);
    }

    #[test]
    fn test_chinese_spaces_inside_compatibility_expansion() {
        // ㋿ expands to two ideographs under NFKC
        let normalizer = Normalizer::sequence(vec![
            Normalizer::nfkc(),
            Normalizer::bert(BertConfig {
                clean_text: false,
                handle_chinese_chars: true,
                strip_accents: BertStripAccents::False,
                lowercase: false,
            }),
        ]);
        let n = normalizer.normalize_str("x\u{32FF}y").unwrap();
        assert_eq!(n.get(), "x \u{4EE4}  \u{548C} y");
        assert_eq!(
            aligned(&n),
            vec![(0..1, 0..1), (1..2, 1..1), (2..10, 1..4), (10..11, 4..4), (11..12, 4..5)]
        );
    }

    #[test]
    fn test_bert_clean_text() {
        let normalizer = Normalizer::bert(BertConfig {
            clean_text: true,
            handle_chinese_chars: false,
            strip_accents: BertStripAccents::False,
            lowercase: false,
        });
        assert_eq!(normalize(&normalizer, "a\u{0}b\tc\r\n d\u{FFFD}"), "ab c d");
        assert_eq!(normalize(&normalizer, "x\u{3000}\u{00A0}y"), "x y");
        assert_eq!(normalize(&normalizer, "  lead"), " lead");
        // Controls inside a whitespace run do not split it
        assert_eq!(normalize(&normalizer, "a \u{7} b"), "a b");
    }

    #[test]
    fn test_bert_strip_accents_resolution() {
        let cased = BertNormalizer::new(&BertConfig::default().with_lowercase(false));
        assert!(!cased.strip_accents());
        let uncased = BertNormalizer::new(&BertConfig::default());
        assert!(uncased.strip_accents());
        let forced = BertNormalizer::new(
            &BertConfig::default()
                .with_lowercase(false)
                .with_strip_accents(BertStripAccents::True),
        );
        assert!(forced.strip_accents());
        assert!(!forced.lowercase());

        let normalizer = Normalizer::Bert(cased);
        assert_eq!(normalize(&normalizer, "Café"), "Café");
        let normalizer = Normalizer::Bert(forced);
        assert_eq!(normalize(&normalizer, "Café"), "Cafe");
    }

    #[test]
    fn test_bert_disabled_is_identity() {
        let normalizer = Normalizer::bert(BertConfig {
            clean_text: false,
            handle_chinese_chars: false,
            strip_accents: BertStripAccents::False,
            lowercase: false,
        });
        let n = normalizer.normalize_str("Ünï  中\u{7}").unwrap();
        assert_eq!(n.get(), "Ünï  中\u{7}");
        assert_eq!(aligned(&n), vec![(0..11, 0..11)]);
    }

    #[test]
    fn test_nmt() {
        let normalizer = Normalizer::nmt();
        assert_eq!(normalize(&normalizer, "a\u{1}b\u{200B}c\td"), "ab c d");
        assert_eq!(normalize(&normalizer, "\u{FEFF}x"), " x");
    }

    #[test]
    fn test_prepend_append() {
        let n = Normalizer::prepend("▁").normalize_str("hey").unwrap();
        assert_eq!(n.get(), "▁hey");
        assert_eq!(n.original_range(0..3), Some(0..0));
        assert_eq!(normalize(&Normalizer::append("</w>"), "hey"), "hey</w>");
        // Nothing is added to empty text
        assert_eq!(normalize(&Normalizer::prepend("▁"), ""), "");
        assert_eq!(normalize(&Normalizer::append("!"), ""), "");
    }

    #[test]
    fn test_replace_literal() {
        let normalizer = Normalizer::replace_literal("''", "\"").unwrap();
        assert_eq!(normalize(&normalizer, "''quoted''"), "\"quoted\"");
        // Matches run on the normalized text, not the original
        let seq = Normalizer::sequence(vec![
            Normalizer::lowercase(),
            Normalizer::replace_literal("ab", "X").unwrap(),
        ]);
        assert_eq!(normalize(&seq, "AB ab"), "X X");
    }

    #[test]
    fn test_precompiled() {
        let normalizer = Normalizer::precompiled(vec![("ﬁ".into(), "fi".into())]).unwrap();
        let n = normalizer.normalize_str("ﬁle").unwrap();
        assert_eq!(n.get(), "file");
        assert_eq!(n.original_range(0..2), Some(0..3));
        assert_eq!(n.original_range(2..4), Some(3..5));
        assert_eq!(normalizer.name(), "precompiled");
    }

    #[test]
    fn test_precompiled_entries_apply_in_order() {
        let normalizer = Normalizer::precompiled(vec![
            ("\u{2019}".into(), "'".into()),
            ("''".into(), "\"".into()),
        ])
        .unwrap();
        let n = normalizer.normalize_str("a\u{2019}\u{2019}b").unwrap();
        assert_eq!(n.get(), "a\"b");
        // The quote points at both source apostrophes
        assert_eq!(n.original_range(1..2), Some(1..7));
    }

    #[test]
    fn test_precompiled_rejects_empty_entry() {
        assert!(matches!(
            Normalizer::precompiled(vec![("".into(), "x".into())]),
            Err(NormalizeError::EmptyPattern)
        ));
    }

    #[test]
    fn test_replace_literal_rejects_empty_pattern() {
        assert!(matches!(
            Normalizer::replace_literal("", "x"),
            Err(NormalizeError::EmptyPattern)
        ));
    }

    #[test]
    fn test_replace_regex() {
        let normalizer = Normalizer::replace_regex("[0-9]+", "#").unwrap();
        assert_eq!(normalize(&normalizer, "id42 id7"), "id# id#");

        let normalizer = Normalizer::replace_regex(r"(?P<y>\d{4})-(?P<m>\d{2})", "${m}/${y}").unwrap();
        assert_eq!(normalize(&normalizer, "on 2024-05!"), "on 05/2024!");

        let normalizer = Normalizer::replace_regex(r"\s+", " ").unwrap();
        assert_eq!(normalize(&normalizer, "a \t\n b"), "a b");
    }

    #[test]
    fn test_replace_regex_invalid() {
        let err = Normalizer::replace_regex("[a-", "x").unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidPattern { .. }));
        assert!(err.to_string().contains("[a-"));
    }

    #[test]
    fn test_replace_accessors() {
        let Normalizer::ReplaceRegex(replace) = Normalizer::replace_regex("a+", "b").unwrap() else {
            panic!("expected regex replace");
        };
        assert_eq!(replace.pattern(), "a+");
        assert_eq!(replace.content(), "b");
        let literal = LiteralReplace::new("x", "y").unwrap();
        assert_eq!((literal.pattern(), literal.content()), ("x", "y"));
    }

    #[test]
    fn test_apply() {
        let mut n = NormalizedString::new("ABC");
        apply(&Normalizer::lowercase(), &mut n).unwrap();
        apply(&Normalizer::replace_literal("b", "").unwrap(), &mut n).unwrap();
        assert_eq!(n.get(), "ac");
        assert_eq!(n.get_original(), "ABC");
        assert_eq!(n.original_range(1..2), Some(2..3));
    }

    #[test]
    fn test_normalize_batch() {
        let normalizer = bert_normalizer();
        let results = normalizer.normalize_batch(&["Héllo", "WORLD", "中文"]).unwrap();
        let texts: Vec<&str> = results.iter().map(|n| n.get()).collect();
        assert_eq!(texts, vec!["hello", "world", " 中  文 "]);
    }

    #[test]
    fn test_default_normalizer() {
        assert_eq!(default_normalizer().name(), "nfc");
        assert_eq!(bert_normalizer().name(), "bert");
    }

    #[test]
    fn test_normalizer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Normalizer>();
        assert_send_sync::<NormalizedString>();
    }
}
