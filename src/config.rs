//! Configuration structs for normalizers
//!
//! A `NormalizerConfig` is plain data. Building it resolves derived flags
//! and compiles patterns, so configuration errors surface here and never
//! when a normalizer is applied.

use tracing::debug;

use crate::error::{NormalizeError, Result};
use crate::normalizers::Normalizer;

/// Whether the BERT normalizer strips accents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BertStripAccents {
    True,
    False,
    /// Strip accents exactly when lowercasing
    #[default]
    DeterminedByLowercase,
}

impl BertStripAccents {
    pub fn resolve(self, lowercase: bool) -> bool {
        match self {
            BertStripAccents::True => true,
            BertStripAccents::False => false,
            BertStripAccents::DeterminedByLowercase => lowercase,
        }
    }
}

impl From<Option<bool>> for BertStripAccents {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => BertStripAccents::True,
            Some(false) => BertStripAccents::False,
            None => BertStripAccents::DeterminedByLowercase,
        }
    }
}

/// BERT normalizer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BertConfig {
    pub clean_text: bool,
    pub handle_chinese_chars: bool,
    pub strip_accents: BertStripAccents,
    pub lowercase: bool,
}

impl Default for BertConfig {
    fn default() -> Self {
        Self {
            clean_text: true,
            handle_chinese_chars: true,
            strip_accents: BertStripAccents::DeterminedByLowercase,
            lowercase: true,
        }
    }
}

impl BertConfig {
    pub fn with_clean_text(mut self, clean_text: bool) -> Self {
        self.clean_text = clean_text;
        self
    }

    pub fn with_handle_chinese_chars(mut self, handle_chinese_chars: bool) -> Self {
        self.handle_chinese_chars = handle_chinese_chars;
        self
    }

    pub fn with_strip_accents(mut self, strip_accents: BertStripAccents) -> Self {
        self.strip_accents = strip_accents;
        self
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }
}

/// Description of a normalizer, before patterns are compiled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizerConfig {
    Bert(BertConfig),
    Strip { strip_left: bool, strip_right: bool },
    StripAccents,
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
    Lowercase,
    Uppercase,
    Nmt,
    Prepend(String),
    Append(String),
    ReplaceLiteral { pattern: String, replacement: String },
    ReplaceRegex { pattern: String, replacement: String },
    Precompiled { charsmap: Vec<(String, String)> },
    Sequence(Vec<NormalizerConfig>),
}

impl NormalizerConfig {
    /// Build the normalizer.
    ///
    /// A Sequence is built completely or not at all; the failing step is
    /// reported by index.
    pub fn build(&self) -> Result<Normalizer> {
        let normalizer = match self {
            NormalizerConfig::Bert(config) => Normalizer::bert(config.clone()),
            NormalizerConfig::Strip { strip_left, strip_right } => {
                Normalizer::strip(*strip_left, *strip_right)
            }
            NormalizerConfig::StripAccents => Normalizer::strip_accents(),
            NormalizerConfig::Nfc => Normalizer::nfc(),
            NormalizerConfig::Nfd => Normalizer::nfd(),
            NormalizerConfig::Nfkc => Normalizer::nfkc(),
            NormalizerConfig::Nfkd => Normalizer::nfkd(),
            NormalizerConfig::Lowercase => Normalizer::lowercase(),
            NormalizerConfig::Uppercase => Normalizer::uppercase(),
            NormalizerConfig::Nmt => Normalizer::nmt(),
            NormalizerConfig::Prepend(s) => Normalizer::prepend(s.as_str()),
            NormalizerConfig::Append(s) => Normalizer::append(s.as_str()),
            NormalizerConfig::ReplaceLiteral { pattern, replacement } => {
                Normalizer::replace_literal(pattern, replacement)?
            }
            NormalizerConfig::ReplaceRegex { pattern, replacement } => {
                Normalizer::replace_regex(pattern, replacement)?
            }
            NormalizerConfig::Precompiled { charsmap } => {
                Normalizer::precompiled(charsmap.clone())?
            }
            NormalizerConfig::Sequence(steps) => {
                let normalizers = steps
                    .iter()
                    .enumerate()
                    .map(|(index, step)| {
                        step.build().map_err(|e| NormalizeError::SequenceStepFailed {
                            index,
                            source: Box::new(e),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Normalizer::sequence(normalizers)
            }
        };
        debug!(normalizer = normalizer.name(), "built normalizer");
        Ok(normalizer)
    }
}

impl TryFrom<NormalizerConfig> for Normalizer {
    type Error = NormalizeError;

    fn try_from(config: NormalizerConfig) -> Result<Self> {
        config.build()
    }
}

impl TryFrom<&NormalizerConfig> for Normalizer {
    type Error = NormalizeError;

    fn try_from(config: &NormalizerConfig) -> Result<Self> {
        config.build()
    }
}
