//! normkit - Alignment-preserving text normalization for tokenizers
//!
//! The first stage of a tokenization pipeline: turn raw text into normalized
//! text while keeping a precise mapping back to the input.
//!
//! Features:
//! - `NormalizedString`: original text, normalized text and their alignment
//! - BERT, strip, strip-accents, NFC/NFD/NFKC/NFKD, case, NMT, prepend/append,
//!   literal and regex replace, precompiled charsmap normalizers, composable
//!   with `Sequence`
//! - Offset translation in both directions
//! - Parallel batch normalization
//!
//! ```
//! use normkit::{BertConfig, NormalizedString, Normalizer};
//!
//! let normalizer = Normalizer::bert(BertConfig::default());
//! let mut text = NormalizedString::new("Héllo 中");
//! normalizer.normalize(&mut text).unwrap();
//! assert_eq!(text.get(), "hello  中 ");
//! assert_eq!(text.original_range(1..2), Some(1..3));
//! ```

mod config;
mod error;
mod normalized;
mod normalizers;
mod unicode;

pub use config::{BertConfig, BertStripAccents, NormalizerConfig};
pub use error::{NormalizeError, Result};
pub use normalized::{Alignment, NormalizedString, Range};
pub use normalizers::{
    apply, bert_normalizer, default_normalizer, BertNormalizer, LiteralReplace, Normalizer,
    RegexReplace,
};
