//! NormalizedString - text under normalization plus its alignment to the input
//!
//! The alignment is an ordered list of segments. Each segment pairs a
//! contiguous piece of the normalized text with the span of the original
//! text it came from. Segments cover the normalized text without gaps and
//! their original spans never move backwards.
//!
//! All offsets are byte offsets into UTF-8 text and must sit on `char`
//! boundaries.

use regex::Regex;
use std::ops;
use unicode_normalization::char::{
    canonical_combining_class, decompose_canonical, decompose_compatible,
};
use unicode_normalization::{is_nfc_quick, is_nfkc_quick, IsNormalized, UnicodeNormalization};

use crate::error::{NormalizeError, Result};

/// A range on one side of the alignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Range {
    /// Byte range in the original text
    Original(ops::Range<usize>),
    /// Byte range in the normalized text
    Normalized(ops::Range<usize>),
}

/// One alignment segment: a piece of normalized text and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub normalized: ops::Range<usize>,
    pub original: ops::Range<usize>,
}

impl Alignment {
    /// Inserted text has no original counterpart
    pub fn is_inserted(&self) -> bool {
        self.original.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    normalized: ops::Range<usize>,
    original: ops::Range<usize>,
    // Copied unchanged from the original, so interior offsets map linearly.
    // Any other segment maps as a whole.
    verbatim: bool,
}

/// Original text, normalized text, and the alignment between them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedString {
    original: String,
    normalized: String,
    segments: Vec<Segment>,
}

impl NormalizedString {
    /// Create a normalized string with the identity alignment
    pub fn new(text: impl Into<String>) -> Self {
        let original = text.into();
        let segments = if original.is_empty() {
            Vec::new()
        } else {
            vec![Segment {
                normalized: 0..original.len(),
                original: 0..original.len(),
                verbatim: true,
            }]
        };
        Self {
            normalized: original.clone(),
            original,
            segments,
        }
    }

    /// Current normalized text
    pub fn get(&self) -> &str {
        &self.normalized
    }

    /// Same as [`get`](Self::get)
    pub fn get_normalized(&self) -> &str {
        &self.normalized
    }

    /// The text this string was created from
    pub fn get_original(&self) -> &str {
        &self.original
    }

    /// Length of the normalized text in bytes
    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    /// Length of the original text in bytes
    pub fn len_original(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Length of the normalized text in chars
    pub fn char_len(&self) -> usize {
        self.normalized.chars().count()
    }

    /// Alignment segments in normalized order
    pub fn alignments(&self) -> impl Iterator<Item = Alignment> + '_ {
        self.segments.iter().map(|s| Alignment {
            normalized: s.normalized.clone(),
            original: s.original.clone(),
        })
    }

    /// Translate a range to the other side of the alignment.
    ///
    /// A normalized range maps to the original span it was derived from; an
    /// original range maps to the normalized text derived from it. Empty
    /// ranges resolve to the start of the following segment. Returns `None`
    /// for ranges out of bounds or not on char boundaries.
    pub fn convert_offsets(&self, range: Range) -> Option<ops::Range<usize>> {
        match range {
            Range::Normalized(r) => {
                if !is_valid_range(&self.normalized, &r) {
                    return None;
                }
                if r.is_empty() {
                    let at = self.original_anchor(r.start);
                    Some(at..at)
                } else {
                    Some(self.original_span(r))
                }
            }
            Range::Original(r) => {
                if !is_valid_range(&self.original, &r) {
                    return None;
                }
                if r.is_empty() {
                    let at = self.normalized_anchor(r.start);
                    Some(at..at)
                } else {
                    Some(self.normalized_span(r))
                }
            }
        }
    }

    /// Original span a normalized range came from
    pub fn original_range(&self, range: ops::Range<usize>) -> Option<ops::Range<usize>> {
        self.convert_offsets(Range::Normalized(range))
    }

    /// Normalized text derived from an original range
    pub fn normalized_range(&self, range: ops::Range<usize>) -> Option<ops::Range<usize>> {
        self.convert_offsets(Range::Original(range))
    }

    /// Replace a normalized range with `text`, anchored to the same original span
    pub fn replace_range(&mut self, range: ops::Range<usize>, text: &str) -> Result<&mut Self> {
        self.check_range(&range)?;
        self.splice(std::iter::once((range, text.to_owned())));
        Ok(self)
    }

    /// Insert text with no original counterpart at a normalized offset.
    ///
    /// Inside a segment that maps as a whole, the text joins that segment.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<&mut Self> {
        self.check_offset(offset)?;
        if !text.is_empty() {
            let len = self.normalized.len();
            self.rewrite(|rw| {
                rw.copy(0..offset);
                rw.insert(offset, text);
                rw.copy(offset..len);
            });
        }
        Ok(self)
    }

    /// Remove a normalized range. The original text is untouched.
    pub fn delete_range(&mut self, range: ops::Range<usize>) -> Result<&mut Self> {
        self.replace_range(range, "")
    }

    /// Keep only the chars matching `keep`
    pub fn filter<F: FnMut(char) -> bool>(&mut self, mut keep: F) -> &mut Self {
        self.rewrite_chars(|c, out| {
            if keep(c) {
                out.push(c);
            }
        });
        self
    }

    /// Replace every char with `f(c)`
    pub fn map<F: FnMut(char) -> char>(&mut self, mut f: F) -> &mut Self {
        self.rewrite_chars(|c, out| out.push(f(c)));
        self
    }

    /// Visit every char of the normalized text
    pub fn for_each<F: FnMut(char)>(&self, f: F) -> &Self {
        self.normalized.chars().for_each(f);
        self
    }

    /// Full Unicode lowercase mapping, char by char
    pub fn lowercase(&mut self) -> &mut Self {
        self.rewrite_chars(|c, out| out.extend(c.to_lowercase()));
        self
    }

    /// Full Unicode uppercase mapping, char by char
    pub fn uppercase(&mut self) -> &mut Self {
        self.rewrite_chars(|c, out| out.extend(c.to_uppercase()));
        self
    }

    pub fn nfd(&mut self) -> &mut Self {
        self.unicode_normalize(Form::Nfd)
    }

    pub fn nfkd(&mut self) -> &mut Self {
        self.unicode_normalize(Form::Nfkd)
    }

    pub fn nfc(&mut self) -> &mut Self {
        self.unicode_normalize(Form::Nfc)
    }

    pub fn nfkc(&mut self) -> &mut Self {
        self.unicode_normalize(Form::Nfkc)
    }

    /// Remove leading whitespace
    pub fn lstrip(&mut self) -> &mut Self {
        self.strip_with(true, false)
    }

    /// Remove trailing whitespace
    pub fn rstrip(&mut self) -> &mut Self {
        self.strip_with(false, true)
    }

    /// Remove leading and trailing whitespace
    pub fn strip(&mut self) -> &mut Self {
        self.strip_with(true, true)
    }

    /// Prepend inserted text
    pub fn prepend(&mut self, s: &str) -> &mut Self {
        if !s.is_empty() {
            let len = self.normalized.len();
            self.rewrite(|rw| {
                rw.insert(0, s);
                rw.copy(0..len);
            });
        }
        self
    }

    /// Append inserted text
    pub fn append(&mut self, s: &str) -> &mut Self {
        if !s.is_empty() {
            let len = self.normalized.len();
            self.rewrite(|rw| {
                rw.copy(0..len);
                rw.insert(len, s);
            });
        }
        self
    }

    /// Replace every non-overlapping occurrence of `pattern`, left to right
    pub fn replace_literal(&mut self, pattern: &str, content: &str) -> &mut Self {
        if pattern.is_empty() {
            return self;
        }
        let edits: Vec<(ops::Range<usize>, String)> = self
            .normalized
            .match_indices(pattern)
            .map(|(i, m)| (i..i + m.len(), content.to_owned()))
            .collect();
        if !edits.is_empty() {
            self.splice(edits);
        }
        self
    }

    /// Replace every match of `regex`; `content` may reference capture groups (`$1`, `${name}`)
    pub fn replace_regex(&mut self, regex: &Regex, content: &str) -> &mut Self {
        let edits: Vec<(ops::Range<usize>, String)> = regex
            .captures_iter(&self.normalized)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let mut expanded = String::new();
                caps.expand(content, &mut expanded);
                Some((whole.range(), expanded))
            })
            .collect();
        if !edits.is_empty() {
            self.splice(edits);
        }
        self
    }

    /// Drop all normalized text
    pub fn clear(&mut self) -> &mut Self {
        self.rewrite(|_| {});
        self
    }

    /// Run a rewrite and commit its result.
    ///
    /// The rewrite builds fresh buffers from the current state, so the string
    /// is only touched once the new text and alignment are complete.
    pub(crate) fn rewrite<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Rewrite<'_>),
    {
        let (normalized, segments) = {
            let mut rw = Rewrite::new(self);
            f(&mut rw);
            rw.finish()
        };
        self.normalized = normalized;
        self.segments = segments;
    }

    /// Rewrite char by char; the callback appends the replacement for `c`
    fn rewrite_chars<F>(&mut self, mut f: F)
    where
        F: FnMut(char, &mut String),
    {
        self.rewrite(|rw| {
            let source = rw.source();
            let mut buf = String::new();
            for (i, c) in source.char_indices() {
                buf.clear();
                f(c, &mut buf);
                rw.replace(i..i + c.len_utf8(), &buf);
            }
        });
    }

    /// Apply sorted, non-overlapping edits
    fn splice<I>(&mut self, edits: I)
    where
        I: IntoIterator<Item = (ops::Range<usize>, String)>,
    {
        let len = self.normalized.len();
        self.rewrite(|rw| {
            let mut cursor = 0;
            for (range, text) in edits {
                rw.copy(cursor..range.start);
                rw.replace(range.clone(), &text);
                cursor = range.end;
            }
            rw.copy(cursor..len);
        });
    }

    fn strip_with(&mut self, left: bool, right: bool) -> &mut Self {
        let text = &self.normalized;
        let start = if left { text.len() - text.trim_start().len() } else { 0 };
        let end = if right { text.trim_end().len() } else { text.len() };
        let end = end.max(start);
        if start == 0 && end == text.len() {
            return self;
        }
        self.rewrite(|rw| rw.copy(start..end));
        self
    }

    fn unicode_normalize(&mut self, form: Form) -> &mut Self {
        self.rewrite(|rw| {
            let source = rw.source();
            let mut start = 0;
            for (i, c) in source.char_indices() {
                if i > start && form.starts_chunk(c) {
                    rw.replace(start..i, &form.apply(&source[start..i]));
                    start = i;
                }
            }
            if start < source.len() {
                rw.replace(start..source.len(), &form.apply(&source[start..]));
            }
        });
        self
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        if offset > self.normalized.len() {
            return Err(NormalizeError::OffsetOutOfBounds {
                offset,
                len: self.normalized.len(),
            });
        }
        if !self.normalized.is_char_boundary(offset) {
            return Err(NormalizeError::NotCharBoundary { offset });
        }
        Ok(())
    }

    fn check_range(&self, range: &ops::Range<usize>) -> Result<()> {
        if range.start > range.end {
            return Err(NormalizeError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        self.check_offset(range.start)?;
        self.check_offset(range.end)
    }

    /// Index of the segment covering normalized offset `pos`
    fn segment_at(&self, pos: usize) -> usize {
        self.segments.partition_point(|s| s.normalized.end <= pos)
    }

    /// Original offset a normalized position resolves to
    fn original_anchor(&self, pos: usize) -> usize {
        match self.segments.get(self.segment_at(pos)) {
            Some(seg) if seg.verbatim => seg.original.start + (pos - seg.normalized.start),
            Some(seg) => seg.original.start,
            None => self
                .segments
                .last()
                .map_or(self.original.len(), |s| s.original.end),
        }
    }

    /// Original span covered by a non-empty normalized range
    fn original_span(&self, range: ops::Range<usize>) -> ops::Range<usize> {
        let first = self.segments.get(self.segment_at(range.start));
        let last = self.segments.get(self.segment_at(range.end - 1));
        let (Some(first), Some(last)) = (first, last) else {
            let at = self.original_anchor(range.start);
            return at..at;
        };
        let start = if first.verbatim {
            first.original.start + (range.start - first.normalized.start)
        } else {
            first.original.start
        };
        let end = if last.verbatim {
            last.original.start + (range.end - last.normalized.start)
        } else {
            last.original.end
        };
        start..end.max(start)
    }

    /// Normalized offset an original position resolves to
    fn normalized_anchor(&self, pos: usize) -> usize {
        let idx = self
            .segments
            .partition_point(|s| s.original.start < pos && s.original.end <= pos);
        match self.segments.get(idx) {
            Some(seg) if seg.verbatim && pos > seg.original.start => {
                seg.normalized.start + (pos - seg.original.start)
            }
            Some(seg) => seg.normalized.start,
            None => self.normalized.len(),
        }
    }

    /// Normalized text derived from a non-empty original range
    fn normalized_span(&self, range: ops::Range<usize>) -> ops::Range<usize> {
        let lo = self.segments.partition_point(|s| s.original.end <= range.start);
        let hi = self.segments.partition_point(|s| s.original.start < range.end);
        if lo >= hi {
            // Everything in range was deleted
            let at = self.normalized_anchor(range.start);
            return at..at;
        }
        let first = &self.segments[lo];
        let last = &self.segments[hi - 1];
        let start = if first.verbatim && range.start > first.original.start {
            first.normalized.start + (range.start - first.original.start)
        } else {
            first.normalized.start
        };
        let end = if last.verbatim && range.end < last.original.end {
            last.normalized.start + (range.end - last.original.start)
        } else {
            last.normalized.end
        };
        start..end.max(start)
    }
}

impl From<&str> for NormalizedString {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for NormalizedString {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

fn is_valid_range(text: &str, range: &ops::Range<usize>) -> bool {
    range.start <= range.end
        && range.end <= text.len()
        && text.is_char_boundary(range.start)
        && text.is_char_boundary(range.end)
}

/// Builder for the next normalized text and its alignment.
///
/// Source offsets refer to the current normalized text.
pub(crate) struct Rewrite<'a> {
    source: &'a NormalizedString,
    text: String,
    segments: Vec<Segment>,
}

impl<'a> Rewrite<'a> {
    fn new(source: &'a NormalizedString) -> Self {
        Self {
            source,
            text: String::with_capacity(source.normalized.len()),
            segments: Vec::with_capacity(source.segments.len()),
        }
    }

    /// The normalized text being rewritten
    pub(crate) fn source(&self) -> &'a str {
        &self.source.normalized
    }

    /// Copy a source range unchanged, keeping its alignment
    pub(crate) fn copy(&mut self, range: ops::Range<usize>) {
        let source = self.source;
        let mut idx = source.segment_at(range.start);
        while let Some(seg) = source.segments.get(idx) {
            if seg.normalized.start >= range.end {
                break;
            }
            let lo = seg.normalized.start.max(range.start);
            let hi = seg.normalized.end.min(range.end);
            let original = if seg.verbatim {
                seg.original.start + (lo - seg.normalized.start)
                    ..seg.original.start + (hi - seg.normalized.start)
            } else {
                seg.original.clone()
            };
            self.push(&source.normalized[lo..hi], original, seg.verbatim);
            idx += 1;
        }
    }

    /// Emit `text` in place of a source range.
    ///
    /// Empty `text` deletes the range; an empty range inserts.
    pub(crate) fn replace(&mut self, range: ops::Range<usize>, text: &str) {
        if range.is_empty() {
            self.insert(range.start, text);
            return;
        }
        let source = self.source;
        if source.normalized[range.clone()] == *text {
            self.copy(range);
            return;
        }
        let original = source.original_span(range);
        self.push(text, original, false);
    }

    /// Emit text with no original counterpart at a source position
    pub(crate) fn insert(&mut self, at: usize, text: &str) {
        let source = self.source;
        match source.segments.get(source.segment_at(at)) {
            // Inside a whole-mapped segment: joins it, keeping original ends ordered
            Some(seg) if !seg.verbatim && at > seg.normalized.start => {
                self.push(text, seg.original.clone(), false);
            }
            _ => {
                let anchor = source.original_anchor(at);
                self.push(text, anchor..anchor, false);
            }
        }
    }

    fn push(&mut self, text: &str, original: ops::Range<usize>, verbatim: bool) {
        if text.is_empty() {
            return;
        }
        let start = self.text.len();
        self.text.push_str(text);
        let end = self.text.len();
        if let Some(last) = self.segments.last_mut() {
            if verbatim && last.verbatim && last.original.end == original.start {
                last.normalized.end = end;
                last.original.end = original.end;
                return;
            }
            // Pieces of one whole-mapped span stay one segment
            if !verbatim && !last.verbatim && !original.is_empty() && last.original == original {
                last.normalized.end = end;
                return;
            }
        }
        self.segments.push(Segment {
            normalized: start..end,
            original,
            verbatim,
        });
    }

    fn finish(self) -> (String, Vec<Segment>) {
        (self.text, self.segments)
    }
}

/// Unicode normalization forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
}

impl Form {
    fn compatibility(self) -> bool {
        matches!(self, Form::Nfkc | Form::Nfkd)
    }

    fn composes(self) -> bool {
        matches!(self, Form::Nfc | Form::Nfkc)
    }

    fn apply(self, text: &str) -> String {
        match self {
            Form::Nfc => text.nfc().collect(),
            Form::Nfd => text.nfd().collect(),
            Form::Nfkc => text.nfkc().collect(),
            Form::Nfkd => text.nfkd().collect(),
        }
    }

    /// Whether text can be split before `c` and normalized piecewise.
    ///
    /// True when `c` decomposes to a starter that never composes with
    /// what precedes it.
    fn starts_chunk(self, c: char) -> bool {
        if c.is_ascii() {
            return true;
        }
        let first = first_decomposed(c, self.compatibility());
        if canonical_combining_class(first) != 0 {
            return false;
        }
        if !self.composes() {
            return true;
        }
        let quick = if self.compatibility() {
            is_nfkc_quick(std::iter::once(first))
        } else {
            is_nfc_quick(std::iter::once(first))
        };
        quick != IsNormalized::Maybe
    }
}

fn first_decomposed(c: char, compatibility: bool) -> char {
    let mut first = None;
    let mut keep_first = |d: char| {
        first.get_or_insert(d);
    };
    if compatibility {
        decompose_compatible(c, &mut keep_first);
    } else {
        decompose_canonical(c, &mut keep_first);
    }
    first.unwrap_or(c)
}
