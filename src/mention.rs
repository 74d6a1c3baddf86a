//! Documents, raw recognizer mentions, and combined mentions.
//!
//! Offsets are character (not byte) positions into the document text and
//! describe half-open intervals `[start, end)`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{EntityType, Language, RecognizerId};

/// The canonical text of one document, plus its language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    language: Language,
    char_len: usize,
}

impl Document {
    pub fn new(text: impl Into<String>, language: impl Into<Language>) -> Self {
        let text = text.into();
        let char_len = text.chars().count();
        Self {
            text,
            language: language.into(),
            char_len,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Text of the character interval `[start, end)`, if it lies inside the document.
    pub fn slice(&self, start: usize, end: usize) -> Option<&str> {
        if start > end || end > self.char_len {
            return None;
        }
        let byte_start = self.byte_offset(start);
        let byte_end = self.byte_offset(end);
        self.text.get(byte_start..byte_end)
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(byte_idx, _)| byte_idx)
    }
}

/// One detection reported by one recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMention {
    pub recognizer: RecognizerId,
    pub entity_type: EntityType,
    pub start: usize,
    pub end: usize,
    /// Surface text as the recognizer reported it
    pub text: String,
}

impl RawMention {
    pub fn new(
        recognizer: impl Into<RecognizerId>,
        entity_type: impl Into<EntityType>,
        start: usize,
        end: usize,
        text: impl Into<String>,
    ) -> Self {
        Self {
            recognizer: recognizer.into(),
            entity_type: entity_type.into(),
            start,
            end,
            text: text.into(),
        }
    }

    /// Half-open intervals intersect.
    pub fn overlaps(&self, other: &RawMention) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Every recognizer's mentions for one document, in input order.
///
/// A recognizer that produced nothing should still be present with an empty
/// list, so that the batch records that it was run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentionBatch {
    entries: Vec<(RecognizerId, Vec<RawMention>)>,
}

impl MentionBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the mention list of `recognizer`.
    pub fn insert(&mut self, recognizer: impl Into<RecognizerId>, mentions: Vec<RawMention>) {
        let recognizer = recognizer.into();
        match self.entries.iter_mut().find(|(id, _)| *id == recognizer) {
            Some((_, existing)) => *existing = mentions,
            None => self.entries.push((recognizer, mentions)),
        }
    }

    /// Append one mention under its own recognizer.
    pub fn push(&mut self, mention: RawMention) {
        match self
            .entries
            .iter_mut()
            .find(|(id, _)| *id == mention.recognizer)
        {
            Some((_, existing)) => existing.push(mention),
            None => self.entries.push((mention.recognizer.clone(), vec![mention])),
        }
    }

    pub fn with(mut self, mention: RawMention) -> Self {
        self.push(mention);
        self
    }

    pub fn recognizers(&self) -> impl Iterator<Item = &RecognizerId> {
        self.entries.iter().map(|(id, _)| id)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&RecognizerId, &[RawMention])> {
        self.entries.iter().map(|(id, m)| (id, m.as_slice()))
    }

    /// All mentions, recognizer by recognizer, in input order.
    pub fn mentions(&self) -> impl Iterator<Item = &RawMention> {
        self.entries.iter().flat_map(|(_, m)| m.iter())
    }

    /// Total number of mentions across recognizers.
    pub fn mention_count(&self) -> usize {
        self.entries.iter().map(|(_, m)| m.len()).sum()
    }
}

/// A consensus mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalMention {
    pub entity_type: EntityType,
    pub start: usize,
    pub end: usize,
    /// Re-sliced from the document at the elected offsets
    pub text: String,
    /// Never empty
    pub supporters: BTreeSet<RecognizerId>,
}

impl FinalMention {
    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}
