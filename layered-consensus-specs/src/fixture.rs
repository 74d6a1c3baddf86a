//! Serde model of a scenario file.

use layered_consensus::{
    CombineError, EntityType, FinalMention, Language, RecognizerConfig, RecognizerId,
    RegistryConfig,
};
use serde::{Deserialize, Serialize};

/// A parsed scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusFixture {
    #[serde(default)]
    pub title: Option<String>,
    pub document: DocumentSpec,
    #[serde(rename = "recognizer", default)]
    pub recognizers: Vec<RecognizerConfig>,
    #[serde(rename = "mention", default)]
    pub mentions: Vec<MentionSpec>,
    #[serde(rename = "expect", default)]
    pub expected: Vec<ExpectedMention>,
    /// When set, combination must fail with this error and `expect` is ignored.
    #[serde(default)]
    pub expect_error: Option<ErrorKind>,
}

impl ConsensusFixture {
    /// The recognizer table as registry configuration.
    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            recognizers: self.recognizers.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSpec {
    pub text: String,
    pub language: Language,
}

/// One raw mention as a recognizer reported it.
///
/// `text` defaults to the document slice at `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionSpec {
    pub recognizer: RecognizerId,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub text: Option<String>,
}

/// One consensus mention the combiner must produce.
///
/// `text` and `supporters` are only checked when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedMention {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub supporters: Option<Vec<RecognizerId>>,
}

impl ExpectedMention {
    /// Same type and interval.
    pub fn locates(&self, found: &FinalMention) -> bool {
        self.entity_type == found.entity_type && self.start == found.start && self.end == found.end
    }
}

/// The combiner error a fixture expects, by variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    EmptyRecognizerSet,
    UnknownRecognizer,
    InvalidSpan,
}

impl ErrorKind {
    pub fn of(error: &CombineError) -> Self {
        match error {
            CombineError::EmptyRecognizerSet => ErrorKind::EmptyRecognizerSet,
            CombineError::UnknownRecognizer { .. } => ErrorKind::UnknownRecognizer,
            CombineError::InvalidSpan { .. } => ErrorKind::InvalidSpan,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::EmptyRecognizerSet => "EmptyRecognizerSet",
            ErrorKind::UnknownRecognizer => "UnknownRecognizer",
            ErrorKind::InvalidSpan => "InvalidSpan",
        };
        f.write_str(name)
    }
}
