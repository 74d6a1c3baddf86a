//! Runs a fixture through the combiner and diffs the output.

use std::collections::BTreeSet;

use layered_consensus::{
    CapabilityRegistry, CombineError, Document, FinalMention, MentionBatch, MentionCombiner,
    RawMention, RecognizerId,
};
use tracing::debug;

use crate::{ConsensusFixture, ErrorKind, ExpectedMention, SpecResult};

/// One way the combiner's output differs from a fixture's expectations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MentionMismatch {
    /// No produced mention has the expected type and interval.
    Missing(ExpectedMention),
    /// A produced mention that no expectation claims.
    Unexpected(FinalMention),
    /// Located, but supported by a different set of recognizers.
    Supporters {
        expected: Vec<RecognizerId>,
        found: FinalMention,
    },
    /// Located, but carrying different text.
    Text { expected: String, found: FinalMention },
    /// An error was expected and combination succeeded.
    ErrorNotRaised { expected: ErrorKind },
    /// A different error than expected.
    WrongError {
        expected: ErrorKind,
        found: CombineError,
    },
    /// Combination failed where mentions were expected.
    UnexpectedError(CombineError),
}

impl MentionMismatch {
    /// Reference used by the expected-failures file, e.g. `PERSON[0,5)` or `error`.
    pub fn reference(&self) -> String {
        match self {
            MentionMismatch::Missing(expected) => {
                format_ref(expected.entity_type.as_str(), expected.start, expected.end)
            }
            MentionMismatch::Unexpected(found)
            | MentionMismatch::Supporters { found, .. }
            | MentionMismatch::Text { found, .. } => {
                format_ref(found.entity_type.as_str(), found.start, found.end)
            }
            MentionMismatch::ErrorNotRaised { .. }
            | MentionMismatch::WrongError { .. }
            | MentionMismatch::UnexpectedError(_) => "error".to_string(),
        }
    }
}

pub fn format_ref(entity_type: &str, start: usize, end: usize) -> String {
    format!("{}[{},{})", entity_type, start, end)
}

/// Result of running one fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureResult {
    pub mentions: Vec<FinalMention>,
    pub error: Option<CombineError>,
    pub mismatches: Vec<MentionMismatch>,
}

impl FixtureResult {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Build the document and mention batch a fixture describes.
///
/// Every declared recognizer gets an entry, empty if it reported nothing.
pub fn fixture_input(fixture: &ConsensusFixture) -> (Document, MentionBatch) {
    let document = Document::new(
        fixture.document.text.clone(),
        fixture.document.language.clone(),
    );

    let mut batch = MentionBatch::new();
    for recognizer in &fixture.recognizers {
        batch.insert(recognizer.id.clone(), Vec::new());
    }
    for mention in &fixture.mentions {
        let text = match &mention.text {
            Some(text) => text.clone(),
            None => document
                .slice(mention.start, mention.end)
                .unwrap_or_default()
                .to_string(),
        };
        batch.push(RawMention::new(
            mention.recognizer.clone(),
            mention.entity_type.clone(),
            mention.start,
            mention.end,
            text,
        ));
    }

    (document, batch)
}

/// Run a fixture and compare the outcome against its expectations.
pub fn run_fixture(fixture: &ConsensusFixture) -> SpecResult<FixtureResult> {
    let registry = CapabilityRegistry::from_config(&fixture.registry_config())?;
    let (document, batch) = fixture_input(fixture);

    debug!(
        title = fixture.title.as_deref().unwrap_or(""),
        recognizers = registry.len(),
        mentions = batch.mention_count(),
        "running fixture"
    );

    let result = match (MentionCombiner::new(&registry).combine(&document, &batch), fixture.expect_error) {
        (Ok(mentions), None) => FixtureResult {
            mismatches: diff(&fixture.expected, &mentions),
            mentions,
            error: None,
        },
        (Ok(mentions), Some(expected)) => FixtureResult {
            mentions,
            error: None,
            mismatches: vec![MentionMismatch::ErrorNotRaised { expected }],
        },
        (Err(error), Some(expected)) => {
            let mismatches = if ErrorKind::of(&error) == expected {
                Vec::new()
            } else {
                vec![MentionMismatch::WrongError {
                    expected,
                    found: error.clone(),
                }]
            };
            FixtureResult {
                mentions: Vec::new(),
                error: Some(error),
                mismatches,
            }
        }
        (Err(error), None) => FixtureResult {
            mentions: Vec::new(),
            mismatches: vec![MentionMismatch::UnexpectedError(error.clone())],
            error: Some(error),
        },
    };

    Ok(result)
}

fn diff(expected: &[ExpectedMention], found: &[FinalMention]) -> Vec<MentionMismatch> {
    let mut mismatches = Vec::new();
    let mut claimed = vec![false; found.len()];

    for want in expected {
        let located = found
            .iter()
            .enumerate()
            .find(|(idx, mention)| !claimed[*idx] && want.locates(mention));

        let (idx, mention) = match located {
            Some(hit) => hit,
            None => {
                mismatches.push(MentionMismatch::Missing(want.clone()));
                continue;
            }
        };
        claimed[idx] = true;

        if let Some(text) = &want.text {
            if *text != mention.text {
                mismatches.push(MentionMismatch::Text {
                    expected: text.clone(),
                    found: mention.clone(),
                });
            }
        }

        if let Some(supporters) = &want.supporters {
            let wanted: BTreeSet<RecognizerId> = supporters.iter().cloned().collect();
            if wanted != mention.supporters {
                mismatches.push(MentionMismatch::Supporters {
                    expected: supporters.clone(),
                    found: mention.clone(),
                });
            }
        }
    }

    for (idx, mention) in found.iter().enumerate() {
        if !claimed[idx] {
            mismatches.push(MentionMismatch::Unexpected(mention.clone()));
        }
    }

    mismatches
}
