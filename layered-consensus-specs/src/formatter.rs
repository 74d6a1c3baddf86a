//! Human-readable reports for failed fixtures.

use layered_consensus::{Document, FinalMention, MentionDisplay};

use crate::{ConsensusFixture, FixtureResult, HarnessResult, MentionMismatch};

fn describe(mention: &FinalMention) -> String {
    let supporters: Vec<&str> = mention.supporters.iter().map(|id| id.as_str()).collect();
    format!(
        "{}[{},{}) \"{}\" ({})",
        mention.entity_type,
        mention.start,
        mention.end,
        mention.text,
        supporters.join(", ")
    )
}

/// Format a failed fixture: the produced mentions drawn under the document,
/// then one line per mismatch.
pub fn format_failure(fixture_name: &str, fixture: &ConsensusFixture, result: &FixtureResult) -> String {
    let mut output = format!("\nFAIL: {}\n", fixture_name);
    if let Some(title) = &fixture.title {
        output.push_str(&format!("  {}\n", title));
    }
    output.push('\n');

    let document = Document::new(fixture.document.text.clone(), fixture.document.language.clone());
    let display = MentionDisplay::new(&document).with_final(&result.mentions);
    for line in display.to_string().lines() {
        output.push_str(&format!("  {}\n", line));
    }
    output.push('\n');

    for mismatch in &result.mismatches {
        let line = match mismatch {
            MentionMismatch::Missing(expected) => format!(
                "missing {}[{},{})",
                expected.entity_type, expected.start, expected.end
            ),
            MentionMismatch::Unexpected(found) => format!("unexpected {}", describe(found)),
            MentionMismatch::Supporters { expected, found } => {
                let expected: Vec<&str> = expected.iter().map(|id| id.as_str()).collect();
                format!(
                    "supporters of {}: expected ({})",
                    describe(found),
                    expected.join(", ")
                )
            }
            MentionMismatch::Text { expected, found } => {
                format!("text of {}: expected \"{}\"", describe(found), expected)
            }
            MentionMismatch::ErrorNotRaised { expected } => {
                format!("expected {} error, combination succeeded", expected)
            }
            MentionMismatch::WrongError { expected, found } => {
                format!("expected {} error, found: {}", expected, found)
            }
            MentionMismatch::UnexpectedError(error) => format!("combination failed: {}", error),
        };
        output.push_str(&format!("  \u{2717} {}\n", line));
    }

    output
}

/// Format a summary of a harness run.
pub fn format_summary(result: &HarnessResult) -> String {
    let status = if result.success() { "PASS" } else { "FAIL" };
    format!(
        "{}: {} fixtures, {} passed ({} expected failures, {} regressions)",
        status, result.fixtures, result.passed, result.expected_failures, result.regressions
    )
}
