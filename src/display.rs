use std::fmt::Write;

use unicode_width::UnicodeWidthChar;

use crate::{ClusterOutcome, CombinationReport, Document, FinalMention, MentionBatch};

/// One underlined span and its label.
struct IncludedSpan {
    start: usize,
    end: usize,
    label: String,
}

/// Renders a document with mention spans underlined beneath it.
///
/// ```text
/// Visit New York City
///       ╰───────────╯LOCATION(R1, R2)
/// ```
///
/// Newlines and tabs are shown as `⏎` and `→` so every mention lands on the
/// single text row.
pub struct MentionDisplay<'a> {
    document: &'a Document,
    include_spans: Vec<IncludedSpan>,
}

impl<'a> std::fmt::Display for MentionDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // display column where each character starts; one extra entry for the end
        let mut char_idx_to_column = Vec::with_capacity(self.document.char_len() + 1);
        let mut opening_line = String::new();
        let mut column = 0;
        for ch in self.document.text().chars() {
            char_idx_to_column.push(column);
            let shown = match ch {
                '\n' => '⏎',
                '\t' => '→',
                other => other,
            };
            opening_line.push(shown);
            column += UnicodeWidthChar::width(shown).unwrap_or(0);
        }
        char_idx_to_column.push(column);

        f.write_str(&opening_line)?;

        for span in self.include_spans.iter() {
            f.write_char('\n')?;

            let last = char_idx_to_column.len() - 1;
            let start_col = char_idx_to_column[span.start.min(last)];
            let end_col = char_idx_to_column[span.end.min(last)];
            for _ in 0..start_col {
                f.write_char(' ')?;
            }

            f.write_char('╰')?;

            let col_len = end_col.saturating_sub(start_col);
            for _ in (start_col + 1)..end_col.saturating_sub(1) {
                f.write_char('─')?;
            }

            if col_len > 1 {
                f.write_char('╯')?;
            }

            f.write_str(&span.label)?;
        }

        Ok(())
    }
}

impl<'a> MentionDisplay<'a> {
    pub fn new(document: &'a Document) -> Self {
        MentionDisplay {
            document,
            include_spans: Vec::new(),
        }
    }

    /// Include combined mentions as `TYPE(supporter, ...)`.
    pub fn include_final(&mut self, mentions: &[FinalMention]) {
        for mention in mentions {
            let supporters: Vec<&str> = mention.supporters.iter().map(|id| id.as_str()).collect();
            self.include_spans.push(IncludedSpan {
                start: mention.start,
                end: mention.end,
                label: format!("{}({})", mention.entity_type, supporters.join(", ")),
            });
        }
    }

    /// Include every raw mention as `recognizer: TYPE`, in input order.
    pub fn include_raw(&mut self, batch: &MentionBatch) {
        for mention in batch.mentions() {
            self.include_spans.push(IncludedSpan {
                start: mention.start,
                end: mention.end,
                label: format!("{}: {}", mention.recognizer, mention.entity_type),
            });
        }
    }

    /// Include the envelope of every rejected cluster as `✗TYPE yes/eligible`.
    pub fn include_rejected(&mut self, report: &CombinationReport) {
        for cluster in &report.clusters {
            if let ClusterOutcome::Rejected { yes, eligible } = cluster.outcome {
                self.include_spans.push(IncludedSpan {
                    start: cluster.span.0,
                    end: cluster.span.1,
                    label: format!("✗{} {}/{}", cluster.winner, yes, eligible),
                });
            }
        }
    }

    /// Takes self
    pub fn with_final(mut self, mentions: &[FinalMention]) -> Self {
        self.include_final(mentions);
        self
    }

    /// Takes self
    pub fn with_raw(mut self, batch: &MentionBatch) -> Self {
        self.include_raw(batch);
        self
    }

    /// Takes self
    pub fn with_rejected(mut self, report: &CombinationReport) -> Self {
        self.include_rejected(report);
        self
    }
}
