//! Runs the three votes over every cluster of a document and emits the result.
//!
//! A document moves through four stages: its mentions are collected and
//! validated, indexed into clusters, voted on cluster by cluster, and the
//! surviving mentions are emitted in position order. Clusters share no state,
//! so the voting stage may run in parallel (`parallel` feature).

use std::cmp::Ordering;

use tracing::{debug, debug_span, warn, Span};

use crate::errors::{CombineError, CombineResult};
use crate::vote::{position_electorate, vote_existence, vote_position, vote_type, ExistenceOutcome};
use crate::{
    CapabilityRegistry, Cluster, Document, EntityType, FinalMention, MentionBatch, RecognizerId,
    SpanIndex,
};

/// What became of one cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterOutcome {
    Accepted(FinalMention),
    /// Lost the existence vote; contributes nothing to the output.
    Rejected { yes: usize, eligible: usize },
}

impl ClusterOutcome {
    pub fn accepted(&self) -> Option<&FinalMention> {
        match self {
            ClusterOutcome::Accepted(mention) => Some(mention),
            ClusterOutcome::Rejected { .. } => None,
        }
    }
}

/// Audit record of the votes held over one cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterReport {
    /// Envelope of the cluster's mentions
    pub span: (usize, usize),
    /// Number of mentions (type ballots) in the cluster
    pub ballots: usize,
    pub winner: EntityType,
    /// Type ballots per entity type, in type order
    pub tally: Vec<(EntityType, usize)>,
    pub existence: ExistenceOutcome,
    pub outcome: ClusterOutcome,
}

/// A recognizer put mutually overlapping mentions into one cluster.
///
/// Not an error: each mention was counted as its own ballot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegenerateBallot {
    pub recognizer: RecognizerId,
    pub cluster_span: (usize, usize),
    pub mentions: usize,
}

/// Everything decided while combining one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinationReport {
    pub clusters: Vec<ClusterReport>,
    pub degenerate: Vec<DegenerateBallot>,
}

impl CombinationReport {
    pub fn accepted(&self) -> usize {
        self.clusters
            .iter()
            .filter(|c| c.outcome.accepted().is_some())
            .count()
    }

    pub fn rejected(&self) -> usize {
        self.clusters.len() - self.accepted()
    }
}

/// Merges per-recognizer mention lists into one consensus list.
///
/// # Example
///
/// ```
/// use layered_consensus::{CapabilityRegistry, Document, MentionBatch, MentionCombiner, RawMention};
///
/// let registry = CapabilityRegistry::builder()
///     .recognizer("R1", &["DATE"], &["en"])
///     .recognizer("R2", &["DATE"], &["en"])
///     .recognizer("R3", &["DATE"], &["en"])
///     .build()
///     .unwrap();
///
/// let doc = Document::new("Due 2024-05-01.", "en");
/// let batch = MentionBatch::new()
///     .with(RawMention::new("R1", "DATE", 4, 14, "2024-05-01"));
///
/// // one of three date taggers is not a majority
/// let (mentions, report) = MentionCombiner::new(&registry)
///     .combine_with_report(&doc, &batch)
///     .unwrap();
/// assert!(mentions.is_empty());
/// assert_eq!(report.rejected(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MentionCombiner<'r> {
    registry: &'r CapabilityRegistry,
    parallel: bool,
}

impl<'r> MentionCombiner<'r> {
    /// Votes in parallel when the `parallel` feature is enabled.
    pub fn new(registry: &'r CapabilityRegistry) -> Self {
        Self {
            registry,
            parallel: cfg!(feature = "parallel"),
        }
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// No effect without the `parallel` feature.
    pub fn parallel(mut self) -> Self {
        self.parallel = cfg!(feature = "parallel");
        self
    }

    /// Combine one document's mentions.
    ///
    /// Output is ordered by start, then end, then entity type order.
    pub fn combine(&self, document: &Document, batch: &MentionBatch) -> CombineResult<Vec<FinalMention>> {
        self.combine_with_report(document, batch)
            .map(|(mentions, _)| mentions)
    }

    /// Combine one document's mentions and keep the record of every vote.
    pub fn combine_with_report(
        &self,
        document: &Document,
        batch: &MentionBatch,
    ) -> CombineResult<(Vec<FinalMention>, CombinationReport)> {
        let span = debug_span!("combine", language = %document.language());
        let _enter = span.enter();

        self.validate(document, batch)?;

        let index = SpanIndex::build(batch.mentions());
        debug!(
            mentions = batch.mention_count(),
            clusters = index.len(),
            "indexed mentions"
        );

        let degenerate = collect_degenerate(index.clusters());
        let clusters = self.decide_all(index.clusters(), document, &span);
        let mentions = self.emit(&clusters);

        Ok((mentions, CombinationReport { clusters, degenerate }))
    }

    fn validate(&self, document: &Document, batch: &MentionBatch) -> CombineResult<()> {
        if self.registry.is_empty() {
            return Err(CombineError::EmptyRecognizerSet);
        }

        for (recognizer, mentions) in batch.entries() {
            self.registry.capabilities_of(recognizer)?;
            for mention in mentions {
                self.registry.capabilities_of(&mention.recognizer)?;
                if mention.is_empty() || mention.end > document.char_len() {
                    return Err(CombineError::InvalidSpan {
                        recognizer: mention.recognizer.clone(),
                        start: mention.start,
                        end: mention.end,
                        document_len: document.char_len(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Each cluster is decided inside `span`, which rayon workers do not inherit.
    fn decide_all(&self, clusters: &[Cluster<'_>], document: &Document, span: &Span) -> Vec<ClusterReport> {
        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                use rayon::prelude::*;
                return clusters
                    .par_iter()
                    .filter_map(|cluster| span.in_scope(|| self.decide(cluster, document)))
                    .collect();
            }
        }

        clusters
            .iter()
            .filter_map(|cluster| span.in_scope(|| self.decide(cluster, document)))
            .collect()
    }

    /// Type vote, existence vote, position vote. `None` only for an empty cluster.
    fn decide(&self, cluster: &Cluster<'_>, document: &Document) -> Option<ClusterReport> {
        let type_vote = vote_type(cluster, self.registry)?;
        let existence = vote_existence(cluster, &type_vote.winner, document.language(), self.registry);

        let outcome = if existence.survives() {
            let electorate = position_electorate(cluster, &type_vote, &existence);
            let (start, end) = vote_position(&electorate.ballots)?;
            let text = document.slice(start, end).unwrap_or_default().to_string();
            debug!(
                winner = %type_vote.winner,
                start,
                end,
                supporters = electorate.electors.len(),
                "accepted cluster"
            );
            ClusterOutcome::Accepted(FinalMention {
                entity_type: type_vote.winner.clone(),
                start,
                end,
                text,
                supporters: electorate.electors,
            })
        } else {
            let yes = existence.yes().map_or(0, |yes| yes.len());
            let eligible = existence.eligible_count();
            debug!(
                winner = %type_vote.winner,
                yes,
                eligible,
                "rejected cluster"
            );
            ClusterOutcome::Rejected { yes, eligible }
        };

        Some(ClusterReport {
            span: cluster.span(),
            ballots: cluster.len(),
            winner: type_vote.winner,
            tally: type_vote.tally,
            existence,
            outcome,
        })
    }

    /// Accepted mentions in output order.
    ///
    /// Cluster envelopes are disjoint and every elected span lies inside its
    /// own envelope, so no two clusters emit the same `(start, end, type)`.
    fn emit(&self, reports: &[ClusterReport]) -> Vec<FinalMention> {
        let mut mentions: Vec<FinalMention> = reports
            .iter()
            .filter_map(|report| report.outcome.accepted().cloned())
            .collect();
        mentions.sort_by(|a, b| self.output_order(a, b));
        mentions
    }

    fn output_order(&self, a: &FinalMention, b: &FinalMention) -> Ordering {
        (a.start, a.end)
            .cmp(&(b.start, b.end))
            .then_with(|| self.registry.compare_types(&a.entity_type, &b.entity_type))
    }
}

fn collect_degenerate(clusters: &[Cluster<'_>]) -> Vec<DegenerateBallot> {
    let mut found = Vec::new();
    for cluster in clusters {
        for (recognizer, mentions) in cluster.overlapping_self_mentions() {
            warn!(
                recognizer = %recognizer,
                start = cluster.span().0,
                end = cluster.span().1,
                mentions,
                "recognizer reported overlapping mentions; counting each as a ballot"
            );
            found.push(DegenerateBallot {
                recognizer: recognizer.clone(),
                cluster_span: cluster.span(),
                mentions,
            });
        }
    }
    found
}
