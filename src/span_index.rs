//! Groups the mentions of one document into clusters of overlapping spans.
//!
//! Two mentions share a cluster when a chain of pairwise-overlapping
//! mentions connects them, so a long mention from one recognizer can bridge
//! two shorter neighbours from another.

use std::collections::BTreeSet;

use crate::{RawMention, RecognizerId};

/// A candidate expression: transitively overlapping mentions from any recognizers.
///
/// Mentions are kept sorted by `(start, end, recognizer)`, ties in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster<'a> {
    mentions: Vec<&'a RawMention>,
    start: usize,
    end: usize,
}

impl<'a> Cluster<'a> {
    fn seed(mention: &'a RawMention) -> Self {
        Self {
            mentions: vec![mention],
            start: mention.start,
            end: mention.end,
        }
    }

    pub fn mentions(&self) -> &[&'a RawMention] {
        &self.mentions
    }

    /// Envelope `[min start, max end)` of every member.
    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }

    /// Distinct contributing recognizers.
    pub fn recognizers(&self) -> BTreeSet<&'a RecognizerId> {
        self.mentions.iter().map(|m| &m.recognizer).collect()
    }

    pub fn contributed_by(&self, recognizer: &RecognizerId) -> bool {
        self.mentions.iter().any(|m| m.recognizer == *recognizer)
    }

    pub fn mentions_by<'b>(&'b self, recognizer: &'b RecognizerId) -> impl Iterator<Item = &'a RawMention> + 'b {
        self.mentions
            .iter()
            .copied()
            .filter(move |m| m.recognizer == *recognizer)
    }

    /// Recognizers that put two mutually overlapping mentions into this cluster.
    ///
    /// Each such mention still casts its own ballot.
    pub fn overlapping_self_mentions(&self) -> Vec<(&'a RecognizerId, usize)> {
        let mut found = Vec::new();
        for recognizer in self.recognizers() {
            let own: Vec<&RawMention> = self.mentions_by(recognizer).collect();
            let overlapping = own
                .iter()
                .enumerate()
                .filter(|(i, a)| {
                    own.iter()
                        .enumerate()
                        .any(|(j, b)| *i != j && a.overlaps(b))
                })
                .count();
            if overlapping > 0 {
                found.push((recognizer, overlapping));
            }
        }
        found
    }
}

/// Partition of one document's mentions into [`Cluster`]s, ordered by position.
#[derive(Debug, Clone)]
pub struct SpanIndex<'a> {
    clusters: Vec<Cluster<'a>>,
}

impl<'a> SpanIndex<'a> {
    /// Cluster `mentions` by transitive overlap.
    ///
    /// Output depends only on the mentions and their input order.
    pub fn build<I>(mentions: I) -> Self
    where
        I: IntoIterator<Item = &'a RawMention>,
    {
        let mut sorted: Vec<&'a RawMention> = mentions.into_iter().collect();
        // stable: equal keys keep input order
        sorted.sort_by(|a, b| {
            (a.start, a.end, &a.recognizer).cmp(&(b.start, b.end, &b.recognizer))
        });

        let mut clusters: Vec<Cluster<'a>> = Vec::new();
        for mention in sorted {
            match clusters.last_mut() {
                // sorted by start, so overlap with the envelope is overlap with some member
                Some(current) if mention.start < current.end => {
                    current.end = current.end.max(mention.end);
                    current.mentions.push(mention);
                }
                _ => clusters.push(Cluster::seed(mention)),
            }
        }

        Self { clusters }
    }

    pub fn clusters(&self) -> &[Cluster<'a>] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}
