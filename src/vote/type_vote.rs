//! Type vote: one ballot per mention, plurality wins.

use std::collections::{BTreeMap, BTreeSet};

use crate::{CapabilityRegistry, Cluster, EntityType, RawMention, RecognizerId};

/// Result of the type vote over one cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeVote<'a> {
    pub winner: EntityType,
    /// Ballots per type, in the registry's type order
    pub tally: Vec<(EntityType, usize)>,
    /// Recognizers that voted for the winner
    pub electors: BTreeSet<RecognizerId>,
    /// Mentions that carried the winning type
    pub ballots: Vec<&'a RawMention>,
}

/// Elect the entity type of `cluster`.
///
/// The type with the most ballots wins. Ties go to the type that comes first
/// in [`CapabilityRegistry::compare_types`]. Returns `None` for an empty cluster.
pub fn vote_type<'a>(cluster: &Cluster<'a>, registry: &CapabilityRegistry) -> Option<TypeVote<'a>> {
    let mut counts: BTreeMap<&EntityType, usize> = BTreeMap::new();
    for mention in cluster.mentions() {
        *counts.entry(&mention.entity_type).or_insert(0) += 1;
    }

    let mut tally: Vec<(EntityType, usize)> = counts
        .into_iter()
        .map(|(entity_type, count)| (entity_type.clone(), count))
        .collect();
    tally.sort_by(|(a, _), (b, _)| registry.compare_types(a, b));

    // first in type order among the highest counts
    let mut best: Option<&(EntityType, usize)> = None;
    for entry in &tally {
        if best.map_or(true, |(_, count)| entry.1 > *count) {
            best = Some(entry);
        }
    }
    let winner = best?.0.clone();

    let ballots: Vec<&'a RawMention> = cluster
        .mentions()
        .iter()
        .copied()
        .filter(|m| m.entity_type == winner)
        .collect();
    let electors = ballots.iter().map(|m| m.recognizer.clone()).collect();

    Some(TypeVote {
        winner,
        tally,
        electors,
        ballots,
    })
}
