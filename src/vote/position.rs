//! Position vote: start and end offsets are elected independently.

use std::collections::{BTreeMap, BTreeSet};

use crate::vote::{ExistenceOutcome, TypeVote};
use crate::{Cluster, RawMention, RecognizerId};

/// Which way an unresolved offset tie falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetBias {
    /// Prefer the smaller value (start offsets).
    Smaller,
    /// Prefer the larger value (end offsets).
    Larger,
}

/// The recognizers and mentions that take part in the position vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionElectorate<'a> {
    /// Becomes the supporter set of the final mention
    pub electors: BTreeSet<RecognizerId>,
    pub ballots: Vec<&'a RawMention>,
}

/// Select the position electorate of a surviving cluster.
///
/// Normally: recognizers that proposed the winning type and voted yes, with
/// their winning-type mentions as ballots. When that set is empty (the type was
/// carried by recognizers outside the electorate) the yes voters vote with
/// all their mentions. An unopposed cluster is positioned by whoever proposed
/// the winning type.
pub fn position_electorate<'a>(
    cluster: &Cluster<'a>,
    type_vote: &TypeVote<'a>,
    existence: &ExistenceOutcome,
) -> PositionElectorate<'a> {
    let yes = match existence.yes() {
        Some(yes) => yes,
        None => {
            return PositionElectorate {
                electors: type_vote.electors.clone(),
                ballots: type_vote.ballots.clone(),
            }
        }
    };

    let electors: BTreeSet<RecognizerId> = type_vote.electors.intersection(yes).cloned().collect();
    if !electors.is_empty() {
        let ballots = type_vote
            .ballots
            .iter()
            .copied()
            .filter(|m| electors.contains(&m.recognizer))
            .collect();
        return PositionElectorate { electors, ballots };
    }

    let ballots = cluster
        .mentions()
        .iter()
        .copied()
        .filter(|m| yes.contains(&m.recognizer))
        .collect();
    PositionElectorate {
        electors: yes.clone(),
        ballots,
    }
}

/// Elect one offset from the proposed `values`.
///
/// The most frequent value wins. Among tied values, the one with the smallest
/// sum of absolute differences to every proposal wins, and if that still
/// ties, `bias` decides. Returns `None` when nothing was proposed.
pub fn elect_offset(values: &[usize], bias: OffsetBias) -> Option<usize> {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for &value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let top = counts.values().copied().max()?;
    let leaders: Vec<usize> = counts
        .iter()
        .filter(|&(_, &count)| count == top)
        .map(|(&value, _)| value)
        .collect();
    if let [only] = leaders.as_slice() {
        return Some(*only);
    }

    let deviation = |candidate: usize| -> usize {
        values.iter().map(|&proposal| candidate.abs_diff(proposal)).sum()
    };
    let least = leaders.iter().map(|&v| deviation(v)).min()?;
    let closest = leaders.into_iter().filter(|&v| deviation(v) == least);

    match bias {
        OffsetBias::Smaller => closest.min(),
        OffsetBias::Larger => closest.max(),
    }
}

/// Elect `[start, end)` from the ballots' spans.
///
/// If the independently elected offsets would invert the span, the envelope
/// of all ballots is used instead.
pub fn vote_position(ballots: &[&RawMention]) -> Option<(usize, usize)> {
    let starts: Vec<usize> = ballots.iter().map(|m| m.start).collect();
    let ends: Vec<usize> = ballots.iter().map(|m| m.end).collect();

    let start = elect_offset(&starts, OffsetBias::Smaller)?;
    let end = elect_offset(&ends, OffsetBias::Larger)?;
    if start < end {
        return Some((start, end));
    }

    let envelope_start = starts.iter().copied().min()?;
    let envelope_end = ends.iter().copied().max()?;
    Some((envelope_start, envelope_end))
}
