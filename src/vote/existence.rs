//! Existence vote among the recognizers able to detect the winning type.

use std::collections::BTreeSet;

use crate::{CapabilityRegistry, Cluster, EntityType, Language, RecognizerId};

/// Whether a cluster survives as a real entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExistenceOutcome {
    /// A strict majority of eligible recognizers contributed to the cluster.
    Confirmed {
        yes: BTreeSet<RecognizerId>,
        eligible: BTreeSet<RecognizerId>,
    },
    /// No recognizer can detect the type in this language; presence alone stands.
    Unopposed,
    /// Too few eligible recognizers saw anything here.
    Rejected {
        yes: BTreeSet<RecognizerId>,
        eligible: BTreeSet<RecognizerId>,
    },
}

impl ExistenceOutcome {
    pub fn survives(&self) -> bool {
        !matches!(self, ExistenceOutcome::Rejected { .. })
    }

    /// Eligible recognizers that voted yes, `None` when unopposed.
    pub fn yes(&self) -> Option<&BTreeSet<RecognizerId>> {
        match self {
            ExistenceOutcome::Confirmed { yes, .. } | ExistenceOutcome::Rejected { yes, .. } => Some(yes),
            ExistenceOutcome::Unopposed => None,
        }
    }

    pub fn eligible_count(&self) -> usize {
        match self {
            ExistenceOutcome::Confirmed { eligible, .. }
            | ExistenceOutcome::Rejected { eligible, .. } => eligible.len(),
            ExistenceOutcome::Unopposed => 0,
        }
    }
}

/// Hold the existence vote for `cluster`, already typed as `winner`.
///
/// Only recognizers covering `winner` in `language` take part. Each votes yes
/// if it contributed any mention to the cluster, whatever type it proposed,
/// and no otherwise.
pub fn vote_existence(
    cluster: &Cluster<'_>,
    winner: &EntityType,
    language: &Language,
    registry: &CapabilityRegistry,
) -> ExistenceOutcome {
    let eligible: BTreeSet<RecognizerId> = registry
        .eligible_for(winner, language)
        .cloned()
        .collect();

    if eligible.is_empty() {
        return if cluster.is_empty() {
            ExistenceOutcome::Rejected {
                yes: BTreeSet::new(),
                eligible,
            }
        } else {
            ExistenceOutcome::Unopposed
        };
    }

    let yes: BTreeSet<RecognizerId> = eligible
        .iter()
        .filter(|id| cluster.contributed_by(id))
        .cloned()
        .collect();

    if yes.len() * 2 > eligible.len() {
        ExistenceOutcome::Confirmed { yes, eligible }
    } else {
        ExistenceOutcome::Rejected { yes, eligible }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RawMention, SpanIndex};

    fn date_registry(taggers: usize) -> CapabilityRegistry {
        let mut builder = CapabilityRegistry::builder().recognizer("stat-ner", &["PERSON"], &["en", "pt"]);
        for i in 0..taggers {
            builder = builder.recognizer(&format!("date-{}", i), &["DATE"], &["en"]);
        }
        builder.build().unwrap()
    }

    fn ids(names: &[&str]) -> BTreeSet<RecognizerId> {
        names.iter().copied().map(RecognizerId::from).collect()
    }

    fn outcome(registry: &CapabilityRegistry, mentions: &[RawMention], winner: &str, language: &str) -> ExistenceOutcome {
        let index = SpanIndex::build(mentions);
        vote_existence(&index.clusters()[0], &winner.into(), &language.into(), registry)
    }

    #[test]
    fn test_lone_detection_rejected() {
        let registry = date_registry(4);
        let mentions = vec![RawMention::new("date-0", "DATE", 5, 9, "2024")];

        let result = outcome(&registry, &mentions, "DATE", "en");
        assert!(!result.survives());
        assert_eq!(result.eligible_count(), 4);
        assert_eq!(result.yes().map(|y| y.len()), Some(1));
    }

    #[test]
    fn test_majority_confirms() {
        let registry = date_registry(3);
        let mentions = vec![
            RawMention::new("date-0", "DATE", 5, 9, ""),
            RawMention::new("date-2", "DATE", 5, 10, ""),
        ];

        let result = outcome(&registry, &mentions, "DATE", "en");
        assert!(result.survives());
        assert!(matches!(result, ExistenceOutcome::Confirmed { .. }));
    }

    #[test]
    fn test_half_is_not_a_majority() {
        let registry = date_registry(2);
        let mentions = vec![RawMention::new("date-1", "DATE", 5, 9, "")];

        assert!(!outcome(&registry, &mentions, "DATE", "en").survives());
    }

    #[test]
    fn test_any_type_affirms_existence() {
        let registry = CapabilityRegistry::builder()
            .recognizer("R1", &["LOCATION", "ORGANIZATION"], &["en"])
            .recognizer("R2", &["LOCATION", "ORGANIZATION"], &["en"])
            .recognizer("R3", &["LOCATION"], &["en"])
            .build()
            .unwrap();
        let mentions = vec![
            RawMention::new("R1", "LOCATION", 0, 6, ""),
            RawMention::new("R2", "ORGANIZATION", 0, 6, ""),
        ];

        let result = outcome(&registry, &mentions, "LOCATION", "en");
        assert_eq!(
            result,
            ExistenceOutcome::Confirmed {
                yes: ids(&["R1", "R2"]),
                eligible: ids(&["R1", "R2", "R3"]),
            }
        );
    }

    #[test]
    fn test_ineligible_contributors_do_not_count() {
        // stat-ner cannot detect DATE; its mention neither helps nor enlarges the electorate
        let registry = date_registry(1);
        let mentions = vec![RawMention::new("stat-ner", "DATE", 0, 4, "")];

        let result = outcome(&registry, &mentions, "DATE", "en");
        assert!(!result.survives());
        assert_eq!(result.eligible_count(), 1);
    }

    #[test]
    fn test_language_restricts_electorate() {
        let registry = date_registry(3);
        let mentions = vec![RawMention::new("stat-ner", "PERSON", 0, 4, "")];

        // date taggers only cover English, stat-ner covers PERSON in Portuguese
        let result = outcome(&registry, &mentions, "PERSON", "pt");
        assert!(matches!(result, ExistenceOutcome::Confirmed { ref eligible, .. } if eligible.len() == 1));
    }

    #[test]
    fn test_zero_electors_presence_stands() {
        let registry = date_registry(2);
        let mentions = vec![RawMention::new("date-0", "DATE", 0, 4, "")];

        let result = outcome(&registry, &mentions, "DATE", "pt");
        assert_eq!(result, ExistenceOutcome::Unopposed);
        assert!(result.survives());
    }
}
