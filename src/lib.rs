#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Consensus voting over named-entity mentions from several recognizers.
//!
//! Each recognizer (a date tagger, a statistical NER model, a gazetteer, ...)
//! annotates the same document independently. This crate merges those
//! per-recognizer mention lists into one consensus list through three votes
//! held over every group of overlapping mentions:
//!
//! 1. **Type vote** - which entity type does the group denote?
//! 2. **Existence vote** - among recognizers able to detect that type in the
//!    document's language, did a strict majority report something here?
//! 3. **Position vote** - where exactly does the surviving entity start and end?
//!
//! ## Core Types
//!
//! - [`CapabilityRegistry`] - which types and languages each recognizer covers
//! - [`RawMention`] / [`MentionBatch`] - normalized recognizer output for one document
//! - [`SpanIndex`] / [`Cluster`] - groups of transitively overlapping mentions
//! - [`MentionCombiner`] - runs the votes and emits [`FinalMention`]s
//!
//! ## Example
//!
//! ```
//! use layered_consensus::{CapabilityRegistry, Document, MentionBatch, MentionCombiner, RawMention};
//!
//! let registry = CapabilityRegistry::builder()
//!     .recognizer("R1", &["LOCATION", "ORGANIZATION"], &["en"])
//!     .recognizer("R2", &["LOCATION"], &["en"])
//!     .build()
//!     .unwrap();
//!
//! let doc = Document::new("I moved to Lisbon last year.", "en");
//! let mut batch = MentionBatch::new();
//! batch.push(RawMention::new("R1", "LOCATION", 11, 17, "Lisbon"));
//! batch.push(RawMention::new("R2", "LOCATION", 11, 17, "Lisbon"));
//!
//! let mentions = MentionCombiner::new(&registry).combine(&doc, &batch).unwrap();
//! assert_eq!(mentions.len(), 1);
//! assert_eq!(mentions[0].text, "Lisbon");
//! ```

mod capability;
mod combiner;
mod display;
mod errors;
mod mention;
mod span_index;
pub mod vote;

pub use capability::{
    Capability,
    CapabilityRegistry,
    EntityType,
    Language,
    RecognizerConfig,
    RecognizerId,
    RegistryBuilder,
    RegistryConfig,
};
pub use combiner::{
    ClusterOutcome,
    ClusterReport,
    CombinationReport,
    DegenerateBallot,
    MentionCombiner,
};
pub use display::MentionDisplay;
pub use errors::{CombineError, CombineResult, ConfigError};
pub use mention::{Document, FinalMention, MentionBatch, RawMention};
pub use span_index::{Cluster, SpanIndex};
