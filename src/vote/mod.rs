//! The three votes held over every cluster, in order.
//!
//! Each stage is a pure function over one [`Cluster`](crate::Cluster) and the
//! read-only [`CapabilityRegistry`](crate::CapabilityRegistry):
//!
//! 1. [`vote_type`] elects the entity type.
//! 2. [`vote_existence`] asks every recognizer able to detect that type in the
//!    document's language whether it saw something here.
//! 3. [`vote_position`] elects the start and end offsets among the recognizers
//!    that proposed the winning type and passed the existence vote.
//!
//! Rejection is an ordinary outcome ([`ExistenceOutcome::Rejected`]), never an error.

mod existence;
mod position;
mod type_vote;

pub use existence::{vote_existence, ExistenceOutcome};
pub use position::{elect_offset, position_electorate, vote_position, OffsetBias, PositionElectorate};
pub use type_vote::{vote_type, TypeVote};
