#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Fixture-driven scenario testing for layered-consensus.
//!
//! Each scenario is a TOML file holding a document, the recognizer
//! capabilities, the raw mentions every recognizer reported, and either the
//! consensus mentions the combiner must produce or the error it must raise.
//!
//! ```toml
//! title = "Two of three recognizers agree on LOCATION"
//!
//! [document]
//! text = "I moved to Lisbon."
//! language = "en"
//!
//! [[recognizer]]
//! id = "R1"
//! types = ["LOCATION"]
//! languages = ["en"]
//!
//! [[mention]]
//! recognizer = "R1"
//! type = "LOCATION"
//! start = 11
//! end = 17
//!
//! [[expect]]
//! type = "LOCATION"
//! start = 11
//! end = 17
//! supporters = ["R1"]
//! ```
//!
//! ## Modules
//!
//! - [`fixture`] - Serde model of a scenario file
//! - [`loader`] - Fixture file loading
//! - [`runner`] - Runs a fixture through the combiner and diffs the output
//! - [`errors`] - Error types for the fixture system
//! - [`formatter`] - Human-readable failure reports
//! - [`failures`] - Expected failures tracking via TOML

pub mod errors;
pub mod failures;
pub mod fixture;
pub mod formatter;
pub mod loader;
pub mod runner;

pub use errors::{SpecError, SpecResult};
pub use failures::{ExpectedFailures, FailureEntry, FailureState, HarnessResult};
pub use fixture::{ConsensusFixture, DocumentSpec, ErrorKind, ExpectedMention, MentionSpec};
pub use formatter::{format_failure, format_summary};
pub use loader::{load_all_fixtures, load_fixture, parse_fixture};
pub use runner::{run_fixture, FixtureResult, MentionMismatch};
