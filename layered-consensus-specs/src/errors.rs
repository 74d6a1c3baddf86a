//! Error types for the fixture system.

use layered_consensus::ConfigError;
use thiserror::Error;

/// Errors that stop a fixture from running at all.
///
/// A combiner error is not one of these: fixtures may expect one, so it is
/// reported through [`FixtureResult`](crate::FixtureResult).
#[derive(Debug, Error)]
pub enum SpecError {
    /// Fixture text is not a valid scenario.
    #[error("parse error in {path}: {message}")]
    Parse { path: String, message: String },

    /// Error reading a fixture file or directory.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    /// The fixture's recognizer table is rejected by the registry.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for fixture operations.
pub type SpecResult<T> = Result<T, SpecError>;
