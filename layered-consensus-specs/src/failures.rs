//! Expected failures tracking via TOML file.
//!
//! ```toml
//! [[pending]]
//! fixture = "newsroom.toml"
//! mention = "LOCATION[17,23)"
//! reason = "Awaiting gazetteer priority"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::SpecError;

/// Loaded expected failures configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpectedFailures {
    /// Known failures (won't fix soon).
    #[serde(default)]
    pub known: Vec<FailureEntry>,
    /// Pending failures (awaiting fix).
    #[serde(default)]
    pub pending: Vec<FailureEntry>,
}

/// A single expected failure entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEntry {
    /// Fixture path relative to the fixtures directory.
    pub fixture: String,
    /// Mismatch reference, e.g. `PERSON[0,5)` or `error`.
    pub mention: String,
    #[serde(default)]
    pub reason: Option<String>,
    /// Date added (YYYY-MM-DD).
    #[serde(default)]
    pub added: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
}

impl FailureEntry {
    fn matches(&self, fixture: &str, mention_ref: &str) -> bool {
        self.fixture == fixture && self.mention == mention_ref
    }
}

/// Failure lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureState {
    /// Known limitation, won't fix soon.
    Known,
    /// Awaiting fix, not blocking.
    Pending,
    /// Expected to pass - failure is a regression.
    Regression,
}

impl ExpectedFailures {
    /// Load from a TOML file. A missing file means no expected failures.
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SpecError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| SpecError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn is_expected(&self, fixture: &str, mention_ref: &str) -> FailureState {
        if self.known.iter().any(|e| e.matches(fixture, mention_ref)) {
            return FailureState::Known;
        }
        if self.pending.iter().any(|e| e.matches(fixture, mention_ref)) {
            return FailureState::Pending;
        }
        FailureState::Regression
    }

    pub fn count(&self) -> usize {
        self.known.len() + self.pending.len()
    }

    pub fn get_entry(&self, fixture: &str, mention_ref: &str) -> Option<&FailureEntry> {
        self.known
            .iter()
            .chain(self.pending.iter())
            .find(|e| e.matches(fixture, mention_ref))
    }
}

/// Result of running the harness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessResult {
    /// Fixtures run.
    pub fixtures: usize,
    /// Fixtures with no mismatch.
    pub passed: usize,
    /// Mismatches listed as known or pending.
    pub expected_failures: usize,
    /// Mismatches nobody expected.
    pub regressions: usize,
}

impl HarnessResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self) -> bool {
        self.regressions == 0
    }

    /// Record one fixture's mismatch states; an empty slice is a pass.
    pub fn record_fixture(&mut self, states: &[FailureState]) {
        self.fixtures += 1;
        if states.is_empty() {
            self.passed += 1;
        }
        for state in states {
            match state {
                FailureState::Known | FailureState::Pending => self.expected_failures += 1,
                FailureState::Regression => self.regressions += 1,
            }
        }
    }
}
