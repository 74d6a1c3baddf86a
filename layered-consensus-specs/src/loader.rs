//! Fixture file loading.

use crate::{ConsensusFixture, SpecError};
use std::fs;
use std::path::Path;

/// Parse scenario text. `origin` names the source in error messages.
pub fn parse_fixture(content: &str, origin: &str) -> Result<ConsensusFixture, SpecError> {
    toml::from_str(content).map_err(|e| SpecError::Parse {
        path: origin.to_string(),
        message: e.to_string(),
    })
}

/// Load a single fixture file.
pub fn load_fixture(path: &Path) -> Result<ConsensusFixture, SpecError> {
    let content = fs::read_to_string(path).map_err(|e| SpecError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_fixture(&content, &path.display().to_string())
}

/// Load all fixtures from a directory (glob: **/*.toml), sorted by relative path.
pub fn load_all_fixtures(dir: &Path) -> Result<Vec<(String, ConsensusFixture)>, SpecError> {
    let mut fixtures = Vec::new();
    load_fixtures_recursive(dir, dir, &mut fixtures)?;
    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(fixtures)
}

fn load_fixtures_recursive(
    base: &Path,
    dir: &Path,
    fixtures: &mut Vec<(String, ConsensusFixture)>,
) -> Result<(), SpecError> {
    if !dir.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(dir).map_err(|e| SpecError::Load {
        path: dir.display().to_string(),
        message: e.to_string(),
    })? {
        let entry = entry.map_err(|e| SpecError::Load {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        let path = entry.path();

        if path.is_dir() {
            load_fixtures_recursive(base, &path, fixtures)?;
        } else if path.extension().map_or(false, |e| e == "toml") {
            let relative = path.strip_prefix(base).unwrap_or(&path);
            let fixture = load_fixture(&path)?;
            fixtures.push((relative.display().to_string(), fixture));
        }
    }

    Ok(())
}
