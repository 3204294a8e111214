//! Loose dotted version parsing for tool version gates
//!
//! External tools report versions like `v4.2.3`, `4.2` or `10`; strict semver
//! rejects most of these, so comparisons here are plain dot-separated integer
//! components. A shorter version that is a prefix of a longer one compares as
//! older (`4.2 < 4.2.3`).

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,
    #[error("invalid version component '{0}'")]
    Component(String),
}

/// A dotted version as reported by a tool's `--version` output.
///
/// One leading `v` is stripped before parsing, so `v4.2.3` and `4.2.3`
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ToolVersion {
    components: Vec<u64>,
}

impl ToolVersion {
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }

        let mut components = Vec::new();
        for part in trimmed.split('.') {
            let value = part
                .parse::<u64>()
                .map_err(|_| VersionError::Component(part.to_string()))?;
            components.push(value);
        }
        Ok(Self { components })
    }
}

impl FromStr for ToolVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for c in &self.components {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", c)?;
            first = false;
        }
        Ok(())
    }
}
