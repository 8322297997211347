//! Three-part `MAJOR.MINOR.PATCH` versions used for FIP releases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A strictly three-part numeric version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion {
    /// Major component.
    pub major: u64,
    /// Minor component.
    pub minor: u64,
    /// Patch component.
    pub patch: u64,
}

impl SemanticVersion {
    /// Create a version from its components.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Highest parseable version among `versions`; unparseable entries are ignored.
    pub fn latest<'a>(versions: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        versions
            .into_iter()
            .filter_map(|v| v.parse::<Self>().ok())
            .max()
    }
}

impl FromStr for SemanticVersion {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::validation(format!("'{s}' is not a MAJOR.MINOR.PATCH version"));
        let mut parts = s.split('.');
        let mut next = || -> Result<u64, AppError> {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse().map_err(|_| invalid())
        };
        let version = Self::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Next-version suggestions offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSuggestions {
    /// Next major release.
    pub major: String,
    /// Next minor release.
    pub minor: String,
    /// Next patch release.
    pub patch: String,
}

impl VersionSuggestions {
    /// Suggestions relative to the questionnaire's working version.
    ///
    /// Without a parseable working version the suggestions start a fresh
    /// line: `1.0.0`, `0.1.0`, `0.0.1`. A working version whose next
    /// increment overflows is treated the same way.
    pub fn from_working_version(working: Option<&str>) -> Self {
        working
            .and_then(|v| v.parse::<SemanticVersion>().ok())
            .and_then(|v| Self::after(&v))
            .unwrap_or_else(Self::fresh)
    }

    fn after(v: &SemanticVersion) -> Option<Self> {
        Some(Self {
            major: SemanticVersion::new(v.major.checked_add(1)?, 0, 0).to_string(),
            minor: SemanticVersion::new(v.major, v.minor.checked_add(1)?, 0).to_string(),
            patch: SemanticVersion::new(v.major, v.minor, v.patch.checked_add(1)?).to_string(),
        })
    }

    fn fresh() -> Self {
        Self {
            major: "1.0.0".to_string(),
            minor: "0.1.0".to_string(),
            patch: "0.0.1".to_string(),
        }
    }
}
