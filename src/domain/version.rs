//! Three-part gem versions and update scopes
//!
//! A `VersionString` is strictly `MAJOR.MINOR.PATCH`. Anything else
//! (`1.2`, `1.2.3.4`, `1.2.3.beta`, `~> 1.2.3`) is rejected rather than
//! padded or truncated; callers that hold free-form constraint text use
//! [`VersionString::find_in`] to pick out the embedded triple.

use crate::error::VersionError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// Embedded MAJOR.MINOR.PATCH token
static VERSION_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+\.\d+").unwrap());

/// Immutable MAJOR.MINOR.PATCH triple, ordered numerically
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionString(semver::Version);

impl VersionString {
    /// Parse a strict three-component version
    pub fn parse(value: &str) -> Result<Self, VersionError> {
        let version =
            semver::Version::parse(value).map_err(|_| VersionError::malformed(value))?;
        if !version.pre.is_empty() || !version.build.is_empty() {
            return Err(VersionError::malformed(value));
        }
        Ok(Self(version))
    }

    /// Create from numeric components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// First parseable MAJOR.MINOR.PATCH token embedded in free-form text
    pub fn find_in(text: &str) -> Option<Self> {
        VERSION_TOKEN_RE
            .find_iter(text)
            .find_map(|m| Self::parse(m.as_str()).ok())
    }

    /// Every MAJOR.MINOR.PATCH token in `text`, in the order they appear
    pub fn tokens(text: &str) -> Vec<String> {
        VERSION_TOKEN_RE
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// Same major and minor component
    pub fn same_minor_line(&self, other: &Self) -> bool {
        self.major() == other.major() && self.minor() == other.minor()
    }

    /// Same major component
    pub fn same_major_line(&self, other: &Self) -> bool {
        self.major() == other.major()
    }
}

impl FromStr for VersionString {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VersionString {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VersionString> for String {
    fn from(value: VersionString) -> Self {
        value.to_string()
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How far an upgrade may move away from the current version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionScope {
    /// Stay on the current MAJOR.MINOR line
    Patch,
    /// Stay on the current MAJOR line
    Minor,
    /// Newest release regardless of major
    Major,
}

impl VersionScope {
    /// All scopes, narrowest first
    pub fn all() -> &'static [VersionScope] {
        &[VersionScope::Patch, VersionScope::Minor, VersionScope::Major]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionScope::Patch => "patch",
            VersionScope::Minor => "minor",
            VersionScope::Major => "major",
        }
    }
}

impl FromStr for VersionScope {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches(':').to_ascii_lowercase().as_str() {
            "patch" => Ok(VersionScope::Patch),
            "minor" => Ok(VersionScope::Minor),
            "major" => Ok(VersionScope::Major),
            _ => Err(VersionError::invalid_scope(s)),
        }
    }
}

impl fmt::Display for VersionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
