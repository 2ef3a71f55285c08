//! Gemfile.lock reader
//!
//! Only top-level resolved specs are read. In the `specs:` sections of a
//! lock file these sit at exactly four spaces of indentation:
//!
//! ```text
//! GEM
//!   remote: https://rubygems.org/
//!   specs:
//!     rails (6.1.4)
//!       actionpack (= 6.1.4)
//! ```
//!
//! Deeper lines are the requirements of the spec above them and are skipped.

use crate::error::LockfileError;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// File name of the lock file in the project root
pub const LOCKFILE_FILENAME: &str = "Gemfile.lock";

// `    name (version)` with exactly four leading spaces
static RESOLVED_SPEC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {4}([^\s(]+)\s+\(([^)]+)\)").unwrap());

/// Resolved versions read from Gemfile.lock
#[derive(Debug, Clone)]
pub struct GemfileLock {
    path: PathBuf,
    version_map: HashMap<String, String>,
}

impl GemfileLock {
    /// Read the lock file at `path`
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, LockfileError> {
        let mut lock = Self {
            path: path.into(),
            version_map: HashMap::new(),
        };
        lock.load_versions()?;
        Ok(lock)
    }

    /// Re-read the lock file, replacing the current version map
    pub fn load_versions(&mut self) -> Result<&HashMap<String, String>, LockfileError> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| LockfileError::read_error(&self.path, e))?;
        self.version_map = parse_version_map(&content);
        Ok(&self.version_map)
    }

    /// Gem name to resolved version
    pub fn version_map(&self) -> &HashMap<String, String> {
        &self.version_map
    }

    /// Resolved version of a single gem
    pub fn version(&self, name: &str) -> Option<&str> {
        self.version_map.get(name).map(String::as_str)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Collect `name -> version` from every top-level spec line.
/// A name listed twice keeps its last version.
pub fn parse_version_map(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .filter_map(|line| RESOLVED_SPEC_RE.captures(line))
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}
