//! Gem declarations read from a Gemfile

use super::{VersionScope, VersionString};
use crate::error::RegistryError;
use crate::logger::Logger;
use crate::registry::VersionSource;
use serde::Serialize;
use std::fmt;

/// A gem declared in the Gemfile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    /// Gem name
    pub name: String,
    /// First version constraint as written, without quotes (e.g. `~> 6.1.4`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Raw trailing option text (e.g. `require: false`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    /// MAJOR.MINOR.PATCH embedded in the constraint, if any
    #[serde(skip)]
    current: Option<VersionString>,
}

impl Dependency {
    /// Creates a new dependency
    pub fn new(
        name: impl Into<String>,
        version: Option<String>,
        options: Option<String>,
    ) -> Self {
        let current = version.as_deref().and_then(VersionString::find_in);
        Self {
            name: name.into(),
            version,
            options,
            current,
        }
    }

    /// Creates a dependency with a version constraint and no options
    pub fn versioned(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(name, Some(version.into()), None)
    }

    /// Current version triple derived from the constraint
    pub fn current_version(&self) -> Option<&VersionString> {
        self.current.as_ref()
    }

    pub fn major(&self) -> Option<u64> {
        self.current.as_ref().map(VersionString::major)
    }

    pub fn minor(&self) -> Option<u64> {
        self.current.as_ref().map(VersionString::minor)
    }

    pub fn patch(&self) -> Option<u64> {
        self.current.as_ref().map(VersionString::patch)
    }

    /// All published versions, newest first.
    ///
    /// The order is whatever `source` emits; no sorting happens here, so a
    /// source must list newest releases first for the scope lookups below
    /// to mean "latest".
    pub fn available_versions(
        &self,
        source: &dyn VersionSource,
    ) -> Result<Vec<String>, RegistryError> {
        source.versions(&self.name)
    }

    /// Newest available version within `scope`, or `None` when the gem is
    /// already at the newest version for that scope.
    pub fn last_version(
        &self,
        scope: VersionScope,
        source: &dyn VersionSource,
        logger: &dyn Logger,
    ) -> Result<Option<String>, RegistryError> {
        let available = self.available_versions(source)?;
        let found = self.select_version(scope, &available);
        match &found {
            Some(version) => logger.info(&format!(
                "{}: last {} version is {}",
                self.name, scope, version
            )),
            None => logger.info(&format!(
                "{}: no newer {} version available",
                self.name, scope
            )),
        }
        Ok(found)
    }

    /// Pick the newest entry of `available` (newest first) within `scope`.
    ///
    /// - `Patch`: first version on the current MAJOR.MINOR line, unless that
    ///   version is the current one
    /// - `Minor`: first version on the current MAJOR line
    /// - `Major`: first version overall
    ///
    /// Patch and minor scopes never match when the declared constraint has
    /// no MAJOR.MINOR.PATCH to compare against.
    pub fn select_version(&self, scope: VersionScope, available: &[String]) -> Option<String> {
        let on_line = |same_line: fn(&VersionString, &VersionString) -> bool| {
            let current = self.current.as_ref()?;
            available
                .iter()
                .filter_map(|v| VersionString::parse(v).ok().map(|parsed| (v, parsed)))
                .find(|(_, parsed)| same_line(parsed, current))
                .map(|(v, parsed)| (v.clone(), &parsed == current))
        };

        match scope {
            VersionScope::Patch => on_line(VersionString::same_minor_line)
                .filter(|(_, is_current)| !is_current)
                .map(|(v, _)| v),
            VersionScope::Minor => on_line(VersionString::same_major_line).map(|(v, _)| v),
            VersionScope::Major => available.first().cloned(),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} ({})", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}
