//! Sources of published gem versions
//!
//! This module provides:
//! - `VersionSource`, the lookup used by scoped upgrades
//! - `gem list -r -a` backed source
//! - RubyGems.org API backed source with a shared blocking HTTP client
//! - An in-memory source

mod client;
mod gem_list;
mod rubygems;

pub use client::HttpClient;
pub use gem_list::{parse_gem_list, GemListSource};
pub use rubygems::RubyGemsSource;

use crate::error::RegistryError;
use std::collections::HashMap;

/// Trait for listing the published versions of a gem
pub trait VersionSource {
    /// Name used in error messages
    fn source_name(&self) -> &'static str;

    /// All published versions of `gem`, newest first.
    ///
    /// Callers rely on this order and never sort the result.
    fn versions(&self, gem: &str) -> Result<Vec<String>, RegistryError>;
}

/// Fixed version lists kept in memory
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    versions: HashMap<String, Vec<String>>,
}

impl StaticSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a gem with its versions, newest first
    pub fn with(mut self, gem: &str, versions: &[&str]) -> Self {
        self.versions.insert(
            gem.to_string(),
            versions.iter().map(|v| v.to_string()).collect(),
        );
        self
    }
}

impl VersionSource for StaticSource {
    fn source_name(&self) -> &'static str {
        "static"
    }

    fn versions(&self, gem: &str) -> Result<Vec<String>, RegistryError> {
        self.versions
            .get(gem)
            .cloned()
            .ok_or_else(|| RegistryError::package_not_found(gem, self.source_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_source_keeps_order() {
        let source = StaticSource::new().with("rack", &["2.1.0", "2.0.5", "1.9.9"]);
        assert_eq!(
            source.versions("rack").unwrap(),
            vec!["2.1.0", "2.0.5", "1.9.9"]
        );
    }

    #[test]
    fn test_static_source_unknown_gem() {
        let source = StaticSource::new();
        assert!(matches!(
            source.versions("rack"),
            Err(RegistryError::PackageNotFound { .. })
        ));
    }
}
