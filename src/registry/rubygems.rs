//! RubyGems.org version listing
//!
//! API endpoint: https://rubygems.org/api/v1/versions/{gem}.json
//!
//! The endpoint lists releases newest first with one entry per platform
//! build, so `nokogiri 1.15.5` shows up once for `ruby` and once for each
//! native platform. Entries are collapsed by version number in listing
//! order and prereleases are dropped, matching `gem list -r -a`. Release
//! dates and other fields of the response are ignored.

use crate::error::RegistryError;
use crate::registry::{HttpClient, VersionSource};
use serde::Deserialize;

/// RubyGems API base URL
const RUBYGEMS_API_URL: &str = "https://rubygems.org/api/v1/versions";

/// One entry of the versions endpoint
#[derive(Debug, Deserialize)]
struct RubyGemsVersion {
    number: String,
    #[serde(default)]
    prerelease: bool,
}

/// Version source backed by the RubyGems.org API
pub struct RubyGemsSource {
    client: HttpClient,
}

impl RubyGemsSource {
    /// Create a new RubyGems source
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Build the URL for a gem
    fn build_url(&self, gem: &str) -> String {
        format!("{}/{}.json", RUBYGEMS_API_URL, gem)
    }
}

impl VersionSource for RubyGemsSource {
    fn source_name(&self) -> &'static str {
        "rubygems.org"
    }

    fn versions(&self, gem: &str) -> Result<Vec<String>, RegistryError> {
        let url = self.build_url(gem);
        let entries: Vec<RubyGemsVersion> =
            self.client.get_json(&url, gem, self.source_name())?;
        Ok(stable_versions(entries))
    }
}

/// Version numbers in listing order, prereleases and platform repeats dropped
fn stable_versions(entries: Vec<RubyGemsVersion>) -> Vec<String> {
    let mut versions: Vec<String> = Vec::new();
    for entry in entries.into_iter().filter(|e| !e.prerelease) {
        if !versions.contains(&entry.number) {
            versions.push(entry.number);
        }
    }
    versions
}
