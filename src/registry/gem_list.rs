//! Version listing through `gem list <name> -r -a`
//!
//! The command prints one line per gem whose name starts with the query:
//!
//! ```text
//! *** REMOTE GEMS ***
//!
//! rails (7.1.3, 7.1.2, 7.0.8.1, 6.1.7.6)
//! rails-assets-jquery (3.7.1)
//! ```
//!
//! Only the line for the exact name is used, and its MAJOR.MINOR.PATCH
//! tokens are returned in the order `gem` printed them (newest first).

use crate::command::{CommandRunner, ExternalCommand};
use crate::error::RegistryError;
use crate::registry::VersionSource;
use std::path::PathBuf;

/// Version source that shells out to `gem list`
pub struct GemListSource<R: CommandRunner> {
    runner: R,
    working_dir: PathBuf,
}

impl<R: CommandRunner> GemListSource<R> {
    /// Create a source that runs `gem` in `working_dir`
    pub fn new(runner: R, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            working_dir: working_dir.into(),
        }
    }
}

impl<R: CommandRunner> VersionSource for GemListSource<R> {
    fn source_name(&self) -> &'static str {
        "gem list"
    }

    fn versions(&self, gem: &str) -> Result<Vec<String>, RegistryError> {
        let command = ExternalCommand::gem_list_remote(gem);
        let output = self
            .runner
            .capture(&command, &self.working_dir)
            .and_then(|output| output.into_result())
            .map_err(|source| RegistryError::CommandFailed {
                package: gem.to_string(),
                source,
            })?;

        parse_gem_list(gem, &output.stdout)
            .ok_or_else(|| RegistryError::package_not_found(gem, self.source_name()))
    }
}

/// Versions listed for exactly `gem`, or `None` if it is not listed
pub fn parse_gem_list(gem: &str, output: &str) -> Option<Vec<String>> {
    output
        .lines()
        .find(|line| {
            line.strip_prefix(gem)
                .is_some_and(|rest| rest.starts_with(char::is_whitespace))
        })
        .map(crate::domain::VersionString::tokens)
}
