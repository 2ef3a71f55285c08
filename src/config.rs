//! Run settings: where the project lives and which commands to run

use crate::command::ExternalCommand;
use crate::lockfile::LOCKFILE_FILENAME;
use crate::manifest::MANIFEST_FILENAME;
use std::path::{Path, PathBuf};

/// Paths and commands used by one run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Project root holding the Gemfile
    pub root: PathBuf,
    /// Resolver command that updates everything within constraints
    pub update_command: ExternalCommand,
    /// Resolver command that installs exactly what is pinned
    pub install_command: ExternalCommand,
    /// Show a spinner during `Orchestrator::upgrade_gem` version lookups.
    /// Off by default and never set by the binary, which performs no lookups.
    pub show_progress: bool,
}

impl Settings {
    /// Default settings for the project at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            update_command: ExternalCommand::bundle_update(),
            install_command: ExternalCommand::bundle_install(),
            show_progress: false,
        }
    }

    /// Enable or disable the lookup spinner
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/Gemfile`
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILENAME)
    }

    /// `<root>/Gemfile.lock`
    pub fn lockfile_path(&self) -> PathBuf {
        self.root.join(LOCKFILE_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_paths() {
        let settings = Settings::new("/project");
        assert_eq!(settings.manifest_path(), PathBuf::from("/project/Gemfile"));
        assert_eq!(
            settings.lockfile_path(),
            PathBuf::from("/project/Gemfile.lock")
        );
    }

    #[test]
    fn test_settings_default_commands() {
        let settings = Settings::new(".");
        assert_eq!(settings.update_command.to_string(), "bundle update");
        assert_eq!(settings.install_command.to_string(), "bundle install");
        assert!(!settings.show_progress);
        assert!(settings.with_progress(true).show_progress);
    }
}
