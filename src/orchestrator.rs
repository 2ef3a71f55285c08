//! Update orchestrator for coordinating the bundle workflow
//!
//! This module provides:
//! - Full update: strip → `bundle update` → pin from Gemfile.lock → `bundle install`
//! - No-update: pin from the Gemfile.lock on disk → `bundle install`
//! - Single gem upgrade within a version scope
//!
//! A failing `bundle update` aborts the full update before anything is
//! pinned. The Gemfile is left stripped; running again recovers.

use crate::command::{CommandOutput, CommandRunner, ExternalCommand};
use crate::config::Settings;
use crate::domain::VersionScope;
use crate::error::{AppError, CommandError};
use crate::lockfile::GemfileLock;
use crate::logger::Logger;
use crate::manifest::Gemfile;
use crate::progress::Progress;
use crate::registry::VersionSource;

/// Which phases of the workflow to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Strip constraints and let the resolver pick the newest versions
    Full,
    /// Pin to whatever the current lock file says
    NoUpdate,
}

/// What a completed run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub mode: UpdateMode,
    /// Declared gems that received a `~>` constraint, in file order
    pub pinned: Vec<String>,
    /// Declared gems missing from Gemfile.lock
    pub missing: Vec<String>,
}

/// Result of upgrading a single gem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeOutcome {
    /// The Gemfile now names `to` where it named `from`
    Upgraded { from: String, to: String },
    /// No newer version within the requested scope
    AlreadyLatest,
    /// The gem is not declared in the Gemfile
    NotDeclared,
    /// The declaration has no MAJOR.MINOR.PATCH to replace
    Unversioned,
}

/// Orchestrator for the bundle workflow
pub struct Orchestrator<'a> {
    settings: Settings,
    runner: &'a dyn CommandRunner,
    logger: &'a dyn Logger,
}

impl<'a> Orchestrator<'a> {
    /// Create a new orchestrator
    pub fn new(settings: Settings, runner: &'a dyn CommandRunner, logger: &'a dyn Logger) -> Self {
        Self {
            settings,
            runner,
            logger,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the workflow in `mode`
    pub fn run(&self, mode: UpdateMode) -> Result<RunSummary, AppError> {
        if mode == UpdateMode::Full {
            self.update_all()?;
        }
        self.pin_and_install(mode)
    }

    fn update_all(&self) -> Result<(), AppError> {
        let mut gemfile = Gemfile::load(self.settings.manifest_path())?;
        gemfile.strip_versions(self.logger)?;

        if let Err(e) = self.execute(&self.settings.update_command) {
            self.logger.warn("Aborting due to error");
            return Err(e.into());
        }
        Ok(())
    }

    fn pin_and_install(&self, mode: UpdateMode) -> Result<RunSummary, AppError> {
        let lock = GemfileLock::load(self.settings.lockfile_path())?;
        let mut gemfile = Gemfile::load(self.settings.manifest_path())?;

        let (pinned, missing): (Vec<String>, Vec<String>) = gemfile
            .dependencies()
            .into_iter()
            .map(|d| d.name)
            .partition(|name| lock.version(name).is_some());

        gemfile.set_versions(lock.version_map(), self.logger)?;
        self.execute(&self.settings.install_command)?;

        Ok(RunSummary {
            mode,
            pinned,
            missing,
        })
    }

    /// Move one declared gem to the newest version within `scope`, then
    /// run `bundle update <name>`.
    pub fn upgrade_gem(
        &self,
        name: &str,
        scope: VersionScope,
        source: &dyn VersionSource,
    ) -> Result<UpgradeOutcome, AppError> {
        let mut gemfile = Gemfile::load(self.settings.manifest_path())?;

        let Some(dependency) = gemfile.dependency(name) else {
            self.logger.warn(&format!("gem {} not declared in Gemfile", name));
            return Ok(UpgradeOutcome::NotDeclared);
        };
        let Some(current) = dependency.current_version().map(ToString::to_string) else {
            self.logger
                .warn(&format!("gem {} has no version to upgrade", name));
            return Ok(UpgradeOutcome::Unversioned);
        };

        let mut progress = Progress::new(self.settings.show_progress);
        progress.spinner(&format!("Fetching versions of {}", name));
        let found = dependency.last_version(scope, source, self.logger);
        progress.finish_and_clear();

        let target = match found? {
            Some(target) if target != current => target,
            _ => return Ok(UpgradeOutcome::AlreadyLatest),
        };

        self.logger
            .info(&format!("upgrading {} from {} to {}", name, current, target));
        gemfile.set_version(&dependency, &target).save()?;
        self.execute(&self.settings.update_command.clone().arg(name))?;

        Ok(UpgradeOutcome::Upgraded {
            from: current,
            to: target,
        })
    }

    fn execute(&self, command: &ExternalCommand) -> Result<CommandOutput, CommandError> {
        self.logger.command(&command.to_string());
        self.runner
            .system(command, self.settings.root())?
            .into_result()
    }
}
