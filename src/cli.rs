//! CLI argument parsing module for bundle-auto-update

use crate::orchestrator::UpdateMode;
use clap::Parser;
use std::ffi::OsString;

/// Single-dash spelling accepted for the no-update flag
const SHORT_NOUPDATE: &str = "-noupdate";

/// Loosen Gemfile constraints, update, and pin every gem to `~> <locked version>`
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bundle-auto-update",
    version,
    about = "Update gems and pin the Gemfile to the resolved versions"
)]
pub struct CliArgs {
    /// Skip stripping constraints and `bundle update`; pin from the current Gemfile.lock
    #[arg(long = "noupdate")]
    pub no_update: bool,
}

impl CliArgs {
    /// Parse process arguments, accepting `-noupdate`
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Workflow selected by the flags
    pub fn mode(&self) -> UpdateMode {
        if self.no_update {
            UpdateMode::NoUpdate
        } else {
            UpdateMode::Full
        }
    }
}

/// Rewrite `-noupdate` to `--noupdate` so clap does not read it as a
/// cluster of short flags
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if arg == SHORT_NOUPDATE {
                OsString::from("--noupdate")
            } else {
                arg
            }
        })
        .collect()
}
