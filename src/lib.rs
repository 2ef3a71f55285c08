//! bundle-auto-update - Gemfile constraint updater library
//!
//! Reads a Gemfile as a list of lines, strips or rewrites the version
//! constraints of `gem` declarations, and pins every gem to the version
//! resolved in Gemfile.lock. External `bundle` and `gem` commands run
//! through the [`command::CommandRunner`] seam.

pub mod cli;
pub mod command;
pub mod config;
pub mod domain;
pub mod error;
pub mod lockfile;
pub mod logger;
pub mod manifest;
pub mod orchestrator;
pub mod progress;
pub mod registry;
