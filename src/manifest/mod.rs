//! Gemfile parsing and rewriting
//!
//! This module provides:
//! - Line classification into gem declarations and opaque text
//! - The Gemfile model with strip / pin / set-version rewrites
//! - Whole-file read and write helpers

mod gemfile;
mod line;
mod writer;

pub use gemfile::Gemfile;
pub use line::{GemDeclaration, ManifestLine};
pub use writer::{read_manifest, write_manifest};

/// File name of the manifest in the project root
pub const MANIFEST_FILENAME: &str = "Gemfile";
