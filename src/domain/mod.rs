//! Core domain models
//!
//! - Strict MAJOR.MINOR.PATCH versions and update scopes
//! - Declared gem dependencies with scoped "latest version" lookups

mod dependency;
mod version;

pub use dependency::Dependency;
pub use version::{VersionScope, VersionString};
