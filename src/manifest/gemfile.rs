//! Gemfile model
//!
//! Holds the Gemfile as an ordered list of [`ManifestLine`]s. Each mutation
//! maps the current lines to a new list of the same length, so opaque lines
//! and untouched declarations keep their exact bytes.

use super::line::{GemDeclaration, ManifestLine};
use super::writer::{read_manifest, write_manifest};
use crate::domain::Dependency;
use crate::error::ManifestError;
use crate::logger::Logger;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Parsed Gemfile backed by a file on disk
#[derive(Debug, Clone)]
pub struct Gemfile {
    path: PathBuf,
    lines: Vec<ManifestLine>,
}

impl Gemfile {
    /// Read and parse the Gemfile at `path`
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ManifestError> {
        let path = path.into();
        let content = read_manifest(&path)?;
        Ok(Self::parse(path, &content))
    }

    /// Parse `content` as the Gemfile that lives at `path`
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            path: path.into(),
            lines: ManifestLine::parse_all(content),
        }
    }

    /// Discard in-memory changes and re-read the backing file
    pub fn reload(&mut self) -> Result<(), ManifestError> {
        let content = read_manifest(&self.path)?;
        self.lines = ManifestLine::parse_all(&content);
        Ok(())
    }

    /// Write the current content to the backing file
    pub fn save(&self) -> Result<(), ManifestError> {
        write_manifest(&self.path, &self.content())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[ManifestLine] {
        &self.lines
    }

    /// Serialized Gemfile text
    pub fn content(&self) -> String {
        self.lines.iter().map(ManifestLine::raw).collect()
    }

    /// Declared gems in file order
    pub fn dependencies(&self) -> Vec<Dependency> {
        self.declarations()
            .map(GemDeclaration::to_dependency)
            .collect()
    }

    /// Look up a declared gem by exact name
    pub fn dependency(&self, name: &str) -> Option<Dependency> {
        self.declarations()
            .find(|d| d.name() == name)
            .map(GemDeclaration::to_dependency)
    }

    fn declarations(&self) -> impl Iterator<Item = &GemDeclaration> {
        self.lines.iter().filter_map(ManifestLine::as_declaration)
    }

    /// Remove version constraints and options from every declaration that
    /// does not use a git or path source, then save.
    ///
    /// Options on registry gems are dropped along with the constraints.
    pub fn strip_versions(&mut self, logger: &dyn Logger) -> Result<(), ManifestError> {
        self.lines = strip_versions(&self.lines, logger);
        self.save()
    }

    /// Add a `~> <version>` constraint to every declaration found in
    /// `version_map`, then save. Declarations missing from the map are left
    /// alone with a warning.
    pub fn set_versions(
        &mut self,
        version_map: &HashMap<String, String>,
        logger: &dyn Logger,
    ) -> Result<(), ManifestError> {
        self.lines = set_versions(&self.lines, version_map, logger);
        self.save()
    }

    /// Replace the first MAJOR.MINOR.PATCH on `dependency`'s lines with
    /// `new_version`. Not saved; call [`Gemfile::save`] to persist.
    pub fn set_version(&mut self, dependency: &Dependency, new_version: &str) -> &mut Self {
        self.lines = set_version(&self.lines, &dependency.name, new_version);
        self
    }
}

fn strip_versions(lines: &[ManifestLine], logger: &dyn Logger) -> Vec<ManifestLine> {
    lines
        .iter()
        .map(|line| {
            let ManifestLine::Declaration(decl) = line else {
                return line.clone();
            };
            if decl.is_source_controlled() {
                logger.warn(&format!("ignoring line: {}", decl.raw().trim_end()));
                return line.clone();
            }
            if decl.is_continued() {
                logger.warn(&format!(
                    "ignoring multi-line declaration: {}",
                    decl.raw().trim_end()
                ));
                return line.clone();
            }
            if !decl.has_clauses() {
                return line.clone();
            }
            logger.info(&format!("removing version from line: {}", decl.raw().trim_end()));
            ManifestLine::parse(&decl.without_clauses())
        })
        .collect()
}

fn set_versions(
    lines: &[ManifestLine],
    version_map: &HashMap<String, String>,
    logger: &dyn Logger,
) -> Vec<ManifestLine> {
    lines
        .iter()
        .map(|line| {
            let ManifestLine::Declaration(decl) = line else {
                return line.clone();
            };
            logger.info(&format!("attempting to update on line: {}", decl.raw().trim_end()));
            match version_map.get(decl.name()) {
                Some(version) => {
                    logger.info(&format!("updating {} to {}", decl.name(), version));
                    ManifestLine::parse(&decl.with_pessimistic_constraint(version))
                }
                None => {
                    logger.warn(&format!("gem {} not found in Gemfile.lock", decl.name()));
                    line.clone()
                }
            }
        })
        .collect()
}

fn set_version(lines: &[ManifestLine], name: &str, new_version: &str) -> Vec<ManifestLine> {
    lines
        .iter()
        .map(|line| match line {
            ManifestLine::Declaration(decl) if decl.name() == name => {
                ManifestLine::parse(&decl.with_version(new_version))
            }
            _ => line.clone(),
        })
        .collect()
}
