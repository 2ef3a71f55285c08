//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Gemfile read/write failures
//! - LockfileError: Gemfile.lock read failures
//! - VersionError: malformed versions and invalid scope arguments
//! - RegistryError: failures while listing available gem versions
//! - CommandError: external command could not run or reported failure

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Gemfile related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Gemfile.lock related errors
    #[error(transparent)]
    Lockfile(#[from] LockfileError),

    /// Version parsing and scope errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Version listing related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// External command errors
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Errors related to the Gemfile
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to the lock file
#[derive(Error, Debug)]
pub enum LockfileError {
    /// Lock file not found
    #[error("lock file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read lock file
    #[error("failed to read lock file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to version strings and version scopes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Input is not three dot-separated non-negative integers
    #[error("malformed version '{value}': expected MAJOR.MINOR.PATCH")]
    Malformed { value: String },

    /// Scope is not one of patch, minor, major
    #[error("invalid version scope '{value}': expected 'patch', 'minor' or 'major'")]
    InvalidScope { value: String },
}

/// Errors related to listing available versions
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Gem not found in registry
    #[error("gem '{package}' not found in {registry}")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch gem '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry}")]
    RateLimitExceeded { registry: String },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },

    /// Listing command could not be run
    #[error("version listing for '{package}' failed: {source}")]
    CommandFailed {
        package: String,
        #[source]
        source: CommandError,
    },
}

/// Errors related to external commands
#[derive(Error, Debug)]
pub enum CommandError {
    /// The program could not be started
    #[error("failed to execute '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully
    #[error("command '{command}' failed{}", exit_suffix(.code))]
    Failed { command: String, code: Option<i32> },
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => " (terminated by signal)".to_string(),
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a NotFound or ReadError depending on the io error kind
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return ManifestError::NotFound { path };
        }
        ManifestError::ReadError { path, source }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }
}

impl LockfileError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        LockfileError::NotFound { path: path.into() }
    }

    /// Creates a NotFound or ReadError depending on the io error kind
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return LockfileError::NotFound { path };
        }
        LockfileError::ReadError { path, source }
    }
}

impl VersionError {
    /// Creates a new Malformed error
    pub fn malformed(value: impl Into<String>) -> Self {
        VersionError::Malformed {
            value: value.into(),
        }
    }

    /// Creates a new InvalidScope error
    pub fn invalid_scope(value: impl Into<String>) -> Self {
        VersionError::InvalidScope {
            value: value.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(registry: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            registry: registry.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }
}

impl CommandError {
    /// Creates a new Failed error
    pub fn failed(command: impl Into<String>, code: Option<i32>) -> Self {
        CommandError::Failed {
            command: command.into(),
            code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_error_not_found() {
        let err = ManifestError::not_found("/path/to/Gemfile");
        let msg = format!("{}", err);
        assert!(msg.contains("manifest file not found"));
        assert!(msg.contains("Gemfile"));
    }

    #[test]
    fn test_manifest_read_error_maps_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ManifestError::read_error("/path/to/Gemfile", io);
        assert!(matches!(err, ManifestError::NotFound { .. }));
    }

    #[test]
    fn test_manifest_read_error_keeps_other_kinds() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = ManifestError::read_error("/path/to/Gemfile", io);
        assert!(matches!(err, ManifestError::ReadError { .. }));
        assert!(format!("{}", err).contains("nope"));
    }

    #[test]
    fn test_lockfile_error_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = LockfileError::read_error("/path/to/Gemfile.lock", io);
        let msg = format!("{}", err);
        assert!(msg.contains("lock file not found"));
        assert!(msg.contains("Gemfile.lock"));
    }

    #[test]
    fn test_version_error_messages() {
        let err = VersionError::malformed("1.2");
        assert!(format!("{}", err).contains("malformed version '1.2'"));

        let err = VersionError::invalid_scope("huge");
        assert!(format!("{}", err).contains("invalid version scope 'huge'"));
    }

    #[test]
    fn test_registry_error_package_not_found() {
        let err = RegistryError::package_not_found("nonexistent-gem", "rubygems.org");
        let msg = format!("{}", err);
        assert!(msg.contains("gem 'nonexistent-gem' not found"));
        assert!(msg.contains("rubygems.org"));
    }

    #[test]
    fn test_registry_error_rate_limit() {
        let err = RegistryError::rate_limit_exceeded("rubygems.org");
        assert!(format!("{}", err).contains("rate limit exceeded"));
    }

    #[test]
    fn test_command_error_failed_with_code() {
        let err = CommandError::failed("bundle update", Some(1));
        assert_eq!(
            format!("{}", err),
            "command 'bundle update' failed with exit code 1"
        );
    }

    #[test]
    fn test_command_error_failed_by_signal() {
        let err = CommandError::failed("bundle install", None);
        assert!(format!("{}", err).contains("terminated by signal"));
    }

    #[test]
    fn test_app_error_from_manifest_error() {
        let app_err: AppError = ManifestError::not_found("/path").into();
        assert!(format!("{}", app_err).contains("manifest file not found"));
    }

    #[test]
    fn test_app_error_from_command_error() {
        let app_err: AppError = CommandError::failed("bundle update", Some(2)).into();
        assert!(format!("{}", app_err).contains("bundle update"));
    }
}
