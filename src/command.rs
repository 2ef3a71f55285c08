//! External command execution
//!
//! This module provides:
//! - A plain description of a command line (`ExternalCommand`)
//! - The `CommandRunner` seam used by the orchestrator and `gem list` lookups
//! - `SystemRunner`, which runs real processes and blocks until they exit
//!
//! There is no timeout: a command that never exits stalls the caller.

use crate::error::CommandError;
use std::fmt;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Program plus arguments, run without a shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ExternalCommand {
    /// Create a command from a program and its arguments
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Same command with one more argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// `bundle update`
    pub fn bundle_update() -> Self {
        Self::new("bundle", ["update"])
    }

    /// `bundle install`
    pub fn bundle_install() -> Self {
        Self::new("bundle", ["install"])
    }

    /// `gem list <name> -r -a`
    pub fn gem_list_remote(name: &str) -> Self {
        Self::new("gem", ["list", name, "-r", "-a"])
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Result of a command that was started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// The command that was executed
    pub command: String,
    /// Whether the command exited successfully
    pub success: bool,
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    /// Captured standard output (empty when output was inherited)
    pub stdout: String,
    /// Captured standard error (empty when output was inherited)
    pub stderr: String,
}

impl CommandOutput {
    /// Create a successful output
    pub fn success(command: impl Into<String>, stdout: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failed output
    pub fn failure(command: impl Into<String>, code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            success: false,
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Turn an unsuccessful exit into a `CommandError::Failed`
    pub fn into_result(self) -> Result<Self, CommandError> {
        if self.success {
            Ok(self)
        } else {
            Err(CommandError::failed(self.command, self.code))
        }
    }
}

/// Trait for running external commands
pub trait CommandRunner {
    /// Run with the terminal attached; output is not captured
    fn system(&self, command: &ExternalCommand, working_dir: &Path)
        -> Result<CommandOutput, CommandError>;

    /// Run and capture standard output and standard error
    fn capture(
        &self,
        command: &ExternalCommand,
        working_dir: &Path,
    ) -> Result<CommandOutput, CommandError>;
}

/// Runner that executes real processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }

    fn build(&self, command: &ExternalCommand, working_dir: &Path) -> Command {
        let mut process = Command::new(&command.program);
        process.args(&command.args).current_dir(working_dir);
        process
    }

    fn spawn_error(command: &ExternalCommand, source: std::io::Error) -> CommandError {
        CommandError::Spawn {
            command: command.to_string(),
            source,
        }
    }
}

impl CommandRunner for SystemRunner {
    fn system(
        &self,
        command: &ExternalCommand,
        working_dir: &Path,
    ) -> Result<CommandOutput, CommandError> {
        let status = self
            .build(command, working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Self::spawn_error(command, e))?;

        Ok(CommandOutput {
            command: command.to_string(),
            success: status.success(),
            code: status.code(),
            stdout: String::new(),
            stderr: String::new(),
        })
    }

    fn capture(
        &self,
        command: &ExternalCommand,
        working_dir: &Path,
    ) -> Result<CommandOutput, CommandError> {
        let output: Output = self
            .build(command, working_dir)
            .output()
            .map_err(|e| Self::spawn_error(command, e))?;

        Ok(CommandOutput {
            command: command.to_string(),
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_command_display() {
        assert_eq!(ExternalCommand::bundle_update().to_string(), "bundle update");
        assert_eq!(ExternalCommand::bundle_install().to_string(), "bundle install");
        assert_eq!(
            ExternalCommand::gem_list_remote("rails").to_string(),
            "gem list rails -r -a"
        );
        assert_eq!(
            ExternalCommand::bundle_update().arg("rails").to_string(),
            "bundle update rails"
        );
    }

    #[test]
    fn test_command_output_into_result() {
        let ok = CommandOutput::success("bundle install", "done");
        assert!(ok.into_result().is_ok());

        let failed = CommandOutput::failure("bundle update", Some(7), "boom");
        let err = failed.into_result().unwrap_err();
        assert!(matches!(err, CommandError::Failed { code: Some(7), .. }));
    }

    #[test]
    fn test_system_runner_missing_program() {
        let runner = SystemRunner::new();
        let command = ExternalCommand::new("definitely-not-a-real-program-bau", ["x"]);
        let result = runner.capture(&command, Path::new("."));
        assert!(matches!(result, Err(CommandError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_capture_output() {
        let runner = SystemRunner::new();
        let command = ExternalCommand::new("sh", ["-c", "echo hello"]);
        let output = runner.capture(&command, Path::new(".")).unwrap();
        assert!(output.success);
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_failure() {
        let runner = SystemRunner::new();
        let command = ExternalCommand::new("sh", ["-c", "exit 3"]);
        let output = runner.system(&command, Path::new(".")).unwrap();
        assert!(!output.success);
        assert_eq!(output.code, Some(3));
    }
}
