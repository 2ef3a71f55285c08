//! Logging capability passed into the Gemfile model, version lookups and
//! the orchestrator
//!
//! Output format:
//! - info: the message as-is
//! - warn: `  BAUError <message>`
//! - command: `    > <command>`

use colored::Colorize;
use std::cell::RefCell;

/// Prefix for warning lines
pub const WARN_PREFIX: &str = "  BAUError ";

/// Prefix for echoed commands
pub const COMMAND_PREFIX: &str = "    > ";

/// Sink for diagnostic messages
pub trait Logger {
    /// Informational message
    fn info(&self, message: &str);

    /// Non-fatal problem or fatal error report
    fn warn(&self, message: &str);

    /// Echo of an external command about to run
    fn command(&self, command: &str);
}

/// Logger writing to standard output
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    color: bool,
}

impl ConsoleLogger {
    /// Create a logger with colored output
    pub fn new() -> Self {
        Self { color: true }
    }

    /// Create a logger with color option
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    fn format_warn(&self, message: &str) -> String {
        if self.color {
            format!("{}{}", WARN_PREFIX.red().bold(), message.yellow())
        } else {
            format!("{}{}", WARN_PREFIX, message)
        }
    }

    fn format_command(&self, command: &str) -> String {
        if self.color {
            format!("{}{}", COMMAND_PREFIX, command.cyan())
        } else {
            format!("{}{}", COMMAND_PREFIX, command)
        }
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for ConsoleLogger {
    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn warn(&self, message: &str) {
        println!("{}", self.format_warn(message));
    }

    fn command(&self, command: &str) {
        println!("{}", self.format_command(command));
    }
}

/// Severity of a recorded log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Command,
}

/// A single recorded message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Logger that keeps every message in memory
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: RefCell<Vec<LogEntry>>,
}

impl MemoryLogger {
    /// Create an empty logger
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded entries in emission order
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Messages recorded at the given level
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.clone())
            .collect()
    }

    /// Warning messages
    pub fn warnings(&self) -> Vec<String> {
        self.messages(LogLevel::Warn)
    }

    /// Echoed commands
    pub fn commands(&self) -> Vec<String> {
        self.messages(LogLevel::Command)
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.entries.borrow_mut().push(LogEntry {
            level,
            message: message.to_string(),
        });
    }
}

impl Logger for MemoryLogger {
    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(LogLevel::Warn, message);
    }

    fn command(&self, command: &str) {
        self.push(LogLevel::Command, command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_logger_plain_formats() {
        let logger = ConsoleLogger::with_color(false);
        assert_eq!(
            logger.format_warn("gem rails not found in Gemfile.lock"),
            "  BAUError gem rails not found in Gemfile.lock"
        );
        assert_eq!(logger.format_command("bundle update"), "    > bundle update");
    }

    #[test]
    fn test_console_logger_colored_keeps_text() {
        let logger = ConsoleLogger::new();
        assert!(logger.format_command("bundle install").contains("bundle install"));
    }

    #[test]
    fn test_memory_logger_records_in_order() {
        let logger = MemoryLogger::new();
        logger.info("one");
        logger.warn("two");
        logger.command("three");

        let entries = logger.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].level, LogLevel::Info);
        assert_eq!(entries[1].message, "two");
        assert_eq!(logger.warnings(), vec!["two"]);
        assert_eq!(logger.commands(), vec!["three"]);
    }
}
