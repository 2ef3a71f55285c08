//! bundle-auto-update - update gems and pin the Gemfile
//!
//! Without flags: strip Gemfile constraints, run `bundle update`, pin every
//! gem to `~> <locked version>` and run `bundle install`.
//! With `-noupdate`: only pin from the current Gemfile.lock and install.

use anyhow::Context;
use bundle_auto_update::cli::CliArgs;
use bundle_auto_update::command::SystemRunner;
use bundle_auto_update::config::Settings;
use bundle_auto_update::logger::ConsoleLogger;
use bundle_auto_update::orchestrator::Orchestrator;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CliArgs::parse_normalized();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<()> {
    let root = std::env::current_dir().context("failed to determine current directory")?;
    let settings = Settings::new(root);
    let runner = SystemRunner::new();
    let logger = ConsoleLogger::with_color(std::env::var_os("NO_COLOR").is_none());

    let orchestrator = Orchestrator::new(settings, &runner, &logger);
    let summary = orchestrator.run(args.mode())?;

    println!(
        "Pinned {} gem(s){}",
        summary.pinned.len(),
        if summary.missing.is_empty() {
            String::new()
        } else {
            format!(", {} not in Gemfile.lock", summary.missing.len())
        }
    );
    Ok(())
}
