mod audit;
mod cli;
mod config;
mod error;
mod gradle;
mod report;
mod sink;
mod workflow;

use cli::Cli;
use colored::Colorize;
use config::AuditConfig;
use error::Result;
use std::process;
use workflow::{AuditOutcome, RunOptions};

fn main() {
    let cli = Cli::parse_args();

    if cli.verbose {
        unsafe {
            std::env::set_var("DEPAUDIT_VERBOSE", "1");
        }
        if !cli.extra.is_empty() {
            eprintln!("[VERBOSE] Ignoring unrecognized arguments: {:?}", cli.extra);
        }
    }

    let code = match run(&cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            error::EXIT_FATAL
        }
    };

    process::exit(code);
}

fn run(cli: &Cli) -> Result<AuditOutcome> {
    let config = AuditConfig::load(&cli.path, cli.config.as_deref())?;
    workflow::execute_audit(
        &config,
        &RunOptions {
            regenerate: cli.run_task,
            dry_run: cli.no_write,
        },
    )
}
