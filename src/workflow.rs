use crate::audit::{self, AuditResult, Classifier};
use crate::config::AuditConfig;
use crate::error::{EXIT_SINK_FAILURE, MAX_FINDINGS_EXIT, Result};
use crate::gradle::GradleTaskRunner;
use crate::report::ReportReader;
use crate::sink::{self, SinkFailure, SinkKind, SinkSet};
use colored::Colorize;
use jiff::Zoned;

/// Flags that shape a single audit run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Re-run the Gradle report task before reading the report.
    pub regenerate: bool,
    /// Print the audit block to stdout instead of appending to the sinks.
    pub dry_run: bool,
}

/// Everything the caller needs to decide the process exit code.
#[derive(Debug)]
pub struct AuditOutcome {
    pub result: AuditResult,
    pub sink_failures: Vec<SinkFailure>,
}

impl AuditOutcome {
    /// Exit code for this outcome: the finding count capped at the
    /// reserved boundary, or the degraded-persistence code when any
    /// sink write failed.
    pub fn exit_code(&self) -> i32 {
        if !self.sink_failures.is_empty() {
            return EXIT_SINK_FAILURE;
        }
        i32::try_from(self.result.count()).map_or(MAX_FINDINGS_EXIT, |count| {
            count.min(MAX_FINDINGS_EXIT)
        })
    }
}

/// Run the full audit: optionally regenerate the report, read and
/// classify it, then record the findings.
pub fn execute_audit(config: &AuditConfig, options: &RunOptions) -> Result<AuditOutcome> {
    println!("{}", "Auditing dependency freshness...".cyan().bold());

    if options.regenerate {
        println!("\n{}", "1. Regenerating the dependency report...".yellow());
        let runner = GradleTaskRunner::new(&config.project_path, &config.gradle_task);
        match runner.run() {
            Ok(()) => println!("{}", "✓ Report regenerated".green()),
            // A stale report is still auditable, so a failed task run
            // downgrades to a warning.
            Err(e) => println!(
                "{}",
                format!("⚠ Report regeneration failed ({}), auditing the existing report", e)
                    .yellow()
            ),
        }
    } else {
        println!(
            "\n{}",
            "1. Using the existing dependency report (pass --run-task to regenerate)".yellow()
        );
    }

    // One timestamp per run, taken after regeneration so it reflects
    // when the report was actually inspected.
    let timestamp = Zoned::now();

    println!("\n{}", "2. Reading the dependency report...".yellow());
    let reader = ReportReader::new(&config.report_path);
    let report = reader.load()?;
    println!(
        "{}",
        format!("✓ {} update candidates", report.candidates().len()).green()
    );

    println!("\n{}", "3. Classifying update candidates...".yellow());
    let classifier = Classifier::new(config.ignore.clone())?;
    let result = audit::collect_findings(&report, &classifier);
    println!(
        "{}",
        format!(
            "✓ {} reportable, {} filtered out",
            result.count(),
            report.candidates().len() - result.count()
        )
        .green()
    );

    if result.is_empty() {
        println!("\n{}", "✨ All tracked dependencies are fresh!".green().bold());
        return Ok(AuditOutcome {
            result,
            sink_failures: Vec::new(),
        });
    }

    let sink_failures = if options.dry_run {
        println!("\n{}", "4. Dry run, printing the audit block...".yellow());
        for line in sink::audit_block(&result, &timestamp) {
            println!("{}", line);
        }
        Vec::new()
    } else {
        println!("\n{}", "4. Recording the findings...".yellow());
        let sinks = SinkSet::from_config(config, &timestamp);
        let failures = sinks.write_all(&result, &timestamp);
        for failure in &failures {
            eprintln!("{} {}", "✗".red(), failure);
        }
        for sink in sinks.sinks() {
            if failures.iter().all(|f| f.path.as_path() != sink.path()) {
                println!(
                    "{}",
                    format!("✓ Appended to {}", sink.path().display()).green()
                );
            }
        }
        // Only point at the definitions file when it was actually written.
        if failures.iter().all(|f| f.kind != SinkKind::Definitions) {
            println!(
                "\n{}",
                format!(
                    "Found {} outdated dependencies, see '{}' for details",
                    result.count(),
                    config.definitions_path.display()
                )
                .cyan()
            );
        }
        failures
    };

    Ok(AuditOutcome {
        result,
        sink_failures,
    })
}
