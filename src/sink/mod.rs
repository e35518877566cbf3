use crate::audit::AuditResult;
use crate::config::AuditConfig;
use jiff::Zoned;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The two durable destinations an audit run records to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// Plain-text log, one file per calendar month, shared by every run in
    /// that month. Supports historical trend review.
    MonthlyLog,
    /// Long-lived definitions artifact accumulating one comment block per
    /// run. Never truncated; pruning is a manual affair.
    Definitions,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SinkKind::MonthlyLog => "monthly log",
            SinkKind::Definitions => "definitions file",
        };
        f.write_str(label)
    }
}

/// A destination that could not be written. Destinations are independent:
/// one failure never rolls back or blocks the other, so failures are
/// collected per sink instead of aborting the run.
#[derive(Debug, Error)]
#[error("{kind} '{}' could not be written: {source}", path.display())]
pub struct SinkFailure {
    pub kind: SinkKind,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Render the lines of one audit block. Both sinks write exactly these lines
/// (the definitions sink only adds a comment prefix), so the two records can
/// never drift apart.
pub fn audit_block(result: &AuditResult, timestamp: &Zoned) -> Vec<String> {
    let mut lines = Vec::with_capacity(result.count() + 4);
    lines.push(format!(
        "---- dependency audit {} ----",
        timestamp.strftime("%Y-%m-%d %H:%M:%S")
    ));
    lines.push(format!("{} outdated dependencies", result.count()));
    lines.extend(result.findings.iter().map(|f| f.text.clone()));
    if !result.ignored_groups.is_empty() {
        lines.push("ignored groups:".to_string());
        lines.extend(result.ignored_groups.iter().map(|g| format!("  {g}")));
    }
    lines
}

/// One append-only destination.
pub struct Sink {
    kind: SinkKind,
    path: PathBuf,
}

impl Sink {
    pub fn new<P: AsRef<Path>>(kind: SinkKind, path: P) -> Self {
        Self {
            kind,
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one block to the destination, creating the file (and its parent
    /// directories) when absent. Create-and-append happen in a single open,
    /// so there is no window between checking for the file and writing it.
    pub fn append(&self, lines: &[String]) -> std::result::Result<(), SinkFailure> {
        if std::env::var("DEPAUDIT_VERBOSE").is_ok() {
            eprintln!(
                "[VERBOSE] Appending {} lines to {}",
                lines.len(),
                self.path.display()
            );
        }

        self.try_append(lines).map_err(|source| SinkFailure {
            kind: self.kind,
            path: self.path.clone(),
            source,
        })
    }

    fn try_append(&self, lines: &[String]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(self.decorate(lines).as_bytes())
    }

    fn decorate(&self, lines: &[String]) -> String {
        let mut block = String::new();
        for line in lines {
            if self.kind == SinkKind::Definitions {
                block.push_str("# ");
            }
            block.push_str(line);
            block.push('\n');
        }
        // Blank separator line closes the block in both artifacts.
        block.push('\n');
        block
    }
}

/// The per-run pair of destinations.
pub struct SinkSet {
    sinks: Vec<Sink>,
}

impl SinkSet {
    /// The monthly log filename is derived from the run timestamp, so every
    /// run within a calendar month lands in the same file.
    pub fn from_config(config: &AuditConfig, timestamp: &Zoned) -> Self {
        let log_name = format!("{}.log", timestamp.strftime("%Y-%m"));
        Self {
            sinks: vec![
                Sink::new(SinkKind::MonthlyLog, config.log_dir.join(log_name)),
                Sink::new(SinkKind::Definitions, config.definitions_path.clone()),
            ],
        }
    }

    pub fn sinks(&self) -> &[Sink] {
        &self.sinks
    }

    /// Write the block to every destination, best effort per target. An empty
    /// result writes nothing at all: empty runs must not pollute the logs.
    pub fn write_all(&self, result: &AuditResult, timestamp: &Zoned) -> Vec<SinkFailure> {
        if result.is_empty() {
            return Vec::new();
        }

        let lines = audit_block(result, timestamp);
        self.sinks
            .iter()
            .filter_map(|sink| sink.append(&lines).err())
            .collect()
    }
}
