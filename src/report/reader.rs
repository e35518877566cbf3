use crate::error::{AuditError, Result};
use crate::report::schema::DependencyReport;
use serde_json::error::Category;
use std::fs;
use std::path::{Path, PathBuf};

/// ReportReader loads the dependency report produced by the Gradle task.
///
/// Failures are fatal to the run: a missing or corrupt file maps to
/// `ReportUnavailable`, a well-formed JSON document of the wrong shape maps
/// to `SchemaMismatch`. There are no partial results.
pub struct ReportReader {
    report_path: PathBuf,
}

impl ReportReader {
    pub fn new<P: AsRef<Path>>(report_path: P) -> Self {
        Self {
            report_path: report_path.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> Result<DependencyReport> {
        if std::env::var("DEPAUDIT_VERBOSE").is_ok() {
            eprintln!("[VERBOSE] Reading report: {}", self.report_path.display());
        }

        let content = fs::read_to_string(&self.report_path).map_err(|e| {
            AuditError::ReportUnavailable(format!(
                "failed to read '{}': {}",
                self.report_path.display(),
                e
            ))
        })?;

        serde_json::from_str::<DependencyReport>(&content).map_err(|e| match e.classify() {
            // Well-formed JSON whose keys or types do not match the report
            // schema; the file the task writes would never look like this.
            Category::Data => AuditError::SchemaMismatch(format!(
                "'{}': {}",
                self.report_path.display(),
                e
            )),
            _ => AuditError::ReportUnavailable(format!(
                "invalid JSON in '{}': {}",
                self.report_path.display(),
                e
            )),
        })
    }
}
