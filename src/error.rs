use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Gradle execution failed: {0}")]
    GradleExecution(String),

    #[error("Dependency report unavailable: {0}")]
    ReportUnavailable(String),

    #[error("Dependency report schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AuditError>;

/// Exit status for a run aborted by a fatal error (unreadable report,
/// broken configuration). Reserved so it can never be confused with a
/// findings count.
pub const EXIT_FATAL: i32 = 255;

/// Exit status when at least one audit sink could not be written. The run
/// still classified, but the record is degraded and automation must notice.
pub const EXIT_SINK_FAILURE: i32 = 254;

/// Findings counts map directly to the exit status and are clamped here so
/// they stay clear of the reserved codes above.
pub const MAX_FINDINGS_EXIT: i32 = 253;
