use crate::error::{AuditError, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "depaudit.toml";

/// Defaults mirror the Gradle versions-plugin configuration this tool audits:
/// `outputDir = "build/dependencyUpdates"`, `reportfileName = "dependencies"`,
/// JSON formatter, report generated for the `app` module.
const DEFAULT_REPORT_PATH: &str = "app/build/dependencyUpdates/dependencies.json";
const DEFAULT_OUTPUT_DIR: &str = "dependency_updates";
const DEFAULT_DEFINITIONS_FILE: &str = "dependency_updates/definitions.txt";
const DEFAULT_GRADLE_TASK: &str = "app:dependencyUpdates";

/// Optional `depaudit.toml` overlay. Every key is optional; unknown keys are
/// tolerated for forward compatibility.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ConfigFile {
    report: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    definitions_file: Option<PathBuf>,
    gradle_task: Option<String>,
    ignore: Option<Vec<String>>,
}

/// Immutable run configuration, constructed once at process start and passed
/// into each component. Nothing here changes after startup; in particular,
/// timestamps are NOT part of the configuration and are captured by the
/// orchestrator when it actually needs them.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub project_path: PathBuf,
    pub report_path: PathBuf,
    pub log_dir: PathBuf,
    pub definitions_path: PathBuf,
    pub gradle_task: String,
    pub ignore: BTreeSet<String>,
}

impl AuditConfig {
    /// Build the configuration for a project directory, overlaying
    /// `depaudit.toml` when present. An explicitly passed config file must
    /// exist; the default one may be absent.
    pub fn load<P: AsRef<Path>>(project_path: P, config_path: Option<&Path>) -> Result<Self> {
        let project_path = project_path.as_ref().to_path_buf();
        if !project_path.is_dir() {
            return Err(AuditError::Config(format!(
                "project path '{}' is not a directory",
                project_path.display()
            )));
        }

        let file = Self::read_config_file(&project_path, config_path)?;

        // join() keeps absolute overrides as-is and anchors relative ones at
        // the project directory.
        Ok(Self {
            report_path: project_path
                .join(file.report.unwrap_or_else(|| DEFAULT_REPORT_PATH.into())),
            log_dir: project_path
                .join(file.output_dir.unwrap_or_else(|| DEFAULT_OUTPUT_DIR.into())),
            definitions_path: project_path.join(
                file.definitions_file
                    .unwrap_or_else(|| DEFAULT_DEFINITIONS_FILE.into()),
            ),
            gradle_task: file
                .gradle_task
                .unwrap_or_else(|| DEFAULT_GRADLE_TASK.to_string()),
            ignore: file.ignore.unwrap_or_default().into_iter().collect(),
            project_path,
        })
    }

    fn read_config_file(project_path: &Path, config_path: Option<&Path>) -> Result<ConfigFile> {
        let path = match config_path {
            Some(explicit) => explicit.to_path_buf(),
            None => {
                let default = project_path.join(CONFIG_FILE_NAME);
                if !default.exists() {
                    return Ok(ConfigFile::default());
                }
                default
            }
        };

        if std::env::var("DEPAUDIT_VERBOSE").is_ok() {
            eprintln!("[VERBOSE] Loading config: {}", path.display());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            AuditError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;

        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_apply_without_config_file() {
        let dir = tempdir().unwrap();
        let config = AuditConfig::load(dir.path(), None).unwrap();

        assert_eq!(
            config.report_path,
            dir.path().join("app/build/dependencyUpdates/dependencies.json")
        );
        assert_eq!(config.log_dir, dir.path().join("dependency_updates"));
        assert_eq!(
            config.definitions_path,
            dir.path().join("dependency_updates/definitions.txt")
        );
        assert_eq!(config.gradle_task, "app:dependencyUpdates");
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("depaudit.toml"),
            r#"
report = "build/report.json"
output-dir = "audits"
definitions-file = "audits/history.txt"
gradle-task = "dependencyUpdates"
ignore = ["com.example:lib", "org.other:thing"]
"#,
        )
        .unwrap();

        let config = AuditConfig::load(dir.path(), None).unwrap();
        assert_eq!(config.report_path, dir.path().join("build/report.json"));
        assert_eq!(config.log_dir, dir.path().join("audits"));
        assert_eq!(config.definitions_path, dir.path().join("audits/history.txt"));
        assert_eq!(config.gradle_task, "dependencyUpdates");
        assert!(config.ignore.contains("com.example:lib"));
        assert!(config.ignore.contains("org.other:thing"));
    }

    #[test]
    fn duplicate_ignore_entries_collapse_into_a_set() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("depaudit.toml"),
            r#"ignore = ["same:group", "same:group"]"#,
        )
        .unwrap();

        let config = AuditConfig::load(dir.path(), None).unwrap();
        assert_eq!(config.ignore.len(), 1);
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("elsewhere.toml");
        assert!(matches!(
            AuditConfig::load(dir.path(), Some(&missing)),
            Err(AuditError::Config(_))
        ));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("depaudit.toml"), "ignore = [unterminated").unwrap();
        assert!(matches!(
            AuditConfig::load(dir.path(), None),
            Err(AuditError::Toml(_))
        ));
    }

    #[test]
    fn missing_project_directory_is_a_config_error() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("not-here");
        assert!(matches!(
            AuditConfig::load(&gone, None),
            Err(AuditError::Config(_))
        ));
    }

    #[test]
    fn unknown_config_keys_are_tolerated() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("depaudit.toml"),
            r#"
ignore = ["a:b"]
future-knob = true
"#,
        )
        .unwrap();

        let config = AuditConfig::load(dir.path(), None).unwrap();
        assert_eq!(config.ignore.len(), 1);
    }
}
