use serde::Deserialize;

/// Parsed form of the JSON report written by the Gradle versions plugin's
/// `dependencyUpdates` task. Only the keys the audit needs are modeled; the
/// report carries more (artifact name, project URL, alternate release
/// channels) and serde skips those.
#[derive(Debug, Clone, Deserialize)]
pub struct DependencyReport {
    pub outdated: OutdatedSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutdatedSection {
    pub dependencies: Vec<UpdateCandidate>,
}

/// One dependency for which the build observed a newer version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateCandidate {
    pub group: String,
    pub version: String,
    pub available: AvailableVersion,
}

/// The plugin's term for the candidate target version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AvailableVersion {
    pub milestone: String,
}

impl DependencyReport {
    pub fn candidates(&self) -> &[UpdateCandidate] {
        &self.outdated.dependencies
    }
}
