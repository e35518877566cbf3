use crate::error::{AuditError, Result};
use crate::report::UpdateCandidate;
use regex::Regex;
use std::collections::BTreeSet;

/// A milestone counts as a plain numeric release only when it is digits and
/// dot separators, nothing else. Anchored on both ends; the empty string does
/// not match, and any qualifier ("-rc1", "-beta") disqualifies the candidate.
const MILESTONE_PATTERN: &str = "^[0-9.]+$";

/// Classifier decides which update candidates are worth reporting.
///
/// Pure and stable: the same candidate always classifies the same way, which
/// keeps audit records reproducible across reruns of the same report.
pub struct Classifier {
    milestone_pattern: Regex,
    ignored: BTreeSet<String>,
}

impl Classifier {
    pub fn new(ignored: BTreeSet<String>) -> Result<Self> {
        let milestone_pattern = Regex::new(MILESTONE_PATTERN)
            .map_err(|e| AuditError::Config(format!("Invalid milestone pattern: {}", e)))?;
        Ok(Self {
            milestone_pattern,
            ignored,
        })
    }

    /// A candidate is reportable iff its available milestone is a plain
    /// numeric release and its group is not on the ignore list. Pre-releases
    /// stay visible in the raw report; they are just not flagged.
    pub fn is_reportable(&self, candidate: &UpdateCandidate) -> bool {
        self.milestone_pattern
            .is_match(&candidate.available.milestone)
            && !self.ignored.contains(&candidate.group)
    }

    pub fn ignored_groups(&self) -> &BTreeSet<String> {
        &self.ignored
    }
}
