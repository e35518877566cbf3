pub mod classifier;
pub mod formatter;

pub use classifier::Classifier;
pub use formatter::render;

use crate::report::DependencyReport;
use std::collections::BTreeSet;

/// Canonical rendering of one qualifying update candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub text: String,
}

/// Everything one audit run concluded: the findings in report order, plus the
/// ignore list that was in force, so a written record stays self-describing
/// without the configuration that produced it.
#[derive(Debug, Clone)]
pub struct AuditResult {
    pub findings: Vec<Finding>,
    pub ignored_groups: BTreeSet<String>,
}

impl AuditResult {
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn count(&self) -> usize {
        self.findings.len()
    }
}

/// Run every candidate through the classifier and render the survivors.
///
/// Report order is preserved and duplicates are kept: two candidates that
/// render identically are both emitted.
pub fn collect_findings(report: &DependencyReport, classifier: &Classifier) -> AuditResult {
    let findings = report
        .candidates()
        .iter()
        .filter(|candidate| classifier.is_reportable(candidate))
        .map(render)
        .collect();

    AuditResult {
        findings,
        ignored_groups: classifier.ignored_groups().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::UpdateCandidate;
    use crate::report::schema::AvailableVersion;

    fn report_of(entries: &[(&str, &str, &str)]) -> DependencyReport {
        let dependencies = entries
            .iter()
            .map(|(group, version, milestone)| UpdateCandidate {
                group: group.to_string(),
                version: version.to_string(),
                available: AvailableVersion {
                    milestone: milestone.to_string(),
                },
            })
            .collect();
        DependencyReport {
            outdated: crate::report::schema::OutdatedSection { dependencies },
        }
    }

    #[test]
    fn keeps_report_order() {
        let report = report_of(&[
            ("z.last:lib", "1.0", "2.0"),
            ("a.first:lib", "1.0", "2.0"),
        ]);
        let result = collect_findings(&report, &Classifier::new(BTreeSet::new()).unwrap());
        assert_eq!(result.findings[0].text, "z.last:lib:  1.0 -> 2.0");
        assert_eq!(result.findings[1].text, "a.first:lib:  1.0 -> 2.0");
    }

    #[test]
    fn filters_prereleases_and_ignored_groups() {
        let report = report_of(&[
            ("keep:lib", "1.0", "2.0"),
            ("prerelease:lib", "1.0", "2.0-rc1"),
            ("ignored:lib", "1.0", "2.0"),
        ]);
        let ignored: BTreeSet<String> = ["ignored:lib".to_string()].into_iter().collect();
        let result = collect_findings(&report, &Classifier::new(ignored.clone()).unwrap());

        assert_eq!(result.count(), 1);
        assert_eq!(result.findings[0].text, "keep:lib:  1.0 -> 2.0");
        assert_eq!(result.ignored_groups, ignored);
    }

    #[test]
    fn identical_candidates_are_not_deduplicated() {
        let report = report_of(&[("same:lib", "1.0", "2.0"), ("same:lib", "1.0", "2.0")]);
        let result = collect_findings(&report, &Classifier::new(BTreeSet::new()).unwrap());
        assert_eq!(result.count(), 2);
        assert_eq!(result.findings[0], result.findings[1]);
    }

    #[test]
    fn empty_report_yields_empty_result() {
        let result = collect_findings(&report_of(&[]), &Classifier::new(BTreeSet::new()).unwrap());
        assert!(result.is_empty());
        assert_eq!(result.count(), 0);
    }
}
