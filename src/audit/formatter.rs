use crate::audit::Finding;
use crate::report::UpdateCandidate;

/// Render a candidate into its canonical one-line form:
/// `{group}:  {current} -> {milestone}`.
///
/// The two spaces after the colon are part of the format and must not be
/// collapsed; existing tooling greps the audit logs for exactly this shape.
pub fn render(candidate: &UpdateCandidate) -> Finding {
    Finding {
        text: format!(
            "{}:  {} -> {}",
            candidate.group, candidate.version, candidate.available.milestone
        ),
    }
}
