use crate::{RenderableReport, RenderableVerdict};

/// Plain terminal output: one line per issue, then a summary line.
///
/// Format: `{policy_id}: {rule_id} [{scope}] {message}`
pub fn render_text(report: &RenderableReport) -> String {
    let mut out = String::new();

    for policy in &report.policies {
        for issue in &policy.issues {
            out.push_str(&format!(
                "{}: {} [{}] {}\n",
                policy.id,
                issue.rule_id,
                issue.scope,
                issue.message.replace('\n', " ")
            ));
        }
    }

    for r in &report.remediations {
        out.push_str(&format!("{}: {} {}\n", r.policy_id, r.rule_id, r.outcome));
    }

    let verdict = match report.verdict {
        RenderableVerdict::Pass => "PASS",
        RenderableVerdict::Fail => "FAIL",
    };
    out.push_str(&format!(
        "{}: {} issue(s) in {} polic{}\n",
        verdict,
        report.data.issues_total,
        report.policies.len(),
        if report.policies.len() == 1 { "y" } else { "ies" }
    ));

    out
}
