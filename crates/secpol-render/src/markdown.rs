use crate::{RenderableReport, RenderableVerdict};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Security policy report\n\n");
    let verdict = match report.verdict {
        RenderableVerdict::Pass => "PASS",
        RenderableVerdict::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Issues: {} ({} rules evaluated)\n- Scope: {}\n- Disabled rules: {}\n\n",
        verdict,
        report.data.issues_total,
        report.data.rules_evaluated,
        report.data.scope.as_deref().unwrap_or("all"),
        if report.data.include_disabled {
            "included"
        } else {
            "skipped"
        },
    ));

    if !report.data.missing_scopes.is_empty() {
        out.push_str(&format!(
            "> Note: no snapshot for {}; those rules were not checked.\n\n",
            report.data.missing_scopes.join(", ")
        ));
    }

    if report.policies.is_empty() {
        out.push_str("No security policy enabled.\n");
        return out;
    }

    for policy in &report.policies {
        out.push_str(&format!("## {} (`{}`)\n\n", policy.name, policy.id));
        if policy.issues.is_empty() {
            out.push_str("No issues.\n\n");
            continue;
        }
        for issue in &policy.issues {
            out.push_str(&format!(
                "- `{}` [{}] {}\n",
                issue.rule_id, issue.scope, issue.message
            ));
        }
        out.push('\n');
    }

    if !report.remediations.is_empty() {
        out.push_str("## Remediations\n\n");
        for r in &report.remediations {
            out.push_str(&format!("- `{}` / `{}`: {}\n", r.policy_id, r.rule_id, r.outcome));
        }
        out.push('\n');
    }

    out
}
