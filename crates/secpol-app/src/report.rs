use anyhow::Context;
use secpol_render::{
    RenderableData, RenderableIssue, RenderablePolicy, RenderableRemediation, RenderableReport,
    RenderableVerdict,
};
use secpol_types::{FixOutcome, SCHEMA_REPORT_V1, SecpolReport, Verdict};

pub fn parse_report_json(text: &str) -> anyhow::Result<SecpolReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    anyhow::ensure!(
        schema == SCHEMA_REPORT_V1,
        "unknown report schema: {schema} (expected {SCHEMA_REPORT_V1})"
    );

    serde_json::from_value(value).context("parse secpol report")
}

pub fn serialize_report(report: &SecpolReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &SecpolReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdict::Pass,
            Verdict::Fail => RenderableVerdict::Fail,
        },
        policies: report
            .policies
            .iter()
            .map(|p| RenderablePolicy {
                id: p.id.clone(),
                name: p.name.clone(),
                issues: p
                    .issues
                    .iter()
                    .map(|i| RenderableIssue {
                        rule_id: i.rule_id.clone(),
                        scope: i.scope.to_string(),
                        message: i.message.clone(),
                    })
                    .collect(),
            })
            .collect(),
        remediations: report
            .remediations
            .iter()
            .map(|r| RenderableRemediation {
                policy_id: r.policy_id.clone(),
                rule_id: r.rule_id.clone(),
                outcome: describe_outcome(r.outcome),
            })
            .collect(),
        data: RenderableData {
            scope: report.data.scope.map(|s| s.to_string()),
            include_disabled: report.data.include_disabled,
            rules_evaluated: report.data.rules_evaluated,
            issues_total: report.data.issues_total,
            missing_scopes: report
                .data
                .missing_scopes
                .iter()
                .map(|s| s.to_string())
                .collect(),
        },
    }
}

fn describe_outcome(outcome: FixOutcome) -> String {
    match outcome {
        FixOutcome::Fixed { changed } => format!("fixed ({changed} changed)"),
        FixOutcome::NothingToFix => "nothing to fix".to_string(),
        FixOutcome::NotFixable => "not fixable".to_string(),
    }
}
