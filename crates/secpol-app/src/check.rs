//! The `check` and `fix` use cases: evaluate the enabled policies and produce a report.

use anyhow::Context;
use secpol_domain::scope::missing_scopes;
use secpol_domain::{Manager, Remediation, TargetConfig};
use secpol_settings::{FailOn, Overrides, ResolvedConfig};
use secpol_types::{
    PolicyReport, RemediationRecord, ReportEnvelope, SCHEMA_REPORT_V1, SecpolData, SecpolReport,
    ToolMeta, Verdict,
};
use time::OffsetDateTime;

use crate::fingerprint::fingerprint_for_issue;
use crate::target::parse_target_json;

/// Input for the check use case.
#[derive(Clone, Debug, Default)]
pub struct CheckInput<'a> {
    /// Target snapshot JSON (empty string means no domain data).
    pub target_json: &'a str,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// ssg-apply file contents, when one was found.
    pub ssg_apply_text: Option<&'a str>,
    /// Process environment; the activation variable is read from here.
    pub vars: Vec<(String, String)>,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: SecpolReport,
    /// The target after remediation; unchanged by `run_check`.
    pub target: TargetConfig,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Evaluate the enabled policies against the target.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    evaluate(input, false)
}

/// Remediate every failing fixable rule, then evaluate the remediated target.
pub fn run_fix(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    evaluate(input, true)
}

fn evaluate(input: CheckInput<'_>, remediate: bool) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let mut target = parse_target_json(input.target_json)?;
    let (resolved, manager) = configure(&input)?;

    let scope = resolved.scope;
    let include_disabled = resolved.include_disabled;

    let remediations = if remediate {
        manager
            .remediate(&mut target, scope, include_disabled)
            .into_iter()
            .map(remediation_record)
            .collect()
    } else {
        Vec::new()
    };

    let issues = manager.issues(&target, scope, include_disabled);
    let policies: Vec<PolicyReport> = issues
        .iter()
        .map(|(policy, issues)| PolicyReport {
            id: policy.id().to_string(),
            name: policy.name().to_string(),
            issues: issues
                .iter()
                .cloned()
                .map(|mut issue| {
                    issue.fingerprint = Some(fingerprint_for_issue(policy.id().as_str(), &issue));
                    issue
                })
                .collect(),
        })
        .collect();

    let issues_total = issues.total_issues();
    let verdict = match resolved.fail_on {
        FailOn::Any if issues_total > 0 => Verdict::Fail,
        _ => Verdict::Pass,
    };

    let data = SecpolData {
        scope,
        include_disabled,
        policies_enabled: count(manager.enabled_policies().len()),
        rules_evaluated: count(manager.evaluated_rule_count(scope, include_disabled)),
        issues_total: count(issues_total),
        missing_scopes: missing_scopes(&target),
    };

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "secpol".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        policies,
        remediations,
        data,
    };

    Ok(CheckOutput {
        report,
        target,
        resolved_config: resolved,
    })
}

/// Resolve the config and build a manager with the configured policies enabled and
/// the configured rules disabled.
pub(crate) fn configure(input: &CheckInput<'_>) -> anyhow::Result<(ResolvedConfig, Manager)> {
    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        secpol_settings::SecpolConfigV1::default()
    } else {
        secpol_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved = secpol_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let mut manager = Manager::from_vars(input.vars.iter().cloned());
    for id in &resolved.policies {
        enable_by_id(&mut manager, id.as_str());
    }

    let mut disabled_rules = resolved.disabled_rules.clone();
    if let Some(text) = input.ssg_apply_text {
        let ssg = secpol_settings::parse_ssg_apply(text).context("parse ssg-apply file")?;
        if let Some(profile) = ssg.profile() {
            if manager.policies().iter().any(|p| p.id().matches(profile)) {
                enable_by_id(&mut manager, profile);
            } else {
                log::debug!("ssg-apply profile '{profile}' is not a known policy");
            }
        }
        for name in ssg.disabled_rules() {
            if !disabled_rules.contains(&name) {
                disabled_rules.push(name);
            }
        }
    }
    manager.apply_disabled_rules(&disabled_rules);

    Ok((resolved, manager))
}

fn enable_by_id(manager: &mut Manager, id: &str) {
    let found = manager
        .policies()
        .iter()
        .find(|p| p.id().matches(id))
        .cloned();
    if let Some(policy) = found {
        manager.enable_policy(&policy);
    }
}

fn remediation_record(r: Remediation) -> RemediationRecord {
    RemediationRecord {
        policy_id: r.policy_id.to_string(),
        rule_id: r.rule_id,
        scope: r.scope,
        outcome: r.outcome,
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Map verdict to exit code: 0 = pass, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail => 2,
    }
}
