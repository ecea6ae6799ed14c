use crate::{FixOutcome, Issue, Scope};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for secpol reports.
pub const SCHEMA_REPORT_V1: &str = "secpol.report.v1";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Issues found for one enabled policy. Policies without issues are still listed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyReport {
    pub id: String,
    pub name: String,
    pub issues: Vec<Issue>,
}

/// One attempted remediation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RemediationRecord {
    pub policy_id: String,
    pub rule_id: String,
    pub scope: Scope,
    #[serde(flatten)]
    pub outcome: FixOutcome,
}

/// Secpol-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct SecpolData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    pub include_disabled: bool,

    pub policies_enabled: u32,
    pub rules_evaluated: u32,
    pub issues_total: u32,

    /// Domains the target snapshot did not provide; their rules passed vacuously.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_scopes: Vec<Scope>,
}

/// Report envelope written by `secpol check` and `secpol fix`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = SecpolData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub policies: Vec<PolicyReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remediations: Vec<RemediationRecord>,
    pub data: TData,
}

pub type SecpolReport = ReportEnvelope<SecpolData>;
