#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdict {
    Pass,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableIssue {
    pub rule_id: String,
    pub scope: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderablePolicy {
    pub id: String,
    pub name: String,
    pub issues: Vec<RenderableIssue>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableRemediation {
    pub policy_id: String,
    pub rule_id: String,
    /// `fixed (N changed)`, `nothing to fix` or `not fixable`.
    pub outcome: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableData {
    pub scope: Option<String>,
    pub include_disabled: bool,
    pub rules_evaluated: u32,
    pub issues_total: u32,
    pub missing_scopes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdict,
    pub policies: Vec<RenderablePolicy>,
    pub remediations: Vec<RenderableRemediation>,
    pub data: RenderableData,
}
