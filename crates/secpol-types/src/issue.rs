use crate::Scope;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A failed rule, as reported to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Issue {
    pub message: String,
    pub scope: Scope,
    pub rule_id: String,

    /// Stable identifier intended for dedup and trending, filled in by the report layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl Issue {
    pub fn new(message: impl Into<String>, scope: Scope, rule_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            scope,
            rule_id: rule_id.into(),
            fingerprint: None,
        }
    }
}

/// Result of applying a rule's remediation to a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FixOutcome {
    /// The snapshot was changed; `changed` counts the touched entries.
    Fixed { changed: u32 },
    /// The rule already holds; nothing was touched.
    NothingToFix,
    /// The rule has no automatic remediation.
    NotFixable,
}

impl FixOutcome {
    pub fn is_fixed(self) -> bool {
        matches!(self, FixOutcome::Fixed { .. })
    }
}
