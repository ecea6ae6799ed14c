use crate::lsm::LsmSection;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `secpol.toml` schema v1.
///
/// Every key is optional; missing keys fall back to defaults during resolution.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SecpolConfigV1 {
    /// Optional schema string for tooling (`secpol.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Policy ids to enable in addition to the activation variable.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policies: Vec<String>,

    /// Restrict evaluation to one scope: `storage`, `network`, `firewall`, `bootloader`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Report administratively disabled rules too.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_disabled: Option<bool>,

    /// When to fail the check: `any` (default) or `none`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// Rule names or ids to mark as disabled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_rules: Vec<String>,

    /// Linux Security Module settings, same shape as the install profile section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lsm: Option<LsmSection>,
}
