//! The `policies` use case: list the registry with each policy's state and rules, plus
//! the security module settings the configuration resolves to.

use secpol_domain::Manager;
use secpol_settings::LsmConfig;
use secpol_types::Scope;

use crate::check::{CheckInput, configure};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleSummary {
    pub id: String,
    pub name: String,
    pub scope: Scope,
    pub disabled: bool,
    pub fixable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicySummary {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub packages: Vec<String>,
    pub rules: Vec<RuleSummary>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoliciesOutput {
    pub policies: Vec<PolicySummary>,
    pub lsm: LsmConfig,
}

/// List the registry as a check run with `input` would see it. The target is not read.
pub fn run_policies(input: CheckInput<'_>) -> anyhow::Result<PoliciesOutput> {
    let (resolved, manager) = configure(&input)?;
    Ok(PoliciesOutput {
        policies: list_policies(&manager),
        lsm: resolved.lsm,
    })
}

pub fn list_policies(manager: &Manager) -> Vec<PolicySummary> {
    manager
        .policies()
        .iter()
        .map(|policy| PolicySummary {
            id: policy.id().to_string(),
            name: policy.name().to_string(),
            enabled: manager.enabled_policy(policy),
            packages: policy.packages().to_vec(),
            rules: policy
                .rules()
                .iter()
                .map(|rule| RuleSummary {
                    id: rule.id().to_string(),
                    name: rule.name().to_string(),
                    scope: rule.scope(),
                    disabled: rule.disabled(),
                    fixable: rule.fixable(),
                })
                .collect(),
        })
        .collect()
}

pub fn format_policies(policies: &[PolicySummary]) -> String {
    let mut out = String::new();

    for policy in policies {
        let state = if policy.enabled { "enabled" } else { "disabled" };
        out.push_str(&format!("{} ({}) [{}]\n", policy.id, policy.name, state));
        if !policy.packages.is_empty() {
            out.push_str(&format!("  packages: {}\n", policy.packages.join(", ")));
        }
        for rule in &policy.rules {
            let mut flags = Vec::new();
            if rule.fixable {
                flags.push("fixable");
            }
            if rule.disabled {
                flags.push("disabled");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" ({})", flags.join(", "))
            };
            out.push_str(&format!(
                "  - {} {} [{}]{}\n",
                rule.id, rule.name, rule.scope, flags
            ));
        }
    }

    out
}

pub fn format_lsm(lsm: &LsmConfig) -> String {
    let mut out = format!("lsm: {}", lsm.selected);
    if lsm.configurable {
        out.push_str(" (configurable)");
    }
    out.push('\n');

    push_module(
        &mut out,
        &format!("selinux, mode {}", lsm.selinux.mode),
        lsm.selinux.configurable,
        lsm.selinux.selectable,
        &lsm.selinux.patterns,
    );
    push_module(
        &mut out,
        "apparmor",
        lsm.apparmor.configurable,
        lsm.apparmor.selectable,
        &lsm.apparmor.patterns,
    );

    out
}

fn push_module(
    out: &mut String,
    label: &str,
    configurable: bool,
    selectable: bool,
    patterns: &[String],
) {
    let mut flags = Vec::new();
    if configurable {
        flags.push("configurable");
    }
    if selectable {
        flags.push("selectable");
    }
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" ({})", flags.join(", "))
    };
    out.push_str(&format!("  - {label}{flags}\n"));
    if !patterns.is_empty() {
        out.push_str(&format!("    patterns: {}\n", patterns.join(", ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secpol_settings::{LsmModuleId, SelinuxMode};
    use secpol_types::ids::{self, ENV_SECURITY_POLICIES};

    #[test]
    fn lists_catalog_with_enabled_state() {
        let manager = Manager::from_vars([(ENV_SECURITY_POLICIES, "disa_stig")]);
        let policies = list_policies(&manager);

        assert_eq!(policies.len(), 1);
        assert!(policies[0].enabled);
        assert_eq!(policies[0].packages, ["scap-security-guide"]);
        assert_eq!(policies[0].rules.len(), 7);
        assert!(
            policies[0]
                .rules
                .iter()
                .any(|r| r.id == ids::RULE_NO_WIRELESS && r.fixable)
        );
    }

    #[test]
    fn run_policies_applies_config_and_ssg_apply() {
        let PoliciesOutput { policies, lsm } = run_policies(CheckInput {
            config_text: "policies = [\"disa_stig\"]",
            ssg_apply_text: Some("disabled-rules = grub2_password\n"),
            ..CheckInput::default()
        })
        .expect("run_policies");
        assert_eq!(lsm, LsmConfig::default());

        assert!(policies[0].enabled);
        let grub = policies[0]
            .rules
            .iter()
            .find(|r| r.id == ids::RULE_BOOTLOADER_PASSWORD)
            .expect("bootloader rule");
        assert!(grub.disabled);
    }

    #[test]
    fn format_marks_state_and_flags() {
        let mut manager = Manager::default();
        manager.apply_disabled_rules(&[ids::NAME_PARTITION_HOME]);
        let text = format_policies(&list_policies(&manager));

        assert!(text.starts_with("disa_stig (Defense Information Systems Agency STIG) [disabled]\n"));
        assert!(text.contains("  - SLES-15-010380 wireless_disable_interfaces [network] (fixable)\n"));
        assert!(text.contains("  - SLES-15-040200 partition_for_home [storage] (disabled)\n"));
    }

    #[test]
    fn run_policies_reports_the_lsm_section() {
        let output = run_policies(CheckInput {
            config_text: r#"
                [lsm]
                select = "selinux"
                configurable = false

                [lsm.selinux]
                mode = "enforcing"
                selectable = true
                patterns = ["selinux", "container-selinux"]
            "#,
            ..CheckInput::default()
        })
        .expect("run_policies");

        assert_eq!(output.lsm.selected, LsmModuleId::Selinux);
        assert_eq!(output.lsm.selinux.mode, SelinuxMode::Enforcing);

        let text = format_lsm(&output.lsm);
        assert_eq!(
            text,
            "lsm: selinux\n  - selinux, mode enforcing (selectable)\n    patterns: selinux, container-selinux\n  - apparmor\n"
        );
    }

    #[test]
    fn default_lsm_is_configurable_apparmor() {
        let text = format_lsm(&LsmConfig::default());
        assert!(text.starts_with("lsm: apparmor (configurable)\n"));
        assert!(text.contains("  - selinux, mode disabled\n"));
    }
}
