//! Built-in policy definitions.
//!
//! Keep these small and readable: a policy is an id, a display name, the packages it
//! needs, and its rules in reporting order.

use crate::error::DomainError;
use crate::policy::Policy;
use crate::rules::Rule;
use secpol_types::ids;

type PolicyCtor = fn() -> Policy;

const CATALOG: &[(&str, PolicyCtor)] = &[(ids::POLICY_DISA_STIG, disa_stig)];

/// Every policy the tool knows, in registry order.
pub fn known_policies() -> Vec<Policy> {
    CATALOG.iter().map(|(_, ctor)| ctor()).collect()
}

/// Builds the policy registered under `id` (case-insensitive).
pub fn build(id: &str) -> Result<Policy, DomainError> {
    CATALOG
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(id.trim()))
        .map(|(_, ctor)| ctor())
        .ok_or_else(|| DomainError::NoValidator(id.to_string()))
}

pub fn disa_stig() -> Policy {
    Policy::new(
        ids::POLICY_DISA_STIG,
        "Defense Information Systems Agency STIG",
    )
    .with_packages(["scap-security-guide"])
    .with_rules(vec![
        Rule::no_wireless(ids::RULE_NO_WIRELESS, ids::NAME_NO_WIRELESS),
        Rule::missing_mount_point(ids::RULE_PARTITION_HOME, ids::NAME_PARTITION_HOME, "/home"),
        Rule::missing_mount_point(ids::RULE_PARTITION_VAR, ids::NAME_PARTITION_VAR, "/var"),
        Rule::missing_mount_point(
            ids::RULE_PARTITION_VAR_LOG_AUDIT,
            ids::NAME_PARTITION_VAR_LOG_AUDIT,
            "/var/log/audit",
        ),
        Rule::encrypted_partitions(ids::RULE_ENCRYPT_PARTITIONS, ids::NAME_ENCRYPT_PARTITIONS),
        Rule::firewall_enabled(ids::RULE_FIREWALL_ENABLED, ids::NAME_FIREWALL_ENABLED),
        Rule::bootloader_password(ids::RULE_BOOTLOADER_PASSWORD, ids::NAME_BOOTLOADER_PASSWORD),
    ])
}
