//! Explain registry for rules.
//!
//! Maps rule IDs and SCAP rule names to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a rule.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the rule.
    pub title: &'static str,
    /// What the rule checks and why it exists.
    pub description: &'static str,
    /// How to fix violations, and whether `secpol fix` can do it.
    pub remediation: &'static str,
}

/// Look up an explanation by rule id (`SLES-15-040200`) or rule name (`partition_for_home`).
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::RULE_NO_WIRELESS | ids::NAME_NO_WIRELESS => Some(explain_no_wireless()),
        ids::RULE_PARTITION_HOME | ids::NAME_PARTITION_HOME => {
            Some(explain_separate_mount_point("/home"))
        }
        ids::RULE_PARTITION_VAR | ids::NAME_PARTITION_VAR => {
            Some(explain_separate_mount_point("/var"))
        }
        ids::RULE_PARTITION_VAR_LOG_AUDIT | ids::NAME_PARTITION_VAR_LOG_AUDIT => {
            Some(explain_separate_mount_point("/var/log/audit"))
        }
        ids::RULE_ENCRYPT_PARTITIONS | ids::NAME_ENCRYPT_PARTITIONS => {
            Some(explain_encrypt_partitions())
        }
        ids::RULE_FIREWALL_ENABLED | ids::NAME_FIREWALL_ENABLED => Some(explain_firewall()),
        ids::RULE_BOOTLOADER_PASSWORD | ids::NAME_BOOTLOADER_PASSWORD => {
            Some(explain_bootloader_password())
        }
        _ => None,
    }
}

/// List all known rule IDs.
pub fn all_rule_ids() -> &'static [&'static str] {
    &[
        ids::RULE_NO_WIRELESS,
        ids::RULE_PARTITION_HOME,
        ids::RULE_PARTITION_VAR,
        ids::RULE_PARTITION_VAR_LOG_AUDIT,
        ids::RULE_ENCRYPT_PARTITIONS,
        ids::RULE_FIREWALL_ENABLED,
        ids::RULE_BOOTLOADER_PASSWORD,
    ]
}

/// List all known rule names.
pub fn all_rule_names() -> &'static [&'static str] {
    &[
        ids::NAME_NO_WIRELESS,
        ids::NAME_PARTITION_HOME,
        ids::NAME_PARTITION_VAR,
        ids::NAME_PARTITION_VAR_LOG_AUDIT,
        ids::NAME_ENCRYPT_PARTITIONS,
        ids::NAME_FIREWALL_ENABLED,
        ids::NAME_BOOTLOADER_PASSWORD,
    ]
}

fn explain_no_wireless() -> Explanation {
    Explanation {
        title: "Wireless Network Interfaces Disabled",
        description: "\
Detects wireless connections that would be brought up at boot.

A wireless connection is considered active unless its start mode is `off`.
Wireless interfaces widen the attack surface of a server and bypass the
network access controls applied to wired segments.",
        remediation: "\
`secpol fix` sets the start mode of every active wireless connection to `off`.
Running the fix again changes nothing.",
    }
}

fn explain_separate_mount_point(path: &'static str) -> Explanation {
    let description = match path {
        "/home" => {
            "\
Requires a dedicated file system mounted at /home.

Keeping user data on its own file system prevents users from filling the root
file system and allows stricter mount options for user-writable areas."
        }
        "/var" => {
            "\
Requires a dedicated file system mounted at /var.

Daemons write logs, caches and spool data under /var; a separate file system
keeps runaway growth from exhausting the root file system."
        }
        _ => {
            "\
Requires a dedicated file system mounted at /var/log/audit.

The audit trail must survive other log growth; a separate file system keeps
audit records from being lost when /var fills up."
        }
    };

    Explanation {
        title: "Separate Mount Point",
        description,
        remediation: "\
Adjust the partitioning proposal so a file system is mounted at the required
path. This cannot be fixed automatically.",
    }
}

fn explain_encrypt_partitions() -> Explanation {
    Explanation {
        title: "Encrypted File Systems",
        description: "\
Requires every mounted file system except the EFI system partition to sit on an
encrypted device.",
        remediation: "\
Enable encryption for the affected devices in the partitioning proposal. This
cannot be fixed automatically.",
    }
}

fn explain_firewall() -> Explanation {
    Explanation {
        title: "Firewall Enabled",
        description: "\
Requires the firewall service to be both enabled at boot and started.",
        remediation: "\
`secpol fix` enables and starts the firewall in the installation settings.",
    }
}

fn explain_bootloader_password() -> Explanation {
    Explanation {
        title: "Bootloader Password",
        description: "\
Requires a password for editing boot entries when a bootloader is configured.
Without it, anyone with console access can change kernel parameters and boot
into single-user mode.",
        remediation: "\
Set a bootloader password in the bootloader configuration. This cannot be fixed
automatically.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_rule_id_and_name() {
        assert!(lookup_explanation(ids::RULE_NO_WIRELESS).is_some());
        assert!(lookup_explanation(ids::NAME_PARTITION_HOME).is_some());
    }

    #[test]
    fn mount_point_explanations_differ_per_path() {
        let home = lookup_explanation(ids::RULE_PARTITION_HOME).expect("home");
        let audit = lookup_explanation(ids::RULE_PARTITION_VAR_LOG_AUDIT).expect("audit");
        assert!(home.description.contains("/home"));
        assert!(audit.description.contains("/var/log/audit"));
    }

    #[test]
    fn lookup_unknown_returns_none() {
        assert!(lookup_explanation("package_aide_installed").is_none());
    }

    #[test]
    fn all_ids_and_names_are_explained() {
        for id in all_rule_ids().iter().chain(all_rule_names()) {
            assert!(
                lookup_explanation(id).is_some(),
                "identifier {} should be in registry",
                id
            );
        }
    }
}
