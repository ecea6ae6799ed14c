//! Compliance rules and their check variants.
//!
//! A [`Rule`] owns its identity and the administrative `disabled` flag; the [`Check`]
//! decides pass/fail from the one snapshot its scope resolves to.

use crate::scope::{self, Snapshot, SnapshotMut};
use crate::target::TargetConfig;
use secpol_types::{FixOutcome, Issue, Scope};

mod bootloader;
mod encryption;
mod firewall;
mod mount_point;
mod wireless;

pub use encryption::EncryptedPartitions;
pub use mount_point::MissingMountPoint;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Check {
    /// A dedicated file system must be mounted at a path.
    MountPoint(MissingMountPoint),
    /// Every file system except the exempt ones sits on an encrypted device.
    EncryptedPartitions(EncryptedPartitions),
    /// No wireless connection may be brought up.
    NoWireless,
    /// The firewall is enabled and started.
    FirewallEnabled,
    /// A configured bootloader is password protected.
    BootloaderPassword,
    /// Referenced by configuration but not implemented; always passes.
    Unknown,
}

impl Check {
    fn scope(&self) -> Scope {
        match self {
            Check::MountPoint(_) | Check::EncryptedPartitions(_) => Scope::Storage,
            Check::NoWireless => Scope::Network,
            Check::FirewallEnabled => Scope::Firewall,
            Check::BootloaderPassword => Scope::Bootloader,
            // Placeholders never inspect anything; they file under the first scope.
            Check::Unknown => Scope::Storage,
        }
    }

    fn fixable(&self) -> bool {
        matches!(self, Check::NoWireless | Check::FirewallEnabled)
    }
}

#[derive(Clone, Debug)]
pub struct Rule {
    id: String,
    name: String,
    description: String,
    scope: Scope,
    disabled: bool,
    check: Check,
}

/// Rules are identified by id within a policy.
impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Rule {}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        check: Check,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            scope: check.scope(),
            disabled: false,
            check,
        }
    }

    pub fn missing_mount_point(
        id: impl Into<String>,
        name: impl Into<String>,
        mount_point: impl Into<String>,
    ) -> Self {
        let check = MissingMountPoint::new(mount_point);
        let description = format!("Separate mount point for {}", check.mount_point);
        Self::new(id, name, description, Check::MountPoint(check))
    }

    pub fn encrypted_partitions(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(
            id,
            name,
            "File systems must be encrypted",
            Check::EncryptedPartitions(EncryptedPartitions::default()),
        )
    }

    pub fn no_wireless(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(
            id,
            name,
            "Wireless network interfaces must be deactivated",
            Check::NoWireless,
        )
    }

    pub fn firewall_enabled(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(
            id,
            name,
            "The firewall must be enabled and started",
            Check::FirewallEnabled,
        )
    }

    pub fn bootloader_password(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(
            id,
            name,
            "The bootloader must require a password",
            Check::BootloaderPassword,
        )
    }

    /// Placeholder for a rule name that configuration mentions but no check implements.
    /// The name doubles as the id.
    pub fn unknown(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), name.clone(), name, Check::Unknown)
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn disabled(&self) -> bool {
        self.disabled
    }

    pub fn check(&self) -> &Check {
        &self.check
    }

    /// True when `identifier` is this rule's id or its name.
    pub fn matches(&self, identifier: &str) -> bool {
        self.id == identifier || self.name == identifier
    }

    pub fn fixable(&self) -> bool {
        self.check.fixable()
    }

    /// `None` means the rule holds. An absent snapshot is a pass.
    pub fn validate(&self, target: &TargetConfig) -> Option<Issue> {
        if self.check == Check::Unknown {
            return None;
        }

        let Some(snapshot) = scope::resolve(self.scope, target) else {
            log::debug!("{}: no {} snapshot, treating as pass", self.id, self.scope);
            return None;
        };

        match (&self.check, snapshot) {
            (Check::MountPoint(check), Snapshot::Storage(devicegraph)) => {
                check.validate(&self.id, devicegraph)
            }
            (Check::EncryptedPartitions(check), Snapshot::Storage(devicegraph)) => {
                check.validate(&self.id, devicegraph)
            }
            (Check::NoWireless, Snapshot::Network(config)) => {
                wireless::validate(&self.id, config)
            }
            (Check::FirewallEnabled, Snapshot::Firewall(settings)) => {
                firewall::validate(&self.id, settings)
            }
            (Check::BootloaderPassword, Snapshot::Bootloader(config)) => {
                bootloader::validate(&self.id, config)
            }
            _ => None,
        }
    }

    pub fn pass(&self, target: &TargetConfig) -> bool {
        self.validate(target).is_none()
    }

    /// Remediates the rule in place. Safe to call repeatedly: once the rule holds,
    /// further calls return [`FixOutcome::NothingToFix`].
    pub fn fix(&self, target: &mut TargetConfig) -> FixOutcome {
        if !self.fixable() {
            return FixOutcome::NotFixable;
        }

        let Some(snapshot) = scope::resolve_mut(self.scope, target) else {
            return FixOutcome::NothingToFix;
        };

        let outcome = match (&self.check, snapshot) {
            (Check::NoWireless, SnapshotMut::Network(config)) => wireless::fix(config),
            (Check::FirewallEnabled, SnapshotMut::Firewall(settings)) => firewall::fix(settings),
            _ => FixOutcome::NothingToFix,
        };

        if let FixOutcome::Fixed { changed } = outcome {
            log::info!("{}: remediated {} {} entries", self.id, changed, self.scope);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{FirewallSettings, NetworkConfig};
    use crate::test_support::{devicegraph, network, wireless_conn};

    #[test]
    fn unknown_rule_is_named_fail_open_and_not_fixable() {
        let rule = Rule::unknown("package_aide_installed");
        assert_eq!(rule.name(), "package_aide_installed");
        assert_eq!(rule.id(), "package_aide_installed");
        assert!(!rule.fixable());

        let mut target = TargetConfig {
            storage: Some(devicegraph(&[])),
            ..TargetConfig::default()
        };
        assert!(rule.pass(&target));
        assert_eq!(rule.fix(&mut target), FixOutcome::NotFixable);
    }

    #[test]
    fn matches_by_id_or_name() {
        let rule = Rule::missing_mount_point("SLES-15-040200", "partition_for_home", "/home");
        assert!(rule.matches("SLES-15-040200"));
        assert!(rule.matches("partition_for_home"));
        assert!(!rule.matches("partition_for_var"));
        assert_eq!(rule.description(), "Separate mount point for /home");
    }

    #[test]
    fn equality_is_by_id() {
        let a = Rule::no_wireless("X-1", "a");
        let b = Rule::firewall_enabled("X-1", "b").with_disabled(true);
        assert_eq!(a, b);
    }

    #[test]
    fn validate_ignores_other_scopes() {
        let rule = Rule::no_wireless("SLES-15-010380", "wireless_disable_interfaces");
        // Storage has data, network does not: the rule must not look elsewhere.
        let target = TargetConfig {
            storage: Some(devicegraph(&["/"])),
            ..TargetConfig::default()
        };
        assert!(rule.pass(&target));
    }

    #[test]
    fn not_fixable_rules_leave_target_untouched() {
        let rule = Rule::missing_mount_point("SLES-15-040200", "partition_for_home", "/home");
        let mut target = TargetConfig {
            storage: Some(devicegraph(&["/"])),
            ..TargetConfig::default()
        };
        let before = target.clone();
        assert_eq!(rule.fix(&mut target), FixOutcome::NotFixable);
        assert_eq!(target, before);
    }

    #[test]
    fn fix_on_absent_snapshot_is_nothing_to_fix() {
        let rule = Rule::firewall_enabled("SLES-15-010220", "service_firewalld_enabled");
        let mut target = TargetConfig::default();
        assert_eq!(rule.fix(&mut target), FixOutcome::NothingToFix);
        assert_eq!(target, TargetConfig::default());
    }

    #[test]
    fn fix_mutates_the_callers_snapshot() {
        let rule = Rule::no_wireless("SLES-15-010380", "wireless_disable_interfaces");
        let mut target = TargetConfig {
            network: Some(network(vec![wireless_conn("wlan0", None)])),
            firewall: Some(FirewallSettings::default()),
            ..TargetConfig::default()
        };

        assert_eq!(rule.fix(&mut target), FixOutcome::Fixed { changed: 1 });
        let network: &NetworkConfig = target.network.as_ref().expect("network");
        assert!(network.connections[0].is_off());
    }
}
