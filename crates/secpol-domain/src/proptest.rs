//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Scope and disabled-rule filtering of failing rules
//! - Agreement between failing rules and issues
//! - Remediation idempotence
//! - Activation variable parsing

use crate::catalog;
use crate::manager::Manager;
use crate::policy::Policy;
use crate::rules::Rule;
use crate::target::{
    BootloaderConfig, BootloaderKind, ConnectionConfig, ConnectionKind, Devicegraph,
    FirewallSettings, MountPoint, NetworkConfig, Startmode, TargetConfig,
};
use proptest::prelude::*;
use secpol_types::ids::{self, ENV_SECURITY_POLICIES};
use secpol_types::Scope;
use secpol_types::explain::all_rule_names;

// ============================================================================
// Strategies
// ============================================================================

fn arb_mount_point() -> impl Strategy<Value = MountPoint> {
    (
        prop_oneof![
            Just("/".to_string()),
            Just("/home".to_string()),
            Just("/var".to_string()),
            Just("/var/log/audit".to_string()),
            Just("/boot/efi".to_string()),
            Just("swap".to_string()),
            "/[a-z]{1,8}",
        ],
        any::<bool>(),
    )
        .prop_map(|(path, encrypted)| MountPoint {
            path,
            encrypted,
            ..MountPoint::default()
        })
}

fn arb_devicegraph() -> impl Strategy<Value = Devicegraph> {
    prop::collection::vec(arb_mount_point(), 0..6)
        .prop_map(|mount_points| Devicegraph { mount_points })
}

fn arb_kind() -> impl Strategy<Value = ConnectionKind> {
    prop_oneof![
        Just(ConnectionKind::Ethernet),
        Just(ConnectionKind::Wireless),
        Just(ConnectionKind::Bridge),
        Just(ConnectionKind::Vlan),
        Just(ConnectionKind::Other),
    ]
}

fn arb_startmode() -> impl Strategy<Value = Option<Startmode>> {
    prop::option::of(prop_oneof![
        Just(Startmode::Auto),
        Just(Startmode::Hotplug),
        Just(Startmode::Ifplugd),
        Just(Startmode::Nfsroot),
        Just(Startmode::Manual),
        Just(Startmode::Off),
    ])
}

fn arb_network() -> impl Strategy<Value = NetworkConfig> {
    // Names come from a small pool so snapshots with repeated names show up.
    prop::collection::vec((0..3usize, arb_kind(), arb_startmode()), 0..5).prop_map(|conns| {
        NetworkConfig {
            connections: conns
                .into_iter()
                .map(|(n, kind, startmode)| ConnectionConfig {
                    name: format!("conn{n}"),
                    interface: None,
                    kind,
                    startmode,
                })
                .collect(),
        }
    })
}

fn arb_firewall() -> impl Strategy<Value = FirewallSettings> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(enable_firewall, start_firewall, enable_sshd, open_ssh)| FirewallSettings {
            enable_firewall,
            start_firewall,
            enable_sshd,
            open_ssh,
        },
    )
}

fn arb_bootloader() -> impl Strategy<Value = BootloaderConfig> {
    (
        prop_oneof![
            Just(BootloaderKind::Grub2),
            Just(BootloaderKind::Grub2Efi),
            Just(BootloaderKind::SystemdBoot),
            Just(BootloaderKind::None),
        ],
        any::<bool>(),
    )
        .prop_map(|(kind, password_protected)| BootloaderConfig {
            kind,
            password_protected,
            ..BootloaderConfig::default()
        })
}

fn arb_target() -> impl Strategy<Value = TargetConfig> {
    (
        prop::option::of(arb_devicegraph()),
        prop::option::of(arb_network()),
        prop::option::of(arb_firewall()),
        prop::option::of(arb_bootloader()),
    )
        .prop_map(|(storage, network, firewall, bootloader)| TargetConfig {
            storage,
            network,
            firewall,
            bootloader,
        })
}

fn arb_scope() -> impl Strategy<Value = Option<Scope>> {
    prop::option::of(prop::sample::select(Scope::all().to_vec()))
}

/// The built-in policy with an arbitrary subset of its rules disabled.
fn arb_policy() -> impl Strategy<Value = Policy> {
    let names: Vec<&'static str> = all_rule_names().to_vec();
    let len = names.len();
    prop::sample::subsequence(names, 0..=len).prop_map(|disabled| {
        let mut policy = catalog::disa_stig();
        policy.apply_disabled_rules(&disabled[..]);
        policy
    })
}

/// Randomly re-cases an identifier.
fn arb_casing(id: &'static str) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<bool>(), id.len()).prop_map(move |upper| {
        id.chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

fn rule_ids(rules: &[&Rule]) -> Vec<String> {
    rules.iter().map(|r| r.id().to_string()).collect()
}

// ============================================================================
// Filtering
// ============================================================================

proptest! {
    /// A scoped evaluation is the unscoped one restricted to that scope.
    #[test]
    fn scoped_failures_are_a_filtered_subset(
        policy in arb_policy(),
        target in arb_target(),
        scope in arb_scope(),
        include_disabled in any::<bool>(),
    ) {
        let all = policy.failing_rules(&target, None, include_disabled);
        let scoped = policy.failing_rules(&target, scope, include_disabled);

        let expected: Vec<&Rule> = all
            .iter()
            .copied()
            .filter(|r| scope.is_none_or(|s| r.scope() == s))
            .collect();
        prop_assert_eq!(rule_ids(&scoped), rule_ids(&expected));
    }

    /// Excluding disabled rules only ever removes disabled rules.
    #[test]
    fn default_mode_is_strict_mode_without_disabled_rules(
        policy in arb_policy(),
        target in arb_target(),
        scope in arb_scope(),
    ) {
        let strict = policy.failing_rules(&target, scope, true);
        let default_mode = policy.failing_rules(&target, scope, false);

        prop_assert!(default_mode.iter().all(|r| !r.disabled()));
        let expected: Vec<&Rule> = strict.iter().copied().filter(|r| !r.disabled()).collect();
        prop_assert_eq!(rule_ids(&default_mode), rule_ids(&expected));
    }

    /// Issues are reported for exactly the failing rules, in the same order.
    #[test]
    fn issues_agree_with_failing_rules(
        policy in arb_policy(),
        target in arb_target(),
        scope in arb_scope(),
        include_disabled in any::<bool>(),
    ) {
        let failing = policy.failing_rules(&target, scope, include_disabled);
        let issues = policy.issues(&target, scope, include_disabled);

        let issue_ids: Vec<String> = issues.iter().map(|i| i.rule_id.clone()).collect();
        prop_assert_eq!(issue_ids, rule_ids(&failing));
        for (issue, rule) in issues.iter().zip(&failing) {
            prop_assert_eq!(issue.scope, rule.scope());
        }
    }

    /// Absent snapshots never produce failures for their scope.
    #[test]
    fn absent_scopes_pass(policy in arb_policy(), target in arb_target()) {
        for scope in crate::scope::missing_scopes(&target) {
            prop_assert!(policy.failing_rules(&target, Some(scope), true).is_empty());
        }
    }

    /// Evaluation is a pure function of its inputs.
    #[test]
    fn evaluation_is_deterministic(
        policy in arb_policy(),
        target in arb_target(),
        scope in arb_scope(),
    ) {
        let first = policy.issues(&target, scope, true);
        let second = policy.issues(&target, scope, true);
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// Remediation
// ============================================================================

proptest! {
    /// A second remediation pass has nothing left to fix and leaves the target alone.
    #[test]
    fn remediation_is_idempotent(target in arb_target(), include_disabled in any::<bool>()) {
        let manager = Manager::with_vars(
            catalog::known_policies(),
            [(ENV_SECURITY_POLICIES, ids::POLICY_DISA_STIG)],
        );

        let mut target = target;
        let before = target.clone();
        let first = manager.remediate(&mut target, None, include_disabled);

        for record in &first {
            let rule = manager
                .find_policy(record.policy_id.as_str())
                .and_then(|p| p.rule(&record.rule_id));
            prop_assert!(rule.is_some());
            if record.outcome.is_fixed() {
                prop_assert!(rule.is_some_and(|r| r.pass(&target)));
            }
        }
        if first.iter().all(|r| !r.outcome.is_fixed()) {
            prop_assert_eq!(&target, &before);
        }

        let after_first = target.clone();
        let second = manager.remediate(&mut target, None, include_disabled);
        prop_assert!(second.iter().all(|r| !r.outcome.is_fixed()));
        prop_assert_eq!(target, after_first);
    }

    /// Remediation never adds or removes snapshots.
    #[test]
    fn remediation_keeps_missing_scopes(target in arb_target()) {
        let manager = Manager::with_vars(
            catalog::known_policies(),
            [(ENV_SECURITY_POLICIES, ids::POLICY_DISA_STIG)],
        );
        let mut target = target;
        let missing = crate::scope::missing_scopes(&target);
        manager.remediate(&mut target, None, true);
        prop_assert_eq!(crate::scope::missing_scopes(&target), missing);
    }
}

// ============================================================================
// Activation variable
// ============================================================================

proptest! {
    /// Any casing of a known id enables it, whatever noise surrounds it.
    #[test]
    fn any_casing_of_a_known_id_enables_it(
        id in arb_casing(ids::POLICY_DISA_STIG),
        noise in prop::collection::vec("[a-z]{1,10}", 0..4),
        position in 0usize..4,
    ) {
        let mut tokens = noise;
        let at = position.min(tokens.len());
        tokens.insert(at, format!(" {id} "));

        let manager = Manager::from_vars([(ENV_SECURITY_POLICIES, tokens.join(","))]);
        prop_assert_eq!(manager.enabled_policies().len(), 1);
    }

    /// Tokens that are not policy ids enable nothing.
    #[test]
    fn unknown_tokens_enable_nothing(tokens in prop::collection::vec("[a-z ]{0,12}", 0..5)) {
        prop_assume!(tokens.iter().all(|t| !t.trim().eq_ignore_ascii_case(ids::POLICY_DISA_STIG)));
        let manager = Manager::from_vars([(ENV_SECURITY_POLICIES, tokens.join(","))]);
        prop_assert!(manager.enabled_policies().is_empty());
    }
}
