use crate::policy::Policy;
use crate::rules::Rule;
use crate::target::{
    BootloaderConfig, ConnectionConfig, ConnectionKind, Devicegraph, FirewallSettings,
    MountPoint, NetworkConfig, Startmode, TargetConfig,
};
use secpol_types::ids::ENV_SECURITY_POLICIES;

/// A devicegraph with one unencrypted file system per path.
pub fn devicegraph(paths: &[&str]) -> Devicegraph {
    Devicegraph {
        mount_points: paths
            .iter()
            .map(|path| MountPoint {
                path: path.to_string(),
                ..MountPoint::default()
            })
            .collect(),
    }
}

pub fn network(connections: Vec<ConnectionConfig>) -> NetworkConfig {
    NetworkConfig { connections }
}

pub fn wireless_conn(name: &str, startmode: Option<Startmode>) -> ConnectionConfig {
    ConnectionConfig {
        name: name.to_string(),
        interface: Some(name.to_string()),
        kind: ConnectionKind::Wireless,
        startmode,
    }
}

pub fn ethernet_conn(name: &str) -> ConnectionConfig {
    ConnectionConfig {
        name: name.to_string(),
        interface: Some(name.to_string()),
        kind: ConnectionKind::Ethernet,
        startmode: Some(Startmode::Auto),
    }
}

/// Two rules: an enabled storage rule and a disabled network rule.
pub fn scenario_policy() -> Policy {
    Policy::new("scenario", "Scenario").with_rules(vec![
        Rule::missing_mount_point("R1", "home_rule", "/home"),
        Rule::no_wireless("R2", "wireless_rule").with_disabled(true),
    ])
}

/// A target where every built-in rule fails.
pub fn stig_failing_target() -> TargetConfig {
    TargetConfig {
        storage: Some(devicegraph(&["/", "/boot/efi"])),
        network: Some(network(vec![
            wireless_conn("wlan0", Some(Startmode::Auto)),
            ethernet_conn("eth0"),
        ])),
        firewall: Some(FirewallSettings::default()),
        bootloader: Some(BootloaderConfig::default()),
    }
}

/// A variable set holding only the activation variable.
pub fn env_with(value: &str) -> Vec<(String, String)> {
    vec![(ENV_SECURITY_POLICIES.to_string(), value.to_string())]
}
