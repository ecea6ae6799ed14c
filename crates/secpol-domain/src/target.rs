use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-domain snapshots a validation run reads from.
///
/// Any domain may be absent: the provider was unavailable or the subsystem does not
/// exist on the target. Rules bound to an absent domain pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TargetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<Devicegraph>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall: Option<FirewallSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootloader: Option<BootloaderConfig>,
}

impl TargetConfig {
    pub fn builder() -> TargetConfigBuilder {
        TargetConfigBuilder::default()
    }

    /// Every domain comes from `probe`.
    pub fn from_probe(probe: &dyn SystemProbe) -> Self {
        Self::builder().build(probe)
    }
}

/// Source of live system state, one accessor per inspection domain.
///
/// Implementations do their own I/O and report failures as `None`; the engine never
/// sees a provider error.
pub trait SystemProbe {
    fn storage(&self) -> Option<Devicegraph> {
        None
    }

    fn network(&self) -> Option<NetworkConfig> {
        None
    }

    fn firewall(&self) -> Option<FirewallSettings> {
        None
    }

    fn bootloader(&self) -> Option<BootloaderConfig> {
        None
    }
}

/// A probe that knows nothing about the running system.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProbe;

impl SystemProbe for NoProbe {}

/// Collects explicit per-domain overrides; [`TargetConfigBuilder::build`] fills the rest
/// from a probe.
#[derive(Clone, Debug, Default)]
pub struct TargetConfigBuilder {
    storage: Option<Devicegraph>,
    network: Option<NetworkConfig>,
    firewall: Option<FirewallSettings>,
    bootloader: Option<BootloaderConfig>,
}

impl TargetConfigBuilder {
    pub fn storage(mut self, devicegraph: Devicegraph) -> Self {
        self.storage = Some(devicegraph);
        self
    }

    pub fn network(mut self, config: NetworkConfig) -> Self {
        self.network = Some(config);
        self
    }

    pub fn firewall(mut self, settings: FirewallSettings) -> Self {
        self.firewall = Some(settings);
        self
    }

    pub fn bootloader(mut self, config: BootloaderConfig) -> Self {
        self.bootloader = Some(config);
        self
    }

    /// Overrides win; the probe is only asked for domains without one.
    pub fn build(self, probe: &dyn SystemProbe) -> TargetConfig {
        TargetConfig {
            storage: self.storage.or_else(|| probe.storage()),
            network: self.network.or_else(|| probe.network()),
            firewall: self.firewall.or_else(|| probe.firewall()),
            bootloader: self.bootloader.or_else(|| probe.bootloader()),
        }
    }
}

// ============================================================================
// Storage
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Devicegraph {
    #[serde(default)]
    pub mount_points: Vec<MountPoint>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MountPoint {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesystem: Option<String>,
    /// Whether the block device under the file system is encrypted.
    #[serde(default)]
    pub encrypted: bool,
}

impl Devicegraph {
    pub fn mount_paths(&self) -> impl Iterator<Item = &str> {
        self.mount_points.iter().map(|m| m.path.as_str())
    }

    pub fn has_mount_point(&self, path: &str) -> bool {
        self.mount_paths().any(|p| p == path)
    }
}

// ============================================================================
// Network
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionKind {
    Ethernet,
    Wireless,
    Bridge,
    Vlan,
    Other,
}

/// When a connection is brought up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Startmode {
    Auto,
    Hotplug,
    Ifplugd,
    Nfsroot,
    Manual,
    Off,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConnectionConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    pub kind: ConnectionKind,
    /// A connection without a start mode is treated as active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startmode: Option<Startmode>,
}

impl ConnectionConfig {
    pub fn is_off(&self) -> bool {
        self.startmode == Some(Startmode::Off)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NetworkConfig {
    #[serde(default)]
    pub connections: Vec<ConnectionConfig>,
}

impl NetworkConfig {
    /// Replaces the connection with the same name, or appends it.
    pub fn add_or_update_connection(&mut self, conn: ConnectionConfig) {
        match self.connections.iter_mut().find(|c| c.name == conn.name) {
            Some(existing) => *existing = conn,
            None => self.connections.push(conn),
        }
    }

    pub fn connection(&self, name: &str) -> Option<&ConnectionConfig> {
        self.connections.iter().find(|c| c.name == name)
    }
}

// ============================================================================
// Firewall
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FirewallSettings {
    #[serde(default)]
    pub enable_firewall: bool,
    #[serde(default)]
    pub start_firewall: bool,
    #[serde(default)]
    pub enable_sshd: bool,
    #[serde(default)]
    pub open_ssh: bool,
}

// ============================================================================
// Bootloader
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BootloaderKind {
    #[default]
    Grub2,
    Grub2Efi,
    SystemdBoot,
    None,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BootloaderConfig {
    #[serde(default)]
    pub kind: BootloaderKind,
    #[serde(default)]
    pub password_protected: bool,
    #[serde(default)]
    pub secure_boot: bool,
    #[serde(default)]
    pub kernel_params: Vec<String>,
}
