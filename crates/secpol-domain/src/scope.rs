//! Scope resolution: the only way a rule reaches into a [`TargetConfig`].

use crate::error::DomainError;
use crate::target::{BootloaderConfig, Devicegraph, FirewallSettings, NetworkConfig, TargetConfig};
use secpol_types::Scope;

/// Borrowed view of one domain snapshot.
#[derive(Clone, Copy, Debug)]
pub enum Snapshot<'a> {
    Storage(&'a Devicegraph),
    Network(&'a NetworkConfig),
    Firewall(&'a FirewallSettings),
    Bootloader(&'a BootloaderConfig),
}

/// Mutable view of one domain snapshot, handed to remediation.
#[derive(Debug)]
pub enum SnapshotMut<'a> {
    Storage(&'a mut Devicegraph),
    Network(&'a mut NetworkConfig),
    Firewall(&'a mut FirewallSettings),
    Bootloader(&'a mut BootloaderConfig),
}

impl Snapshot<'_> {
    pub fn scope(&self) -> Scope {
        match self {
            Snapshot::Storage(_) => Scope::Storage,
            Snapshot::Network(_) => Scope::Network,
            Snapshot::Firewall(_) => Scope::Firewall,
            Snapshot::Bootloader(_) => Scope::Bootloader,
        }
    }
}

pub fn resolve(scope: Scope, target: &TargetConfig) -> Option<Snapshot<'_>> {
    match scope {
        Scope::Storage => target.storage.as_ref().map(Snapshot::Storage),
        Scope::Network => target.network.as_ref().map(Snapshot::Network),
        Scope::Firewall => target.firewall.as_ref().map(Snapshot::Firewall),
        Scope::Bootloader => target.bootloader.as_ref().map(Snapshot::Bootloader),
    }
}

pub fn resolve_mut(scope: Scope, target: &mut TargetConfig) -> Option<SnapshotMut<'_>> {
    match scope {
        Scope::Storage => target.storage.as_mut().map(SnapshotMut::Storage),
        Scope::Network => target.network.as_mut().map(SnapshotMut::Network),
        Scope::Firewall => target.firewall.as_mut().map(SnapshotMut::Firewall),
        Scope::Bootloader => target.bootloader.as_mut().map(SnapshotMut::Bootloader),
    }
}

/// Scopes the target provides no snapshot for, in canonical order.
pub fn missing_scopes(target: &TargetConfig) -> Vec<Scope> {
    Scope::all()
        .into_iter()
        .filter(|scope| resolve(*scope, target).is_none())
        .collect()
}

pub fn parse_scope(value: &str) -> Result<Scope, DomainError> {
    Scope::parse(value).ok_or_else(|| DomainError::UnknownScope(value.to_string()))
}
