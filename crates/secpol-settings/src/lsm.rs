//! Linux Security Module settings and the install-profile section that drives them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported security modules. `None` runs the system without one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LsmModuleId {
    None,
    Selinux,
    Apparmor,
}

impl LsmModuleId {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "selinux" => Some(Self::Selinux),
            "apparmor" => Some(Self::Apparmor),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Selinux => "selinux",
            Self::Apparmor => "apparmor",
        }
    }
}

impl fmt::Display for LsmModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelinuxMode {
    #[default]
    Disabled,
    Permissive,
    Enforcing,
}

impl SelinuxMode {
    /// Unknown modes fall back to `Disabled`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "enforcing" => Self::Enforcing,
            "permissive" => Self::Permissive,
            _ => Self::Disabled,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Permissive => "permissive",
            Self::Enforcing => "enforcing",
        }
    }
}

impl fmt::Display for SelinuxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelinuxModule {
    pub mode: SelinuxMode,
    pub configurable: bool,
    pub selectable: bool,
    pub patterns: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApparmorModule {
    pub configurable: bool,
    pub selectable: bool,
    pub patterns: Vec<String>,
}

/// LSM configuration of the target system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LsmConfig {
    /// Whether the user may change the LSM choice at all.
    pub configurable: bool,
    pub selected: LsmModuleId,
    pub selinux: SelinuxModule,
    pub apparmor: ApparmorModule,
}

impl Default for LsmConfig {
    fn default() -> Self {
        Self {
            configurable: true,
            selected: LsmModuleId::Apparmor,
            selinux: SelinuxModule::default(),
            apparmor: ApparmorModule::default(),
        }
    }
}

impl LsmConfig {
    pub fn select(&mut self, module: &str) -> anyhow::Result<()> {
        self.selected = LsmModuleId::parse(module).ok_or_else(|| {
            anyhow::anyhow!("unknown security module: {module} (expected none|selinux|apparmor)")
        })?;
        Ok(())
    }
}

/// The `lsm` section of an install profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LsmSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurable: Option<bool>,
    /// Module to select: `none`, `selinux` or `apparmor`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selinux: Option<ModuleSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apparmor: Option<ModuleSection>,
}

/// Per-module settings. `mode` only applies to SELinux.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ModuleSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patterns: Option<Vec<String>>,
}

/// Applies `section` to `config`. A missing section changes nothing, and so does
/// every key the section leaves out.
pub fn read_lsm_section(section: Option<&LsmSection>, config: &mut LsmConfig) -> anyhow::Result<()> {
    let Some(section) = section else {
        return Ok(());
    };

    if let Some(configurable) = section.configurable {
        config.configurable = configurable;
    }
    if let Some(module) = section.select.as_deref() {
        config.select(module)?;
    }

    if let Some(selinux) = &section.selinux {
        if let Some(mode) = selinux.mode.as_deref() {
            config.selinux.mode = SelinuxMode::parse(mode);
            if config.selinux.mode == SelinuxMode::Disabled && !mode.eq_ignore_ascii_case("disabled") {
                log::warn!("unknown SELinux mode '{mode}', using disabled");
            }
        }
        assign(&mut config.selinux.configurable, selinux.configurable);
        assign(&mut config.selinux.selectable, selinux.selectable);
        assign(&mut config.selinux.patterns, selinux.patterns.clone());
    }

    if let Some(apparmor) = &section.apparmor {
        if apparmor.mode.is_some() {
            log::debug!("lsm: ignoring mode for apparmor");
        }
        assign(&mut config.apparmor.configurable, apparmor.configurable);
        assign(&mut config.apparmor.selectable, apparmor.selectable);
        assign(&mut config.apparmor.patterns, apparmor.patterns.clone());
    }

    Ok(())
}

fn assign<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
