//! Config parsing and resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod lsm;
mod model;
mod resolve;
mod ssg_apply;

pub use lsm::{
    ApparmorModule, LsmConfig, LsmModuleId, LsmSection, ModuleSection, SelinuxMode, SelinuxModule,
    read_lsm_section,
};
pub use model::SecpolConfigV1;
pub use resolve::{FailOn, Overrides, ResolvedConfig};
pub use ssg_apply::{KEY_DISABLED_RULES, KEY_PROFILE, KEY_REMEDIATION, SsgApplyConfig};

/// Schema id accepted in the `schema` key of `secpol.toml`.
pub const SCHEMA_CONFIG_V1: &str = "secpol.config.v1";

/// Parse `secpol.toml` into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<SecpolConfigV1> {
    let cfg: SecpolConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective settings (defaults + file + overrides).
pub fn resolve_config(cfg: SecpolConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

/// Parse an ssg-apply `key = value` file.
pub fn parse_ssg_apply(input: &str) -> anyhow::Result<SsgApplyConfig> {
    ssg_apply::parse(input)
}
