use crate::lsm::{LsmConfig, read_lsm_section};
use crate::model::SecpolConfigV1;
use crate::SCHEMA_CONFIG_V1;
use anyhow::Context;
use secpol_domain::{PolicyId, catalog, scope};
use secpol_types::Scope;

/// When a report with issues fails the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailOn {
    /// Any issue fails.
    #[default]
    Any,
    /// Report only; never fail.
    None,
}

/// Values given on the command line. They win over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub policies: Vec<String>,
    pub scope: Option<String>,
    pub include_disabled: Option<bool>,
    pub fail_on: Option<String>,
    pub disabled_rules: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    /// Policies to enable on top of the activation variable, canonical ids.
    pub policies: Vec<PolicyId>,
    pub scope: Option<Scope>,
    pub include_disabled: bool,
    pub fail_on: FailOn,
    pub disabled_rules: Vec<String>,
    pub lsm: LsmConfig,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            policies: Vec::new(),
            scope: None,
            include_disabled: false,
            fail_on: FailOn::Any,
            disabled_rules: Vec::new(),
            lsm: LsmConfig::default(),
        }
    }
}

pub fn resolve_config(cfg: SecpolConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref() {
        anyhow::ensure!(
            schema == SCHEMA_CONFIG_V1,
            "unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})"
        );
    }

    let mut effective = ResolvedConfig::default();

    // Policies: file first, then command line; unknown ids are a config error.
    for id in cfg.policies.iter().chain(overrides.policies.iter()) {
        let policy = catalog::build(id).with_context(|| format!("invalid policy id: {id}"))?;
        if !effective.policies.contains(policy.id()) {
            effective.policies.push(policy.id().clone());
        }
    }

    if let Some(scope_s) = overrides.scope.as_deref().or(cfg.scope.as_deref()) {
        effective.scope = parse_scope_filter(scope_s)?;
    }

    if let Some(include) = overrides.include_disabled.or(cfg.include_disabled) {
        effective.include_disabled = include;
    }

    if let Some(fail_on_s) = overrides.fail_on.as_deref().or(cfg.fail_on.as_deref()) {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    for name in cfg.disabled_rules.iter().chain(overrides.disabled_rules.iter()) {
        let name = name.trim();
        if !name.is_empty() && !effective.disabled_rules.iter().any(|n| n == name) {
            effective.disabled_rules.push(name.to_string());
        }
    }

    read_lsm_section(cfg.lsm.as_ref(), &mut effective.lsm).context("invalid [lsm] section")?;

    Ok(effective)
}

/// `all` clears the filter.
fn parse_scope_filter(v: &str) -> anyhow::Result<Option<Scope>> {
    if v.trim().eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    let parsed = scope::parse_scope(v).context("invalid scope filter")?;
    Ok(Some(parsed))
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "any" => Ok(FailOn::Any),
        "none" => Ok(FailOn::None),
        other => anyhow::bail!("unknown fail_on: {other} (expected any|none)"),
    }
}
