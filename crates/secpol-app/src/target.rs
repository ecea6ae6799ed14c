use anyhow::Context;
use secpol_domain::TargetConfig;

/// Parse a JSON target snapshot. Blank input is a target with every domain absent.
pub fn parse_target_json(text: &str) -> anyhow::Result<TargetConfig> {
    if text.trim().is_empty() {
        return Ok(TargetConfig::default());
    }
    serde_json::from_str(text).context("parse target snapshot json")
}

pub fn serialize_target(target: &TargetConfig) -> anyhow::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(target).context("serialize target snapshot")?;
    bytes.push(b'\n');
    Ok(bytes)
}
