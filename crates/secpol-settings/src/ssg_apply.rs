//! The ssg-apply configuration file (`/etc/ssg-apply/*.conf`).
//!
//! A flat list of `key = value` lines. Blank lines and `#` comments are skipped; keys
//! this crate does not know are kept so a rewrite does not lose them.

use anyhow::Context;

pub const KEY_PROFILE: &str = "profile";
pub const KEY_REMEDIATION: &str = "remediation";
pub const KEY_DISABLED_RULES: &str = "disabled-rules";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SsgApplyConfig {
    entries: Vec<(String, String)>,
}

pub(crate) fn parse(input: &str) -> anyhow::Result<SsgApplyConfig> {
    let mut config = SsgApplyConfig::default();

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .with_context(|| format!("line {}: expected `key = value`, got `{line}`", idx + 1))?;
        let key = key.trim();
        anyhow::ensure!(!key.is_empty(), "line {}: empty key", idx + 1);

        config.set(key, value.trim());
    }

    Ok(config)
}

impl SsgApplyConfig {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets `key`, keeping its position when already present.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn profile(&self) -> Option<&str> {
        self.get(KEY_PROFILE)
    }

    pub fn set_profile(&mut self, profile: impl Into<String>) {
        self.set(KEY_PROFILE, profile);
    }

    /// Path of the remediation script.
    pub fn remediation(&self) -> Option<&str> {
        self.get(KEY_REMEDIATION)
    }

    pub fn set_remediation(&mut self, remediation: impl Into<String>) {
        self.set(KEY_REMEDIATION, remediation);
    }

    /// Empty when the key is absent.
    pub fn disabled_rules(&self) -> Vec<String> {
        self.get(KEY_DISABLED_RULES)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn set_disabled_rules<S: AsRef<str>>(&mut self, rules: &[S]) {
        let joined = rules
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");
        self.set(KEY_DISABLED_RULES, joined);
    }

    /// Serialises back to `key = value` lines. Keys with an empty value are dropped.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            if value.is_empty() {
                continue;
            }
            out.push_str(key);
            out.push_str(" = ");
            out.push_str(value);
            out.push('\n');
        }
        out
    }
}
