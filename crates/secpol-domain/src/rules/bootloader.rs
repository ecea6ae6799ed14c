use crate::target::{BootloaderConfig, BootloaderKind};
use secpol_types::{Issue, Scope};

pub fn validate(rule_id: &str, config: &BootloaderConfig) -> Option<Issue> {
    if config.kind == BootloaderKind::None || config.password_protected {
        return None;
    }

    Some(Issue::new(
        "The bootloader must be protected by a password",
        Scope::Bootloader,
        rule_id,
    ))
}
