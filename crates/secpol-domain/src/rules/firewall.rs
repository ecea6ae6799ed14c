use crate::target::FirewallSettings;
use secpol_types::{FixOutcome, Issue, Scope};

pub fn validate(rule_id: &str, settings: &FirewallSettings) -> Option<Issue> {
    if settings.enable_firewall && settings.start_firewall {
        return None;
    }

    Some(Issue::new(
        "The firewall must be enabled and started",
        Scope::Firewall,
        rule_id,
    ))
}

pub fn fix(settings: &mut FirewallSettings) -> FixOutcome {
    let mut changed = 0;
    if !settings.enable_firewall {
        settings.enable_firewall = true;
        changed += 1;
    }
    if !settings.start_firewall {
        settings.start_firewall = true;
        changed += 1;
    }

    if changed == 0 {
        FixOutcome::NothingToFix
    } else {
        FixOutcome::Fixed { changed }
    }
}
