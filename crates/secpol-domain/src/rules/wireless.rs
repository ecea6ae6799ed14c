use crate::target::{ConnectionConfig, ConnectionKind, NetworkConfig, Startmode};
use secpol_types::{FixOutcome, Issue, Scope};

pub fn validate(rule_id: &str, config: &NetworkConfig) -> Option<Issue> {
    let active: Vec<&str> = active_wireless(config)
        .map(|conn| conn.name.as_str())
        .collect();

    if active.is_empty() {
        return None;
    }

    Some(Issue::new(
        format!(
            "Wireless connections are not allowed: {}",
            active.join(", ")
        ),
        Scope::Network,
        rule_id,
    ))
}

/// Switches every active wireless connection off. Connections already off are skipped,
/// so a second run changes nothing.
pub fn fix(config: &mut NetworkConfig) -> FixOutcome {
    let mut changed = 0u32;
    for conn in config
        .connections
        .iter_mut()
        .filter(|conn| is_active_wireless(conn))
    {
        conn.startmode = Some(Startmode::Off);
        changed += 1;
    }

    if changed == 0 {
        FixOutcome::NothingToFix
    } else {
        FixOutcome::Fixed { changed }
    }
}

fn active_wireless(config: &NetworkConfig) -> impl Iterator<Item = &ConnectionConfig> {
    config
        .connections
        .iter()
        .filter(|conn| is_active_wireless(conn))
}

fn is_active_wireless(conn: &ConnectionConfig) -> bool {
    conn.kind == ConnectionKind::Wireless && !conn.is_off()
}
