use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inspection domain a rule reads from.
///
/// The set is closed; declaration order is the canonical reporting order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Storage,
    Network,
    Firewall,
    Bootloader,
}

impl Scope {
    pub const fn all() -> [Scope; 4] {
        [
            Scope::Storage,
            Scope::Network,
            Scope::Firewall,
            Scope::Bootloader,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Scope::Storage => "storage",
            Scope::Network => "network",
            Scope::Firewall => "firewall",
            Scope::Bootloader => "bootloader",
        }
    }

    /// Case-insensitive lookup; `None` for anything outside the closed set.
    pub fn parse(value: &str) -> Option<Scope> {
        let value = value.trim();
        Scope::all()
            .into_iter()
            .find(|scope| scope.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
