use crate::target::Devicegraph;
use secpol_types::{Issue, Scope};

/// Mount points that may stay unencrypted. Firmware must be able to read the EFI
/// system partition.
const DEFAULT_EXEMPT: &[&str] = &["/boot/efi"];

/// Requires every mounted file system to sit on an encrypted device.
///
/// Only absolute mount paths are considered; swap and other pseudo mounts are skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedPartitions {
    pub exempt: Vec<String>,
}

impl Default for EncryptedPartitions {
    fn default() -> Self {
        Self {
            exempt: DEFAULT_EXEMPT.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl EncryptedPartitions {
    pub fn validate(&self, rule_id: &str, devicegraph: &Devicegraph) -> Option<Issue> {
        let unencrypted: Vec<&str> = devicegraph
            .mount_points
            .iter()
            .filter(|m| m.path.starts_with('/'))
            .filter(|m| !self.exempt.iter().any(|e| e == &m.path))
            .filter(|m| !m.encrypted)
            .map(|m| m.path.as_str())
            .collect();

        if unencrypted.is_empty() {
            return None;
        }

        Some(Issue::new(
            format!(
                "The following file systems are not encrypted: {}",
                unencrypted.join(", ")
            ),
            Scope::Storage,
            rule_id,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::MountPoint;

    fn mount(path: &str, encrypted: bool) -> MountPoint {
        MountPoint {
            path: path.to_string(),
            encrypted,
            ..MountPoint::default()
        }
    }

    #[test]
    fn lists_unencrypted_file_systems_in_order() {
        let graph = Devicegraph {
            mount_points: vec![
                mount("/", false),
                mount("/boot/efi", false),
                mount("swap", false),
                mount("/home", true),
                mount("/var", false),
            ],
        };

        let issue = EncryptedPartitions::default()
            .validate("SLES-15-010330", &graph)
            .expect("issue");
        assert_eq!(
            issue.message,
            "The following file systems are not encrypted: /, /var"
        );
    }

    #[test]
    fn passes_when_only_exempt_mounts_are_plain() {
        let graph = Devicegraph {
            mount_points: vec![mount("/", true), mount("/boot/efi", false)],
        };
        assert!(
            EncryptedPartitions::default()
                .validate("SLES-15-010330", &graph)
                .is_none()
        );
    }
}
