use crate::target::Devicegraph;
use secpol_types::{Issue, Scope};

/// Requires a dedicated file system mounted at `mount_point`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingMountPoint {
    pub mount_point: String,
}

impl MissingMountPoint {
    pub fn new(mount_point: impl Into<String>) -> Self {
        Self {
            mount_point: mount_point.into(),
        }
    }

    pub fn validate(&self, rule_id: &str, devicegraph: &Devicegraph) -> Option<Issue> {
        if devicegraph.has_mount_point(&self.mount_point) {
            return None;
        }

        Some(Issue::new(
            format!(
                "There must be a separate mount point for {}",
                self.mount_point
            ),
            Scope::Storage,
            rule_id,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::devicegraph;

    #[test]
    fn reports_missing_mount_point() {
        let check = MissingMountPoint::new("/home");
        let issue = check
            .validate("SLES-15-040200", &devicegraph(&["/", "/boot/efi", "swap"]))
            .expect("issue for missing /home");

        assert!(issue.message.contains("must be a separate mount point for /home"));
        assert_eq!(issue.scope, Scope::Storage);
        assert_eq!(issue.rule_id, "SLES-15-040200");
    }

    #[test]
    fn passes_once_the_mount_point_exists() {
        let check = MissingMountPoint::new("/home");
        assert!(
            check
                .validate("SLES-15-040200", &devicegraph(&["/", "/home", "/var"]))
                .is_none()
        );
    }

    #[test]
    fn nested_paths_do_not_count() {
        let check = MissingMountPoint::new("/var");
        assert!(
            check
                .validate("SLES-15-040210", &devicegraph(&["/", "/var/log/audit"]))
                .is_some()
        );
    }
}
