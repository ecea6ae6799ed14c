use secpol_types::{Issue, Scope};
use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for an issue.
///
/// Identity fields:
/// - policy id
/// - rule id
/// - scope
/// - message
pub fn fingerprint_for_issue(policy_id: &str, issue: &Issue) -> String {
    fingerprint(policy_id, &issue.rule_id, issue.scope, &issue.message)
}

fn fingerprint(policy_id: &str, rule_id: &str, scope: Scope, message: &str) -> String {
    let canonical = [policy_id, rule_id, scope.as_str(), message].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}
