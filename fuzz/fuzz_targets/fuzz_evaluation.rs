//! Fuzz target for evaluation over arbitrary target snapshots.
//!
//! Goal: a snapshot that parses must evaluate and remediate without panicking, and a
//! second remediation must change nothing.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_evaluation
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use secpol_domain::Manager;
use secpol_types::{Scope, ids};

#[derive(Arbitrary, Debug)]
struct Input {
    target_json: String,
    scope: Option<u8>,
    include_disabled: bool,
    disabled_rules: Vec<String>,
}

fuzz_target!(|input: Input| {
    let Ok(mut target) = secpol_app::parse_target_json(&input.target_json) else {
        return;
    };
    let scope = input
        .scope
        .map(|n| Scope::all()[usize::from(n) % Scope::all().len()]);

    let mut manager = Manager::from_vars([(ids::ENV_SECURITY_POLICIES, ids::POLICY_DISA_STIG)]);
    manager.apply_disabled_rules(&input.disabled_rules);

    let _ = manager.failing_rules(&target, scope, input.include_disabled);
    manager.remediate(&mut target, scope, input.include_disabled);
    let once = target.clone();
    manager.remediate(&mut target, scope, input.include_disabled);
    assert_eq!(target, once);
});
