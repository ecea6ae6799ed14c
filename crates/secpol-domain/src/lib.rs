//! Pure policy evaluation (no IO).
//!
//! Input: a target snapshot constructed elsewhere.
//! Output: failing rules, issues, and remediation outcomes per enabled policy.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod issues;
pub mod manager;
pub mod policy;
pub mod rules;
pub mod scope;
pub mod target;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use error::DomainError;
pub use issues::IssuesCollection;
pub use manager::{FailingRules, Manager, Remediation};
pub use policy::{Policy, PolicyId};
pub use rules::{Check, Rule};
pub use scope::{Snapshot, SnapshotMut};
pub use target::{NoProbe, SystemProbe, TargetConfig, TargetConfigBuilder};
