//! Use case orchestration for secpol.
//!
//! This crate provides the application layer: use cases that coordinate the domain, settings,
//! and render layers. It is intentionally thin and delegates heavy lifting to those layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod fingerprint;
mod policies;
mod render;
mod report;
mod target;

pub use check::{CheckInput, CheckOutput, run_check, run_fix, verdict_exit_code};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use fingerprint::fingerprint_for_issue;
pub use policies::{
    PoliciesOutput, PolicySummary, RuleSummary, format_lsm, format_policies, list_policies,
    run_policies,
};
pub use render::{render_markdown, render_text};
pub use report::{parse_report_json, serialize_report, to_renderable};
pub use target::{parse_target_json, serialize_target};
