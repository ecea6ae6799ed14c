//! Stable DTOs and IDs used across the secpol workspace.
//!
//! This crate is intentionally boring:
//! - the closed set of inspection scopes
//! - issue and remediation records
//! - stable string IDs for policies and rules
//! - data types for the emitted report
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod issue;
pub mod receipt;
pub mod scope;

pub use explain::{Explanation, lookup_explanation};
pub use issue::{FixOutcome, Issue};
pub use receipt::{
    PolicyReport, RemediationRecord, ReportEnvelope, SCHEMA_REPORT_V1, SecpolData, SecpolReport,
    ToolMeta, Verdict,
};
pub use scope::Scope;
