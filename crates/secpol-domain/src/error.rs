use thiserror::Error;

/// The typed failures the engine can report. Evaluation itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("no validator available for policy '{0}'")]
    NoValidator(String),

    #[error("unknown scope '{0}' (expected storage, network, firewall or bootloader)")]
    UnknownScope(String),
}
