use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    SimulationRejected,
    CommitFailed,
    Transport,
    TrackerApi,
    InvalidPayload,
    SignatureRejected,
    ConfigError,
    MissingProgramAddress,
    InvalidAddress,
    KeypairError,
    SerializationError,
    NetworkError,
    Message,
}

#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum BountyError {
    #[error("transaction simulation rejected during {operation}")]
    SimulationRejected { operation: String, logs: Vec<String> },

    #[error("transaction commit failed during {operation}: {reason}")]
    CommitFailed { operation: String, reason: String, logs: Vec<String> },

    #[error("transport error during {operation}: {details}")]
    Transport { operation: String, details: String },

    #[error("tracker API error during {operation}: status={status} {details}")]
    TrackerApi { operation: String, status: u16, details: String },

    #[error("invalid event payload: {0}")]
    InvalidPayload(String),

    #[error("webhook signature rejected: {details}")]
    SignatureRejected { details: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("ledger program address is not configured")]
    MissingProgramAddress,

    #[error("invalid ledger address: input={input} reason={reason}")]
    InvalidAddress { input: String, reason: String },

    #[error("keypair load failed for {path}: {details}")]
    KeypairError { path: String, details: String },

    #[error("{format} serialization error: {details}")]
    SerializationError { format: String, details: String },

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, BountyError>;

impl BountyError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BountyError::SimulationRejected { .. } => ErrorCode::SimulationRejected,
            BountyError::CommitFailed { .. } => ErrorCode::CommitFailed,
            BountyError::Transport { .. } => ErrorCode::Transport,
            BountyError::TrackerApi { .. } => ErrorCode::TrackerApi,
            BountyError::InvalidPayload(_) => ErrorCode::InvalidPayload,
            BountyError::SignatureRejected { .. } => ErrorCode::SignatureRejected,
            BountyError::ConfigError(_) => ErrorCode::ConfigError,
            BountyError::MissingProgramAddress => ErrorCode::MissingProgramAddress,
            BountyError::InvalidAddress { .. } => ErrorCode::InvalidAddress,
            BountyError::KeypairError { .. } => ErrorCode::KeypairError,
            BountyError::SerializationError { .. } => ErrorCode::SerializationError,
            BountyError::NetworkError(_) => ErrorCode::NetworkError,
            BountyError::Message(_) => ErrorCode::Message,
        }
    }

    pub fn context(&self) -> ErrorContext {
        ErrorContext { code: self.code(), message: self.to_string() }
    }

    /// Best available diagnostic for user-facing comments: program log lines
    /// when the failure carries them, the rendered message otherwise.
    pub fn diagnostic(&self) -> String {
        match self {
            BountyError::SimulationRejected { logs, .. } if !logs.is_empty() => logs.join("\n"),
            BountyError::CommitFailed { logs, .. } if !logs.is_empty() => logs.join("\n"),
            BountyError::CommitFailed { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }

    pub fn simulation_rejected(operation: impl Into<String>, logs: Vec<String>) -> Self {
        BountyError::SimulationRejected { operation: operation.into(), logs }
    }

    pub fn commit_failed(operation: impl Into<String>, reason: impl Into<String>, logs: Vec<String>) -> Self {
        BountyError::CommitFailed { operation: operation.into(), reason: reason.into(), logs }
    }

    pub fn transport(operation: impl Into<String>, details: impl Into<String>) -> Self {
        BountyError::Transport { operation: operation.into(), details: details.into() }
    }

    pub fn tracker_api(operation: impl Into<String>, status: u16, details: impl Into<String>) -> Self {
        BountyError::TrackerApi { operation: operation.into(), status, details: details.into() }
    }

    pub fn invalid_payload(details: impl Into<String>) -> Self {
        BountyError::InvalidPayload(details.into())
    }

    pub fn signature_rejected(details: impl Into<String>) -> Self {
        BountyError::SignatureRejected { details: details.into() }
    }

    pub fn invalid_address(input: impl Into<String>, reason: impl Into<String>) -> Self {
        BountyError::InvalidAddress { input: input.into(), reason: reason.into() }
    }

    pub fn keypair(path: impl Into<String>, details: impl Into<String>) -> Self {
        BountyError::KeypairError { path: path.into(), details: details.into() }
    }
}

impl From<io::Error> for BountyError {
    fn from(err: io::Error) -> Self {
        BountyError::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for BountyError {
    fn from(err: serde_json::Error) -> Self {
        BountyError::SerializationError { format: "json".to_string(), details: err.to_string() }
    }
}

impl From<figment::Error> for BountyError {
    fn from(err: figment::Error) -> Self {
        BountyError::ConfigError(err.to_string())
    }
}

impl From<reqwest::Error> for BountyError {
    fn from(err: reqwest::Error) -> Self {
        BountyError::Transport { operation: "http".to_string(), details: err.to_string() }
    }
}

impl From<solana_sdk::pubkey::ParsePubkeyError> for BountyError {
    fn from(err: solana_sdk::pubkey::ParsePubkeyError) -> Self {
        BountyError::InvalidAddress { input: "pubkey".to_string(), reason: err.to_string() }
    }
}

// NOTE: No blanket conversion for ledger client errors. The same client error
// means different things in read, simulate, and commit position; map it at the
// call site to keep the taxonomy honest.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_render() {
        let err = BountyError::simulation_rejected("initialize", vec!["log".to_string()]);
        assert!(err.to_string().contains("simulation rejected"));
        assert_eq!(err.code(), ErrorCode::SimulationRejected);

        let err = BountyError::commit_failed("close", "blockhash expired", Vec::new());
        assert!(err.to_string().contains("close"));
        assert!(err.to_string().contains("blockhash expired"));

        let err = BountyError::tracker_api("add_label", 422, "validation failed");
        assert!(err.to_string().contains("422"));

        let err = BountyError::MissingProgramAddress;
        assert!(err.to_string().contains("program address"));
    }

    #[test]
    fn diagnostic_prefers_program_logs() {
        let logs = vec!["Program log: custom error".to_string(), "Program failed".to_string()];
        let err = BountyError::simulation_rejected("initialize", logs.clone());
        assert_eq!(err.diagnostic(), logs.join("\n"));

        let err = BountyError::commit_failed("initialize", "account in use", Vec::new());
        assert_eq!(err.diagnostic(), "account in use");

        let err = BountyError::transport("fetch_record", "connection refused");
        assert!(err.diagnostic().contains("connection refused"));
    }
}
