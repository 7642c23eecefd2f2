//! Error types for the collaborator boundary and configuration.
//!
//! Route and eligibility decisions are total and never fail. Errors only come
//! from the exam data provider rejecting a registration or from loading config.

use thiserror::Error;

/// Why the exam data provider rejected a registration attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("exam not found: {0}")]
    ExamNotFound(String),

    #[error("exam {0} is full")]
    ExamFull(String),

    #[error("already registered for exam {0}")]
    AlreadyRegistered(String),

    /// The viewer may not attempt registration in the current state.
    #[error("registration not allowed: {0}")]
    NotEligible(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
}
