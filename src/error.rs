use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(notificador::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(notificador::config))]
    Config(String),

    #[error("Firestore error: {0}")]
    #[diagnostic(code(notificador::firestore))]
    Firestore(String),

    #[error("Push messaging error: {0}")]
    #[diagnostic(code(notificador::messaging))]
    Messaging(String),

    #[error(transparent)]
    #[diagnostic(code(notificador::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(notificador::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(notificador::other))]
    Other(String),
}

// Implement From for TOML serialization errors
impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
#[allow(dead_code)]
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create Firestore errors
pub fn firestore_error(message: &str) -> Error {
    Error::Firestore(message.to_string())
}

/// Helper to create push messaging errors
pub fn messaging_error(message: &str) -> Error {
    Error::Messaging(message.to_string())
}

/// Helper to create other errors
#[allow(dead_code)]
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
