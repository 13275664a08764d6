//! Error types for preapprove
//!
//! This module defines the error hierarchy used throughout the application.
//! We use `thiserror` for library-style errors that are part of the API.
//! All fatal errors propagate unhandled to the top level; there is no
//! partial-result or degraded-mode output.

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Directory service errors
///
/// Ambiguous lookups (more than one match) are deliberately *not* an error:
/// the client logs a warning and uses the first match. Malformed
/// distinguished-name values likewise degrade to absent identifiers rather
/// than failing a lookup.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// The identity has zero matches in the directory. Nonexistence is not
    /// transient, so this is never retried.
    #[error("identity '{identity}' not found in the directory")]
    NotFound { identity: String },

    /// Management-chain resolution exceeded the hop bound. Raised for both
    /// over-deep hierarchies and cyclic manager references.
    #[error(
        "management chain for '{identity}' exceeds {limit} hops (cycle or malformed directory data)"
    )]
    ChainTooDeep { identity: String, limit: usize },

    /// Transport or auth failure reaching the directory service.
    #[error("directory connection failed: {0}")]
    Connection(#[from] ldap3::LdapError),

    #[error("invalid directory response: {0}")]
    InvalidResponse(String),
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for directory operations
pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_identity() {
        let err = DirectoryError::NotFound {
            identity: "alice".into(),
        };
        assert!(err.to_string().contains("alice"));
    }

    #[test]
    fn test_chain_too_deep_message_names_limit() {
        let err = DirectoryError::ChainTooDeep {
            identity: "bob".into(),
            limit: 50,
        };
        let msg = err.to_string();
        assert!(msg.contains("bob"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn test_directory_error_wraps_into_app_error() {
        let err: AppError = DirectoryError::NotFound {
            identity: "carol".into(),
        }
        .into();
        assert!(matches!(err, AppError::Directory(_)));
    }
}
