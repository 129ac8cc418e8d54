//! # Error Types
//!
//! This module defines error types used throughout the undersign library.
//!
//! Degraded rendering (missing font, unreadable logo) is not an error: those
//! cases surface as [`Advisory`](crate::compose::Advisory) values on the
//! rendered document instead.

use thiserror::Error;

/// Main error type for undersign operations
#[derive(Debug, Error)]
pub enum UndersignError {
    /// Locale tag outside the supported set
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    /// A locale entry lacks one of the required content keys
    #[error("Locale '{locale}' is missing required content key '{key}'")]
    MissingContentKey { locale: String, key: &'static str },

    /// Content table could not be parsed
    #[error("Content table error: {0}")]
    ContentTable(String),

    /// Invalid page geometry or configuration file
    #[error("Configuration error: {0}")]
    Config(String),

    /// Signature buffer could not be interpreted
    #[error("Invalid signature: {0}")]
    Signature(String),

    /// Image processing or encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// HTTP server error (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
