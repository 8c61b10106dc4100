/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Error type shared by the configuration resolver, the API client and the CLI.

use reqwest::StatusCode;
use std::fmt;

/// Every failure this crate can report
#[derive(Debug)]
pub enum AppError {
    /// A required configuration value could not be resolved from any source
    MissingConfig {
        /// Namespaced key, e.g. `TXTRADER_HOST`
        key: String,
    },
    /// A configuration value was found but could not be used
    InvalidConfig {
        /// Namespaced key
        key: String,
        /// Offending value
        value: String,
        /// Why the value was rejected
        reason: String,
    },
    /// An argument has the wrong type (only reachable through untyped input)
    Type(String),
    /// An argument has the right type but an invalid value or format
    Value(String),
    /// The gateway answered with a non-success status
    Http {
        /// Response status
        status: StatusCode,
        /// Raw response body
        body: String,
    },
    /// The request could not be sent or the response could not be read
    Network(reqwest::Error),
    /// JSON encoding or decoding failed
    Json(serde_json::Error),
    /// Local I/O failure
    Io(std::io::Error),
    /// The command registry does not know this operation name
    UnknownCommand(String),
    /// The user declined a confirmation prompt
    Aborted,
}

impl AppError {
    /// Short category name used when reporting errors on the command line
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MissingConfig { .. } | AppError::InvalidConfig { .. } => "ConfigError",
            AppError::Type(_) => "TypeError",
            AppError::Value(_) => "ValueError",
            AppError::Http { .. } => "HTTPError",
            AppError::Network(_) => "NetworkError",
            AppError::Json(_) => "JSONError",
            AppError::Io(_) => "IOError",
            AppError::UnknownCommand(_) => "UnknownCommand",
            AppError::Aborted => "Aborted",
        }
    }

    /// Status code of an HTTP error, if this is one
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            AppError::Network(e) => e.status(),
            _ => None,
        }
    }

    /// True for failures raised locally before any network activity
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Type(_) | AppError::Value(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingConfig { key } => write!(f, "missing config value {key}"),
            AppError::InvalidConfig { key, value, reason } => {
                write!(f, "invalid config value {key}={value:?}: {reason}")
            }
            AppError::Type(msg) => write!(f, "type error: {msg}"),
            AppError::Value(msg) => write!(f, "value error: {msg}"),
            AppError::Http { status, body } => {
                write!(f, "http error {status}")?;
                if !body.is_empty() {
                    write!(f, ": {body}")?;
                }
                Ok(())
            }
            AppError::Network(e) => write!(f, "network error: {e}"),
            AppError::Json(e) => write!(f, "json error: {e}"),
            AppError::Io(e) => write!(f, "io error: {e}"),
            AppError::UnknownCommand(name) => write!(f, "unknown command: {name}"),
            AppError::Aborted => write!(f, "aborted"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Network(e) => Some(e),
            AppError::Json(e) => Some(e),
            AppError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}
