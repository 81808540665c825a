//! Error types for the understat client

use crate::types::ResourceKind;
use std::time::Duration;
use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, UnderstatError>;

/// HTTP status failure reported by a [`Transport`](crate::core::Transport).
///
/// Never surfaces on its own from an endpoint: it is attached as the
/// `source` of the matching `Invalid*` variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{status} {class} Error: {reason} for url: {url}")]
pub struct StatusError {
    pub status: u16,
    pub reason: String,
    pub url: String,
    class: &'static str,
}

impl StatusError {
    pub fn new(status: u16, reason: impl Into<String>, url: impl Into<String>) -> Self {
        let class = if status >= 500 { "Server" } else { "Client" };
        Self {
            status,
            reason: reason.into(),
            url: url.into(),
            class,
        }
    }
}

#[derive(Error, Debug)]
pub enum UnderstatError {
    #[error("{league} is not a valid league")]
    InvalidLeague {
        league: String,
        #[source]
        source: Option<StatusError>,
    },

    #[error("{season} is not a valid season")]
    InvalidSeason { season: String },

    #[error("{team} is not a valid team")]
    InvalidTeam {
        team: String,
        #[source]
        source: Option<StatusError>,
    },

    #[error("{player} is not a valid player or player id")]
    InvalidPlayer {
        player: String,
        #[source]
        source: Option<StatusError>,
    },

    #[error("{match_id} is not a valid match")]
    InvalidMatch {
        match_id: String,
        #[source]
        source: Option<StatusError>,
    },

    #[error("There is no html entry matching the query {query}")]
    InvalidQuery { query: String },

    #[error("Data block for {query} is malformed: {reason}")]
    MalformedData { query: String, reason: String },

    #[error("Failed to parse data block for {query}: {source}")]
    Parse {
        query: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("`{}` must be a single identifier, got {found}", .kind.argument())]
    TypeMismatch { kind: ResourceKind, found: String },

    #[error("Index {index} out of range for {len} identifier(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{} has no operation `{operation}`{available}", .kind.type_name())]
    UnknownOperation {
        kind: ResourceKind,
        operation: String,
        /// Filled in by [`UnderstatClient::scope`](crate::UnderstatClient::scope).
        available: String,
    },

    #[error("`{operation}` requires a season")]
    MissingSeason { operation: String },

    #[error("Unknown extraction mode: {mode} (expected `html` or `json`)")]
    InvalidMode { mode: String },

    #[error("Invalid base url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("The session has already been closed")]
    SessionClosed,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "Could not start {driver}. Searching needs a local {driver} install; \
         set {env_var} to its executable if it is not on PATH"
    )]
    DriverUnavailable {
        driver: &'static str,
        env_var: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Browser error: {message}")]
    Browser { message: String },

    #[error("Timed out after {timeout:?} waiting for {condition}")]
    Timeout { condition: String, timeout: Duration },
}

impl UnderstatError {
    /// Kind-specific error for a failed request against `identifier`.
    pub(crate) fn for_kind(kind: ResourceKind, identifier: &str, source: StatusError) -> Self {
        let value = identifier.to_string();
        let source = Some(source);
        match kind {
            ResourceKind::League => UnderstatError::InvalidLeague { league: value, source },
            ResourceKind::Player => UnderstatError::InvalidPlayer { player: value, source },
            ResourceKind::Team => UnderstatError::InvalidTeam { team: value, source },
            ResourceKind::Match => UnderstatError::InvalidMatch { match_id: value, source },
        }
    }

    /// Append the registry's operation list to an `UnknownOperation` error.
    ///
    /// Every other variant is returned untouched.
    pub fn with_available_operations(self) -> Self {
        match self {
            UnderstatError::UnknownOperation {
                kind, operation, ..
            } => UnderstatError::UnknownOperation {
                kind,
                available: format!(". Available operations: {}", kind.operations().join(", ")),
                operation,
            },
            other => other,
        }
    }
}
