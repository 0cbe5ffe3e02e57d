//! Error types for the push pipeline.
//!
//! Two tiers: `PushError` aborts the whole session before or during setup,
//! while `ParseError` is scoped to one input file and is folded into a
//! `Failed` result without stopping iteration.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a push session.
#[derive(Debug, Error)]
pub enum PushError {
    #[error("input not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("cannot read directory {path}: {source}")]
    DiscoveryError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {source}")]
    ClientError {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to acquire write credential from {url}: {message}")]
    CredentialAcquire { url: String, message: String },

    #[error("failed to release write credential: {message}")]
    CredentialRelease { message: String },

    #[error("failed to write output: {source}")]
    OutputError {
        #[source]
        source: std::io::Error,
    },
}

impl PushError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> u8 {
        match self {
            // IO errors
            Self::InputNotFound { .. }
            | Self::DiscoveryError { .. }
            | Self::ClientError { .. }
            | Self::OutputError { .. } => 3,
            // Credential/registry errors
            Self::CredentialAcquire { .. } | Self::CredentialRelease { .. } => 2,
        }
    }
}

/// Errors scoped to a single schema file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid JSON: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} is not a self-describing schema: {}", path.display(), reasons.join("; "))]
    NotSelfDescribing { path: PathBuf, reasons: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_error_exit_codes() {
        let err = PushError::InputNotFound {
            path: PathBuf::from("schemas"),
        };
        assert_eq!(err.exit_code(), 3);

        let err = PushError::CredentialAcquire {
            url: "http://registry.example/api/auth/keygen".into(),
            message: "401 Unauthorized".into(),
        };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn parse_error_joins_reasons() {
        let err = ParseError::NotSelfDescribing {
            path: PathBuf::from("bad.json"),
            reasons: vec!["missing self".into(), "missing vendor".into()],
        };
        assert_eq!(
            err.to_string(),
            "bad.json is not a self-describing schema: missing self; missing vendor"
        );
    }
}
