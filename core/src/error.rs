//! Error types for the request core.
//!
//! # Design
//! Three classes of failure exist. Configuration errors surface while a
//! `Request` is being set up and never touch the network. `MalformedUrl`
//! comes from the URL utility. `Transport` is raised by an adapter and is
//! passed through the builder untouched. Non-2xx responses are not errors.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// `set_auth` was given a scheme other than Basic or Bearer.
    #[error("unsupported auth type: {0}")]
    UnsupportedAuthType(String),

    /// The credentials do not fit the requested scheme (e.g. Basic without a password).
    #[error("invalid credentials for auth type {0}")]
    InvalidAuthCredentials(String),

    #[error("malformed URL {url:?}: {reason}")]
    MalformedUrl { url: String, reason: String },

    /// Connection, DNS, or wire-format failure inside a transport adapter.
    #[error("transport error: {0}")]
    Transport(String),

    /// A JSON request body could not be encoded, or a response body decoded.
    #[error("JSON body error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed_url(url: &str, reason: impl ToString) -> Self {
        Error::MalformedUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn transport(reason: impl ToString) -> Self {
        Error::Transport(reason.to_string())
    }

    /// True for errors raised during setup, before any network activity.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedAuthType(_) | Error::InvalidAuthCredentials(_)
        )
    }
}
