//! Authorization header values.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Error, Result};

/// Supported authorization schemes. Resolved into a header the moment it
/// is set on a `Request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    Basic { username: String, password: String },
    Bearer { token: String },
}

impl Auth {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Auth::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Auth::Bearer {
            token: token.into(),
        }
    }

    /// Build an `Auth` from a scheme name and its credentials.
    ///
    /// `basic` takes `[username, password]`, `bearer` takes `[token]`. Scheme
    /// names are case-insensitive; anything else is `UnsupportedAuthType`.
    pub fn from_scheme(scheme: &str, credentials: &[&str]) -> Result<Self> {
        match scheme.to_ascii_lowercase().as_str() {
            "basic" => match credentials {
                [username, password] => Ok(Auth::basic(*username, *password)),
                _ => Err(Error::InvalidAuthCredentials(scheme.to_string())),
            },
            "bearer" => match credentials {
                [token] => Ok(Auth::bearer(*token)),
                _ => Err(Error::InvalidAuthCredentials(scheme.to_string())),
            },
            _ => Err(Error::UnsupportedAuthType(scheme.to_string())),
        }
    }

    /// Value for the `Authorization` header (RFC 7617 for Basic, RFC 6750 for Bearer).
    pub fn header_value(&self) -> String {
        match self {
            Auth::Basic { username, password } => {
                format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
            }
            Auth::Bearer { token } => format!("Bearer {token}"),
        }
    }
}
