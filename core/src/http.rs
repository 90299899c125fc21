//! Plain-data types shared by the request builder and the transports.
//!
//! # Design
//! Headers travel to a transport as the raw `"Key: Value"` strings the
//! builder collected, duplicates and all. Responses come back in one shape
//! whichever transport produced them, with the status left for the caller
//! to interpret.

use serde::de::DeserializeOwned;

use crate::error::Result;

/// HTTP method of an outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// What the builder hands to a transport alongside the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Raw `"Key: Value"` header lines in insertion order.
    pub headers: Vec<String>,
    /// Request body; only set for POST.
    pub content: Option<String>,
}

/// A response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Split a raw `"Key: Value"` line. Lines without a colon, with an empty
/// name, or containing CR or LF yield `None`.
pub(crate) fn split_header(raw: &str) -> Option<(&str, &str)> {
    if raw.contains(['\r', '\n']) {
        return None;
    }
    let (name, value) = raw.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, value.trim()))
}

/// Split every header line, logging and dropping the malformed ones.
pub(crate) fn header_pairs(headers: &[String]) -> Vec<(&str, &str)> {
    headers
        .iter()
        .filter_map(|raw| {
            let pair = split_header(raw);
            if pair.is_none() {
                log::warn!("dropping malformed header line {raw:?}");
            }
            pair
        })
        .collect()
}
