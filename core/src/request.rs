//! Request builder: URL template, headers, query and placeholder parameters,
//! dispatched once through a `Transport`.
//!
//! # Design
//! Headers are kept as raw `"Key: Value"` strings in call order and are
//! never deduplicated; setting a content type twice sends two headers.
//! Query and placeholder parameters are read at dispatch time, so a
//! `Request` can be adjusted and sent again, each call producing its own
//! effective URL. Transport failures are returned unchanged.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::auth::Auth;
use crate::error::Result;
use crate::http::{HttpMethod, HttpResponse, RequestOptions};
use crate::transport::{default_transport, Transport};
use crate::uri::{append_query, build_uri, Query};

pub struct Request {
    target_url: String,
    headers: Vec<String>,
    query_params: Query,
    replace_params: HashMap<String, String>,
    transport: Box<dyn Transport>,
}

impl Request {
    /// Create a request using the transport picked by `TransportKind::detect`.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_boxed_transport(url, default_transport())
    }

    /// Create a request that dispatches through `transport`.
    pub fn with_transport(url: impl Into<String>, transport: impl Transport + 'static) -> Self {
        Self::with_boxed_transport(url, Box::new(transport))
    }

    /// Like `with_transport`, for a transport that is already boxed.
    pub fn with_boxed_transport(url: impl Into<String>, transport: Box<dyn Transport>) -> Self {
        Self {
            target_url: url.into(),
            headers: Vec::new(),
            query_params: Query::new(),
            replace_params: HashMap::new(),
            transport,
        }
    }

    /// Replace the target URL. It may contain `{placeholder}` tokens.
    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.target_url = url.into();
        self
    }

    /// Target URL as set, placeholders unresolved.
    pub fn url(&self) -> &str {
        &self.target_url
    }

    /// Append a `Content-type` header. Earlier content types are kept.
    pub fn set_content_type(&mut self, content_type: &str) -> &mut Self {
        self.add_header("Content-type", content_type)
    }

    /// Append `"key: value"` to the header list.
    pub fn add_header(&mut self, key: &str, value: &str) -> &mut Self {
        self.headers.push(format!("{key}: {value}"));
        self
    }

    /// Header lines in the order they were added.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Parameters appended as a query string by `get`.
    pub fn set_query_params(&mut self, query_params: Query) -> &mut Self {
        self.query_params = query_params;
        self
    }

    /// Query parameters `get` will append.
    pub fn query_params(&self) -> &Query {
        &self.query_params
    }

    /// Placeholder values substituted into the URL before dispatch; see `uri::build_uri`.
    pub fn set_replace_params(&mut self, replace_params: HashMap<String, String>) -> &mut Self {
        self.replace_params = replace_params;
        self
    }

    /// Placeholder values applied to the URL at dispatch time.
    pub fn replace_params(&self) -> &HashMap<String, String> {
        &self.replace_params
    }

    /// Append an `Authorization` header for `auth`.
    pub fn set_auth(&mut self, auth: Auth) -> &mut Self {
        let value = auth.header_value();
        self.add_header("Authorization", &value)
    }

    /// Scheme-by-name form of `set_auth`. On error no header is added.
    pub fn set_auth_scheme(&mut self, scheme: &str, credentials: &[&str]) -> Result<&mut Self> {
        let auth = Auth::from_scheme(scheme, credentials)?;
        Ok(self.set_auth(auth))
    }

    /// Shorthand for `set_auth(Auth::basic(..))`.
    pub fn set_auth_basic(&mut self, username: &str, password: &str) -> &mut Self {
        self.set_auth(Auth::basic(username, password))
    }

    /// Shorthand for `set_auth(Auth::bearer(..))`.
    pub fn set_auth_bearer(&mut self, token: &str) -> &mut Self {
        self.set_auth(Auth::bearer(token))
    }

    /// Name of the transport this request dispatches through.
    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Target URL with placeholders substituted.
    pub fn effective_url(&self) -> String {
        if self.replace_params.is_empty() {
            self.target_url.clone()
        } else {
            build_uri(&self.target_url, &self.replace_params)
        }
    }

    /// URL that `get` dispatches to: `effective_url` plus the encoded query parameters.
    pub fn dispatch_url(&self) -> String {
        append_query(&self.effective_url(), &self.query_params)
    }

    /// Send a GET to `dispatch_url`.
    pub fn get(&self) -> Result<HttpResponse> {
        let url = self.dispatch_url();
        let options = RequestOptions {
            headers: self.headers.clone(),
            content: None,
        };
        self.log_dispatch(HttpMethod::Get, &url);
        self.transport.get(&url, &options)
    }

    /// Send `content` as a POST body to `effective_url`. Query parameters are not appended.
    pub fn post(&self, content: impl Into<String>) -> Result<HttpResponse> {
        let url = self.effective_url();
        let options = RequestOptions {
            headers: self.headers.clone(),
            content: Some(content.into()),
        };
        self.log_dispatch(HttpMethod::Post, &url);
        self.transport.post(&url, &options)
    }

    /// Serialize `payload` as JSON, append a JSON content type, and `post` it.
    pub fn post_json<T: Serialize>(&mut self, payload: &T) -> Result<HttpResponse> {
        let body = serde_json::to_string(payload)?;
        self.set_content_type("application/json");
        self.post(body)
    }

    fn log_dispatch(&self, method: HttpMethod, url: &str) {
        log::debug!(
            "{} {url} via {} ({} headers)",
            method.as_str(),
            self.transport.name(),
            self.headers.len()
        );
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("target_url", &self.target_url)
            .field("headers", &self.headers)
            .field("query_params", &self.query_params)
            .field("replace_params", &self.replace_params)
            .field("transport", &self.transport.name())
            .finish()
    }
}
