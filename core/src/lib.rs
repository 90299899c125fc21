//! Transport-agnostic HTTP request builder.
//!
//! # Overview
//! A `Request` assembles a URL (placeholder substitution plus query
//! parameters), a list of raw header lines (authentication included) and an
//! optional body, then hands them to a `Transport` for a single blocking
//! call. Every transport returns the same `HttpResponse`.
//!
//! # Design
//! - `uri` holds the pure URL and query-string helpers.
//! - `transport` defines the `Transport` capability with a ureq-backed
//!   primary adapter and a plain-socket fallback, chosen once per `Request`.
//! - Non-2xx statuses are data, not errors. Transport failures pass through
//!   the builder unchanged; nothing is retried.

pub mod auth;
pub mod error;
pub mod http;
pub mod request;
pub mod transport;
pub mod uri;

pub use auth::Auth;
pub use error::{Error, Result};
pub use http::{HttpMethod, HttpResponse, RequestOptions};
pub use request::Request;
pub use transport::{default_transport, SocketTransport, Transport, TransportKind};
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use uri::{
    build_query_string, build_uri, build_url, parse_query_string, parse_url, replace_query_param,
    replace_query_param_in_url, Query, QueryValue, UrlParts,
};
