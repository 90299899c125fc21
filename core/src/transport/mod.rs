//! Transport adapters: the only place network I/O happens.
//!
//! # Design
//! `Transport` is a two-operation capability. `UreqTransport` is the primary
//! adapter; `SocketTransport` speaks HTTP/1.1 over a plain `TcpStream` and is
//! used when ureq is compiled out or explicitly requested. The choice is made
//! once, by `TransportKind::detect`, when a `Request` is constructed.

mod socket;
#[cfg(feature = "ureq")]
mod ureq_transport;

pub use socket::SocketTransport;
#[cfg(feature = "ureq")]
pub use ureq_transport::UreqTransport;

use crate::error::Result;
use crate::http::{HttpResponse, RequestOptions};

/// Environment variable that forces a transport: `ureq` or `socket`.
pub const TRANSPORT_ENV: &str = "COURIER_TRANSPORT";

/// A blocking HTTP transport. Implementations return non-2xx responses as
/// data and report connection or wire-format failures as `Error::Transport`.
pub trait Transport: Send {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn get(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse>;

    fn post(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Ureq,
    Socket,
}

impl TransportKind {
    /// True when the primary transport was compiled in.
    pub fn ureq_available() -> bool {
        cfg!(feature = "ureq")
    }

    /// Probe the environment for the transport to use.
    pub fn detect() -> Self {
        Self::from_setting(std::env::var(TRANSPORT_ENV).ok().as_deref())
    }

    fn from_setting(setting: Option<&str>) -> Self {
        let setting = setting.map(|s| s.trim().to_ascii_lowercase());
        match setting.as_deref() {
            Some("socket") => TransportKind::Socket,
            Some("ureq") if Self::ureq_available() => TransportKind::Ureq,
            Some("ureq") => {
                log::warn!("{TRANSPORT_ENV}=ureq but ureq support is not compiled in, using socket");
                TransportKind::Socket
            }
            Some(other) if !other.is_empty() => {
                log::warn!("ignoring unknown {TRANSPORT_ENV} value {other:?}");
                Self::fallback_order()
            }
            _ => Self::fallback_order(),
        }
    }

    fn fallback_order() -> Self {
        if Self::ureq_available() {
            TransportKind::Ureq
        } else {
            TransportKind::Socket
        }
    }

    pub fn build(self) -> Box<dyn Transport> {
        log::debug!("using {:?} transport", self);
        match self {
            #[cfg(feature = "ureq")]
            TransportKind::Ureq => Box::new(UreqTransport::new()),
            #[cfg(not(feature = "ureq"))]
            TransportKind::Ureq => Box::new(SocketTransport::new()),
            TransportKind::Socket => Box::new(SocketTransport::new()),
        }
    }
}

/// The transport a `Request` gets when none is injected.
pub fn default_transport() -> Box<dyn Transport> {
    TransportKind::detect().build()
}
