use ureq::http::Response;
use ureq::{Agent, Body};

use super::Transport;
use crate::error::{Error, Result};
use crate::http::{header_pairs, HttpResponse, RequestOptions};

/// Primary transport backed by a ureq `Agent`.
///
/// Status codes are never turned into errors and redirects are not
/// followed, so a 3xx comes back to the caller like any other response.
/// Response bodies are read in full with no size cap, as `SocketTransport` does.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn name(&self) -> &'static str {
        "ureq"
    }

    fn get(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse> {
        let mut request = self.agent.get(url);
        for (name, value) in header_pairs(&options.headers) {
            request = request.header(name, value);
        }
        let response = request.call().map_err(Error::transport)?;
        into_response(response)
    }

    fn post(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse> {
        let mut request = self.agent.post(url);
        for (name, value) in header_pairs(&options.headers) {
            request = request.header(name, value);
        }
        let response = match &options.content {
            Some(content) => request.send(content.as_bytes()),
            None => request.send_empty(),
        }
        .map_err(Error::transport)?;
        into_response(response)
    }
}

fn into_response(mut response: Response<Body>) -> Result<HttpResponse> {
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body = response
        .body_mut()
        .with_config()
        .limit(u64::MAX)
        .read_to_vec()
        .map_err(Error::transport)?;
    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_host_is_transport_error() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let err = UreqTransport::new()
            .get(&format!("http://127.0.0.1:{port}/"), &RequestOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
