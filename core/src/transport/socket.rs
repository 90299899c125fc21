use std::io::{Read, Write};
use std::net::TcpStream;

use url::{Host, Url};

use super::Transport;
use crate::error::{Error, Result};
use crate::http::{header_pairs, HttpMethod, HttpResponse, RequestOptions};

/// Fallback transport writing HTTP/1.1 straight onto a `TcpStream`.
///
/// Each call opens one connection, sends `Connection: close` and reads
/// until the peer hangs up. Only `http` URLs are supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocketTransport;

impl SocketTransport {
    pub fn new() -> Self {
        SocketTransport
    }

    fn send(&self, method: HttpMethod, url: &str, options: &RequestOptions) -> Result<HttpResponse> {
        let target = Target::parse(url)?;
        let mut stream = TcpStream::connect((target.host.as_str(), target.port)).map_err(|e| {
            Error::transport(format!("connect to {}:{} failed: {e}", target.host, target.port))
        })?;

        let request = encode_request(method, &target, options);
        stream
            .write_all(&request)
            .map_err(|e| Error::transport(format!("write to {url} failed: {e}")))?;

        let mut raw = Vec::new();
        stream
            .read_to_end(&mut raw)
            .map_err(|e| Error::transport(format!("read from {url} failed: {e}")))?;
        decode_response(&raw)
    }
}

impl Transport for SocketTransport {
    fn name(&self) -> &'static str {
        "socket"
    }

    fn get(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse> {
        self.send(HttpMethod::Get, url, options)
    }

    fn post(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse> {
        self.send(HttpMethod::Post, url, options)
    }
}

/// Where a request goes and what goes in its request line.
#[derive(Debug, PartialEq, Eq)]
struct Target {
    host: String,
    port: u16,
    host_header: String,
    path_and_query: String,
}

impl Target {
    fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw).map_err(|e| Error::transport(format!("invalid URL {raw:?}: {e}")))?;
        if url.scheme() != "http" {
            return Err(Error::transport(format!(
                "scheme {:?} is not supported by the socket transport",
                url.scheme()
            )));
        }
        let host_str = url
            .host_str()
            .ok_or_else(|| Error::transport(format!("URL {raw:?} has no host")))?;
        let host = match url.host() {
            Some(Host::Ipv6(addr)) => addr.to_string(),
            _ => host_str.to_string(),
        };
        let port = url.port_or_known_default().unwrap_or(80);
        let host_header = match url.port() {
            Some(port) => format!("{host_str}:{port}"),
            None => host_str.to_string(),
        };
        let mut path_and_query = url.path().to_string();
        if let Some(query) = url.query() {
            path_and_query.push('?');
            path_and_query.push_str(query);
        }
        Ok(Self {
            host,
            port,
            host_header,
            path_and_query,
        })
    }
}

fn encode_request(method: HttpMethod, target: &Target, options: &RequestOptions) -> Vec<u8> {
    let pairs = header_pairs(&options.headers);
    let mut head = format!(
        "{} {} HTTP/1.1\r\nHost: {}\r\n",
        method.as_str(),
        target.path_and_query,
        target.host_header
    );
    for (name, value) in &pairs {
        head.push_str(&format!("{name}: {value}\r\n"));
    }

    let body = match method {
        HttpMethod::Post => options.content.as_deref().unwrap_or_default(),
        HttpMethod::Get => "",
    };
    let has_length = pairs
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case("content-length"));
    if method == HttpMethod::Post && !has_length {
        head.push_str(&format!("Content-Length: {}\r\n", body.len()));
    }
    head.push_str("Connection: close\r\n\r\n");

    let mut request = head.into_bytes();
    request.extend_from_slice(body.as_bytes());
    request
}

fn decode_response(raw: &[u8]) -> Result<HttpResponse> {
    let head_end = find(raw, b"\r\n\r\n")
        .ok_or_else(|| Error::transport("response ended before the header block"))?;
    let head = std::str::from_utf8(&raw[..head_end])
        .map_err(|_| Error::transport("response header block is not valid UTF-8"))?;

    let mut lines = head.split("\r\n");
    let status = parse_status_line(lines.next().unwrap_or_default())?;

    let mut headers = Vec::new();
    for line in lines {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| Error::transport(format!("malformed response header {line:?}")))?;
        headers.push((name.trim().to_string(), value.trim().to_string()));
    }

    let rest = &raw[head_end + 4..];
    let chunked = headers.iter().any(|(name, value)| {
        name.eq_ignore_ascii_case("transfer-encoding") && value.to_ascii_lowercase().contains("chunked")
    });
    let body = if chunked {
        decode_chunked(rest)?
    } else if let Some(length) = content_length(&headers)? {
        if rest.len() < length {
            return Err(Error::transport(format!(
                "response body truncated: expected {length} bytes, got {}",
                rest.len()
            )));
        }
        rest[..length].to_vec()
    } else {
        rest.to_vec()
    };

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn parse_status_line(line: &str) -> Result<u16> {
    let mut fields = line.split_whitespace();
    let version = fields.next().unwrap_or_default();
    if !version.starts_with("HTTP/") {
        return Err(Error::transport(format!("malformed status line {line:?}")));
    }
    fields
        .next()
        .and_then(|code| code.parse::<u16>().ok())
        .filter(|code| (100..1000).contains(code))
        .ok_or_else(|| Error::transport(format!("malformed status line {line:?}")))
}

fn content_length(headers: &[(String, String)]) -> Result<Option<usize>> {
    match headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
    {
        Some((_, value)) => value
            .parse()
            .map(Some)
            .map_err(|_| Error::transport(format!("invalid Content-Length {value:?}"))),
        None => Ok(None),
    }
}

fn decode_chunked(mut data: &[u8]) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    loop {
        let line_end = find(data, b"\r\n").ok_or_else(|| Error::transport("chunk size line truncated"))?;
        let size_line = std::str::from_utf8(&data[..line_end])
            .map_err(|_| Error::transport("chunk size line is not valid UTF-8"))?;
        let size_hex = size_line.split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(size_hex, 16)
            .map_err(|_| Error::transport(format!("invalid chunk size {size_hex:?}")))?;
        data = &data[line_end + 2..];

        // Trailers after the last chunk are ignored.
        if size == 0 {
            return Ok(body);
        }
        let frame_end = size
            .checked_add(2)
            .filter(|end| data.len() >= *end)
            .ok_or_else(|| Error::transport("chunk truncated"))?;
        if &data[size..frame_end] != b"\r\n" {
            return Err(Error::transport("chunk data not terminated by CRLF"));
        }
        body.extend_from_slice(&data[..size]);
        data = &data[frame_end..];
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}
