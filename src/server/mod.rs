use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};

use crate::config::ServiceConfig;

pub mod api;
pub mod routes;

const READ_CHUNK: usize = 4_096;
const MAX_HEADER_BYTES: usize = 16_384;
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// A parsed request line plus its body, decoded lossily as UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

pub fn run_server(config: &ServiceConfig) -> io::Result<()> {
    let listener = TcpListener::bind(&config.bind_addr)?;
    tracing::info!(bind = %config.bind_addr, "raidsim server listening");

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream, config) {
                    tracing::warn!(error = %err, "request error");
                }
            }
            Err(err) => tracing::warn!(error = %err, "connection failed"),
        }
    }

    Ok(())
}

fn handle_connection(stream: &mut TcpStream, config: &ServiceConfig) -> io::Result<()> {
    let Some(request) = read_request(stream)? else {
        return Ok(());
    };

    let response =
        routes::route_request_with(&request.method, &request.path, &request.body, config);
    tracing::info!(
        method = %request.method,
        path = %request.path,
        status = response.status_code,
        "handled request"
    );
    stream.write_all(response.to_http_string().as_bytes())?;
    stream.flush()?;
    Ok(())
}

/// Reads headers up to the blank line, then exactly `Content-Length` body bytes.
/// Returns `None` when the peer closes before sending anything.
pub fn read_request<R: Read>(reader: &mut R) -> io::Result<Option<RawRequest>> {
    let mut buffer = Vec::with_capacity(READ_CHUNK);
    let mut chunk = [0_u8; READ_CHUNK];

    let (header_end, body_start) = loop {
        if let Some(bounds) = header_bounds(&buffer) {
            break bounds;
        }
        if buffer.len() > MAX_HEADER_BYTES {
            return Err(invalid_data("request headers too large"));
        }
        let read = reader.read(&mut chunk)?;
        if read == 0 {
            if buffer.is_empty() {
                return Ok(None);
            }
            break (buffer.len(), buffer.len());
        }
        buffer.extend_from_slice(&chunk[..read]);
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).into_owned();
    let content_length = content_length(&head)?;
    if content_length > MAX_BODY_BYTES {
        return Err(invalid_data("request body too large"));
    }

    let mut body = buffer.split_off(body_start);
    while body.len() < content_length {
        let read = reader.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..read]);
    }
    body.truncate(content_length);

    let mut request_parts = head.lines().next().unwrap_or_default().split_whitespace();
    let method = request_parts.next().unwrap_or("GET").to_string();
    let path = request_parts.next().unwrap_or("/").to_string();

    Ok(Some(RawRequest {
        method,
        path,
        body: String::from_utf8_lossy(&body).into_owned(),
    }))
}

/// `(end of headers, start of body)` once a blank line has arrived.
fn header_bounds(buffer: &[u8]) -> Option<(usize, usize)> {
    if let Some(at) = find(buffer, b"\r\n\r\n") {
        return Some((at, at + 4));
    }
    find(buffer, b"\n\n").map(|at| (at, at + 2))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn content_length(head: &str) -> io::Result<usize> {
    for line in head.lines().skip(1) {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("content-length") {
            return value
                .trim()
                .parse()
                .map_err(|_| invalid_data("invalid Content-Length header"));
        }
    }
    Ok(0)
}

fn invalid_data(message: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message.to_string())
}
