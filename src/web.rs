//! Development server for the analysis page.
//!
//! Serves the page at `/`, the `wasm-bindgen` output under `/pkg/`, and
//! forwards every `/api/*` request unchanged to the configured API origin so
//! the browser build can use same-origin relative paths.

use colored::*;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::page::layout::INDEX_HTML;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Uploads larger than this are refused with 413.
pub const MAX_REQUEST_BYTES: usize = 32 * 1024 * 1024;

const MAX_HEADERS: usize = 64;

/// Shared state of a running server.
#[derive(Debug, Clone)]
pub struct DevServer {
    api_base: String,
    assets: PathBuf,
    client: reqwest::Client,
}

impl DevServer {
    pub fn new(api_base: impl Into<String>, assets: impl Into<PathBuf>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            assets: assets.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

/// One parsed HTTP/1.1 request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    /// Path and query, as sent.
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    /// First header with this name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Path without the query string.
    pub fn path(&self) -> &str {
        self.target
            .split_once('?')
            .map_or(self.target.as_str(), |(p, _)| p)
    }
}

/// A response ready to be written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl Response {
    fn new(status: u16, content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: content_type.to_string(),
            body: body.into(),
        }
    }

    fn text(status: u16, body: &str) -> Self {
        Self::new(status, "text/plain; charset=utf-8", body)
    }

    /// Status line, headers and body as sent on the wire.
    pub fn to_bytes(&self) -> Vec<u8> {
        let reason = reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown");
        let mut out = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            reason,
            self.content_type,
            self.body.len()
        )
        .into_bytes();
        out.extend_from_slice(&self.body);
        out
    }
}

/// Parse a request from the bytes read so far.
///
/// Returns `Ok(None)` while the head or the `Content-Length` body is still
/// incomplete.
pub fn parse_request(buf: &[u8]) -> Result<Option<Request>, httparse::Error> {
    let mut headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
    let mut req = httparse::Request::new(&mut headers);
    let head_len = match req.parse(buf)? {
        httparse::Status::Complete(n) => n,
        httparse::Status::Partial => return Ok(None),
    };

    let headers: Vec<(String, String)> = req
        .headers
        .iter()
        .map(|h| {
            (
                h.name.to_string(),
                String::from_utf8_lossy(h.value).trim().to_string(),
            )
        })
        .collect();
    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let body = &buf[head_len..];
    if body.len() < content_length {
        return Ok(None);
    }

    Ok(Some(Request {
        method: req.method.unwrap_or("GET").to_string(),
        target: req.path.unwrap_or("/").to_string(),
        headers,
        body: body[..content_length].to_vec(),
    }))
}

/// Resolve a `/pkg/` path below `root`. `None` for anything that could
/// leave the directory.
pub fn asset_path(root: &Path, relative: &str) -> Option<PathBuf> {
    let relative = Path::new(relative.trim_start_matches('/'));
    if relative.as_os_str().is_empty() {
        return None;
    }
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

pub fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("wasm") => "application/wasm",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

/// Bind to `127.0.0.1:port` and serve until the process exits.
pub async fn serve(port: u16, server: DevServer) -> Result<(), BoxError> {
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    eprintln!(
        "{}",
        format!("  Analysis page at http://localhost:{port}").bright_green()
    );
    eprintln!(
        "{}",
        format!("  Proxying /api to {}", server.api_base()).bright_blue()
    );
    eprintln!("{}", "  Press Ctrl+C to stop.".bright_blue());
    run(listener, server).await
}

/// Accept loop over an already bound listener.
pub async fn run(listener: TcpListener, server: DevServer) -> Result<(), BoxError> {
    let server = Arc::new(server);
    loop {
        let (stream, addr) = listener.accept().await?;
        let server = Arc::clone(&server);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, &server).await {
                warn!(%addr, error = %e, "connection error");
            }
        });
    }
}

async fn handle_connection(mut stream: TcpStream, server: &DevServer) -> Result<(), BoxError> {
    let mut buf = Vec::with_capacity(8192);
    let mut chunk = [0u8; 8192];
    let request = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.len() > MAX_REQUEST_BYTES {
            stream
                .write_all(&Response::text(413, "Payload Too Large").to_bytes())
                .await?;
            return Ok(());
        }
        match parse_request(&buf) {
            Ok(Some(req)) => break req,
            Ok(None) => continue,
            Err(e) => {
                debug!(error = %e, "malformed request");
                stream
                    .write_all(&Response::text(400, "Bad Request").to_bytes())
                    .await?;
                return Ok(());
            }
        }
    };

    let response = route(server, request).await;
    stream.write_all(&response.to_bytes()).await?;
    Ok(())
}

/// Dispatch one request.
pub async fn route(server: &DevServer, request: Request) -> Response {
    debug!(method = %request.method, target = %request.target, "request");
    let path = request.path().to_string();
    match path.as_str() {
        "/" | "/index.html" => Response::new(200, "text/html; charset=utf-8", INDEX_HTML),
        p if p.starts_with("/api/") => proxy(server, request).await,
        p if p.starts_with("/pkg/") => static_asset(&server.assets, &p["/pkg/".len()..]).await,
        _ => Response::text(404, "Not Found"),
    }
}

async fn static_asset(root: &Path, relative: &str) -> Response {
    let Some(file) = asset_path(root, relative) else {
        return Response::text(404, "Not Found");
    };
    match tokio::fs::read(&file).await {
        Ok(bytes) => Response::new(200, content_type(&file), bytes),
        Err(e) => {
            debug!(file = %file.display(), error = %e, "asset not served");
            Response::text(404, "Not Found")
        }
    }
}

async fn proxy(server: &DevServer, request: Request) -> Response {
    let url = format!("{}{}", server.api_base, request.target);
    let method = match reqwest::Method::from_bytes(request.method.as_bytes()) {
        Ok(m) => m,
        Err(_) => return Response::text(405, "Method Not Allowed"),
    };
    info!(%method, %url, "proxy");

    let mut upstream = server.client.request(method, &url);
    if let Some(ct) = request.header("content-type") {
        upstream = upstream.header(reqwest::header::CONTENT_TYPE, ct);
    }
    let result = upstream.body(request.body).send().await;
    let resp = match result {
        Ok(r) => r,
        Err(e) => {
            warn!(%url, error = %e, "upstream unreachable");
            return Response::new(
                502,
                "application/json",
                serde_json::json!({ "detail": format!("API no disponible: {e}") }).to_string(),
            );
        }
    };

    let status = resp.status().as_u16();
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();
    match resp.bytes().await {
        Ok(body) => Response {
            status,
            content_type,
            body: body.to_vec(),
        },
        Err(e) => {
            warn!(%url, error = %e, "upstream body failed");
            Response::text(502, "Bad Gateway")
        }
    }
}
