#![allow(dead_code)]

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Header names are lower-cased.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// How the stub answers submits.
#[derive(Debug, Clone)]
pub enum ShrinkBehavior {
    /// Reply with a descriptor whose output is `optimized`.
    Optimize { optimized: Vec<u8> },
    /// Reply with `{"error": true, "message": ...}` and a 400 status.
    Reject { message: String },
}

/// Minimal HTTP/1.1 stand-in for the shrink endpoint and its output URLs.
pub struct StubTinify {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl StubTinify {
    pub async fn start(behavior: ShrinkBehavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                handle_connection(stream, addr, &behavior, &recorded).await;
            }
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/web/shrink", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }
}

impl Drop for StubTinify {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
}

async fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];

    let header_end = loop {
        if let Some(end) = find_header_end(&buf) {
            break end;
        }
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_lowercase(), value.trim().to_string()))
        .collect();
    let content_length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(RecordedRequest {
        method,
        path,
        headers,
        body: buf[header_end..header_end + content_length].to_vec(),
    })
}

async fn handle_connection(
    mut stream: TcpStream,
    addr: SocketAddr,
    behavior: &ShrinkBehavior,
    recorded: &Mutex<Vec<RecordedRequest>>,
) {
    let Some(request) = read_request(&mut stream).await else {
        return;
    };
    recorded.lock().unwrap().push(request.clone());

    let (status, content_type, body) = match (request.method.as_str(), behavior) {
        ("POST", ShrinkBehavior::Optimize { optimized }) => {
            let input = request.body.len().max(1);
            let json = format!(
                r#"{{"input":{{"size":{},"type":"image/png"}},"output":{{"size":{},"type":"image/png","ratio":{},"url":"http://{}/output/result.png"}}}}"#,
                request.body.len(),
                optimized.len(),
                optimized.len() as f64 / input as f64,
                addr
            );
            ("201 Created", "application/json", json.into_bytes())
        }
        ("POST", ShrinkBehavior::Reject { message }) => {
            let json = format!(r#"{{"error":true,"message":"{}"}}"#, message);
            ("400 Bad Request", "application/json", json.into_bytes())
        }
        ("GET", ShrinkBehavior::Optimize { optimized }) => {
            ("200 OK", "image/png", optimized.clone())
        }
        _ => ("404 Not Found", "text/plain", b"not found".to_vec()),
    };

    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes()).await;
    let _ = stream.write_all(&body).await;
    let _ = stream.shutdown().await;
}

pub fn write_image(path: &Path, bytes: &[u8]) -> PathBuf {
    File::create(path).unwrap().write_all(bytes).unwrap();
    path.canonicalize().unwrap()
}
