//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use mihomo_updater::config::Settings;
use mihomo_updater::scheduler::UpdateCycle;

/// A request as seen by a mock endpoint.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub type Recorder = Arc<Mutex<Vec<RecordedRequest>>>;

/// Start a mock endpoint that answers every request with a fixed status and body.
pub async fn start_fixed_backend(status: u16, body: &'static str) -> (SocketAddr, Recorder) {
    start_programmable_backend(move || async move { (status, body.to_string()) }).await
}

/// Start a mock endpoint that answers `200 OK` with an arbitrary byte body.
pub async fn start_raw_backend(body: &'static [u8]) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                read_request(&mut socket).await?;
                let head = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                socket.write_all(head.as_bytes()).await?;
                socket.write_all(body).await?;
                socket.shutdown().await
            });
        }
    });

    addr
}

/// Start a programmable mock endpoint on an ephemeral port.
pub async fn start_programmable_backend<F, Fut>(f: F) -> (SocketAddr, Recorder)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorder: Recorder = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let rec = recorder.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    let rec = rec.clone();
                    tokio::spawn(async move {
                        let _ = serve_one(socket, f.as_ref(), &rec).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, recorder)
}

async fn serve_one<F, Fut>(mut socket: TcpStream, f: &F, rec: &Recorder) -> std::io::Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = (u16, String)>,
{
    let request = read_request(&mut socket).await?;
    rec.lock().unwrap().push(request);

    let (status, body) = f().await;
    let status_text = match status {
        200 => "200 OK",
        204 => "204 No Content",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    };

    let response = if status == 204 {
        format!("HTTP/1.1 {}\r\nConnection: close\r\n\r\n", status_text)
    } else {
        format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_text,
            body.len(),
            body
        )
    };
    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await?;
    tokio::time::sleep(Duration::from_millis(10)).await;
    Ok(())
}

async fn read_request(socket: &mut TcpStream) -> std::io::Result<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

    Ok(RecordedRequest {
        method,
        path,
        headers,
        body,
    })
}

/// Settings pointing at local mock endpoints and a temp directory.
pub fn test_settings(subscribe: SocketAddr, dir: &Path, fields: &[&str]) -> Settings {
    Settings {
        subscribe_url: format!("http://{}/sub", subscribe),
        base_config_path: dir.join("base.yaml"),
        output_config_path: dir.join("out/config.yaml"),
        update_fields: fields.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

/// A cycle using a proxy-free client with a short deadline.
pub fn test_cycle(settings: Settings) -> UpdateCycle {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .no_proxy()
        .build()
        .unwrap();
    UpdateCycle::new(Arc::new(settings), client)
}
