//! Local mock quote endpoint for end-to-end tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// What the mock endpoint does with each request.
#[derive(Clone, Copy)]
pub enum Behavior {
    /// Answer `GET /quote` with this status and body; anything else gets 404.
    Respond(u16, &'static str),
    /// Accept the connection and never answer.
    Hang,
}

pub struct MockEndpoint {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl MockEndpoint {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests that reached the endpoint.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a mock endpoint on an ephemeral local port.
pub async fn start_endpoint(behavior: Behavior) -> MockEndpoint {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));

    let counter = hits.clone();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let counter = counter.clone();
            tokio::spawn(async move {
                serve(socket, behavior, counter).await;
            });
        }
    });

    MockEndpoint { addr, hits }
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

async fn serve(mut socket: TcpStream, behavior: Behavior, hits: Arc<AtomicUsize>) {
    let request_line = read_request(&mut socket).await;
    hits.fetch_add(1, Ordering::SeqCst);

    let (status, body) = match behavior {
        Behavior::Hang => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            return;
        }
        Behavior::Respond(status, body) if request_line.starts_with("GET /quote ") => {
            (status, body)
        }
        Behavior::Respond(..) => (404, "not found"),
    };

    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// Read request headers and return the request line.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&buf)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}
