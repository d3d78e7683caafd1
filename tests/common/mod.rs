//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use logistics_client::config::schema::{BuildMode, ClientConfig, EnvironmentConfig};
use logistics_client::http::{ClientError, MockServer, Notifier};
use logistics_client::lifecycle::Shutdown;
use logistics_client::mock::MockBackend;

/// Requests seen by a programmable backend, raw head plus body.
pub type Captured = Arc<Mutex<Vec<String>>>;

/// Start a programmable backend on an ephemeral port.
///
/// `f` maps the raw request text to `(status, body)`; every request is also
/// appended to the returned capture list.
pub async fn start_programmable_backend<F, Fut>(f: F) -> (SocketAddr, Captured)
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured: Captured = Arc::default();
    let seen = captured.clone();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let seen = seen.clone();
                    tokio::spawn(async move {
                        let request = read_request(&mut socket).await;
                        seen.lock().unwrap().push(request.clone());
                        let (status, body) = f(request).await;
                        let status_text = match status {
                            200 => "200 OK",
                            401 => "401 Unauthorized",
                            403 => "403 Forbidden",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, captured)
}

/// A backend that always answers with the same status and body.
pub async fn start_fixed_backend(status: u16, body: &'static str) -> (SocketAddr, Captured) {
    start_programmable_backend(move |_| async move { (status, body.to_string()) }).await
}

/// Read one request: headers, then `Content-Length` bytes of body.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(head_end) = text.find("\r\n\r\n") {
            let content_length = text[..head_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// An address nothing listens on.
pub async fn closed_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Start the developer mock server on an ephemeral port.
pub async fn start_mock_server() -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = MockServer::new(Arc::new(MockBackend::default()), &Default::default());
    let signal = shutdown.clone();
    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

pub fn config(mode: BuildMode, use_mock: bool, api_base_url: Option<String>) -> ClientConfig {
    ClientConfig {
        environment: EnvironmentConfig {
            mode,
            use_mock,
            api_base_url,
            mock_delay_ms: 0,
            ..EnvironmentConfig::default()
        },
        ..ClientConfig::default()
    }
}

/// Developer mode against a real address.
pub fn developer_config(addr: SocketAddr) -> ClientConfig {
    config(BuildMode::Development, false, Some(format!("http://{addr}/api")))
}

/// Deployed mode; `None` means no backend address is configured.
pub fn deployed_config(addr: Option<SocketAddr>) -> ClientConfig {
    config(BuildMode::Production, false, addr.map(|a| format!("http://{a}/api")))
}

/// Developer mode, synthetic only.
pub fn synthetic_config() -> ClientConfig {
    config(BuildMode::Development, true, None)
}

/// Collects every notification it receives.
#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, error: &ClientError) {
        self.messages.lock().unwrap().push(error.user_message());
    }
}
