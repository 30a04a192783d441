use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use tracing::debug;

pub const HEALTH_PATH: &str = "/health";

/// Outcome of a single `/health` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Health {
    /// The service answered `200 OK`.
    Healthy,
    /// The service answered with another status code.
    Unhealthy(u16),
    /// No HTTP answer: refused, timed out, malformed address, ...
    Unreachable(String),
}

impl Health {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Health::Healthy)
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Health::Healthy => write!(f, "healthy"),
            Health::Unhealthy(status) => write!(f, "status {status}"),
            Health::Unreachable(reason) => write!(f, "unreachable ({reason})"),
        }
    }
}

pub fn health_url(host: &str, port: u16) -> String {
    format!("http://{host}:{port}{HEALTH_PATH}")
}

/// Plain HTTP client for liveness checks. The body of the answer is never read.
#[derive(Debug, Clone)]
pub struct HealthClient {
    client: reqwest::Client,
}

impl HealthClient {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .no_proxy()
            .build()?;
        Ok(Self { client })
    }

    pub async fn check(&self, host: &str, port: u16) -> Health {
        let url: String = health_url(host, port);
        match self.client.get(&url).send().await {
            Ok(response) if response.status() == StatusCode::OK => Health::Healthy,
            Ok(response) => Health::Unhealthy(response.status().as_u16()),
            Err(e) => {
                debug!("health probe {url} failed: {e}");
                Health::Unreachable(reason(&e))
            }
        }
    }
}

fn reason(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "timed out".to_string()
    } else if e.is_connect() {
        "connection failed".to_string()
    } else if e.is_builder() {
        "invalid address".to_string()
    } else {
        e.to_string()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one request with `status_line` and returns the listening port.
    async fn serve_once(status_line: &'static str) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let response =
                    format!("HTTP/1.1 {status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });
        port
    }

    async fn closed_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    }

    fn client() -> HealthClient {
        HealthClient::new(Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn health_url_targets_health_path() {
        assert_eq!(health_url("10.0.0.5", 7001), "http://10.0.0.5:7001/health");
    }

    #[tokio::test]
    async fn ok_status_is_healthy() {
        let port = serve_once("200 OK").await;
        assert_eq!(client().check("127.0.0.1", port).await, Health::Healthy);
    }

    #[tokio::test]
    async fn other_status_is_unhealthy() {
        let port = serve_once("503 Service Unavailable").await;
        assert_eq!(client().check("127.0.0.1", port).await, Health::Unhealthy(503));
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable() {
        let port = closed_port().await;
        let health = client().check("127.0.0.1", port).await;
        assert!(matches!(health, Health::Unreachable(_)), "got {health:?}");
    }

    #[tokio::test]
    async fn garbage_host_is_unreachable() {
        let health = client().check("not an ip", 7001).await;
        assert!(!health.is_healthy());
    }
}
