//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use route_snap::config::MatchingConfig;

/// Request lines seen by a mock matching service, e.g. `GET /matching/... HTTP/1.1`.
#[derive(Clone, Default)]
pub struct RecordedRequests(Arc<Mutex<Vec<String>>>);

#[allow(dead_code)]
impl RecordedRequests {
    pub fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

/// Start a mock matching service that answers every request with a fixed
/// status and body.
pub async fn start_mock_matcher(status: u16, body: &str) -> (SocketAddr, RecordedRequests) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorded = RecordedRequests::default();
    let body = body.to_string();

    let requests = recorded.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let requests = requests.clone();
                    let body = body.clone();
                    tokio::spawn(async move {
                        let head = read_head(&mut socket).await;
                        if let Some(line) = head.lines().next() {
                            requests.0.lock().unwrap().push(line.to_string());
                        }

                        let status_text = match status {
                            200 => "200 OK",
                            401 => "401 Unauthorized",
                            404 => "404 Not Found",
                            422 => "422 Unprocessable Entity",
                            500 => "500 Internal Server Error",
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

    (addr, recorded)
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
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
    String::from_utf8_lossy(&buf).into_owned()
}

/// Matching configuration pointed at a mock service.
pub fn matching_config(addr: SocketAddr) -> MatchingConfig {
    MatchingConfig {
        base_url: format!("http://{}", addr),
        access_token: "test-token".to_string(),
        search_radius_m: 25.0,
        ..MatchingConfig::default()
    }
}

/// A successful response with a single candidate.
pub const ONE_MATCHING: &str = r#"{
    "code": "Ok",
    "matchings": [{
        "confidence": 0.92,
        "distance": 2843.1,
        "duration": 312.4,
        "geometry": {
            "type": "LineString",
            "coordinates": [[69.2401, 41.3102], [69.2502, 41.3199], [69.2599, 41.3298]]
        },
        "legs": [{"distance": 2843.1, "duration": 312.4, "summary": "", "steps": []}]
    }]
}"#;

/// A successful response with two candidates; the first must win.
#[allow(dead_code)]
pub const TWO_MATCHINGS: &str = r#"{
    "code": "Ok",
    "matchings": [
        {"geometry": {"type": "LineString", "coordinates": [[1.0, 2.0], [3.0, 4.0]]}},
        {"geometry": {"type": "LineString", "coordinates": [[5.0, 6.0], [7.0, 8.0]]}}
    ]
}"#;

#[allow(dead_code)]
pub const NO_MATCHINGS: &str = r#"{"code": "NoMatch", "message": "Could not match", "matchings": []}"#;
