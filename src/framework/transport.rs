//! # Transports
//!
//! A [`Transport`] moves one [`WireRequest`] to the store and brings back the raw
//! [`WireResponse`]. It does not judge the status code: only failing to get *any* response is an
//! error at this layer. Status interpretation belongs to the
//! [`RequestExecutor`](crate::framework::RequestExecutor).
//!
//! Two implementations ship with the crate:
//! - [`HttpTransport`] talks to a real store over HTTP.
//! - [`MemoryTransport`](crate::framework::MemoryTransport) talks to an in-process
//!   [`MemoryStore`](crate::framework::MemoryStore).

use crate::framework::error::SyncError;
use crate::framework::message::{Method, WireRequest, WireResponse};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use tracing::trace;

/// Something that can deliver a request to the remote store.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns whatever the store answered.
    ///
    /// Returns [`SyncError::Transport`] when no response could be obtained.
    async fn send(&self, request: WireRequest) -> Result<WireResponse, SyncError>;
}

/// HTTP transport over a fixed base address.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, request: &WireRequest) -> String {
        format!("{}{}", self.base_url, request.path())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, SyncError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, self.url(&request))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        // json-server answers DELETE with `{}` and some stores send nothing at all
        let body = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };
        trace!(status, has_body = body.is_some(), "Response received");

        Ok(WireResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let transport = HttpTransport::new("http://localhost:3001/");
        assert_eq!(transport.base_url(), "http://localhost:3001");
        assert_eq!(
            transport.url(&WireRequest::get("products", 4)),
            "http://localhost:3001/products/4"
        );
    }

    /// Accepts one connection, answers with `response` and returns the raw request text.
    async fn serve_once(response: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                raw.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|line| {
                            let line = line.to_ascii_lowercase();
                            line.strip_prefix("content-length:")
                                .and_then(|v| v.trim().parse::<usize>().ok())
                        })
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + length || n == 0 {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&raw).to_string()
        });
        (base_url, handle)
    }

    #[tokio::test]
    async fn create_sends_json_body_with_content_type() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 201 Created\r\nContent-Type: application/json\r\nContent-Length: 8\r\nConnection: close\r\n\r\n{\"id\":3}",
        )
        .await;
        let transport = HttpTransport::new(base_url);

        let response = transport
            .send(WireRequest::create("products", serde_json::json!({ "name": "Cable" })))
            .await
            .unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.body, Some(serde_json::json!({ "id": 3 })));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /products HTTP/1.1"));
        assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"name":"Cable"}"#));
    }

    #[tokio::test]
    async fn empty_body_is_no_body() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let transport = HttpTransport::new(base_url);

        let response = transport.send(WireRequest::remove("products", 1)).await.unwrap();
        assert_eq!(response, WireResponse::new(200, None));

        let request = server.await.unwrap();
        assert!(request.starts_with("DELETE /products/1 HTTP/1.1"));
        assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
    }

    #[tokio::test]
    async fn unreachable_store_is_a_transport_failure() {
        // Port 1 is reserved and nothing listens on it.
        let transport = HttpTransport::new("http://127.0.0.1:1");
        let result = transport.send(WireRequest::list("products")).await;
        assert!(matches!(result, Err(SyncError::Transport(_))));
    }
}
