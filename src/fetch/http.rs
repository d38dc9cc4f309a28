// src/fetch/http.rs
// =============================================================================
// The default Fetcher: plain HTTP GET with reqwest.
//
// Key functionality:
// - One shared Client (connection pooling) with a per-request timeout
// - Follows a bounded number of redirects
// - Maps every failure mode onto a FetchError kind
// - Refuses bodies larger than a configured limit, both from the
//   Content-Length header and while streaming chunks
// =============================================================================

use super::{Document, Fetcher};
use crate::config::CrawlConfig;
use crate::error::{EngineError, FetchError};
use async_trait::async_trait;
use reqwest::{header, Client};
use url::Url;

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_body_bytes: usize,
}

impl HttpFetcher {
    /// Builds a fetcher from the timeout, redirect, user agent and body size
    /// settings of a crawl config.
    pub fn new(config: &CrawlConfig) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Document, FetchError> {
        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                code: status.as_u16(),
            });
        }

        if let Some(length) = response.content_length() {
            if length > self.max_body_bytes as u64 {
                return Err(FetchError::TooLarge {
                    limit: self.max_body_bytes,
                });
            }
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // Content-Length can be missing (chunked encoding) or wrong,
        // so the limit is enforced on the bytes actually received too
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(categorize_error)? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(FetchError::TooLarge {
                    limit: self.max_body_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(Document {
            url: final_url,
            body: String::from_utf8_lossy(&body).into_owned(),
            content_type,
        })
    }
}

// Sorts reqwest errors into our failure kinds.
// A redirect loop is reported as a network failure: the page is unreachable.
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if let Some(status) = error.status() {
        FetchError::HttpStatus {
            code: status.as_u16(),
        }
    } else {
        FetchError::Network {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // Serves one canned HTTP response per connection on a random local port
    async fn serve(response: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                tokio::spawn(async move {
                    let mut buf = [0u8; 4096];
                    let _ = socket.read(&mut buf).await;
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });
        Url::parse(&format!("http://{}/page", addr)).unwrap()
    }

    // Accepts connections but never answers
    async fn serve_silence() -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        Url::parse(&format!("http://{}/slow", addr)).unwrap()
    }

    fn fetcher(config: CrawlConfig) -> HttpFetcher {
        HttpFetcher::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let url = serve(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 26\r\nConnection: close\r\n\r\n<a href=\"/next\">next</a>\r\n",
        )
        .await;

        let doc = fetcher(CrawlConfig::default()).fetch(&url).await.unwrap();
        assert_eq!(doc.url, url);
        assert_eq!(doc.content_type.as_deref(), Some("text/html"));
        assert!(doc.body.contains("/next"));
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let url = serve(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        let err = fetcher(CrawlConfig::default()).fetch(&url).await.unwrap_err();
        assert_eq!(err, FetchError::HttpStatus { code: 404 });
    }

    #[tokio::test]
    async fn test_fetch_too_large() {
        let url = serve(
            "HTTP/1.1 200 OK\r\nContent-Length: 20\r\nConnection: close\r\n\r\n01234567890123456789",
        )
        .await;

        let config = CrawlConfig::default().with_max_body_bytes(8);
        let err = fetcher(config).fetch(&url).await.unwrap_err();
        assert_eq!(err, FetchError::TooLarge { limit: 8 });
    }

    #[tokio::test]
    async fn test_fetch_too_large_chunked() {
        // No Content-Length, so the limit is only hit while streaming
        let url = serve(
            "HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n14\r\n01234567890123456789\r\n0\r\n\r\n",
        )
        .await;

        let config = CrawlConfig::default().with_max_body_bytes(8);
        let err = fetcher(config).fetch(&url).await.unwrap_err();
        assert_eq!(err, FetchError::TooLarge { limit: 8 });
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let url = serve_silence().await;

        let config = CrawlConfig::default().with_request_timeout(Duration::from_millis(200));
        let err = fetcher(config).fetch(&url).await.unwrap_err();
        assert_eq!(err, FetchError::Timeout);
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Bind then drop to get a port nobody is listening on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{}/", addr)).unwrap();
        let err = fetcher(CrawlConfig::default()).fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }));
    }
}
