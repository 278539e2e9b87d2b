//! ZenQuotes API client
//!
//! Fetches the quote of the day and parses the first record of the response.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::render::strip_ansi;

/// Quote-of-the-day endpoint
pub const DEFAULT_ENDPOINT: &str = "https://zenquotes.io/api/today";

/// Upper bound on the whole request, connect through body
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors that can occur when fetching the quote of the day
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed or timed out
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("Quote endpoint returned status {0}")]
    Status(StatusCode),

    /// Response body was not a list of quote records
    #[error("Failed to parse quote response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Response was a valid but empty list
    #[error("Quote endpoint returned no quotes")]
    Empty,
}

/// A single record from the quote endpoint
///
/// The endpoint also sends an image URL, a character count and an HTML
/// rendering; none of them are used.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteQuote {
    /// Quote text
    #[serde(rename = "q")]
    pub quote: String,
    /// Author name
    #[serde(rename = "a")]
    pub author: String,
}

impl RemoteQuote {
    /// Formats the record the way it is cached and displayed
    ///
    /// Both fields are sanitized, so the result is always exactly two lines
    /// with no terminal escapes in them.
    pub fn to_cache_text(&self) -> String {
        format!(
            "{}\n~ {}",
            sanitize_field(&self.quote),
            sanitize_field(&self.author)
        )
    }

    fn sanitized(self) -> Self {
        Self {
            quote: sanitize_field(&self.quote),
            author: sanitize_field(&self.author),
        }
    }
}

/// Strips escape sequences and control characters from remote text
///
/// Whitespace controls (newlines, tabs) become spaces so a field stays on one line.
pub fn sanitize_field(text: &str) -> String {
    strip_ansi(text)
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Anything that can produce the quote of the day
///
/// Implemented by [`QuoteClient`] for the network and by fakes in tests.
#[allow(async_fn_in_trait)]
pub trait QuoteSource {
    /// Performs a single fetch attempt
    async fn fetch(&self) -> Result<RemoteQuote, FetchError>;
}

/// Parses a response body, keeping only the first record
pub fn parse_quote_body(body: &str) -> Result<RemoteQuote, FetchError> {
    let records: Vec<RemoteQuote> = serde_json::from_str(body)?;
    records
        .into_iter()
        .next()
        .map(RemoteQuote::sanitized)
        .ok_or(FetchError::Empty)
}

/// Client for fetching the quote of the day over HTTP
#[derive(Debug, Clone)]
pub struct QuoteClient {
    /// HTTP client for making requests
    http_client: Client,
    /// URL of the quote endpoint (allows override for testing)
    endpoint: String,
}

impl QuoteClient {
    /// Creates a new QuoteClient for `endpoint` with a bounded request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }

    /// Returns the endpoint this client fetches from
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl QuoteSource for QuoteClient {
    async fn fetch(&self) -> Result<RemoteQuote, FetchError> {
        debug!(endpoint = %self.endpoint, "fetching quote of the day");

        let response = self.http_client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        parse_quote_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves a single canned HTTP response and returns the URL to hit
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{}/api/today", addr)
    }

    #[test]
    fn test_parse_quote_body_takes_first_record() {
        let body = r#"[
            {"q": "First", "a": "One", "i": "https://example.com/1.jpg", "c": "5", "h": "<blockquote>First</blockquote>"},
            {"q": "Second", "a": "Two"}
        ]"#;

        let quote = parse_quote_body(body).unwrap();
        assert_eq!(quote.quote, "First");
        assert_eq!(quote.author, "One");
    }

    #[test]
    fn test_parse_quote_body_empty_list() {
        assert!(matches!(parse_quote_body("[]"), Err(FetchError::Empty)));
    }

    #[test]
    fn test_parse_quote_body_malformed() {
        assert!(matches!(
            parse_quote_body("<html>rate limited</html>"),
            Err(FetchError::Malformed(_))
        ));
        assert!(matches!(
            parse_quote_body(r#"[{"q": "missing author"}]"#),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn test_to_cache_text_format() {
        let quote = RemoteQuote {
            quote: "Q".to_string(),
            author: "A".to_string(),
        };
        assert_eq!(quote.to_cache_text(), "Q\n~ A");
    }

    #[test]
    fn test_parse_quote_body_strips_terminal_escapes() {
        let body = r#"[{"q": "Be calm\u001b[2J\u001b]0;pwned\u0007 now\nplease", "a": "\u001b[31mEvil\u009b Author\t"}]"#;

        let quote = parse_quote_body(body).unwrap();
        let text = quote.to_cache_text();

        assert_eq!(text, "Be calm now please\n~ Evil Author");
        assert!(!text.contains('\x1b'));
        assert!(!text.contains('\x07'));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_to_cache_text_sanitizes_constructed_records() {
        let quote = RemoteQuote {
            quote: "hi\x1b]0;pwned\x07\x1b[2J".to_string(),
            author: "A\nB".to_string(),
        };
        assert_eq!(quote.to_cache_text(), "hi\n~ A B");
    }

    #[test]
    fn test_sanitize_field_keeps_unicode() {
        assert_eq!(sanitize_field("  Ça va, très bien 🙂 "), "Ça va, très bien 🙂");
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let url = serve_once("200 OK", r#"[{"q":"Hi","a":"Bob"}]"#).await;
        let client = QuoteClient::new(url, DEFAULT_TIMEOUT).unwrap();

        let quote = client.fetch().await.unwrap();
        assert_eq!(quote.to_cache_text(), "Hi\n~ Bob");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let url = serve_once("503 Service Unavailable", "[]").await;
        let client = QuoteClient::new(url, DEFAULT_TIMEOUT).unwrap();

        match client.fetch().await {
            Err(FetchError::Status(status)) => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE)
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_empty_success_body() {
        let url = serve_once("200 OK", "[]").await;
        let client = QuoteClient::new(url, DEFAULT_TIMEOUT).unwrap();

        assert!(matches!(client.fetch().await, Err(FetchError::Empty)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = QuoteClient::new(format!("http://{}/", addr), DEFAULT_TIMEOUT).unwrap();
        assert!(matches!(client.fetch().await, Err(FetchError::Transport(_))));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and hold the connection without answering
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let client =
            QuoteClient::new(format!("http://{}/", addr), Duration::from_millis(200)).unwrap();
        match client.fetch().await {
            Err(FetchError::Transport(e)) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
