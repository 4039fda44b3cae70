//! Transport clients.
//!
//! A [`Client`] delivers one envelope and reports the collector's answer.
//! Clients never retry; a failed delivery is reported to the sensor, which
//! counts it and moves on.

use crate::envelope::Envelope;
use crate::error::{Result, SensorError};
use crate::options::HttpOptions;
use async_trait::async_trait;
use reqwest::{StatusCode, header};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// A successful delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub status: u16,
}

#[async_trait]
pub trait Client: Send + Sync {
    async fn send(&self, envelope: &Envelope) -> Result<Delivery>;
}

/// POSTs envelopes as JSON to a collector endpoint.
#[derive(Debug, Clone)]
pub struct HttpClient {
    options: HttpOptions,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(options: HttpOptions) -> Result<Self> {
        options.validate()?;

        let mut headers = header::HeaderMap::new();
        if let Some(api_key) = &options.api_key {
            let value = header::HeaderValue::from_str(api_key)
                .map_err(|_| SensorError::Options("api_key is not a valid header value".into()))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_millis(options.connection_timeout_ms))
            .timeout(Duration::from_millis(options.connection_timeout_ms))
            .build()?;

        Ok(Self { options, client })
    }

    pub fn options(&self) -> &HttpOptions {
        &self.options
    }
}

#[async_trait]
impl Client for HttpClient {
    async fn send(&self, envelope: &Envelope) -> Result<Delivery> {
        let body = serde_json::to_vec(envelope)?;
        if self.options.debug {
            tracing::debug!(
                host = %self.options.host,
                envelope = %String::from_utf8_lossy(&body),
                "sending envelope"
            );
        }

        let response = self
            .client
            .post(&self.options.host)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = failure_message(status, response.text().await);
            return Err(SensorError::Server {
                status: status.as_u16(),
                message,
            });
        }
        Ok(Delivery {
            status: status.as_u16(),
        })
    }
}

/// The collector's explanation of a rejected envelope. Falls back to the
/// status reason when the body is empty and names the read error when the
/// body cannot be read.
fn failure_message<E: fmt::Display>(
    status: StatusCode,
    body: std::result::Result<String, E>,
) -> String {
    match body {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string(),
        Err(e) => format!("<unreadable body: {e}>"),
    }
}

/// Records envelopes in memory. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryClient {
    envelopes: Mutex<Vec<Envelope>>,
    fail_with: Option<u16>,
    call_count: AtomicU32,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every delivery with a server error of `status`.
    pub fn with_failure(mut self, status: u16) -> Self {
        self.fail_with = Some(status);
        self
    }

    /// Envelopes accepted so far.
    pub fn envelopes(&self) -> Vec<Envelope> {
        self.envelopes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Client for MemoryClient {
    async fn send(&self, envelope: &Envelope) -> Result<Delivery> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.fail_with {
            return Err(SensorError::Server {
                status,
                message: "memory client configured to fail".to_string(),
            });
        }
        self.envelopes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(envelope.clone());
        Ok(Delivery { status: 200 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_clients_refuse_unusable_options() {
        let options = HttpOptions {
            api_key: Some("line\nbreak".to_string()),
            ..HttpOptions::default()
        };
        assert!(matches!(
            HttpClient::new(options),
            Err(SensorError::Options(_))
        ));
        let options = HttpOptions {
            host: "collector.example.edu".to_string(),
            ..HttpOptions::default()
        };
        assert!(HttpClient::new(options).is_err());
    }

    #[test]
    fn failure_messages_are_never_blank() {
        let status = StatusCode::SERVICE_UNAVAILABLE;
        assert_eq!(
            failure_message::<String>(status, Ok("collector paused".to_string())),
            "collector paused"
        );
        assert_eq!(
            failure_message::<String>(status, Ok(String::new())),
            "Service Unavailable"
        );
        assert_eq!(
            failure_message(status, Err("connection reset")),
            "<unreadable body: connection reset>"
        );
    }

    #[tokio::test]
    async fn memory_clients_record_or_fail() {
        let envelope = Envelope::new("sensor:1", "ctx", Vec::new());

        let recording = MemoryClient::new();
        recording.send(&envelope).await.expect("records");
        assert_eq!(recording.envelopes(), vec![envelope.clone()]);

        let failing = MemoryClient::new().with_failure(503);
        let err = failing.send(&envelope).await.expect_err("configured to fail");
        assert!(matches!(err, SensorError::Server { status: 503, .. }));
        assert_eq!(failing.call_count(), 1);
        assert!(failing.envelopes().is_empty());
    }
}
