use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::TransportError;

/// Issues the outbound GETs for the controller.
///
/// Implementations must treat a non-success status as an error and hand back
/// the raw body otherwise; decoding is the caller's job.
#[async_trait]
pub trait BackendTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackendTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;
        debug!(%url, bytes = body.len(), "backend GET completed");
        Ok(body.to_vec())
    }
}
