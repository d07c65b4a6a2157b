//! HTTP transport for Remote Control calls
//!
//! [`RemoteTransport`] is the seam between the connection manager and the network. The real
//! implementation shares one pooled `reqwest::Client` across all handles so recreating a
//! connection handle never leaks sockets.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use error_stack::Report;
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::remote_call::RemoteCall;
use crate::constants::{CONNECT_TIMEOUT_SECS, POOL_IDLE_TIMEOUT_SECS, POOL_MAX_IDLE_PER_HOST};
use crate::error::{Error, Result};

static HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS))
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Sends one remote call and returns the decoded response mapping
#[async_trait]
pub trait RemoteTransport: Send + Sync {
    async fn send(&self, url: &str, call: &RemoteCall, timeout: Duration) -> Result<Value>;
}

/// [`RemoteTransport`] over HTTP `PUT`
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
        }
    }
}

impl HttpTransport {
    /// The engine answered, but refused the call; the connection itself is fine
    fn status_error(
        call: &RemoteCall,
        url: &str,
        status: StatusCode,
        body: &str,
    ) -> Report<Error> {
        warn!(
            "Remote call {} returned HTTP status {status}",
            call.function_name
        );
        let mut report = Report::new(Error::rejected(
            &call.function_name,
            format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error")
            ),
        ))
        .attach(format!("Object: {}", call.object_path))
        .attach(format!("URL: {url}"));
        if !body.trim().is_empty() {
            report = report.attach(format!("Body: {body}"));
        }
        report
    }

    fn request_error(call: &RemoteCall, url: &str, e: &reqwest::Error) -> Report<Error> {
        warn!("Remote call {} failed - error={e}", call.function_name);

        let error_type = if e.is_timeout() {
            "Timeout"
        } else if e.is_connect() {
            "Connection failed"
        } else if e.is_request() {
            "Request error"
        } else if e.is_body() {
            "Body error"
        } else {
            "Unknown error"
        };

        Report::new(Error::transport(
            &call.function_name,
            format!("{error_type}: {e}"),
        ))
        .attach(format!("Object: {}", call.object_path))
        .attach(format!("URL: {url}"))
    }
}

#[async_trait]
impl RemoteTransport for HttpTransport {
    async fn send(&self, url: &str, call: &RemoteCall, timeout: Duration) -> Result<Value> {
        debug!(
            "PUT {url} - body: {}",
            serde_json::to_string(call).unwrap_or_else(|_| "<unserializable>".to_string())
        );

        let response = self
            .client
            .put(url)
            .json(call)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Self::request_error(call, url, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(call, url, status, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Self::request_error(call, url, &e))?;
        debug!("Remote call {} response: {body}", call.function_name);

        // Void functions answer with an empty body
        if body.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }

        serde_json::from_str(&body).map_err(|e| {
            Report::new(Error::InvalidResponse(format!(
                "{} returned invalid JSON: {e}",
                call.function_name
            )))
            .attach(format!("Body: {body}"))
        })
    }
}
