use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};
use uuid::Uuid;

use super::remote_call::{RemoteCall, RemoteResponse};
use super::transport::RemoteTransport;
use crate::config::{Port, UnrealConfig};
use crate::error::Result;

/// One handle to the Remote Control endpoint
///
/// Handles are never repaired in place: once invalidated, the manager builds a new one with a
/// fresh id, which is what lets sessions tell a stale handle from the current one.
pub struct UnrealConnection {
    id:            Uuid,
    host:          String,
    port:          Port,
    url:           String,
    probe_timeout: Duration,
    call_timeout:  Duration,
    transport:     Arc<dyn RemoteTransport>,
}

impl UnrealConnection {
    pub fn new(config: &UnrealConfig, transport: Arc<dyn RemoteTransport>) -> Self {
        Self {
            id: Uuid::new_v4(),
            host: config.host.clone(),
            port: config.port,
            url: config.object_call_url(),
            probe_timeout: config.probe_timeout,
            call_timeout: config.call_timeout,
            transport,
        }
    }

    pub const fn id(&self) -> Uuid {
        self.id
    }

    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Lightweight liveness check with the short probe timeout
    pub async fn probe(&self) -> Result<()> {
        debug!("Probing Unreal Engine at {}", self.url);
        self.transport
            .send(&self.url, &RemoteCall::probe(), self.probe_timeout)
            .await
            .map(|_| ())
    }

    /// One round trip with the regular call timeout
    pub async fn call(&self, call: &RemoteCall) -> Result<RemoteResponse> {
        info!("Remote call {} on {}", call.function_name, call.object_path);
        debug!("Remote call {} parameters: {:?}", call.function_name, call.parameters);
        self.transport
            .send(&self.url, call, self.call_timeout)
            .await
            .map(RemoteResponse::new)
    }
}
