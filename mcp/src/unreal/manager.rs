//! Connection manager for the Remote Control endpoint
//!
//! Two states, disconnected and connected. The first request for a session builds a handle and
//! probes it; a cached handle is re-probed before reuse. A transport failure on any call drops
//! the cached handle, so the next request starts again from a fresh probe.
//!
//! Operations work through a [`Session`] bound to one handle. Once a call on the session fails
//! at the transport level the session refuses further calls, so object references obtained
//! through a discarded handle are never sent again. An HTTP error status only rejects that one
//! call; the session keeps going.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use error_stack::Report;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::connection::UnrealConnection;
use super::remote_call::{RemoteCall, RemoteResponse};
use super::transport::{HttpTransport, RemoteTransport};
use crate::config::UnrealConfig;
use crate::constants::{
    EDITOR_ACTOR_SUBSYSTEM, FN_GET_ACTOR_LABEL, FN_GET_ALL_LEVEL_ACTORS, FN_GET_COMPONENT_BY_CLASS,
};
use crate::error::{Error, Result};

const CONNECT_FAILURE_MESSAGE: &str =
    "Make sure Unreal Engine is running with Remote Control API enabled";

enum ConnectionState {
    Disconnected,
    Connected(Arc<UnrealConnection>),
}

/// Owns the single live connection handle
pub struct ConnectionManager {
    config:    UnrealConfig,
    transport: Arc<dyn RemoteTransport>,
    state:     Mutex<ConnectionState>,
}

impl ConnectionManager {
    pub fn new(config: UnrealConfig, transport: Arc<dyn RemoteTransport>) -> Self {
        Self {
            config,
            transport,
            state: Mutex::new(ConnectionState::Disconnected),
        }
    }

    /// Manager talking HTTP to the configured endpoint
    pub fn http(config: UnrealConfig) -> Self {
        Self::new(config, Arc::new(HttpTransport::default()))
    }

    pub const fn config(&self) -> &UnrealConfig {
        &self.config
    }

    #[cfg(test)]
    pub async fn is_connected(&self) -> bool {
        matches!(*self.state.lock().await, ConnectionState::Connected(_))
    }

    /// Get a validated session, creating or re-probing the handle as needed
    pub async fn connect(&self) -> Result<Session<'_>> {
        let mut state = self.state.lock().await;

        let cached = match &*state {
            ConnectionState::Connected(handle) => Some(Arc::clone(handle)),
            ConnectionState::Disconnected => None,
        };
        if let Some(handle) = cached {
            match handle.probe().await {
                Ok(()) => return Ok(Session::new(self, handle)),
                Err(report) => {
                    warn!(
                        "Cached connection to {} failed its liveness check: {report:?}",
                        handle.endpoint()
                    );
                    *state = ConnectionState::Disconnected;
                },
            }
        }

        let handle = Arc::new(UnrealConnection::new(
            &self.config,
            Arc::clone(&self.transport),
        ));
        handle.probe().await.map_err(|report| {
            report
                .change_context(Error::Connection(CONNECT_FAILURE_MESSAGE.to_string()))
                .attach(format!("Endpoint: {}", handle.endpoint()))
        })?;

        info!("Connected to Unreal Engine at {}", handle.endpoint());
        *state = ConnectionState::Connected(Arc::clone(&handle));
        drop(state);
        Ok(Session::new(self, handle))
    }

    /// Drop the cached handle if it is still the one identified by `id`
    pub async fn invalidate(&self, id: Uuid) {
        let mut state = self.state.lock().await;
        let current = match &*state {
            ConnectionState::Connected(handle) if handle.id() == id => Some(handle.endpoint()),
            _ => None,
        };
        if let Some(endpoint) = current {
            warn!("Invalidating connection to {endpoint}");
            *state = ConnectionState::Disconnected;
        }
    }
}

/// Calls bound to one connection handle, used for the duration of one operation
pub struct Session<'a> {
    manager:  &'a ConnectionManager,
    handle:   Arc<UnrealConnection>,
    poisoned: AtomicBool,
}

impl<'a> Session<'a> {
    const fn new(manager: &'a ConnectionManager, handle: Arc<UnrealConnection>) -> Self {
        Self {
            manager,
            handle,
            poisoned: AtomicBool::new(false),
        }
    }

    #[cfg(test)]
    pub fn handle_id(&self) -> Uuid {
        self.handle.id()
    }

    /// True once a transport failure has invalidated this session's handle
    pub fn is_poisoned(&self) -> bool {
        self.poisoned.load(Ordering::Relaxed)
    }

    /// Invoke `function_name` on `object_path`
    pub async fn call(
        &self,
        object_path: &str,
        function_name: &str,
        parameters: Value,
    ) -> Result<RemoteResponse> {
        if self.is_poisoned() {
            return Err(Report::new(Error::Connection(format!(
                "connection was reset before {function_name}; retry the operation"
            ))));
        }

        let call = RemoteCall::new(object_path, function_name, parameters);
        match self.handle.call(&call).await {
            Ok(response) => Ok(response),
            Err(report) => {
                if report.current_context().invalidates_connection() {
                    self.poisoned.store(true, Ordering::Relaxed);
                    self.manager.invalidate(self.handle.id()).await;
                }
                Err(report)
            },
        }
    }

    /// Object references of every actor in the current level
    pub async fn all_level_actors(&self) -> Result<Vec<String>> {
        let response = self
            .call(EDITOR_ACTOR_SUBSYSTEM, FN_GET_ALL_LEVEL_ACTORS, json!({}))
            .await?;
        Ok(response.return_strings())
    }

    /// Find an actor by display label
    ///
    /// One label query per actor, in level order. When a label query fails without a transport
    /// error, the label is matched against the actor path instead.
    pub async fn find_actor_by_label(&self, label: &str) -> Result<Option<String>> {
        for actor in self.all_level_actors().await? {
            match self.call(&actor, FN_GET_ACTOR_LABEL, json!({})).await {
                Ok(response) => {
                    if response.return_str() == Some(label) {
                        return Ok(Some(actor));
                    }
                },
                Err(report) if report.current_context().invalidates_connection() => {
                    return Err(report);
                },
                Err(report) => {
                    debug!("Label query failed for {actor}, matching on path: {report:?}");
                    if actor.contains(label) {
                        return Ok(Some(actor));
                    }
                },
            }
        }
        Ok(None)
    }

    /// First component of `component_class` on `actor`
    pub async fn component_by_class(
        &self,
        actor: &str,
        component_class: &str,
    ) -> Result<Option<String>> {
        let response = self
            .call(
                actor,
                FN_GET_COMPONENT_BY_CLASS,
                json!({ "ComponentClass": component_class }),
            )
            .await?;
        Ok(response.return_str().map(str::to_string))
    }
}
