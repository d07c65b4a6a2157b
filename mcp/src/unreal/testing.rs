//! Stand-ins for the editor, used by tests across the crate
//!
//! [`MockTransport`] records every call and answers from a small fake level, so operations can
//! be exercised end to end and asserted on by the exact sequence of remote calls they issue.
//! [`FakeEditor`] is a loopback HTTP endpoint for tests that need the real `HttpTransport`.

#![allow(clippy::unwrap_used, reason = "poisoned test locks should fail the test")]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use error_stack::Report;
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use super::manager::ConnectionManager;
use super::remote_call::RemoteCall;
use super::transport::RemoteTransport;
use crate::config::{Port, UnrealConfig};
use crate::error::{Error, Result};

const LEVEL_PREFIX: &str = "/Game/Maps/Test.Test:PersistentLevel";

/// How a scripted function fails
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    /// Timeout or refused connection
    Transport,
    /// The engine answered with an error status, as `HttpTransport` reports a 400
    Engine,
}

struct FakeActor {
    path:  String,
    label: String,
    class: String,
}

#[derive(Default)]
struct Scene {
    actors:          Vec<FakeActor>,
    assets:          HashMap<String, Vec<String>>,
    fallback_assets: HashMap<String, Vec<String>>,
    failures:        HashMap<String, Failure>,
    offline:         bool,
    spawned:         usize,
}

impl Scene {
    fn add_actor(&mut self, label: Option<&str>, class: &str) -> String {
        let path = format!("{LEVEL_PREFIX}.{class}_{}", self.spawned);
        let label = label.map_or_else(|| format!("{class}{}", self.spawned), str::to_string);
        self.spawned += 1;
        self.actors.push(FakeActor {
            path: path.clone(),
            label,
            class: class.to_string(),
        });
        path
    }

    fn actor(&self, path: &str) -> Option<&FakeActor> {
        self.actors.iter().find(|actor| actor.path == path)
    }

    fn actor_mut(&mut self, path: &str) -> Option<&mut FakeActor> {
        self.actors.iter_mut().find(|actor| actor.path == path)
    }

    fn respond(&mut self, call: &RemoteCall) -> Result<Value> {
        let param_str = |name: &str| {
            call.param(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let unknown_object = || {
            Report::new(Error::InvalidResponse(format!(
                "no object at {}",
                call.object_path
            )))
        };

        let value = match call.function_name.as_str() {
            "GetAllLevelActors" => {
                let paths: Vec<&str> = self.actors.iter().map(|a| a.path.as_str()).collect();
                json!({ "ReturnValue": paths })
            },
            "GetActorLabel" => {
                let actor = self.actor(&call.object_path).ok_or_else(unknown_object)?;
                json!({ "ReturnValue": actor.label })
            },
            "SetActorLabel" => {
                let label = param_str("NewActorLabel");
                self.actor_mut(&call.object_path)
                    .ok_or_else(unknown_object)?
                    .label = label;
                json!({})
            },
            "SpawnActorFromClass" => {
                let class_path = param_str("ActorClass");
                let class = class_path.rsplit('.').next().unwrap_or_default().to_string();
                let path = self.add_actor(None, &class);
                json!({ "ReturnValue": path })
            },
            "DestroyActor" => {
                let target = param_str("ActorToDestroy");
                let before = self.actors.len();
                self.actors.retain(|actor| actor.path != target);
                json!({ "ReturnValue": self.actors.len() < before })
            },
            "GetClass" => {
                let actor = self.actor(&call.object_path).ok_or_else(unknown_object)?;
                json!({ "ReturnValue": format!("/Script/Engine.{}", actor.class) })
            },
            "GetComponentByClass" => {
                let actor = self.actor(&call.object_path).ok_or_else(unknown_object)?;
                if actor.class.contains("StaticMeshActor")
                    && param_str("ComponentClass").ends_with("StaticMeshComponent")
                {
                    json!({ "ReturnValue": format!("{}.StaticMeshComponent0", actor.path) })
                } else {
                    json!({ "ReturnValue": null })
                }
            },
            "CreateDynamicMaterialInstance" => {
                json!({ "ReturnValue": format!("{}.MaterialInstanceDynamic_0", call.object_path) })
            },
            "GetActorLocation" => json!({ "ReturnValue": { "X": 100.0, "Y": 200.0, "Z": 300.0 } }),
            "GetActorRotation" => json!({ "ReturnValue": { "Pitch": 0.0, "Yaw": 90.0, "Roll": 0.0 } }),
            "GetActorScale3D" => json!({ "ReturnValue": { "X": 1.0, "Y": 1.0, "Z": 1.0 } }),
            "GetActorBounds" => json!({
                "Origin": { "X": 0.0, "Y": 0.0, "Z": 50.0 },
                "BoxExtent": { "X": 50.0, "Y": 25.0, "Z": 50.0 }
            }),
            "GetStaticMesh" => json!({ "ReturnValue": "/Engine/BasicShapes/Cube.Cube" }),
            "GetMaterial" => json!({ "ReturnValue": "/Game/Materials/M_Crate.M_Crate" }),
            "ListAssets" => {
                let assets = self
                    .assets
                    .get(&param_str("DirectoryPath"))
                    .cloned()
                    .unwrap_or_default();
                json!({ "ReturnValue": assets })
            },
            "GetAssetsByPath" => {
                let assets = self
                    .fallback_assets
                    .get(&param_str("DirectoryPath"))
                    .cloned()
                    .unwrap_or_default();
                json!({ "ReturnValue": assets })
            },
            _ => json!({}),
        };
        Ok(value)
    }
}

/// Recording transport backed by a fake level
#[derive(Default)]
pub struct MockTransport {
    calls: Mutex<Vec<RemoteCall>>,
    scene: Mutex<Scene>,
}

impl MockTransport {
    /// A level holding `(label, class)` actors in order
    pub fn with_level(actors: &[(&str, &str)]) -> Arc<Self> {
        let mock = Self::default();
        {
            let mut scene = mock.scene();
            for (label, class) in actors {
                scene.add_actor(Some(*label), class);
            }
        }
        Arc::new(mock)
    }

    /// A connection manager wired to this transport
    pub fn manager(self: &Arc<Self>) -> ConnectionManager {
        ConnectionManager::new(UnrealConfig::default(), Arc::clone(self) as Arc<dyn RemoteTransport>)
    }

    fn scene(&self) -> MutexGuard<'_, Scene> {
        self.scene.lock().unwrap()
    }

    pub fn set_offline(&self, offline: bool) {
        self.scene().offline = offline;
    }

    /// Make every call to `function` fail until cleared
    pub fn fail(&self, function: &str, failure: Failure) {
        self.scene().failures.insert(function.to_string(), failure);
    }

    /// Assets answered by `ListAssets` for `directory`
    pub fn add_assets(&self, directory: &str, assets: &[&str]) {
        self.scene().assets.insert(
            directory.to_string(),
            assets.iter().map(|a| (*a).to_string()).collect(),
        );
    }

    /// Assets answered by `GetAssetsByPath` for `directory`
    pub fn add_fallback_assets(&self, directory: &str, assets: &[&str]) {
        self.scene().fallback_assets.insert(
            directory.to_string(),
            assets.iter().map(|a| (*a).to_string()).collect(),
        );
    }

    pub fn actor_path(&self, label: &str) -> String {
        self.scene()
            .actors
            .iter()
            .find(|actor| actor.label == label)
            .map(|actor| actor.path.clone())
            .unwrap()
    }

    pub fn has_actor(&self, label: &str) -> bool {
        self.scene().actors.iter().any(|actor| actor.label == label)
    }

    pub fn actor_count(&self) -> usize {
        self.scene().actors.len()
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, function: &str) -> Vec<RemoteCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.function_name == function)
            .collect()
    }

    pub fn count(&self, function: &str) -> usize {
        self.calls_to(function).len()
    }

    /// Function names in call order
    pub fn function_names(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| call.function_name)
            .collect()
    }
}

#[async_trait]
impl RemoteTransport for MockTransport {
    async fn send(&self, _url: &str, call: &RemoteCall, _timeout: Duration) -> Result<Value> {
        self.calls.lock().unwrap().push(call.clone());

        let mut scene = self.scene();
        if scene.offline {
            return Err(Report::new(Error::transport(
                &call.function_name,
                "Connection failed: connection refused",
            )));
        }
        match scene.failures.get(&call.function_name) {
            Some(Failure::Transport) => Err(Report::new(Error::transport(
                &call.function_name,
                "Timeout: operation timed out",
            ))),
            Some(Failure::Engine) => Err(Report::new(Error::rejected(
                &call.function_name,
                "HTTP 400 Bad Request",
            ))),
            None => scene.respond(call),
        }
    }
}

/// How [`FakeEditor`] answers one function
#[derive(Debug, Clone)]
pub enum Reply {
    /// Respond with this status and JSON body
    Status(u16, Value),
    /// Never respond, so the client times out
    Stall,
}

type Replies = Arc<Mutex<HashMap<String, Reply>>>;
type Seen = Arc<Mutex<Vec<String>>>;

/// Remote Control HTTP endpoint on a loopback port, answering by function name
///
/// Functions without a scripted reply answer `200 {}`.
pub struct FakeEditor {
    port:    u16,
    seen:    Seen,
    replies: Replies,
    server:  JoinHandle<()>,
}

impl FakeEditor {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let seen = Seen::default();
        let replies = Replies::default();
        let server = tokio::spawn(accept_loop(
            listener,
            Arc::clone(&seen),
            Arc::clone(&replies),
        ));
        Self {
            port,
            seen,
            replies,
            server,
        }
    }

    pub fn reply(&self, function: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .insert(function.to_string(), reply);
    }

    /// Function names received, in arrival order
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    /// A connection manager using `HttpTransport` against this endpoint, with a short call
    /// timeout
    pub fn manager(&self) -> ConnectionManager {
        ConnectionManager::http(UnrealConfig {
            host:          "127.0.0.1".to_string(),
            port:          Port(self.port),
            probe_timeout: Duration::from_secs(2),
            call_timeout:  Duration::from_millis(300),
        })
    }
}

impl Drop for FakeEditor {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn accept_loop(listener: TcpListener, seen: Seen, replies: Replies) {
    while let Ok((socket, _)) = listener.accept().await {
        tokio::spawn(serve_connection(
            socket,
            Arc::clone(&seen),
            Arc::clone(&replies),
        ));
    }
}

/// Read one request and return its body
async fn read_body(socket: &mut TcpStream) -> Option<Vec<u8>> {
    let mut request = Vec::new();
    let mut buf = [0_u8; 4096];
    loop {
        let n = socket.read(&mut buf).await.ok()?;
        if n == 0 {
            return None;
        }
        request.extend_from_slice(&buf[..n]);
        let text = String::from_utf8_lossy(&request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            continue;
        };
        let length = text[..header_end]
            .lines()
            .find_map(|line| {
                line.to_ascii_lowercase()
                    .strip_prefix("content-length:")
                    .and_then(|v| v.trim().parse::<usize>().ok())
            })
            .unwrap_or(0);
        let body_start = header_end + 4;
        if request.len() >= body_start + length {
            return Some(request[body_start..body_start + length].to_vec());
        }
    }
}

async fn serve_connection(mut socket: TcpStream, seen: Seen, replies: Replies) {
    let Some(body) = read_body(&mut socket).await else {
        return;
    };
    let function = serde_json::from_slice::<Value>(&body)
        .ok()
        .and_then(|call| call.get("functionName")?.as_str().map(str::to_string))
        .unwrap_or_default();
    seen.lock().unwrap().push(function.clone());

    let reply = replies.lock().unwrap().get(&function).cloned();
    let (status, body) = match reply {
        Some(Reply::Stall) => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            return;
        },
        Some(Reply::Status(status, body)) => (status, body.to_string()),
        None => (200, "{}".to_string()),
    };
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown");
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = socket.write_all(response.as_bytes()).await;
}
