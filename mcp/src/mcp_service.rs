use std::sync::Arc;

use error_stack::Report;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::actors;
use crate::assets;
use crate::composite;
use crate::error::Error;
use crate::log_tools::{self, SetTracingLevelParams};
use crate::params::ParamInput;
use crate::spatial::SpatialRegistry;
use crate::tool::{KwargsParams, ToolName, ToolOutput};
use crate::unreal::ConnectionManager;

const SERVER_INSTRUCTIONS: &str = "Level editing tools for a running Unreal Editor with the Remote \
                                   Control API enabled. Engine tools take one `kwargs` argument: \
                                   a JSON object, JSON text, or space separated key=value \
                                   pairs.";

/// MCP service exposing Unreal Engine level editing through Remote Control
///
/// One connection manager is shared by every tool call; the spatial registry mirrors what
/// this server created or changed.
#[derive(Clone)]
pub struct McpService {
    connections: Arc<ConnectionManager>,
    spatial:     Arc<Mutex<SpatialRegistry>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
#[allow(
    clippy::unnecessary_wraps,
    reason = "tool handlers report failures inside CallToolResult"
)]
impl McpService {
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self {
            connections,
            spatial: Arc::new(Mutex::new(SpatialRegistry::default())),
            tool_router: Self::tool_router(),
        }
    }

    /// Resolve parameters, run the operation, and keep the spatial registry in step
    async fn dispatch(
        &self,
        tool: ToolName,
        kwargs: ParamInput,
    ) -> crate::error::Result<ToolOutput> {
        let params = kwargs.resolve()?;
        debug!("{tool} called with {:?}", params.as_map());
        let manager = self.connections.as_ref();

        match tool {
            ToolName::CreateStaticMeshActor | ToolName::SpawnStaticMesh => {
                let (output, spec) = if tool == ToolName::SpawnStaticMesh {
                    actors::spawn_static_mesh(manager, &params).await?
                } else {
                    actors::create_static_mesh_actor(manager, &params).await?
                };
                if let Some(spec) = spec {
                    self.spatial.lock().await.record(
                        &spec.label,
                        spec.location.as_deref(),
                        spec.rotation.as_deref(),
                        spec.scale.as_deref(),
                    );
                }
                Ok(output)
            },
            ToolName::SpawnActorFromBlueprint => {
                let (output, spec) = actors::spawn_actor_from_blueprint(manager, &params).await?;
                if let Some(spec) = spec {
                    self.spatial.lock().await.record(
                        &spec.label,
                        spec.location.as_deref(),
                        spec.rotation.as_deref(),
                        spec.scale.as_deref(),
                    );
                }
                Ok(output)
            },
            ToolName::ModifyActor => {
                let (output, changed) = actors::modify_actor(manager, &params).await?;
                if let Some((label, changes)) = changed {
                    self.spatial.lock().await.apply(&label, &changes);
                }
                Ok(output)
            },
            ToolName::DeleteActor => {
                let (output, removed) = actors::delete_actor(manager, &params).await?;
                if let Some(label) = removed {
                    self.spatial.lock().await.remove(&label);
                }
                Ok(output)
            },
            ToolName::GetActorInfo => actors::get_actor_info(manager, &params).await,
            ToolName::GetLevelInfo => {
                let (output, level) = actors::get_level_info(manager).await?;
                self.spatial.lock().await.refresh(&level);
                Ok(output)
            },
            ToolName::ListAvailableAssets => assets::list_available_assets(manager, &params).await,
            ToolName::SearchAssetsRecursively => {
                assets::search_assets_recursively(manager, &params).await
            },
            ToolName::CreateComposite => {
                let (output, created) = composite::create_composite(manager, &params).await?;
                let mut spatial = self.spatial.lock().await;
                for part in &created {
                    spatial.record(
                        &part.label,
                        Some(part.location.as_slice()),
                        None,
                        Some(part.scale.as_slice()),
                    );
                }
                Ok(output)
            },
            ToolName::GetSpatialContext
            | ToolName::GetTraceLogPath
            | ToolName::ResetSpatialContext
            | ToolName::SetTracingLevel => Err(Report::new(Error::General(format!(
                "{tool} does not take kwargs"
            )))),
        }
    }

    async fn run(&self, tool: ToolName, kwargs: ParamInput) -> CallToolResult {
        ToolOutput::into_call_tool_result(self.dispatch(tool, kwargs).await, tool)
    }

    #[tool(
        description = "Create a static mesh actor from a basic shape or a mesh asset. Parameters: \
                       actor_label/name, mesh_type (CUBE, SPHERE, CYLINDER, PLANE, CONE; default \
                       CUBE), static_mesh_asset_path, location (x,y,z), rotation (pitch,yaw,roll), \
                       scale (x,y,z), material_override (material asset path), color (r,g,b[,a] \
                       in 0.0-1.0). Example: \"actor_label=Crate mesh_type=CUBE location=0,0,100\""
    )]
    async fn create_static_mesh_actor(
        &self,
        Parameters(args): Parameters<KwargsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.run(ToolName::CreateStaticMeshActor, args.kwargs).await)
    }

    #[tool(
        description = "Spawn a static mesh actor from an existing mesh asset in the content \
                       browser. Parameters: static_mesh (required; or mesh), actor_label/name, \
                       location, rotation, scale, material_override, color. Example: \
                       \"static_mesh=/Game/Props/SM_Bench location=100,100,0 name=Bench\""
    )]
    async fn spawn_static_mesh(
        &self,
        Parameters(args): Parameters<KwargsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.run(ToolName::SpawnStaticMesh, args.kwargs).await)
    }

    #[tool(
        description = "Spawn an actor from a Blueprint class. Parameters: actor_class (required; \
                       or class), actor_label/name, location, rotation, scale. Example: \
                       \"actor_class=/Game/Blueprints/BP_House.BP_House_C location=0,0,0 name=House\""
    )]
    async fn spawn_actor_from_blueprint(
        &self,
        Parameters(args): Parameters<KwargsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.run(ToolName::SpawnActorFromBlueprint, args.kwargs).await)
    }

    #[tool(
        description = "Modify an existing actor. Parameters: actor_label (required), location, \
                       rotation, scale, visible (true/false), color (r,g,b; static mesh actors \
                       only). Only the given fields change. Example: \"actor_label=Crate \
                       location=100,200,50 rotation=0,45,0\""
    )]
    async fn modify_actor(
        &self,
        Parameters(args): Parameters<KwargsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.run(ToolName::ModifyActor, args.kwargs).await)
    }

    #[tool(description = "Delete an actor from the level. Parameters: actor_label (required).")]
    async fn delete_actor(
        &self,
        Parameters(args): Parameters<KwargsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.run(ToolName::DeleteActor, args.kwargs).await)
    }

    #[tool(
        description = "Detailed JSON report on one actor: type, transform, bounding box, and mesh \
                       and material for static mesh actors. Parameters: actor_label (required)."
    )]
    async fn get_actor_info(
        &self,
        Parameters(args): Parameters<KwargsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.run(ToolName::GetActorInfo, args.kwargs).await)
    }

    #[tool(
        description = "List every actor in the current level with label, type, and location. \
                       Also refreshes the spatial context."
    )]
    async fn get_level_info(&self) -> Result<CallToolResult, McpError> {
        Ok(self.run(ToolName::GetLevelInfo, ParamInput::default()).await)
    }

    #[tool(
        description = "List project assets under one content path. Parameters: asset_type \
                       (all, blueprint, staticmesh, material, texture, sound, particle, \
                       animation; default all), search_path (default /Game), search_term, \
                       max_results (default 20), recursive (default true)."
    )]
    async fn list_available_assets(
        &self,
        Parameters(args): Parameters<KwargsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.run(ToolName::ListAvailableAssets, args.kwargs).await)
    }

    #[tool(
        description = "Search a base path and its conventional subdirectories (Blueprints, \
                       Meshes, StaticMeshes, Materials, Textures, FX, Audio, Animations) for \
                       assets. Parameters: base_path (default /Game), asset_type, search_term, \
                       max_results (default 50)."
    )]
    async fn search_assets_recursively(
        &self,
        Parameters(args): Parameters<KwargsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.run(ToolName::SearchAssetsRecursively, args.kwargs).await)
    }

    #[tool(
        description = "Build a multi-actor arrangement from basic shapes. Parameters: shape or \
                       composition_type (TOWER, WALL, STAIRS, TABLE_CHAIR, HOUSE; default \
                       TOWER), label/name (prefix for part labels), location (x,y,z), scale or \
                       size (x,y,z), color (r,g,b). Example: \"shape=HOUSE name=Cottage \
                       location=0,0,0 scale=2,2,2\""
    )]
    async fn create_composite(
        &self,
        Parameters(args): Parameters<KwargsParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.run(ToolName::CreateComposite, args.kwargs).await)
    }

    #[tool(
        description = "Return the spatial context: last known location, rotation, and scale of \
                       actors created or modified through this server, keyed by label."
    )]
    async fn get_spatial_context(&self) -> Result<CallToolResult, McpError> {
        let result = ToolOutput::report(self.spatial.lock().await.entries());
        Ok(ToolOutput::into_call_tool_result(
            result,
            ToolName::GetSpatialContext,
        ))
    }

    #[tool(description = "Clear the spatial context.")]
    async fn reset_spatial_context(&self) -> Result<CallToolResult, McpError> {
        self.spatial.lock().await.clear();
        info!("Spatial context reset");
        Ok(ToolOutput::into_call_tool_result(
            Ok(ToolOutput::message("Spatial context reset successfully.")),
            ToolName::ResetSpatialContext,
        ))
    }

    #[tool(
        description = "Path of this server's trace log file, whether it exists, and its size."
    )]
    fn get_trace_log_path(&self) -> Result<CallToolResult, McpError> {
        Ok(ToolOutput::into_call_tool_result(
            log_tools::get_trace_log_path(),
            ToolName::GetTraceLogPath,
        ))
    }

    #[tool(
        description = "Change this server's trace log level at runtime (error, warn, info, \
                       debug, trace)."
    )]
    fn set_tracing_level(
        &self,
        Parameters(params): Parameters<SetTracingLevelParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(ToolOutput::into_call_tool_result(
            log_tools::set_tracing_level(&params),
            ToolName::SetTracingLevel,
        ))
    }
}

#[tool_handler]
impl ServerHandler for McpService {
    #[allow(
        clippy::field_reassign_with_default,
        reason = "ServerInfo is non-exhaustive outside rmcp"
    )]
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.instructions = Some(SERVER_INSTRUCTIONS.to_string());
        info
    }
}
