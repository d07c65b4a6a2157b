//! Constants for the Remote Control wire protocol, engine object paths and tool defaults
//!
//! Engine-side object paths and function names are a fixed external contract; they are
//! collected here so the operations read as sequences of named calls.
use std::ops::RangeInclusive;

// ============================================================================
// NETWORK CONSTANTS
// ============================================================================

/// Default host for Remote Control connections
/// Using IPv4 address directly to avoid IPv6 connection issues
pub const DEFAULT_UNREAL_HOST: &str = "127.0.0.1";

/// Default Remote Control HTTP port
pub const DEFAULT_UNREAL_PORT: u16 = 30010;

/// HTTP protocol for Remote Control connections
pub const REMOTE_HTTP_PROTOCOL: &str = "http";

/// Path of the object-call endpoint
pub const REMOTE_OBJECT_CALL_PATH: &str = "/remote/object/call";

/// valid ports
pub const MIN_VALID_PORT: u16 = 1024; // Non-privileged ports start here
pub const MAX_VALID_PORT: u16 = 65534;
pub const VALID_PORT_RANGE: RangeInclusive<u16> = MIN_VALID_PORT..=MAX_VALID_PORT;

/// Liveness probe timeout in seconds
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

/// Regular remote call timeout in seconds
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 10;

/// Connection pool settings for the shared HTTP client
pub const POOL_IDLE_TIMEOUT_SECS: u64 = 300;
pub const POOL_MAX_IDLE_PER_HOST: usize = 4;
pub const CONNECT_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// ENVIRONMENT VARIABLES
// ============================================================================

pub const UNREAL_HOST_ENV_VAR: &str = "UNREAL_RC_HOST";
pub const UNREAL_PORT_ENV_VAR: &str = "UNREAL_RC_PORT";
pub const PROBE_TIMEOUT_ENV_VAR: &str = "UNREAL_RC_PROBE_TIMEOUT_SECS";
pub const CALL_TIMEOUT_ENV_VAR: &str = "UNREAL_RC_CALL_TIMEOUT_SECS";
pub const LOG_LEVEL_ENV_VAR: &str = "UNREAL_MCP_LOG_LEVEL";

// ============================================================================
// ENGINE OBJECT PATHS
// ============================================================================

pub const EDITOR_ACTOR_SUBSYSTEM: &str = "/Script/UnrealEd.Default__EditorActorSubsystem";
pub const EDITOR_LEVEL_LIBRARY: &str =
    "/Script/EditorScriptingUtilities.Default__EditorLevelLibrary";
pub const EDITOR_ASSET_LIBRARY: &str =
    "/Script/EditorScriptingUtilities.Default__EditorAssetLibrary";

pub const STATIC_MESH_ACTOR_CLASS: &str = "/Script/Engine.StaticMeshActor";
pub const STATIC_MESH_COMPONENT_CLASS: &str = "/Script/Engine.StaticMeshComponent";

/// Base material used for generated color material instances
pub const BASE_COLOR_MATERIAL: &str = "/Engine/BasicShapes/BasicShapeMaterial.BasicShapeMaterial";

/// Vector parameter on the base material that carries the color
pub const COLOR_PARAMETER_NAME: &str = "Color";

/// Marker identifying static mesh actors by class or object path
pub const STATIC_MESH_ACTOR_MARKER: &str = "StaticMeshActor";

// ============================================================================
// ENGINE FUNCTION NAMES
// ============================================================================

pub const FN_GET_ALL_LEVEL_ACTORS: &str = "GetAllLevelActors";
pub const FN_GET_ACTOR_LABEL: &str = "GetActorLabel";
pub const FN_SET_ACTOR_LABEL: &str = "SetActorLabel";
pub const FN_GET_COMPONENT_BY_CLASS: &str = "GetComponentByClass";
pub const FN_SPAWN_ACTOR_FROM_CLASS: &str = "SpawnActorFromClass";
pub const FN_DESTROY_ACTOR: &str = "DestroyActor";
pub const FN_GET_CLASS: &str = "GetClass";

pub const FN_GET_ACTOR_LOCATION: &str = "GetActorLocation";
pub const FN_GET_ACTOR_ROTATION: &str = "GetActorRotation";
pub const FN_GET_ACTOR_SCALE: &str = "GetActorScale3D";
pub const FN_GET_ACTOR_BOUNDS: &str = "GetActorBounds";
pub const FN_SET_ACTOR_LOCATION: &str = "SetActorLocation";
pub const FN_SET_ACTOR_ROTATION: &str = "SetActorRotation";
pub const FN_SET_ACTOR_SCALE: &str = "SetActorScale3D";
pub const FN_SET_ACTOR_HIDDEN: &str = "SetActorHiddenInGame";

pub const FN_GET_STATIC_MESH: &str = "GetStaticMesh";
pub const FN_SET_STATIC_MESH: &str = "SetStaticMesh";
pub const FN_GET_MATERIAL: &str = "GetMaterial";
pub const FN_SET_MATERIAL: &str = "SetMaterial";
pub const FN_CREATE_DYNAMIC_MATERIAL: &str = "CreateDynamicMaterialInstance";
pub const FN_SET_VECTOR_PARAMETER: &str = "SetVectorParameterValue";

pub const FN_LIST_ASSETS: &str = "ListAssets";
pub const FN_GET_ASSETS_BY_PATH: &str = "GetAssetsByPath";

// ============================================================================
// WIRE FIELD NAMES
// ============================================================================

pub const FIELD_RETURN_VALUE: &str = "ReturnValue";
pub const FIELD_ORIGIN: &str = "Origin";
pub const FIELD_BOX_EXTENT: &str = "BoxExtent";

// ============================================================================
// TOOL DEFAULTS
// ============================================================================

pub const DEFAULT_SEARCH_PATH: &str = "/Game";
pub const DEFAULT_LIST_MAX_RESULTS: usize = 20;
pub const DEFAULT_RECURSIVE_MAX_RESULTS: usize = 50;
pub const DEFAULT_MESH_TYPE: &str = "CUBE";
pub const DEFAULT_BLUEPRINT_ACTOR_NAME: &str = "BlueprintActor";

/// Placeholder for a report field whose query failed
pub const NOT_AVAILABLE: &str = "Not available";

/// Conventional content subdirectories searched by the recursive asset search
pub const COMMON_ASSET_SUBDIRS: [&str; 9] = [
    "",
    "/Blueprints",
    "/Meshes",
    "/StaticMeshes",
    "/Materials",
    "/Textures",
    "/FX",
    "/Audio",
    "/Animations",
];

// ============================================================================
// LOGGING
// ============================================================================

/// File name of the trace log in the temp directory
pub const TRACE_LOG_FILE_NAME: &str = "unreal_rc_mcp_trace.log";
