//! Actor creation: primitive or custom mesh actors, blueprint actors, and named mesh assets

use error_stack::Report;
use serde_json::{Map, Value, json};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::debug;

use super::material::{self, MaterialChoice};
use super::steps::StepLog;
use crate::constants::{
    DEFAULT_BLUEPRINT_ACTOR_NAME, DEFAULT_MESH_TYPE, EDITOR_LEVEL_LIBRARY, FN_SET_ACTOR_LABEL,
    FN_SET_ACTOR_SCALE, FN_SET_STATIC_MESH, FN_SPAWN_ACTOR_FROM_CLASS, STATIC_MESH_ACTOR_CLASS,
    STATIC_MESH_COMPONENT_CLASS,
};
use crate::error::{Error, Result};
use crate::json_object::JsonObjectAccess;
use crate::params::{ParamKey, ParamMap, VectorLayout};
use crate::tool::ToolOutput;
use crate::unreal::{ConnectionManager, Session};

pub(crate) const LABEL_KEYS: [ParamKey; 3] = [ParamKey::ActorLabel, ParamKey::Name, ParamKey::Label];
pub(crate) const COLOR_KEYS: [ParamKey; 2] = [ParamKey::Color, ParamKey::MaterialColor];

/// Engine basic shapes available without an asset path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum PrimitiveShape {
    Cube,
    Sphere,
    Cylinder,
    Plane,
    Cone,
}

impl PrimitiveShape {
    /// Asset name, e.g. `Cube`
    pub const fn asset_name(self) -> &'static str {
        match self {
            Self::Cube => "Cube",
            Self::Sphere => "Sphere",
            Self::Cylinder => "Cylinder",
            Self::Plane => "Plane",
            Self::Cone => "Cone",
        }
    }

    pub fn asset_path(self) -> String {
        let name = self.asset_name();
        format!("/Engine/BasicShapes/{name}.{name}")
    }

    pub fn supported_list() -> String {
        Self::iter()
            .map(|shape| shape.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Everything needed to spawn one static mesh actor
#[derive(Debug, Clone, PartialEq)]
pub struct MeshActorSpec {
    pub label:     String,
    pub mesh_path: String,
    pub location:  Option<Vec<f64>>,
    pub rotation:  Option<Vec<f64>>,
    pub scale:     Option<Vec<f64>>,
    pub material:  MaterialChoice,
}

/// A spawned actor and the ledger of its follow-up steps
#[derive(Debug)]
pub struct Spawned {
    pub actor: String,
    pub steps: StepLog,
}

fn material_choice(params: &ParamMap) -> Result<MaterialChoice> {
    if let Some(material) = params.text(ParamKey::MaterialOverride) {
        return Ok(MaterialChoice::Override(material));
    }
    Ok(params
        .first_vector(&COLOR_KEYS)?
        .map_or(MaterialChoice::Default, MaterialChoice::Color))
}

/// `/Game/Props/SM_Bench.SM_Bench` -> `SM_Bench`
fn asset_short_name(path: &str) -> &str {
    let tail = path.rsplit('/').next().unwrap_or(path);
    tail.split('.').next().unwrap_or(tail)
}

fn format_position(location: Option<&[f64]>) -> String {
    format!("{:?}", location.unwrap_or(&[0.0, 0.0, 0.0]))
}

/// Spawn an actor of `class` at the requested transform; returns its object reference
async fn spawn_from_class(
    session: &Session<'_>,
    class: &str,
    location: Option<&[f64]>,
    rotation: Option<&[f64]>,
) -> Result<String> {
    let mut parameters = Map::new();
    parameters.insert_field("ActorClass", class);
    if let Some(location) = location {
        parameters.insert_field("Location", VectorLayout::Xyz.format(Some(location)));
    }
    if let Some(rotation) = rotation {
        parameters.insert_field("Rotation", VectorLayout::Rotator.format(Some(rotation)));
    }

    session
        .call(
            EDITOR_LEVEL_LIBRARY,
            FN_SPAWN_ACTOR_FROM_CLASS,
            Value::Object(parameters),
        )
        .await?
        .return_str()
        .map(str::to_string)
        .ok_or_else(|| Report::new(Error::failed_to("spawn actor", class)))
}

async fn set_scale(session: &Session<'_>, actor: &str, scale: &[f64]) -> Result<()> {
    session
        .call(
            actor,
            FN_SET_ACTOR_SCALE,
            json!({ "NewScale3D": VectorLayout::Xyz.format(Some(scale)) }),
        )
        .await
        .map(|_| ())
}

async fn set_label(session: &Session<'_>, actor: &str, label: &str) -> Result<()> {
    session
        .call(actor, FN_SET_ACTOR_LABEL, json!({ "NewActorLabel": label }))
        .await
        .map(|_| ())
}

/// Spawn a static mesh actor and run its follow-up steps
///
/// Only the spawn itself can fail the call; every later step is recorded in the returned
/// ledger. Nothing is rolled back.
pub async fn spawn_mesh_actor(session: &Session<'_>, spec: &MeshActorSpec) -> Result<Spawned> {
    let actor = spawn_from_class(
        session,
        STATIC_MESH_ACTOR_CLASS,
        spec.location.as_deref(),
        spec.rotation.as_deref(),
    )
    .await?;
    debug!("Spawned {actor} for '{}'", spec.label);

    let mut steps = StepLog::default();

    let component = steps
        .record(
            "find mesh component",
            session
                .component_by_class(&actor, STATIC_MESH_COMPONENT_CLASS)
                .await,
        )
        .flatten();

    match component.as_deref() {
        Some(component) => {
            let result = session
                .call(
                    component,
                    FN_SET_STATIC_MESH,
                    json!({ "NewMesh": spec.mesh_path }),
                )
                .await
                .map(|_| ());
            steps.record("set mesh", result);
        },
        None => steps.skipped("set mesh", "no static mesh component"),
    }

    if let Some(scale) = spec.scale.as_deref() {
        let result = set_scale(session, &actor, scale).await;
        steps.record("set scale", result);
    }

    let result = set_label(session, &actor, &spec.label).await;
    steps.record("set label", result);

    material::apply_choice(session, component.as_deref(), &spec.material, &mut steps).await;

    Ok(Spawned { actor, steps })
}

/// Build a spec from tool parameters; `Err(message)` carries a caller facing refusal
fn mesh_actor_spec(params: &ParamMap) -> Result<std::result::Result<MeshActorSpec, String>> {
    let (mesh_path, default_label) =
        match params.first_text(&[ParamKey::StaticMeshAssetPath, ParamKey::StaticMesh]) {
            Some(path) => {
                let label = asset_short_name(&path).to_string();
                (path, label)
            },
            None => {
                let mesh_type = params
                    .text(ParamKey::MeshType)
                    .unwrap_or_else(|| DEFAULT_MESH_TYPE.to_string());
                let Ok(shape) = mesh_type.parse::<PrimitiveShape>() else {
                    return Ok(Err(format!(
                        "Error: Unsupported mesh type '{mesh_type}'. Supported types are: {}",
                        PrimitiveShape::supported_list()
                    )));
                };
                (shape.asset_path(), format!("My{}", shape.asset_name()))
            },
        };

    Ok(Ok(MeshActorSpec {
        label: params.first_text(&LABEL_KEYS).unwrap_or(default_label),
        mesh_path,
        location: params.vector(ParamKey::Location)?,
        rotation: params.vector(ParamKey::Rotation)?,
        scale: params.vector(ParamKey::Scale)?,
        material: material_choice(params)?,
    }))
}

/// Create a static mesh actor from a basic shape or an explicit mesh asset path
pub async fn create_static_mesh_actor(
    manager: &ConnectionManager,
    params: &ParamMap,
) -> Result<(ToolOutput, Option<MeshActorSpec>)> {
    let spec = match mesh_actor_spec(params)? {
        Ok(spec) => spec,
        Err(refusal) => return Ok((ToolOutput::Message(refusal), None)),
    };

    let session = manager.connect().await?;
    let spawned = spawn_mesh_actor(&session, &spec).await?;

    let message = spawned.steps.decorate(format!(
        "Successfully created {} actor at position {}",
        spec.label,
        format_position(spec.location.as_deref())
    ));
    Ok((ToolOutput::Message(message), Some(spec)))
}

/// Create a static mesh actor from a named mesh asset (`static_mesh` or `mesh`)
pub async fn spawn_static_mesh(
    manager: &ConnectionManager,
    params: &ParamMap,
) -> Result<(ToolOutput, Option<MeshActorSpec>)> {
    let Some(mesh) = params.first_text(&[ParamKey::StaticMesh, ParamKey::Mesh]) else {
        return Ok((
            ToolOutput::message("Missing required parameters: static_mesh"),
            None,
        ));
    };
    let mut params = params.clone();
    params.insert(ParamKey::StaticMeshAssetPath, mesh);
    create_static_mesh_actor(manager, &params).await
}

/// Blueprint spawn request resolved from tool parameters
#[derive(Debug, Clone, PartialEq)]
pub struct BlueprintSpec {
    pub class:    String,
    pub label:    String,
    pub location: Option<Vec<f64>>,
    pub rotation: Option<Vec<f64>>,
    pub scale:    Option<Vec<f64>>,
}

/// Spawn an actor from a blueprint class reference; no mesh or material steps
pub async fn spawn_actor_from_blueprint(
    manager: &ConnectionManager,
    params: &ParamMap,
) -> Result<(ToolOutput, Option<BlueprintSpec>)> {
    let Some(class) = params.first_text(&[ParamKey::ActorClass, ParamKey::Class]) else {
        return Ok((
            ToolOutput::message("Missing required parameters: actor_class"),
            None,
        ));
    };
    let spec = BlueprintSpec {
        label: params
            .first_text(&LABEL_KEYS)
            .unwrap_or_else(|| DEFAULT_BLUEPRINT_ACTOR_NAME.to_string()),
        location: params.vector(ParamKey::Location)?,
        rotation: params.vector(ParamKey::Rotation)?,
        scale: params.vector(ParamKey::Scale)?,
        class,
    };

    let session = manager.connect().await?;
    let actor = spawn_from_class(
        &session,
        &spec.class,
        spec.location.as_deref(),
        spec.rotation.as_deref(),
    )
    .await?;

    let mut steps = StepLog::default();
    if let Some(scale) = spec.scale.as_deref() {
        let result = set_scale(&session, &actor, scale).await;
        steps.record("set scale", result);
    }
    let result = set_label(&session, &actor, &spec.label).await;
    steps.record("set label", result);

    let message = steps.decorate(format!(
        "Successfully created actor '{}' from blueprint class '{}'",
        spec.label, spec.class
    ));
    Ok((ToolOutput::Message(message), Some(spec)))
}
