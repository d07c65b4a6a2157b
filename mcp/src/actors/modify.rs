use serde_json::json;

use super::material::{self, MaterialChoice};
use super::spawn::{COLOR_KEYS, LABEL_KEYS};
use super::steps::StepLog;
use crate::constants::{
    EDITOR_ACTOR_SUBSYSTEM, FN_DESTROY_ACTOR, FN_SET_ACTOR_HIDDEN, FN_SET_ACTOR_LOCATION,
    FN_SET_ACTOR_ROTATION, FN_SET_ACTOR_SCALE, STATIC_MESH_COMPONENT_CLASS,
};
use crate::error::Result;
use crate::params::{ParamKey, ParamMap, VectorLayout};
use crate::tool::ToolOutput;
use crate::unreal::{ConnectionManager, Session};

/// Fields of an actor modification; absent fields are left alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActorChanges {
    pub location: Option<Vec<f64>>,
    pub rotation: Option<Vec<f64>>,
    pub scale:    Option<Vec<f64>>,
    pub visible:  Option<bool>,
    pub color:    Option<Vec<f64>>,
}

impl ActorChanges {
    pub fn from_params(params: &ParamMap) -> Result<Self> {
        Ok(Self {
            location: params.vector(ParamKey::Location)?,
            rotation: params.vector(ParamKey::Rotation)?,
            scale:    params.vector(ParamKey::Scale)?,
            visible:  params.bool(ParamKey::Visible)?,
            color:    params.first_vector(&COLOR_KEYS)?,
        })
    }
}

fn not_found(label: &str) -> ToolOutput {
    ToolOutput::Message(format!("Actor '{label}' not found in the current level."))
}

async fn apply_color(session: &Session<'_>, actor: &str, color: &[f64], steps: &mut StepLog) {
    match material::is_static_mesh_actor(session, actor).await {
        Ok(true) => {},
        Ok(false) => {
            steps.skipped("color", "not a static mesh actor");
            return;
        },
        Err(report) => {
            steps.failed("color", report.current_context());
            return;
        },
    }

    let component = match session
        .component_by_class(actor, STATIC_MESH_COMPONENT_CLASS)
        .await
    {
        Ok(component) => component,
        Err(report) => {
            steps.failed("color", report.current_context());
            return;
        },
    };
    material::apply_choice(
        session,
        component.as_deref(),
        &MaterialChoice::Color(color.to_vec()),
        steps,
    )
    .await;
}

/// Modify an existing actor's transform, visibility, or color
///
/// Present fields are applied independently in the order location, rotation, scale,
/// visibility, color.
pub async fn modify_actor(
    manager: &ConnectionManager,
    params: &ParamMap,
) -> Result<(ToolOutput, Option<(String, ActorChanges)>)> {
    let Some(label) = params.first_text(&LABEL_KEYS) else {
        return Ok((
            ToolOutput::message("Missing required parameters: actor_label"),
            None,
        ));
    };
    let changes = ActorChanges::from_params(params)?;

    let session = manager.connect().await?;
    let Some(actor) = session.find_actor_by_label(&label).await? else {
        return Ok((not_found(&label), None));
    };

    let mut steps = StepLog::default();

    if let Some(location) = changes.location.as_deref() {
        let result = session
            .call(
                &actor,
                FN_SET_ACTOR_LOCATION,
                json!({ "NewLocation": VectorLayout::Xyz.format(Some(location)) }),
            )
            .await;
        steps.record("set location", result);
    }
    if let Some(rotation) = changes.rotation.as_deref() {
        let result = session
            .call(
                &actor,
                FN_SET_ACTOR_ROTATION,
                json!({ "NewRotation": VectorLayout::Rotator.format(Some(rotation)) }),
            )
            .await;
        steps.record("set rotation", result);
    }
    if let Some(scale) = changes.scale.as_deref() {
        let result = session
            .call(
                &actor,
                FN_SET_ACTOR_SCALE,
                json!({ "NewScale3D": VectorLayout::Xyz.format(Some(scale)) }),
            )
            .await;
        steps.record("set scale", result);
    }
    if let Some(visible) = changes.visible {
        let result = session
            .call(&actor, FN_SET_ACTOR_HIDDEN, json!({ "bNewHidden": !visible }))
            .await;
        steps.record("set visibility", result);
    }
    if let Some(color) = changes.color.as_deref() {
        apply_color(&session, &actor, color, &mut steps).await;
    }

    let message = steps.decorate(format!("Successfully modified actor: {label}"));
    Ok((ToolOutput::Message(message), Some((label, changes))))
}

/// Remove an actor from the level
pub async fn delete_actor(
    manager: &ConnectionManager,
    params: &ParamMap,
) -> Result<(ToolOutput, Option<String>)> {
    let Some(label) = params.first_text(&LABEL_KEYS) else {
        return Ok((
            ToolOutput::message("Missing required parameters: actor_label"),
            None,
        ));
    };

    let session = manager.connect().await?;
    let Some(actor) = session.find_actor_by_label(&label).await? else {
        return Ok((not_found(&label), None));
    };

    let response = session
        .call(
            EDITOR_ACTOR_SUBSYSTEM,
            FN_DESTROY_ACTOR,
            json!({ "ActorToDestroy": actor }),
        )
        .await?;

    if response.return_value().and_then(serde_json::Value::as_bool) == Some(false) {
        return Ok((
            ToolOutput::Message(format!("Error: Unreal Engine refused to delete actor '{label}'")),
            None,
        ));
    }
    Ok((
        ToolOutput::Message(format!("Successfully deleted actor: {label}")),
        Some(label),
    ))
}
