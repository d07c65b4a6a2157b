use error_stack::Report;
use serde_json::json;

use super::steps::StepLog;
use crate::constants::{
    BASE_COLOR_MATERIAL, COLOR_PARAMETER_NAME, FN_CREATE_DYNAMIC_MATERIAL, FN_GET_CLASS,
    FN_SET_MATERIAL, FN_SET_VECTOR_PARAMETER, STATIC_MESH_ACTOR_MARKER,
};
use crate::error::{Error, Result};
use crate::params::VectorLayout;
use crate::unreal::Session;

const STEP_MATERIAL: &str = "material";
const STEP_COLOR: &str = "color";

/// How the mesh of a newly created or modified actor gets its material
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialChoice {
    /// Keep whatever the mesh asset uses
    Default,
    /// Assign a material asset directly
    Override(String),
    /// Tint the base shape material through a dynamic instance; RGB with optional alpha
    Color(Vec<f64>),
}

/// Assign a material asset to element 0 of `component`
pub async fn assign_material(session: &Session<'_>, component: &str, material: &str) -> Result<()> {
    session
        .call(
            component,
            FN_SET_MATERIAL,
            json!({ "ElementIndex": 0, "Material": material }),
        )
        .await
        .map(|_| ())
}

/// Create a dynamic instance of the base material on `component` and set its color
///
/// Returns the material instance reference.
pub async fn apply_color(session: &Session<'_>, component: &str, color: &[f64]) -> Result<String> {
    if color.len() < 3 {
        return Err(Report::new(Error::invalid(
            "color",
            format!("expected at least 3 components, got {}", color.len()),
        )));
    }

    let instance = session
        .call(
            component,
            FN_CREATE_DYNAMIC_MATERIAL,
            json!({ "ElementIndex": 0, "SourceMaterial": BASE_COLOR_MATERIAL }),
        )
        .await?
        .return_str()
        .map(str::to_string)
        .ok_or_else(|| {
            Report::new(Error::failed_to(
                "create dynamic material instance",
                component,
            ))
        })?;

    session
        .call(
            &instance,
            FN_SET_VECTOR_PARAMETER,
            json!({
                "ParameterName": COLOR_PARAMETER_NAME,
                "Value": VectorLayout::Rgba.format(Some(color)),
            }),
        )
        .await?;

    Ok(instance)
}

/// Apply `choice` to `component`, recording the outcome in `steps`
pub async fn apply_choice(
    session: &Session<'_>,
    component: Option<&str>,
    choice: &MaterialChoice,
    steps: &mut StepLog,
) {
    let step = match choice {
        MaterialChoice::Default => return,
        MaterialChoice::Override(_) => STEP_MATERIAL,
        MaterialChoice::Color(_) => STEP_COLOR,
    };
    let Some(component) = component else {
        steps.skipped(step, "no static mesh component");
        return;
    };
    match choice {
        MaterialChoice::Default => {},
        MaterialChoice::Override(material) => {
            let result = assign_material(session, component, material).await;
            steps.record(step, result);
        },
        MaterialChoice::Color(color) => {
            let result = apply_color(session, component, color).await;
            steps.record(step, result);
        },
    }
}

/// Whether `actor` is a static mesh actor, judged by its class and falling back to its path
pub async fn is_static_mesh_actor(session: &Session<'_>, actor: &str) -> Result<bool> {
    match session.call(actor, FN_GET_CLASS, json!({})).await {
        Ok(response) => Ok(response
            .return_str()
            .is_some_and(|class| class.contains(STATIC_MESH_ACTOR_MARKER))
            || actor.contains(STATIC_MESH_ACTOR_MARKER)),
        Err(report) if report.current_context().invalidates_connection() => Err(report),
        Err(_) => Ok(actor.contains(STATIC_MESH_ACTOR_MARKER)),
    }
}
