use tracing::{debug, info, warn};

use super::recipe::{CompositeKind, PrimitiveSpec, RecipeInput};
use crate::actors::spawn_mesh_actor;
use crate::error::Result;
use crate::params::{ParamKey, ParamMap};
use crate::tool::ToolOutput;
use crate::unreal::ConnectionManager;

const DEFAULT_COMPOSITE: &str = "TOWER";

/// Pad or truncate to three components
fn triple(values: Option<Vec<f64>>, fill: f64) -> [f64; 3] {
    let mut triple = [fill; 3];
    for (slot, value) in triple.iter_mut().zip(values.unwrap_or_default()) {
        *slot = value;
    }
    triple
}

/// Outcome of running one recipe against the editor
#[derive(Debug, Default)]
struct BuildReport {
    created:    Vec<PrimitiveSpec>,
    incomplete: Vec<String>,
    failed:     Vec<String>,
    aborted:    Option<String>,
}

impl BuildReport {
    fn message(&self, kind: CompositeKind, name: &str, total: usize) -> String {
        let mut message = if self.created.len() == total && self.failed.is_empty() {
            format!("Successfully created {} composite: {name}", kind.title())
        } else {
            format!(
                "Created {} of {total} parts for {} composite: {name}",
                self.created.len(),
                kind.title()
            )
        };

        let mut notes = Vec::new();
        if !self.failed.is_empty() {
            notes.push(format!("failed parts: {}", self.failed.join(", ")));
        }
        if !self.incomplete.is_empty() {
            notes.push(format!("incomplete parts: {}", self.incomplete.join(", ")));
        }
        if let Some(reason) = &self.aborted {
            notes.push(format!("aborted: {reason}"));
        }
        if !notes.is_empty() {
            message.push_str(&format!(" ({})", notes.join("; ")));
        }
        message
    }
}

/// Build a multi-actor arrangement from the recipe catalog
///
/// Parts are created in recipe order through the regular primitive creation path. A part
/// that fails to spawn is named in the result and the build goes on; losing the connection
/// stops the build. Returns the parts that were created.
pub async fn create_composite(
    manager: &ConnectionManager,
    params: &ParamMap,
) -> Result<(ToolOutput, Vec<PrimitiveSpec>)> {
    let requested = params
        .first_text(&[ParamKey::Shape, ParamKey::CompositionType])
        .unwrap_or_else(|| DEFAULT_COMPOSITE.to_string())
        .to_uppercase();
    let Ok(kind) = requested.parse::<CompositeKind>() else {
        return Ok((
            ToolOutput::Message(format!("Unknown composition type: {requested}")),
            Vec::new(),
        ));
    };

    let input = RecipeInput {
        name:     params
            .first_text(&[ParamKey::Label, ParamKey::Name])
            .unwrap_or_else(|| kind.to_string().to_lowercase()),
        location: triple(params.vector(ParamKey::Location)?, 0.0),
        scale:    triple(
            params.first_vector(&[ParamKey::Scale, ParamKey::Size])?,
            1.0,
        ),
        color:    params.first_vector(&[ParamKey::Color, ParamKey::MaterialColor])?,
    };
    let parts = kind.recipe(&input);
    info!(
        "Building {kind} composite '{}' from {} parts",
        input.name,
        parts.len()
    );

    let session = manager.connect().await?;
    let mut report = BuildReport::default();
    for part in &parts {
        match spawn_mesh_actor(&session, &part.to_mesh_actor_spec()).await {
            Ok(spawned) => {
                debug!("Created part '{}' as {}", part.label, spawned.actor);
                if !spawned.steps.is_clean() {
                    report.incomplete.push(part.label.clone());
                }
                report.created.push(part.clone());
            },
            Err(error) if session.is_poisoned() => {
                if report.created.is_empty() {
                    return Err(error);
                }
                warn!("Connection lost while creating '{}': {error:?}", part.label);
                report.failed.push(part.label.clone());
                report.aborted = Some(error.current_context().to_string());
                break;
            },
            Err(error) => {
                warn!("Failed to create part '{}': {error:?}", part.label);
                report.failed.push(part.label.clone());
            },
        }
    }

    let message = report.message(kind, &input.name, parts.len());
    Ok((ToolOutput::Message(message), report.created))
}
