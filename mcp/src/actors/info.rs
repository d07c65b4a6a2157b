//! Read-only reports: one actor in detail, or every actor in the level

use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use super::kind::ActorKind;
use super::spawn::LABEL_KEYS;
use crate::constants::{
    FIELD_BOX_EXTENT, FIELD_ORIGIN, FN_GET_ACTOR_BOUNDS, FN_GET_ACTOR_LABEL, FN_GET_ACTOR_LOCATION,
    FN_GET_ACTOR_ROTATION, FN_GET_ACTOR_SCALE, FN_GET_MATERIAL, FN_GET_STATIC_MESH,
    NOT_AVAILABLE, STATIC_MESH_COMPONENT_CLASS,
};
use crate::error::Result;
use crate::json_object::JsonObjectAccess;
use crate::params::{ParamMap, VectorLayout};
use crate::tool::ToolOutput;
use crate::unreal::{ConnectionManager, Session};

const UNKNOWN: &str = "Unknown";

fn not_available() -> Value {
    Value::from(NOT_AVAILABLE)
}

fn xyz(value: &Value) -> Option<[f64; 3]> {
    Some([
        value.get_field_f64("X")?,
        value.get_field_f64("Y")?,
        value.get_field_f64("Z")?,
    ])
}

/// Bounding box report from an origin and half extent
fn bounding_box(origin: [f64; 3], extent: [f64; 3]) -> Value {
    let min: Vec<f64> = origin.iter().zip(extent).map(|(o, e)| o - e).collect();
    let max: Vec<f64> = origin.iter().zip(extent).map(|(o, e)| o + e).collect();
    let size: Vec<f64> = extent.iter().map(|e| e * 2.0).collect();
    let labeled = |values: &[f64]| VectorLayout::Xyz.format(Some(values));
    json!({
        "origin": labeled(&origin),
        "extent": labeled(&extent),
        "min":    labeled(&min),
        "max":    labeled(&max),
        "size":   labeled(&size),
    })
}

/// Return value of a no-argument getter, or `"Not available"`
async fn query(session: &Session<'_>, object: &str, function: &str, parameters: Value) -> Value {
    match session.call(object, function, parameters).await {
        Ok(response) => response.return_value().cloned().unwrap_or_else(not_available),
        Err(report) => {
            debug!("{function} on {object} failed: {report:?}");
            not_available()
        },
    }
}

async fn query_bounds(session: &Session<'_>, actor: &str) -> Value {
    let response = match session
        .call(
            actor,
            FN_GET_ACTOR_BOUNDS,
            json!({ "bOnlyCollidingComponents": false }),
        )
        .await
    {
        Ok(response) => response,
        Err(report) => {
            debug!("{FN_GET_ACTOR_BOUNDS} on {actor} failed: {report:?}");
            return not_available();
        },
    };
    let origin = response.field(FIELD_ORIGIN).and_then(xyz);
    let extent = response.field(FIELD_BOX_EXTENT).and_then(xyz);
    match (origin, extent) {
        (Some(origin), Some(extent)) => bounding_box(origin, extent),
        _ => not_available(),
    }
}

/// Report on one actor
///
/// Every field is queried independently; a failed query becomes `"Not available"`.
pub async fn get_actor_info(manager: &ConnectionManager, params: &ParamMap) -> Result<ToolOutput> {
    let Some(label) = params.first_text(&LABEL_KEYS) else {
        return Ok(ToolOutput::message("Missing required parameters: actor_label"));
    };

    let session = manager.connect().await?;
    let Some(actor) = session.find_actor_by_label(&label).await? else {
        return Ok(ToolOutput::Message(format!(
            "Actor '{label}' not found in the current level."
        )));
    };

    let kind = ActorKind::from_object_path(&actor);
    let location = query(&session, &actor, FN_GET_ACTOR_LOCATION, json!({})).await;
    let rotation = query(&session, &actor, FN_GET_ACTOR_ROTATION, json!({})).await;
    let scale = query(&session, &actor, FN_GET_ACTOR_SCALE, json!({})).await;
    let bounds = query_bounds(&session, &actor).await;

    let mut report = json!({
        "label":        label,
        "path":         &actor,
        "type":         kind,
        "location":     location,
        "rotation":     rotation,
        "scale":        scale,
        "bounding_box": bounds,
    });

    if kind == ActorKind::StaticMeshActor {
        let component = session
            .component_by_class(&actor, STATIC_MESH_COMPONENT_CLASS)
            .await
            .ok()
            .flatten();
        let (mesh, material) = match component.as_deref() {
            Some(component) => (
                query(&session, component, FN_GET_STATIC_MESH, json!({})).await,
                query(&session, component, FN_GET_MATERIAL, json!({ "ElementIndex": 0 })).await,
            ),
            None => (not_available(), not_available()),
        };
        report.insert_field("static_mesh", mesh);
        report.insert_field("material", material);
    }

    Ok(ToolOutput::Report(report))
}

/// One actor as listed by [`get_level_info`]
#[derive(Debug, Clone, Serialize)]
pub struct LevelActor {
    pub label:    String,
    pub path:     String,
    #[serde(rename = "type")]
    pub kind:     ActorKind,
    pub location: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelInfo {
    pub level_name:  String,
    pub actor_count: usize,
    pub actors:      Vec<LevelActor>,
}

/// `/Game/Maps/Arena.Arena:PersistentLevel.Floor` -> `Arena`
fn level_name(actor_path: &str) -> String {
    actor_path
        .split(':')
        .next()
        .and_then(|package| package.rsplit('.').next())
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// `...PersistentLevel.Floor_2` -> `Floor_2`
fn name_from_path(actor_path: &str) -> String {
    actor_path
        .rsplit('.')
        .next()
        .unwrap_or(actor_path)
        .to_string()
}

/// Every actor in the current level with label, location, and inferred type
pub async fn get_level_info(manager: &ConnectionManager) -> Result<(ToolOutput, LevelInfo)> {
    let session = manager.connect().await?;
    let paths = session.all_level_actors().await?;

    let mut actors = Vec::with_capacity(paths.len());
    for path in paths {
        let label = match session.call(&path, FN_GET_ACTOR_LABEL, json!({})).await {
            Ok(response) => response
                .return_str()
                .map_or_else(|| name_from_path(&path), str::to_string),
            Err(_) => name_from_path(&path),
        };
        let location = match session.call(&path, FN_GET_ACTOR_LOCATION, json!({})).await {
            Ok(response) => response
                .return_value()
                .cloned()
                .unwrap_or_else(|| Value::from(UNKNOWN)),
            Err(_) => Value::from(UNKNOWN),
        };
        actors.push(LevelActor {
            kind: ActorKind::from_object_path(&path),
            label,
            path,
            location,
        });
    }

    let info = LevelInfo {
        level_name: actors
            .first()
            .map_or_else(|| UNKNOWN.to_string(), |actor| level_name(&actor.path)),
        actor_count: actors.len(),
        actors,
    };
    Ok((ToolOutput::report(&info)?, info))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, reason = "test assertions")]

    use super::*;
    use crate::params::ParamInput;
    use crate::unreal::testing::{FakeEditor, Failure, MockTransport, Reply};

    fn params(text: &str) -> ParamMap {
        ParamInput::from(text).resolve().unwrap()
    }

    fn report(output: ToolOutput) -> Value {
        match output {
            ToolOutput::Report(value) => value,
            ToolOutput::Message(text) => panic!("expected a report, got: {text}"),
        }
    }

    #[test]
    fn bounding_box_derives_min_max_and_size() {
        let bounds = bounding_box([0.0, 0.0, 50.0], [50.0, 25.0, 50.0]);
        assert_eq!(bounds["min"], json!({ "X": -50.0, "Y": -25.0, "Z": 0.0 }));
        assert_eq!(bounds["max"], json!({ "X": 50.0, "Y": 25.0, "Z": 100.0 }));
        assert_eq!(bounds["size"], json!({ "X": 100.0, "Y": 50.0, "Z": 100.0 }));
    }

    #[test]
    fn level_and_actor_names_come_from_paths() {
        let path = "/Game/Maps/Arena.Arena:PersistentLevel.Floor_2";
        assert_eq!(level_name(path), "Arena");
        assert_eq!(name_from_path(path), "Floor_2");
    }

    #[tokio::test]
    async fn static_mesh_actor_report_includes_mesh_and_material() {
        let mock = MockTransport::with_level(&[("Crate", "StaticMeshActor")]);
        let manager = mock.manager();

        let value = report(get_actor_info(&manager, &params("actor_label=Crate")).await.unwrap());
        assert_eq!(value["type"], json!("StaticMeshActor"));
        assert_eq!(value["location"], json!({ "X": 100.0, "Y": 200.0, "Z": 300.0 }));
        assert_eq!(value["bounding_box"]["size"], json!({ "X": 100.0, "Y": 50.0, "Z": 100.0 }));
        assert_eq!(value["static_mesh"], json!("/Engine/BasicShapes/Cube.Cube"));
        assert_eq!(value["material"], json!("/Game/Materials/M_Crate.M_Crate"));
    }

    #[tokio::test]
    async fn failed_queries_become_not_available() {
        let mock = MockTransport::with_level(&[("Sun", "DirectionalLight")]);
        let manager = mock.manager();
        mock.fail(FN_GET_ACTOR_ROTATION, Failure::Engine);
        mock.fail(FN_GET_ACTOR_BOUNDS, Failure::Engine);

        let value = report(get_actor_info(&manager, &params("actor_label=Sun")).await.unwrap());
        assert_eq!(value["type"], json!("Light"));
        assert_eq!(value["rotation"], json!(NOT_AVAILABLE));
        assert_eq!(value["bounding_box"], json!(NOT_AVAILABLE));
        assert_eq!(value["scale"], json!({ "X": 1.0, "Y": 1.0, "Z": 1.0 }));
        assert!(value.get("static_mesh").is_none());
    }

    #[tokio::test]
    async fn rejected_query_over_http_does_not_stop_later_queries() {
        let actor = "/Game/Maps/Test.Test:PersistentLevel.StaticMeshActor_0";
        let editor = FakeEditor::start().await;
        editor.reply(
            "GetAllLevelActors",
            Reply::Status(200, json!({ "ReturnValue": [actor] })),
        );
        editor.reply(FN_GET_ACTOR_LABEL, Reply::Status(200, json!({ "ReturnValue": "Crate" })));
        editor.reply(
            FN_GET_ACTOR_LOCATION,
            Reply::Status(200, json!({ "ReturnValue": { "X": 1.0, "Y": 2.0, "Z": 3.0 } })),
        );
        editor.reply(FN_GET_ACTOR_ROTATION, Reply::Status(400, json!({})));
        editor.reply(
            FN_GET_ACTOR_SCALE,
            Reply::Status(200, json!({ "ReturnValue": { "X": 2.0, "Y": 2.0, "Z": 2.0 } })),
        );
        let manager = editor.manager();

        let value = report(get_actor_info(&manager, &params("actor_label=Crate")).await.unwrap());
        assert_eq!(value["location"], json!({ "X": 1.0, "Y": 2.0, "Z": 3.0 }));
        assert_eq!(value["rotation"], json!(NOT_AVAILABLE));
        assert_eq!(value["scale"], json!({ "X": 2.0, "Y": 2.0, "Z": 2.0 }));

        let seen = editor.seen();
        let after_rotation = seen
            .iter()
            .skip_while(|function| *function != FN_GET_ACTOR_ROTATION)
            .skip(1)
            .collect::<Vec<_>>();
        assert_eq!(after_rotation[0], FN_GET_ACTOR_SCALE);
        assert_eq!(after_rotation[1], FN_GET_ACTOR_BOUNDS);
        assert!(seen.iter().any(|function| function == "GetComponentByClass"));
    }

    #[tokio::test]
    async fn level_info_lists_every_actor() {
        let mock = MockTransport::with_level(&[
            ("Floor", "StaticMeshActor"),
            ("Sun", "DirectionalLight"),
            ("Sky", "SkyLight"),
        ]);
        let manager = mock.manager();

        let (output, info) = get_level_info(&manager).await.unwrap();
        assert_eq!(info.level_name, "Test");
        assert_eq!(info.actor_count, 3);
        let kinds: Vec<ActorKind> = info.actors.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![ActorKind::StaticMeshActor, ActorKind::Light, ActorKind::SkyLight]
        );

        let value = report(output);
        assert_eq!(value["actors"][2]["label"], json!("Sky"));
        assert_eq!(value["actors"][2]["type"], json!("SkyLight"));
    }

    #[tokio::test]
    async fn level_info_falls_back_to_path_names() {
        let mock = MockTransport::with_level(&[("Floor", "StaticMeshActor")]);
        let manager = mock.manager();
        mock.fail(FN_GET_ACTOR_LABEL, Failure::Engine);
        mock.fail(FN_GET_ACTOR_LOCATION, Failure::Engine);

        let (_, info) = get_level_info(&manager).await.unwrap();
        assert_eq!(info.actors[0].label, "StaticMeshActor_0");
        assert_eq!(info.actors[0].location, json!("Unknown"));
    }

    #[tokio::test]
    async fn empty_level_has_unknown_name() {
        let mock = MockTransport::with_level(&[]);
        let manager = mock.manager();

        let (_, info) = get_level_info(&manager).await.unwrap();
        assert_eq!(info.level_name, "Unknown");
        assert_eq!(info.actor_count, 0);
    }
}
