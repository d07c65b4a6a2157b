use serde::Serialize;
use strum::{AsRefStr, Display};

/// Coarse actor classification inferred from an object reference
///
/// The Remote Control API offers no cheap introspection, so this is substring matching on the
/// object path. Order matters: `SkyLight` must be tested before `Light`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
pub enum ActorKind {
    StaticMeshActor,
    SkyLight,
    Light,
    PlayerStart,
    SkyAtmosphere,
    Fog,
    VolumetricCloud,
    Unknown,
}

const MATCH_ORDER: [ActorKind; 7] = [
    ActorKind::StaticMeshActor,
    ActorKind::SkyLight,
    ActorKind::Light,
    ActorKind::PlayerStart,
    ActorKind::SkyAtmosphere,
    ActorKind::Fog,
    ActorKind::VolumetricCloud,
];

impl ActorKind {
    pub fn from_object_path(path: &str) -> Self {
        MATCH_ORDER
            .into_iter()
            .find(|kind| path.contains(kind.as_ref()))
            .unwrap_or(Self::Unknown)
    }
}
