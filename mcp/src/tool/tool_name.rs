use strum::{AsRefStr, Display, EnumIter, IntoStaticStr};

/// Names of every tool the server exposes
/// Entries are alphabetically sorted for easy maintenance
#[derive(Display, AsRefStr, IntoStaticStr, EnumIter, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum ToolName {
    CreateComposite,
    CreateStaticMeshActor,
    DeleteActor,
    GetActorInfo,
    GetLevelInfo,
    GetSpatialContext,
    GetTraceLogPath,
    ListAvailableAssets,
    ModifyActor,
    ResetSpatialContext,
    SearchAssetsRecursively,
    SetTracingLevel,
    SpawnActorFromBlueprint,
    SpawnStaticMesh,
}

impl ToolName {
    /// Gerund phrase used in "Error <action>: ..." results
    pub const fn action(self) -> &'static str {
        match self {
            Self::CreateComposite => "creating composite",
            Self::CreateStaticMeshActor => "creating static mesh actor",
            Self::DeleteActor => "deleting actor",
            Self::GetActorInfo => "getting actor info",
            Self::GetLevelInfo => "getting level info",
            Self::GetSpatialContext => "getting spatial context",
            Self::GetTraceLogPath => "getting trace log path",
            Self::ListAvailableAssets => "listing assets",
            Self::ModifyActor => "modifying actor",
            Self::ResetSpatialContext => "resetting spatial context",
            Self::SearchAssetsRecursively => "searching assets",
            Self::SetTracingLevel => "setting tracing level",
            Self::SpawnActorFromBlueprint => "spawning blueprint actor",
            Self::SpawnStaticMesh => "spawning static mesh",
        }
    }
}
