use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Parameter names understood by the tools
/// Entries are alphabetically sorted for easy maintenance
#[derive(Display, EnumString, AsRefStr, IntoStaticStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum ParamKey {
    /// Blueprint class reference for spawning
    ActorClass,
    /// Display label of an actor
    ActorLabel,
    /// Asset type filter for listings
    AssetType,
    /// Root path for the recursive asset search
    BasePath,
    /// Alias of `actor_class`
    Class,
    /// RGB(A) color triple
    Color,
    /// Alias of `shape` for composites
    CompositionType,
    /// Alias of `actor_label`
    Label,
    /// World location
    Location,
    /// Alias of `color`
    MaterialColor,
    /// Material asset path applied directly to the mesh
    MaterialOverride,
    /// Result cap for asset listings
    MaxResults,
    /// Alias of `static_mesh` for the mesh asset tool
    Mesh,
    /// Primitive shape name (CUBE, SPHERE, ...)
    MeshType,
    /// Alias of `actor_label`
    Name,
    /// Recurse into subdirectories when listing assets
    Recursive,
    /// Pitch/yaw/roll rotation
    Rotation,
    /// Per-axis scale
    Scale,
    /// Root path for asset listings
    SearchPath,
    /// Free text filter for asset listings
    SearchTerm,
    /// Composite recipe name
    Shape,
    /// Alias of `scale` for composites
    Size,
    /// Static mesh asset path
    StaticMesh,
    /// Static mesh asset path, preferred over `static_mesh`
    StaticMeshAssetPath,
    /// Actor visibility in game
    Visible,
}

impl ParamKey {
    /// Keys whose comma separated text values are parsed as float lists
    pub const fn is_vector(self) -> bool {
        matches!(
            self,
            Self::Location | Self::Rotation | Self::Scale | Self::Color | Self::MaterialColor
        )
    }

    /// Whether a raw key name from flat text is vector typed
    pub fn is_vector_name(name: &str) -> bool {
        name.parse::<Self>().is_ok_and(Self::is_vector)
    }
}
