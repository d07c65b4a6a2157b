use strum::EnumString;

/// Asset category inferred from naming conventions in the content path
///
/// The Remote Control listing only returns paths, so the category is guessed from the
/// directory the asset lives in and the conventional prefix or suffix of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum AssetType {
    #[strum(serialize = "all")]
    All,
    #[strum(serialize = "blueprint", serialize = "blueprintclass")]
    Blueprint,
    #[strum(serialize = "staticmesh", serialize = "static_mesh")]
    StaticMesh,
    #[strum(serialize = "material")]
    Material,
    #[strum(serialize = "texture")]
    Texture,
    #[strum(serialize = "sound")]
    Sound,
    #[strum(serialize = "particle")]
    Particle,
    #[strum(serialize = "animation")]
    Animation,
}

/// Directory names, name prefixes and name suffixes, all lowercase
struct Identifiers {
    directories: &'static [&'static str],
    prefixes:    &'static [&'static str],
    suffixes:    &'static [&'static str],
}

impl AssetType {
    /// Parse a caller-supplied type; anything unrecognized applies no filter
    pub fn parse_or_all(raw: Option<&str>) -> Self {
        raw.and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(Self::All)
    }

    /// Name used in reports
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Blueprint => "Blueprint",
            Self::StaticMesh => "Staticmesh",
            Self::Material => "Material",
            Self::Texture => "Texture",
            Self::Sound => "Sound",
            Self::Particle => "Particle",
            Self::Animation => "Animation",
        }
    }

    const fn identifiers(self) -> Option<Identifiers> {
        let identifiers = match self {
            Self::All => return None,
            Self::Blueprint => Identifiers {
                directories: &["blueprint", "blueprints"],
                prefixes:    &["bp_"],
                suffixes:    &["_bp"],
            },
            Self::StaticMesh => Identifiers {
                directories: &["mesh", "meshes", "staticmesh", "staticmeshes"],
                prefixes:    &["sm_"],
                suffixes:    &["_sm"],
            },
            Self::Material => Identifiers {
                directories: &["material", "materials"],
                prefixes:    &["m_", "mat_", "mi_"],
                suffixes:    &["_mat"],
            },
            Self::Texture => Identifiers {
                directories: &["texture", "textures"],
                prefixes:    &["t_"],
                suffixes:    &["_t"],
            },
            Self::Sound => Identifiers {
                directories: &["sound", "sounds", "audio"],
                prefixes:    &["s_"],
                suffixes:    &["_s"],
            },
            Self::Particle => Identifiers {
                directories: &["fx", "effect", "effects", "particle", "particles"],
                prefixes:    &["fx_", "p_", "ns_"],
                suffixes:    &["_p"],
            },
            Self::Animation => Identifiers {
                directories: &["anim", "anims", "animation", "animations"],
                prefixes:    &["a_"],
                suffixes:    &["_a"],
            },
        };
        Some(identifiers)
    }

    /// Whether `path` looks like an asset of this type
    ///
    /// `/Game/Meshes/SM_Bench.SM_Bench` splits into the directories `game`, `meshes` and the
    /// asset name `sm_bench`.
    pub fn matches(self, path: &str) -> bool {
        let Some(identifiers) = self.identifiers() else {
            return true;
        };

        let lower = path.to_lowercase();
        let package = lower.split('.').next().unwrap_or_default();
        let mut segments: Vec<&str> = package.split('/').filter(|s| !s.is_empty()).collect();
        let Some(name) = segments.pop() else {
            return false;
        };

        segments
            .iter()
            .any(|segment| identifiers.directories.contains(segment))
            || identifiers
                .prefixes
                .iter()
                .any(|prefix| name.starts_with(prefix))
            || identifiers
                .suffixes
                .iter()
                .any(|suffix| name.ends_with(suffix))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, reason = "test assertions")]

    use super::*;

    #[test]
    fn parses_names_and_aliases_case_insensitively() {
        assert_eq!(AssetType::parse_or_all(Some("StaticMesh")), AssetType::StaticMesh);
        assert_eq!(AssetType::parse_or_all(Some("BlueprintClass")), AssetType::Blueprint);
        assert_eq!(AssetType::parse_or_all(Some("all")), AssetType::All);
        assert_eq!(AssetType::parse_or_all(Some("hologram")), AssetType::All);
        assert_eq!(AssetType::parse_or_all(None), AssetType::All);
    }

    #[test]
    fn mesh_in_mesh_directory_is_not_a_material() {
        let path = "/Game/Meshes/SM_Bench";
        assert!(AssetType::StaticMesh.matches(path));
        assert!(!AssetType::Material.matches(path));
        assert!(AssetType::All.matches(path));
    }

    #[test]
    fn name_prefixes_and_suffixes_match_without_a_directory_hint() {
        assert!(AssetType::Material.matches("/Game/Props/M_Wood.M_Wood"));
        assert!(AssetType::Blueprint.matches("/Game/Props/Door_BP.Door_BP"));
        assert!(AssetType::Texture.matches("/Game/Props/T_Wood_D"));
        assert!(!AssetType::Texture.matches("/Game/Props/Crate"));
    }

    #[test]
    fn directory_markers_match_whole_segments_only() {
        assert!(AssetType::Sound.matches("/Game/Audio/Wind"));
        assert!(!AssetType::Sound.matches("/Game/AudioMixers/Wind"));
        assert!(AssetType::Particle.matches("/Game/FX/Sparks"));
    }
}
