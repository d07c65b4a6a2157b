//! Best-effort record of where actors created or modified through this server ended up
//!
//! The editor stays the source of truth; entries reflect what was requested, not what the
//! engine reports back, and are only replaced wholesale by a level refresh.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::actors::{ActorChanges, LevelInfo};
use crate::params::VectorLayout;

const DEFAULT_SCALE: [f64; 3] = [1.0, 1.0, 1.0];

/// Last known transform of one actor, in engine field layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpatialEntry {
    pub location:   Value,
    pub rotation:   Value,
    pub scale:      Value,
    pub updated_at: DateTime<Utc>,
}

impl SpatialEntry {
    fn new(location: Option<&[f64]>, rotation: Option<&[f64]>, scale: Option<&[f64]>) -> Self {
        Self {
            location:   VectorLayout::Xyz.format(location),
            rotation:   VectorLayout::Rotator.format(rotation),
            scale:      VectorLayout::Xyz.format(Some(scale.unwrap_or(&DEFAULT_SCALE))),
            updated_at: Utc::now(),
        }
    }
}

/// Label to last known transform, ordered by label
#[derive(Debug, Default)]
pub struct SpatialRegistry {
    entries: BTreeMap<String, SpatialEntry>,
}

impl SpatialRegistry {
    /// Record a newly created actor; missing parts default to the origin, no rotation and unit
    /// scale
    pub fn record(
        &mut self,
        label: &str,
        location: Option<&[f64]>,
        rotation: Option<&[f64]>,
        scale: Option<&[f64]>,
    ) {
        self.entries.insert(
            label.to_string(),
            SpatialEntry::new(location, rotation, scale),
        );
    }

    /// Apply transform changes to a tracked actor; untracked actors are ignored
    pub fn apply(&mut self, label: &str, changes: &ActorChanges) {
        let Some(entry) = self.entries.get_mut(label) else {
            return;
        };
        if let Some(location) = changes.location.as_deref() {
            entry.location = VectorLayout::Xyz.format(Some(location));
        }
        if let Some(rotation) = changes.rotation.as_deref() {
            entry.rotation = VectorLayout::Rotator.format(Some(rotation));
        }
        if let Some(scale) = changes.scale.as_deref() {
            entry.scale = VectorLayout::Xyz.format(Some(scale));
        }
        entry.updated_at = Utc::now();
    }

    pub fn remove(&mut self, label: &str) -> bool {
        self.entries.remove(label).is_some()
    }

    /// Replace every entry with the actors of a fresh level listing
    ///
    /// The listing only carries locations; rotation and scale reset to their defaults, as does
    /// a location the engine would not report.
    pub fn refresh(&mut self, level: &LevelInfo) {
        self.entries.clear();
        for actor in &level.actors {
            let mut entry = SpatialEntry::new(None, None, None);
            entry.location = VectorLayout::Xyz.format_value(Some(&actor.location));
            self.entries.insert(actor.label.clone(), entry);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub const fn entries(&self) -> &BTreeMap<String, SpatialEntry> {
        &self.entries
    }
}
