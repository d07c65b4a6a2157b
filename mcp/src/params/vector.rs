use serde_json::{Map, Value};

/// Labeled field layouts the engine expects for vector-like parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorLayout {
    /// `{X, Y, Z}` for locations and scales
    Xyz,
    /// `{Pitch, Yaw, Roll}` for rotations
    Rotator,
    /// `{R, G, B, A}` for linear colors
    Rgba,
}

impl VectorLayout {
    pub const fn labels(self) -> &'static [&'static str] {
        match self {
            Self::Xyz => &["X", "Y", "Z"],
            Self::Rotator => &["Pitch", "Yaw", "Roll"],
            Self::Rgba => &["R", "G", "B", "A"],
        }
    }

    fn default_for(label: &str) -> f64 {
        if label == "A" { 1.0 } else { 0.0 }
    }

    /// Label an ordered float list; missing trailing fields take their defaults
    pub fn format(self, values: Option<&[f64]>) -> Value {
        let values = values.unwrap_or_default();
        let fields: Map<String, Value> = self
            .labels()
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let value = values
                    .get(index)
                    .copied()
                    .unwrap_or_else(|| Self::default_for(label));
                ((*label).to_string(), Value::from(value))
            })
            .collect();
        Value::Object(fields)
    }

    /// Label a raw JSON value: a list of numbers, or a mapping already keyed by this layout's
    /// labels. Anything else yields all defaults.
    pub fn format_value(self, value: Option<&Value>) -> Value {
        let numbers = match value {
            Some(Value::Array(items)) => items.iter().map(Value::as_f64).collect::<Option<Vec<f64>>>(),
            Some(Value::Object(fields)) => self
                .labels()
                .iter()
                .map(|label| fields.get(*label).and_then(Value::as_f64))
                .collect::<Option<Vec<f64>>>(),
            _ => None,
        };
        self.format(numbers.as_deref())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, reason = "test assertions")]

    use serde_json::json;

    use super::*;

    #[test]
    fn short_list_is_padded_with_zeros() {
        assert_eq!(
            VectorLayout::Xyz.format(Some(&[1.0, 2.0])),
            json!({ "X": 1.0, "Y": 2.0, "Z": 0.0 })
        );
    }

    #[test]
    fn missing_color_defaults_to_opaque_black() {
        assert_eq!(
            VectorLayout::Rgba.format(None),
            json!({ "R": 0.0, "G": 0.0, "B": 0.0, "A": 1.0 })
        );
    }

    #[test]
    fn explicit_alpha_is_kept_and_extra_components_dropped() {
        assert_eq!(
            VectorLayout::Rgba.format(Some(&[0.1, 0.2, 0.3, 0.5, 9.0])),
            json!({ "R": 0.1, "G": 0.2, "B": 0.3, "A": 0.5 })
        );
    }

    #[test]
    fn rotator_uses_pitch_yaw_roll() {
        assert_eq!(
            VectorLayout::Rotator.format(Some(&[10.0, 20.0, 30.0])),
            json!({ "Pitch": 10.0, "Yaw": 20.0, "Roll": 30.0 })
        );
    }

    #[test]
    fn malformed_values_yield_defaults() {
        let defaults = json!({ "X": 0.0, "Y": 0.0, "Z": 0.0 });
        assert_eq!(VectorLayout::Xyz.format_value(Some(&json!("1,2,3"))), defaults);
        assert_eq!(VectorLayout::Xyz.format_value(Some(&json!([1, "two", 3]))), defaults);
        assert_eq!(
            VectorLayout::Xyz.format_value(Some(&json!([4, 5, 6]))),
            json!({ "X": 4.0, "Y": 5.0, "Z": 6.0 })
        );
        assert_eq!(
            VectorLayout::Rotator.format_value(Some(&json!({ "Yaw": 90, "Pitch": 1, "Roll": 2 }))),
            json!({ "Pitch": 1.0, "Yaw": 90.0, "Roll": 2.0 })
        );
        assert_eq!(VectorLayout::Xyz.format_value(Some(&json!("Unknown"))), defaults);
    }
}
