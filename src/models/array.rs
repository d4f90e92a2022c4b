// Array-manager variant data models
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ArrayKind {
    Linear,
    Curved,
}

/// One sinusoidal component driving an array
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FrequencyComponent {
    pub frequency: f64,
    pub amplitude: f64,
    pub phase: f64,
}

impl Default for FrequencyComponent {
    fn default() -> Self {
        Self {
            frequency: 1000.0,
            amplitude: 1.0,
            phase: 0.0,
        }
    }
}

/// One configured phased array in the roster
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArrayConfig {
    #[serde(rename = "type")]
    pub kind: ArrayKind,
    pub num_elements: u32,
    pub spacing: f64,
    pub steering_angle: f64,
    #[serde(default)]
    pub components: Vec<FrequencyComponent>,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            kind: ArrayKind::Linear,
            num_elements: 8,
            spacing: 0.5,
            steering_angle: 0.0,
            components: vec![FrequencyComponent::default()],
        }
    }
}

/// Partial update for `PUT /api/arrays/{index}`; only the set fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArrayPatch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ArrayKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_elements: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steering_angle: Option<f64>,
}

impl ArrayPatch {
    pub fn steering_angle(angle: f64) -> Self {
        Self {
            steering_angle: Some(angle),
            ..Self::default()
        }
    }

    pub fn kind(kind: ArrayKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }
}

/// Computed interference field on a rectangular grid.
/// `extent` is `[x_min, x_max, y_min, y_max]` in meters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldData {
    pub field: Vec<Vec<f64>>,
    pub extent: [f64; 4],
}

/// Computed beam pattern: angles in radians, response in dB
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternData {
    pub theta: Vec<f64>,
    pub pattern: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_config_wire_shape() {
        let json = serde_json::to_value(ArrayConfig::default()).unwrap();
        assert_eq!(json["type"], "linear");
        assert_eq!(json["num_elements"], 8);
        assert_eq!(json["components"][0]["frequency"], 1000.0);
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let json = serde_json::to_value(ArrayPatch::steering_angle(15.0)).unwrap();
        assert_eq!(json, serde_json::json!({ "steering_angle": 15.0 }));
    }

    #[test]
    fn test_components_default_to_empty_when_absent() {
        let cfg: ArrayConfig = serde_json::from_str(
            r#"{"type": "curved", "num_elements": 16, "spacing": 0.25, "steering_angle": 30.0}"#,
        )
        .unwrap();
        assert_eq!(cfg.kind, ArrayKind::Curved);
        assert!(cfg.components.is_empty());
    }
}
