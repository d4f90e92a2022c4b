// Beamforming simulator data models
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Geometry {
    Linear,
    Curvilinear,
}

/// Current phased-array state as reported by `GET /phased_array`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhasedArraySnapshot {
    pub current_frequency: f64,
    pub phase_shift: f64,
    pub distance: f64,
    pub radius: f64,
    pub geometry: Geometry,
    pub transmitter_count: u32,
}

/// Scenario presets understood by `POST /load_scenario`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Custom,
    TumorAblation,
    Ultrasound,
    #[serde(rename = "5g_mmwave_beamforming")]
    FiveGMmwaveBeamforming,
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario::Custom
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResponse {
    pub success: bool,
    pub geometry: Geometry,
}

/// `GET /wave_map` response: interference image plus element positions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveMapView {
    pub image: String,
    pub transmitter_positions: Vec<[f64; 2]>,
}

/// `GET /beam_profile` response: rendered profile plus the raw series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamProfileView {
    pub image: String,
    pub angles: Vec<f64>,
    pub response: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransmitterCount {
    pub success: bool,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_uses_backend_spelling() {
        assert_eq!(serde_json::to_value(Geometry::Linear).unwrap(), "Linear");
        assert_eq!(
            serde_json::to_value(Geometry::Curvilinear).unwrap(),
            "Curvilinear"
        );
    }

    #[test]
    fn test_scenario_wire_names() {
        assert_eq!(
            serde_json::to_value(Scenario::TumorAblation).unwrap(),
            "tumor_ablation"
        );
        assert_eq!(
            serde_json::to_value(Scenario::FiveGMmwaveBeamforming).unwrap(),
            "5g_mmwave_beamforming"
        );
    }

    #[test]
    fn test_snapshot_round_trips_backend_json() {
        let json = r#"{
            "current_frequency": 28.0,
            "phase_shift": 0.8,
            "distance": 0.25,
            "radius": 1.0,
            "geometry": "Linear",
            "transmitter_count": 32
        }"#;
        let snapshot: PhasedArraySnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.geometry, Geometry::Linear);
        assert_eq!(snapshot.transmitter_count, 32);
    }
}
