// FT-mixer data models
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const REGION_SLOTS: u8 = 4;

/// Whether a region selects the area inside or outside its rectangle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    Inner,
    Outer,
}

impl RegionKind {
    pub fn toggled(self) -> Self {
        match self {
            RegionKind::Inner => RegionKind::Outer,
            RegionKind::Outer => RegionKind::Inner,
        }
    }
}

/// Normalized selection rectangle, all fields are percentages of the viewport
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Region {
    #[serde(rename = "type")]
    pub kind: RegionKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    /// The default selection: the whole frame, inner
    pub fn full_frame() -> Self {
        Self {
            kind: RegionKind::Inner,
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
        }
    }

    /// Builds a region from raw drawn coordinates, clamping the origin into
    /// [0, 100] and the extent into [1, 100]
    pub fn from_drawn(kind: RegionKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            kind,
            x: x.clamp(0.0, 100.0),
            y: y.clamp(0.0, 100.0),
            width: width.abs().clamp(1.0, 100.0),
            height: height.abs().clamp(1.0, 100.0),
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::full_frame()
    }
}

/// Which component pair the mixer combines
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComponentMode {
    MagnitudePhase,
    RealImag,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MixingMode {
    Basic,
    Region,
}

/// Per-slot weight pairs for the two component columns, percent values
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeightSet {
    pub wa: [f64; 4],
    pub wb: [f64; 4],
}

impl Default for WeightSet {
    fn default() -> Self {
        Self {
            wa: [50.0; 4],
            wb: [50.0; 4],
        }
    }
}

/// Wire payload for `POST /mix`. Field names and shapes match the backend
/// contract exactly, weights are flattened to `wa1..wa4` / `wb1..wb4`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MixRequest {
    pub mode: ComponentMode,
    pub target_output: u8,
    pub mixing_mode: MixingMode,
    pub regions: BTreeMap<String, Region>,
    pub wa1: f64,
    pub wa2: f64,
    pub wa3: f64,
    pub wa4: f64,
    pub wb1: f64,
    pub wb2: f64,
    pub wb3: f64,
    pub wb4: f64,
}

impl MixRequest {
    /// Assembles the payload from the current form state.
    ///
    /// In basic mode every submitted region is the full-frame default, no
    /// matter what rectangles the user drew earlier.
    pub fn assemble(
        mode: ComponentMode,
        target_output: u8,
        mixing_mode: MixingMode,
        drawn: &[Region; REGION_SLOTS as usize],
        weights: &WeightSet,
    ) -> Self {
        let mut regions = BTreeMap::new();
        for slot in 0..REGION_SLOTS as usize {
            let region = match mixing_mode {
                MixingMode::Basic => Region::full_frame(),
                MixingMode::Region => drawn[slot],
            };
            regions.insert((slot + 1).to_string(), region);
        }

        Self {
            mode,
            target_output,
            mixing_mode,
            regions,
            wa1: weights.wa[0],
            wa2: weights.wa[1],
            wa3: weights.wa[2],
            wa4: weights.wa[3],
            wb1: weights.wb[0],
            wb2: weights.wb[1],
            wb3: weights.wb[2],
            wb4: weights.wb[3],
        }
    }
}

/// Response of `GET /mix_status`, polled while a mix job runs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MixStatus {
    pub running: bool,
    pub progress: u8,
    #[serde(default)]
    pub result: Option<String>,
}

/// View kinds the backend can render for a slot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Original,
    Mag,
    Phase,
    Real,
    Imag,
}
