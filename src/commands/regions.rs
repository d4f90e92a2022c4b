// Region board command handlers
use crate::mixer::MixerState;
use crate::models::{MixingMode, Region, RegionKind, REGION_SLOTS};
use log::debug;
use serde::Serialize;
use std::sync::Arc;
use tauri::State;

/// One entry per component slot; `drawn` tells the frontend whether the
/// toggle button for that slot should be enabled.
#[derive(Debug, Clone, Serialize)]
pub struct RegionSlotView {
    pub slot: u8,
    pub region: Region,
    pub drawn: bool,
}

/// Switch between basic and region mixing. Entering basic mode resets every
/// drawn rectangle to the full-frame default.
#[tauri::command]
pub fn set_mixing_mode(state: State<'_, Arc<MixerState>>, mode: MixingMode) -> Result<(), String> {
    state.regions.lock().set_mode(mode);
    debug!("Mixing mode set to {:?}", mode);
    Ok(())
}

#[tauri::command]
pub fn get_mixing_mode(state: State<'_, Arc<MixerState>>) -> MixingMode {
    state.regions.lock().mode()
}

/// Store the rectangle the user drew or dragged on a slot (percent coords)
#[tauri::command]
pub fn update_region(
    state: State<'_, Arc<MixerState>>,
    slot: u8,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Result<Region, String> {
    state.regions.lock().update(slot, x, y, width, height)
}

/// Flip a slot between inner and outer selection; `None` when nothing is
/// drawn there yet
#[tauri::command]
pub fn toggle_region_type(
    state: State<'_, Arc<MixerState>>,
    slot: u8,
) -> Result<Option<RegionKind>, String> {
    state.regions.lock().toggle_kind(slot)
}

#[tauri::command]
pub fn get_regions(state: State<'_, Arc<MixerState>>) -> Result<Vec<RegionSlotView>, String> {
    let board = state.regions.lock();
    let regions = board.snapshot();
    (1..=REGION_SLOTS)
        .map(|slot| {
            Ok(RegionSlotView {
                slot,
                region: regions[(slot - 1) as usize],
                drawn: board.is_drawn(slot)?,
            })
        })
        .collect()
}
