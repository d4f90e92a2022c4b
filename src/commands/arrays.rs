// Array-manager command handlers.
//
// The roster lock is never held across a backend call; commands resolve the
// index first, talk to the backend, then apply the confirmed change locally.

use crate::arrays::ArrayRoster;
use crate::commands::backend_client;
use crate::models::{ArrayConfig, ArrayKind, ArrayPatch, FrequencyComponent};
use log::{debug, info};
use parking_lot::Mutex;
use std::sync::Arc;
use tauri::State;

pub type ArraysState = Arc<Mutex<ArrayRoster>>;

#[tauri::command]
pub fn list_arrays(state: State<'_, ArraysState>) -> Vec<ArrayConfig> {
    state.lock().all()
}

#[tauri::command]
pub fn create_array(
    state: State<'_, ArraysState>,
    config: ArrayConfig,
) -> Result<ArrayConfig, String> {
    let created = backend_client()?
        .create_array(&config)
        .map_err(|e| e.to_string())?;
    state.lock().push(created.clone());
    info!("Created array ({:?}, {} elements)", created.kind, created.num_elements);
    Ok(created)
}

#[tauri::command]
pub fn update_array(
    state: State<'_, ArraysState>,
    index: usize,
    patch: ArrayPatch,
) -> Result<ArrayConfig, String> {
    let updated = backend_client()?
        .update_array(index, &patch)
        .map_err(|e| e.to_string())?;
    state.lock().replace(index, updated.clone())?;
    Ok(updated)
}

#[tauri::command]
pub fn delete_array(state: State<'_, ArraysState>, index: usize) -> Result<(), String> {
    backend_client()?
        .delete_array(index)
        .map_err(|e| e.to_string())?;
    state.lock().remove(index)?;
    debug!("Deleted array {}", index);
    Ok(())
}

#[tauri::command]
pub fn select_array(state: State<'_, ArraysState>, index: usize) -> Result<ArrayConfig, String> {
    state.lock().select(index)
}

#[tauri::command]
pub fn set_steering_angle(
    state: State<'_, ArraysState>,
    angle: f64,
) -> Result<ArrayConfig, String> {
    patch_selected(&state, ArrayPatch::steering_angle(angle))
}

#[tauri::command]
pub fn set_array_kind(state: State<'_, ArraysState>, kind: ArrayKind) -> Result<ArrayConfig, String> {
    patch_selected(&state, ArrayPatch::kind(kind))
}

#[tauri::command]
pub fn add_frequency_component(
    state: State<'_, ArraysState>,
    component: FrequencyComponent,
) -> Result<ArrayConfig, String> {
    let index = selected_index(&state)?;
    let updated = backend_client()?
        .add_frequency_component(index, &component)
        .map_err(|e| e.to_string())?;
    state.lock().replace(index, updated.clone())?;
    Ok(updated)
}

#[tauri::command]
pub fn remove_frequency_component(
    state: State<'_, ArraysState>,
    component_index: usize,
) -> Result<(), String> {
    let index = selected_index(&state)?;
    backend_client()?
        .remove_frequency_component(index, component_index)
        .map_err(|e| e.to_string())?;

    let mut roster = state.lock();
    if let Some(config) = roster.selected() {
        let mut config = config.clone();
        if component_index < config.components.len() {
            config.components.remove(component_index);
            roster.replace(index, config)?;
        }
    }
    Ok(())
}

/// Interference field of the selected array as a Plotly heatmap payload
#[tauri::command]
pub fn get_field_plot(state: State<'_, ArraysState>) -> Result<serde_json::Value, String> {
    let index = selected_index(&state)?;
    let field = backend_client()?
        .array_field(index)
        .map_err(|e| e.to_string())?;
    Ok(crate::plot::interference_map(&field))
}

/// Beam pattern of the selected array as a Plotly polar payload
#[tauri::command]
pub fn get_pattern_plot(state: State<'_, ArraysState>) -> Result<serde_json::Value, String> {
    let index = selected_index(&state)?;
    let pattern = backend_client()?
        .array_pattern(index)
        .map_err(|e| e.to_string())?;
    Ok(crate::plot::beam_pattern(&pattern))
}

fn selected_index(state: &State<'_, ArraysState>) -> Result<usize, String> {
    state
        .lock()
        .selected_index()
        .ok_or_else(|| "No array selected".to_string())
}

fn patch_selected(
    state: &State<'_, ArraysState>,
    patch: ArrayPatch,
) -> Result<ArrayConfig, String> {
    let index = selected_index(state)?;
    let updated = backend_client()?
        .update_array(index, &patch)
        .map_err(|e| e.to_string())?;
    state.lock().replace(index, updated.clone())?;
    Ok(updated)
}
