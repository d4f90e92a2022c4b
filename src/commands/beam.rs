// Beamforming simulator command handlers.
//
// The setters return `Ok(false)` when another control update is still in
// flight; the frontend drops the input instead of queueing it, matching how
// the sliders behave.

use crate::beam::BeamState;
use crate::commands::backend_client;
use crate::file_manager::{read_json_file_or_default, write_json_file};
use crate::models::{
    BeamProfileView, Geometry, PhasedArraySnapshot, Scenario, Settings, WaveMapView,
};
use crate::utils::get_settings_json_path;
use log::{debug, info};
use std::sync::Arc;
use tauri::State;

/// Reset the backend and load the startup scenario; returns the resulting
/// array snapshot. Mirrors the original page-load sequence. Without an
/// explicit scenario, the one remembered from the previous session is used.
#[tauri::command]
pub fn initialize_beamforming(
    beam: State<'_, Arc<BeamState>>,
    scenario: Option<Scenario>,
) -> Result<PhasedArraySnapshot, String> {
    let client = backend_client()?;
    let scenario = scenario.or_else(stored_scenario).unwrap_or_default();

    client.reset().map_err(|e| e.to_string())?;
    client.load_scenario(scenario).map_err(|e| e.to_string())?;

    let snapshot = client.phased_array().map_err(|e| e.to_string())?;
    beam.cache_snapshot(snapshot.clone());
    remember_scenario(scenario)?;

    info!("Beamforming initialized with {:?} scenario", scenario);
    Ok(snapshot)
}

/// Fetch the current phased-array state for control synchronization
#[tauri::command]
pub fn get_phased_array(beam: State<'_, Arc<BeamState>>) -> Result<PhasedArraySnapshot, String> {
    let snapshot = backend_client()?.phased_array().map_err(|e| e.to_string())?;
    beam.cache_snapshot(snapshot.clone());
    Ok(snapshot)
}

/// Last snapshot fetched from the backend, without a network round trip.
/// The frontend uses this to restore control positions after a tab switch.
#[tauri::command]
pub fn cached_phased_array(beam: State<'_, Arc<BeamState>>) -> Option<PhasedArraySnapshot> {
    beam.snapshot()
}

#[tauri::command]
pub fn set_frequency(beam: State<'_, Arc<BeamState>>, frequency: f64) -> Result<bool, String> {
    let Some(_guard) = beam.try_begin_update() else {
        debug!("Skipping frequency update, another update in flight");
        return Ok(false);
    };
    backend_client()?
        .update_frequency(frequency)
        .map_err(|e| e.to_string())?;
    Ok(true)
}

#[tauri::command]
pub fn set_phase_shift(beam: State<'_, Arc<BeamState>>, phase_shift: f64) -> Result<bool, String> {
    let Some(_guard) = beam.try_begin_update() else {
        debug!("Skipping phase shift update, another update in flight");
        return Ok(false);
    };
    backend_client()?
        .update_phase_shift(phase_shift)
        .map_err(|e| e.to_string())?;
    Ok(true)
}

#[tauri::command]
pub fn set_geometry(beam: State<'_, Arc<BeamState>>, geometry: Geometry) -> Result<bool, String> {
    let Some(_guard) = beam.try_begin_update() else {
        debug!("Skipping geometry update, another update in flight");
        return Ok(false);
    };
    backend_client()?
        .update_geometry(geometry)
        .map_err(|e| e.to_string())?;
    Ok(true)
}

/// Element spacing of the array (the backend calls this "distance")
#[tauri::command]
pub fn set_element_spacing(beam: State<'_, Arc<BeamState>>, distance: f64) -> Result<bool, String> {
    let Some(_guard) = beam.try_begin_update() else {
        debug!("Skipping spacing update, another update in flight");
        return Ok(false);
    };
    backend_client()?
        .update_distance(distance)
        .map_err(|e| e.to_string())?;
    Ok(true)
}

#[tauri::command]
pub fn set_curvature_radius(beam: State<'_, Arc<BeamState>>, radius: f64) -> Result<bool, String> {
    let Some(_guard) = beam.try_begin_update() else {
        debug!("Skipping radius update, another update in flight");
        return Ok(false);
    };
    backend_client()?
        .update_radius(radius)
        .map_err(|e| e.to_string())?;
    Ok(true)
}

/// Returns the new transmitter count, or `None` when skipped
#[tauri::command]
pub fn add_transmitter(
    beam: State<'_, Arc<BeamState>>,
    distance: f64,
    radius: f64,
) -> Result<Option<u32>, String> {
    let Some(_guard) = beam.try_begin_update() else {
        return Ok(None);
    };
    let count = backend_client()?
        .add_transmitter(distance, radius)
        .map_err(|e| e.to_string())?;
    Ok(Some(count.count))
}

#[tauri::command]
pub fn remove_transmitter(
    beam: State<'_, Arc<BeamState>>,
    distance: f64,
    radius: f64,
) -> Result<Option<u32>, String> {
    let Some(_guard) = beam.try_begin_update() else {
        return Ok(None);
    };
    let count = backend_client()?
        .remove_transmitter(distance, radius)
        .map_err(|e| e.to_string())?;
    Ok(Some(count.count))
}

/// Load a scenario preset and refresh the cached snapshot
#[tauri::command]
pub fn load_scenario(
    beam: State<'_, Arc<BeamState>>,
    scenario: Scenario,
) -> Result<Option<PhasedArraySnapshot>, String> {
    let Some(_guard) = beam.try_begin_update() else {
        debug!("Skipping scenario load, another update in flight");
        return Ok(None);
    };

    let client = backend_client()?;
    client.load_scenario(scenario).map_err(|e| e.to_string())?;

    let snapshot = client.phased_array().map_err(|e| e.to_string())?;
    beam.cache_snapshot(snapshot.clone());
    remember_scenario(scenario)?;

    info!("Loaded {:?} scenario", scenario);
    Ok(Some(snapshot))
}

#[tauri::command]
pub fn get_wave_map() -> Result<WaveMapView, String> {
    backend_client()?.wave_map().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_beam_profile() -> Result<BeamProfileView, String> {
    backend_client()?.beam_profile().map_err(|e| e.to_string())
}

fn remember_scenario(scenario: Scenario) -> Result<(), String> {
    let path = get_settings_json_path();
    let mut settings: Settings = read_json_file_or_default(&path)?;
    settings.last_scenario = scenario_name(scenario);
    write_json_file(&path, &settings)
}

/// Scenario persisted by the previous session, if any
fn stored_scenario() -> Option<Scenario> {
    let settings: Settings = read_json_file_or_default(&get_settings_json_path()).ok()?;
    parse_scenario(&settings.last_scenario?)
}

fn scenario_name(scenario: Scenario) -> Option<String> {
    serde_json::to_value(scenario)
        .ok()
        .and_then(|v| v.as_str().map(String::from))
}

fn parse_scenario(name: &str) -> Option<Scenario> {
    serde_json::from_value(serde_json::Value::String(name.to_string())).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_scenario_names_round_trip() {
        for scenario in [
            Scenario::Custom,
            Scenario::TumorAblation,
            Scenario::Ultrasound,
            Scenario::FiveGMmwaveBeamforming,
        ] {
            let name = scenario_name(scenario).unwrap();
            assert_eq!(parse_scenario(&name), Some(scenario));
        }
    }

    #[test]
    fn test_unknown_scenario_name_is_ignored() {
        assert_eq!(parse_scenario("laser_show"), None);
    }
}
