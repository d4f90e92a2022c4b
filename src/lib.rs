mod arrays;
mod backend;
mod beam;
mod commands;
mod file_manager;
mod logging;
mod mixer;
mod models;
mod plot;
mod utils;

use arrays::ArrayRoster;
use beam::BeamState;
use commands::{
    arrays::{
        add_frequency_component, create_array, delete_array, get_field_plot, get_pattern_plot,
        list_arrays, remove_frequency_component, select_array, set_array_kind, set_steering_angle,
        update_array, ArraysState,
    },
    beam::{
        add_transmitter, cached_phased_array, get_beam_profile, get_phased_array, get_wave_map,
        initialize_beamforming, load_scenario, remove_transmitter, set_curvature_radius,
        set_element_spacing, set_frequency, set_geometry, set_phase_shift,
    },
    mixer::{get_view, is_mixing, request_mix, reset_workspace, save_output_image, upload_image},
    regions::{get_mixing_mode, get_regions, set_mixing_mode, toggle_region_type, update_region},
    settings::{get_settings, update_settings},
};
use file_manager::initialize_json_file;
use log::warn;
use mixer::MixerState;
use models::Settings;
use parking_lot::Mutex;
use std::sync::Arc;
use tauri_plugin_log::{Target, TargetKind};
use utils::{get_logs_dir, get_settings_json_path, initialize_data_directories};

fn initialize_app_data() -> Result<(), String> {
    initialize_data_directories()?;
    initialize_json_file(&get_settings_json_path(), &Settings::default())?;
    Ok(())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    if let Err(e) = initialize_app_data() {
        eprintln!("Failed to initialize app data: {}", e);
    }

    let mixer_state = Arc::new(MixerState::default());
    let beam_state = Arc::new(BeamState::default());
    let arrays_state: ArraysState = Arc::new(Mutex::new(ArrayRoster::default()));

    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::new()
                .targets([
                    Target::new(TargetKind::Stdout),
                    Target::new(TargetKind::Folder {
                        path: get_logs_dir(),
                        file_name: None,
                    }),
                ])
                .build(),
        )
        .plugin(tauri_plugin_dialog::init())
        .manage(mixer_state)
        .manage(beam_state)
        .manage(arrays_state)
        .setup(|_app| {
            logging::cleanup_old_logs();

            // Start from a clean backend unless configured otherwise; off
            // the main thread so an unreachable backend cannot stall startup
            std::thread::spawn(|| match get_settings() {
                Ok(settings) if settings.reset_backend_on_launch => {
                    match commands::backend_client() {
                        Ok(client) => {
                            if let Err(e) = client.reset() {
                                warn!("Backend reset on launch failed: {}", e);
                            }
                        }
                        Err(e) => warn!("Backend reset on launch skipped: {}", e),
                    }
                }
                Ok(_) => {}
                Err(e) => warn!("Could not read settings on launch: {}", e),
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // FT mixer
            upload_image,
            get_view,
            reset_workspace,
            request_mix,
            is_mixing,
            save_output_image,
            // Region board
            set_mixing_mode,
            get_mixing_mode,
            update_region,
            toggle_region_type,
            get_regions,
            // Beamforming simulator
            initialize_beamforming,
            get_phased_array,
            cached_phased_array,
            set_frequency,
            set_phase_shift,
            set_geometry,
            set_element_spacing,
            set_curvature_radius,
            add_transmitter,
            remove_transmitter,
            load_scenario,
            get_wave_map,
            get_beam_profile,
            // Array manager
            list_arrays,
            create_array,
            update_array,
            delete_array,
            select_array,
            set_steering_angle,
            set_array_kind,
            add_frequency_component,
            remove_frequency_component,
            get_field_plot,
            get_pattern_plot,
            // Settings
            get_settings,
            update_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
