// FT-mixer command handlers
use crate::commands::backend_client;
use crate::mixer::{poller, MixerEvent, MixerState};
use crate::models::{ComponentMode, MixRequest, ViewKind, WeightSet};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use log::{error, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tauri::{AppHandle, Emitter, State};

#[derive(Debug, Deserialize)]
pub struct MixParams {
    pub mode: ComponentMode,
    pub target_output: u8,
    pub weights: WeightSet,
}

/// Upload an image file into one of the four input slots
#[tauri::command]
pub fn upload_image(slot: u8, file_path: String) -> Result<(), String> {
    let path = Path::new(&file_path);
    if !path.exists() {
        return Err(format!("Image file not found: {}", file_path));
    }

    let bytes = fs::read(path).map_err(|e| format!("Failed to read {}: {}", file_path, e))?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.png");

    backend_client()?
        .upload_image(slot, filename, &bytes)
        .map_err(|e| e.to_string())?;

    info!("Uploaded {} into slot {}", filename, slot);
    Ok(())
}

/// Fetch a base64 view of an input slot or output port
#[tauri::command]
pub fn get_view(slot: u8, view: ViewKind, is_output: bool) -> Result<Option<String>, String> {
    backend_client()?
        .get_view(slot, view, is_output)
        .map_err(|e| e.to_string())
}

/// Clear all backend image state and the local region board
#[tauri::command]
pub fn reset_workspace(state: State<'_, Arc<MixerState>>) -> Result<(), String> {
    backend_client()?.reset().map_err(|e| e.to_string())?;
    state.regions.lock().reset_all();
    info!("Workspace reset");
    Ok(())
}

#[tauri::command]
pub fn is_mixing(state: State<'_, Arc<MixerState>>) -> bool {
    state.is_mixing()
}

/// Start a mix job.
///
/// Supersedes whatever job was running, resets the progress bar, submits the
/// payload and spawns a poller for the fresh job id. Results arrive as
/// `mix-complete` events; only the poller of the latest issued job ever
/// emits one.
#[tauri::command]
pub fn request_mix(
    app: AppHandle,
    state: State<'_, Arc<MixerState>>,
    params: MixParams,
) -> Result<u64, String> {
    if !(1..=2).contains(&params.target_output) {
        return Err(format!("Invalid target output: {}", params.target_output));
    }

    let job_id = issue_job(&state, &|event| emit_mixer_event(&app, event));
    info!("Job #{} - starting new mix", job_id);

    let (mixing_mode, drawn) = {
        let board = state.regions.lock();
        (board.mode(), board.snapshot())
    };
    let request = MixRequest::assemble(
        params.mode,
        params.target_output,
        mixing_mode,
        &drawn,
        &params.weights,
    );

    let client = backend_client()?;
    state.set_mixing(true);
    if let Err(e) = client.start_mix(&request) {
        state.finish(job_id);
        error!("Job #{} - failed to start mix: {}", job_id, e);
        return Err(format!("Error starting mix: {}", e));
    }

    let emitter = app.clone();
    let _ = poller::spawn(
        state.inner().clone(),
        Arc::new(client),
        job_id,
        params.target_output,
        move |event| emit_mixer_event(&emitter, event),
    );

    Ok(job_id)
}

/// Write a base64-encoded mix result to disk
#[tauri::command]
pub fn save_output_image(image: String, file_path: String) -> Result<(), String> {
    let bytes = BASE64
        .decode(image.as_bytes())
        .map_err(|e| format!("Invalid image data: {}", e))?;
    fs::write(&file_path, bytes).map_err(|e| format!("Failed to write {}: {}", file_path, e))?;
    info!("Saved output image to {}", file_path);
    Ok(())
}

/// Issues the next job id and hands the progress bar to it immediately:
/// the zero-progress event goes out before any polling can start.
fn issue_job(state: &MixerState, on_event: &dyn Fn(MixerEvent)) -> u64 {
    let job_id = state.begin_job();
    on_event(MixerEvent::Progress {
        job_id,
        progress: 0,
    });
    job_id
}

fn emit_progress(app: &AppHandle, job_id: u64, progress: u8) {
    let _ = app.emit(
        "mix-progress",
        serde_json::json!({ "job_id": job_id, "progress": progress }),
    );
}

fn emit_mixer_event(app: &AppHandle, event: MixerEvent) {
    match event {
        MixerEvent::Progress { job_id, progress } => emit_progress(app, job_id, progress),
        MixerEvent::Completed {
            job_id,
            target_output,
            image,
        } => {
            let _ = app.emit(
                "mix-complete",
                serde_json::json!({
                    "job_id": job_id,
                    "target_output": target_output,
                    "image": image,
                }),
            );
        }
        MixerEvent::CompletedEmpty { job_id } => {
            let _ = app.emit("mix-empty", serde_json::json!({ "job_id": job_id }));
        }
        MixerEvent::Failed { job_id, message } => {
            let _ = app.emit(
                "mix-error",
                serde_json::json!({ "job_id": job_id, "error": message }),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_new_job_resets_progress_before_polling_starts() {
        let state = MixerState::default();
        let events = Arc::new(Mutex::new(Vec::new()));

        let sink = events.clone();
        let job_id = issue_job(&state, &move |event| sink.lock().push(event));

        assert_eq!(
            *events.lock(),
            vec![MixerEvent::Progress {
                job_id,
                progress: 0
            }]
        );
        assert!(state.is_current(job_id));
    }

    #[test]
    fn test_each_new_job_claims_the_progress_bar() {
        let state = MixerState::default();
        let events = Arc::new(Mutex::new(Vec::new()));

        let sink = events.clone();
        let on_event = move |event| sink.lock().push(event);
        let first = issue_job(&state, &on_event);
        let second = issue_job(&state, &on_event);

        assert!(!state.is_current(first));
        assert_eq!(
            events.lock().last(),
            Some(&MixerEvent::Progress {
                job_id: second,
                progress: 0
            })
        );
    }
}
