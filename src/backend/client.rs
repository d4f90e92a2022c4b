// Blocking HTTP client for the signal-processing backend.
// All numeric work (FFT mixing, field synthesis, beam patterns) happens on
// the backend; this client only moves JSON and image bytes.

use crate::models::{
    ArrayConfig, ArrayPatch, BeamProfileView, FieldData, FrequencyComponent, Geometry, MixRequest,
    MixStatus, PatternData, PhasedArraySnapshot, Scenario, ScenarioResponse, TransmitterCount,
    WaveMapView,
};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to reach backend: {0}")]
    Transport(String),
    #[error("failed to decode backend response: {0}")]
    Decode(String),
}

impl From<ureq::Error> for BackendError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => BackendError::Status {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => BackendError::Transport(transport.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let response = ureq::get(&self.url(path)).call()?;
        response
            .into_json::<T>()
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, BackendError> {
        let response = ureq::post(&self.url(path))
            .set("Content-Type", "application/json")
            .send_json(serde_json::to_value(body).map_err(|e| BackendError::Decode(e.to_string()))?)?;
        response
            .into_json::<T>()
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    /// POST where the response body is irrelevant (ack objects, 204s)
    fn post_ack(&self, path: &str, body: &impl Serialize) -> Result<(), BackendError> {
        ureq::post(&self.url(path))
            .set("Content-Type", "application/json")
            .send_json(serde_json::to_value(body).map_err(|e| BackendError::Decode(e.to_string()))?)?;
        Ok(())
    }

    // ---------------- FT mixer ----------------

    /// Uploads an image into an input slot. The backend expects a multipart
    /// form with a `slot_id` field and an `image` file part.
    pub fn upload_image(
        &self,
        slot: u8,
        filename: &str,
        bytes: &[u8],
    ) -> Result<(), BackendError> {
        let boundary = format!("wavelab-{:x}", chrono::Utc::now().timestamp_millis());
        let body = multipart_body(&boundary, slot, filename, bytes);

        ureq::post(&self.url("/upload"))
            .set(
                "Content-Type",
                &format!("multipart/form-data; boundary={}", boundary),
            )
            .send_bytes(&body)?;
        debug!("Uploaded {} bytes into slot {}", bytes.len(), slot);
        Ok(())
    }

    /// Starts a mix job. The backend acknowledges with `{"status": "mix_started"}`
    /// and reports progress through `mix_status`.
    pub fn start_mix(&self, request: &MixRequest) -> Result<(), BackendError> {
        self.post_ack("/mix", request)
    }

    pub fn mix_status(&self) -> Result<MixStatus, BackendError> {
        self.get_json("/mix_status")
    }

    /// Fetches a base64-encoded view of a slot. Empty input slots (backend
    /// 404) and empty output ports (`image: ""`) both map to `None`.
    pub fn get_view(
        &self,
        slot: u8,
        view: crate::models::ViewKind,
        is_output: bool,
    ) -> Result<Option<String>, BackendError> {
        #[derive(serde::Deserialize)]
        struct ViewResponse {
            #[serde(default)]
            image: String,
        }

        let body = serde_json::json!({
            "slot_id": slot,
            "type": view,
            "is_output": is_output,
        });

        let result: Result<ViewResponse, BackendError> = self.post_json("/get_view", &body);
        match result {
            Ok(view) if view.image.is_empty() => Ok(None),
            Ok(view) => Ok(Some(view.image)),
            Err(BackendError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Clears all backend image state (input slots, outputs, mix results)
    pub fn reset(&self) -> Result<(), BackendError> {
        ureq::post(&self.url("/reset")).send_bytes(&[])?;
        Ok(())
    }

    // ---------------- Beamforming simulator ----------------

    pub fn phased_array(&self) -> Result<PhasedArraySnapshot, BackendError> {
        self.get_json("/phased_array")
    }

    pub fn update_frequency(&self, frequency: f64) -> Result<(), BackendError> {
        self.post_ack("/update_frequency", &serde_json::json!({ "frequency": frequency }))
    }

    pub fn update_phase_shift(&self, phase_shift: f64) -> Result<(), BackendError> {
        self.post_ack(
            "/update_phase_shift",
            &serde_json::json!({ "phase_shift": phase_shift }),
        )
    }

    pub fn update_geometry(&self, geometry: Geometry) -> Result<(), BackendError> {
        self.post_ack("/update_geometry", &serde_json::json!({ "geometry": geometry }))
    }

    pub fn update_distance(&self, distance: f64) -> Result<(), BackendError> {
        self.post_ack("/update_distance", &serde_json::json!({ "distance": distance }))
    }

    pub fn update_radius(&self, radius: f64) -> Result<(), BackendError> {
        self.post_ack("/update_radius", &serde_json::json!({ "radius": radius }))
    }

    pub fn add_transmitter(
        &self,
        distance: f64,
        radius: f64,
    ) -> Result<TransmitterCount, BackendError> {
        self.post_json(
            "/add_transmitter",
            &serde_json::json!({ "distance": distance, "radius": radius }),
        )
    }

    pub fn remove_transmitter(
        &self,
        distance: f64,
        radius: f64,
    ) -> Result<TransmitterCount, BackendError> {
        self.post_json(
            "/remove_transmitter",
            &serde_json::json!({ "distance": distance, "radius": radius }),
        )
    }

    pub fn wave_map(&self) -> Result<WaveMapView, BackendError> {
        self.get_json("/wave_map")
    }

    pub fn beam_profile(&self) -> Result<BeamProfileView, BackendError> {
        self.get_json("/beam_profile")
    }

    pub fn load_scenario(&self, scenario: Scenario) -> Result<ScenarioResponse, BackendError> {
        self.post_json("/load_scenario", &serde_json::json!({ "scenario": scenario }))
    }

    // ---------------- Array-manager variant ----------------

    pub fn create_array(&self, config: &ArrayConfig) -> Result<ArrayConfig, BackendError> {
        self.post_json("/api/arrays", config)
    }

    pub fn update_array(
        &self,
        index: usize,
        patch: &ArrayPatch,
    ) -> Result<ArrayConfig, BackendError> {
        let response = ureq::put(&self.url(&format!("/api/arrays/{}", index)))
            .set("Content-Type", "application/json")
            .send_json(
                serde_json::to_value(patch).map_err(|e| BackendError::Decode(e.to_string()))?,
            )?;
        response
            .into_json()
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    pub fn delete_array(&self, index: usize) -> Result<(), BackendError> {
        ureq::delete(&self.url(&format!("/api/arrays/{}", index))).call()?;
        Ok(())
    }

    pub fn add_frequency_component(
        &self,
        index: usize,
        component: &FrequencyComponent,
    ) -> Result<ArrayConfig, BackendError> {
        self.post_json(&format!("/api/arrays/{}/frequency", index), component)
    }

    pub fn remove_frequency_component(
        &self,
        array_index: usize,
        component_index: usize,
    ) -> Result<(), BackendError> {
        ureq::delete(&self.url(&format!(
            "/api/arrays/{}/frequency/{}",
            array_index, component_index
        )))
        .call()?;
        Ok(())
    }

    pub fn array_field(&self, index: usize) -> Result<FieldData, BackendError> {
        self.get_json(&format!("/api/arrays/{}/field", index))
    }

    pub fn array_pattern(&self, index: usize) -> Result<PatternData, BackendError> {
        self.get_json(&format!("/api/arrays/{}/pattern", index))
    }
}

/// Builds a two-part multipart/form-data body: the slot id and the image file
fn multipart_body(boundary: &str, slot: u8, filename: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(bytes.len() + 256);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"slot_id\"\r\n\r\n{slot}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slashes_are_stripped() {
        let client = BackendClient::new("http://localhost:5000//");
        assert_eq!(client.url("/mix_status"), "http://localhost:5000/mix_status");
    }

    #[test]
    fn test_multipart_body_carries_slot_and_file() {
        let body = multipart_body("b0undary", 3, "photo.png", b"PNGDATA");
        let text = String::from_utf8_lossy(&body);

        assert!(text.starts_with("--b0undary\r\n"));
        assert!(text.contains("name=\"slot_id\"\r\n\r\n3\r\n"));
        assert!(text.contains("filename=\"photo.png\""));
        assert!(text.contains("PNGDATA"));
        assert!(text.ends_with("--b0undary--\r\n"));
    }
}
