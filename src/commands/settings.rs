// Settings command handlers
use crate::file_manager::{read_json_file_or_default, write_json_file};
use crate::models::Settings;
use crate::utils::get_settings_json_path;
use log::debug;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsParams {
    pub backend_url: Option<String>,
    pub reset_backend_on_launch: Option<bool>,
}

/// Get current settings from the JSON file
#[tauri::command]
pub fn get_settings() -> Result<Settings, String> {
    read_json_file_or_default(&get_settings_json_path())
}

/// Update settings with partial update support
#[tauri::command]
pub fn update_settings(settings: UpdateSettingsParams) -> Result<Settings, String> {
    let path = get_settings_json_path();
    let mut current: Settings = read_json_file_or_default(&path)?;

    if let Some(backend_url) = settings.backend_url {
        current.backend_url = validate_backend_url(&backend_url)?;
    }
    if let Some(reset_backend_on_launch) = settings.reset_backend_on_launch {
        current.reset_backend_on_launch = reset_backend_on_launch;
    }

    write_json_file(&path, &current)?;
    debug!("Updated settings: {:?}", current);

    Ok(current)
}

fn validate_backend_url(raw: &str) -> Result<String, String> {
    let parsed = Url::parse(raw).map_err(|e| format!("Invalid backend URL: {}", e))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!(
            "Backend URL must be http or https, got {}",
            parsed.scheme()
        ));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_url_must_be_http() {
        assert!(validate_backend_url("ftp://host").is_err());
        assert!(validate_backend_url("not a url").is_err());
        assert_eq!(
            validate_backend_url("http://localhost:5000/").unwrap(),
            "http://localhost:5000"
        );
    }
}
