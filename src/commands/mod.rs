// Tauri command handlers
pub mod arrays;
pub mod beam;
pub mod mixer;
pub mod regions;
pub mod settings;

use crate::backend::BackendClient;

/// Builds a client for the currently configured backend
pub fn backend_client() -> Result<BackendClient, String> {
    let settings = settings::get_settings()?;
    Ok(BackendClient::new(settings.backend_url))
}
