// Settings data models
use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub backend_url: String,
    #[serde(default = "default_reset_on_launch")]
    pub reset_backend_on_launch: bool,
    #[serde(default)]
    pub last_scenario: Option<String>,
}

fn default_reset_on_launch() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: String::from(DEFAULT_BACKEND_URL),
            reset_backend_on_launch: true,
            last_scenario: None,
        }
    }
}
