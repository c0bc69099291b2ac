use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{Result, WebCheckError};

/// The on-disk credential store. One key, no expiry, no encryption beyond
/// the file permissions of the host.
#[derive(Serialize, Deserialize, Default)]
pub struct PersistentSettings {
    pub gemini_api_key: Option<String>,
}

pub fn load_settings(path: &Path) -> PersistentSettings {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistentSettings::default(),
    }
}

pub fn save_settings(path: &Path, settings: &PersistentSettings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| WebCheckError::Settings(format!("Failed to serialize settings: {}", e)))?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json).map_err(|e| {
        warn!("Failed to save settings to {:?}: {}", path, e);
        WebCheckError::Io(e)
    })
}

/// Stored key, if any. Blank values count as unset.
pub fn get_api_key(path: &Path) -> Option<String> {
    load_settings(path)
        .gemini_api_key
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

/// Trim and persist a key, returning the stored value.
pub fn save_api_key(path: &Path, key: &str) -> Result<String> {
    let key = key.trim();
    if key.is_empty() {
        return Err(WebCheckError::validation("Please enter an API key."));
    }

    let mut settings = load_settings(path);
    settings.gemini_api_key = Some(key.to_string());
    save_settings(path, &settings)?;
    info!("Saved API key to {:?}", path);
    Ok(key.to_string())
}
