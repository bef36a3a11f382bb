use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::store::TripStore;
use crate::types::Config;

/// The logged-in user. Created on successful login, dropped on logout —
/// session state is this value's lifetime, nothing ambient.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
}

/// Application state managed by Tauri
pub struct AppState {
    pub config: Mutex<Option<Config>>,
    pub session: Mutex<Option<Session>>,
}

impl AppState {
    pub fn new() -> Self {
        let config = match load_config() {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("No usable config: {e}. Login and planning stay disabled until it exists.");
                None
            }
        };

        Self {
            config: Mutex::new(config),
            session: Mutex::new(None),
        }
    }

    /// Snapshot of the current config, if one loaded.
    pub fn config_snapshot(&self) -> Result<Option<Config>, String> {
        Ok(self.config.lock().map_err(|_| "Lock poisoned")?.clone())
    }

    /// The session's username, or a login-required error.
    pub fn require_user(&self) -> Result<String, String> {
        self.session
            .lock()
            .map_err(|_| "Lock poisoned".to_string())?
            .as_ref()
            .map(|s| s.username.clone())
            .ok_or_else(|| "Not logged in.".to_string())
    }

    /// Resolve the trip store from the current config.
    pub fn trip_store(&self) -> Result<TripStore, String> {
        let config = self.config_snapshot()?;
        TripStore::from_config(config.as_ref())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the canonical config file path (~/.roadtrip/config.json)
pub fn config_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or("Could not find home directory")?;
    Ok(home.join(".roadtrip").join("config.json"))
}

/// Load configuration from ~/.roadtrip/config.json
pub fn load_config() -> Result<Config, String> {
    let path = config_path()?;
    if !path.exists() {
        return Err(format!(
            "Config file not found at {}. Create it with a \"users\" map and an \"openaiApiKey\".",
            path.display()
        ));
    }

    let content =
        fs::read_to_string(&path).map_err(|e| format!("Failed to read config: {}", e))?;
    serde_json::from_str(&content).map_err(|e| format!("Failed to parse config: {}", e))
}

/// Reload configuration from disk
pub fn reload_config(state: &AppState) -> Result<Config, String> {
    let config = load_config()?;
    let mut guard = state.config.lock().map_err(|_| "Lock poisoned")?;
    *guard = Some(config.clone());
    Ok(config)
}
