//! Usage: JSON settings file under the app data dir.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub(crate) const SCHEMA_VERSION: u32 = 1;
pub(crate) const DEFAULT_GATEWAY_PORT: u16 = 8655;
pub(crate) const MAX_GATEWAY_PORT: u16 = 8670;

const SETTINGS_FILE_NAME: &str = "settings.json";
const DEFAULT_LOG_RETENTION_DAYS: u32 = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppSettings {
    pub schema_version: u32,
    pub preferred_port: u16,
    pub log_retention_days: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            preferred_port: DEFAULT_GATEWAY_PORT,
            log_retention_days: DEFAULT_LOG_RETENTION_DAYS,
        }
    }
}

pub(crate) fn read(data_dir: &Path) -> Result<AppSettings, String> {
    let path = data_dir.join(SETTINGS_FILE_NAME);
    if !path.exists() {
        return Ok(AppSettings::default());
    }

    let text =
        std::fs::read_to_string(&path).map_err(|e| format!("failed to read settings: {e}"))?;
    let mut settings: AppSettings =
        serde_json::from_str(&text).map_err(|e| format!("failed to parse settings: {e}"))?;
    settings.schema_version = SCHEMA_VERSION;

    Ok(settings)
}

pub(crate) fn write(data_dir: &Path, settings: &AppSettings) -> Result<AppSettings, String> {
    let path = data_dir.join(SETTINGS_FILE_NAME);
    let text = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("failed to serialize settings: {e}"))?;
    std::fs::write(&path, text).map_err(|e| format!("failed to write settings: {e}"))?;
    Ok(settings.clone())
}

pub(crate) fn log_retention_days_fail_open(data_dir: &Path) -> u32 {
    read(data_dir)
        .map(|s| s.log_retention_days)
        .unwrap_or(DEFAULT_LOG_RETENTION_DAYS)
        .max(1)
}
