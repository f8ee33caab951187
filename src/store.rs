//! Settings snapshot persistence
//!
//! The snapshot is stored verbatim as JSON. A corrupt file never stops the
//! tool: it is logged and replaced by defaults on the next save.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::consts::SETTINGS_ENV;
use crate::core::{GlobalSettings, default_settings, parse_snapshot};
use crate::error::AppError;

#[derive(Debug, Clone)]
pub(crate) struct SettingsStore {
    path: PathBuf,
}

fn default_path() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".config").join("aicost").join("settings.json"),
        None => PathBuf::from(".aicost-settings.json"),
    }
}

impl SettingsStore {
    pub(crate) fn new(path: PathBuf) -> Self {
        SettingsStore { path }
    }

    /// Pick the snapshot path: CLI flag, then environment, then config, then default
    pub(crate) fn locate(explicit: Option<&Path>, configured: Option<&Path>) -> Self {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(SETTINGS_ENV).map(PathBuf::from))
            .or_else(|| configured.map(Path::to_path_buf))
            .unwrap_or_else(default_path);
        Self::new(path)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Load and resolve the snapshot, falling back to defaults when absent or corrupt
    pub(crate) fn load(&self, catalog: &Catalog) -> GlobalSettings {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no saved settings, using defaults");
            return default_settings(catalog);
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read saved settings, using defaults");
                return default_settings(catalog);
            }
        };

        match parse_snapshot(&content, catalog) {
            Ok(settings) => {
                tracing::debug!(path = %self.path.display(), "loaded saved settings");
                settings
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding malformed saved settings");
                default_settings(catalog)
            }
        }
    }

    pub(crate) fn save(&self, settings: &GlobalSettings) -> Result<(), AppError> {
        let io_err = |source| AppError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json).map_err(io_err)?;
        tracing::debug!(path = %self.path.display(), "saved settings");
        Ok(())
    }
}
