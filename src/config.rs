use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) compact: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) locale: Option<String>,
    /// Where the settings snapshot lives
    #[serde(default)]
    pub(crate) settings_path: Option<PathBuf>,
    /// Directory holding `models.json` and `interactions.json`
    #[serde(default)]
    pub(crate) catalog_dir: Option<PathBuf>,
}

/// Outcome of the config lookup, reported once logging is up
#[derive(Debug, Default)]
pub(crate) struct LoadedConfig {
    pub(crate) config: Config,
    pub(crate) source: Option<PathBuf>,
    pub(crate) failures: Vec<(PathBuf, String)>,
}

impl Config {
    pub(crate) fn load() -> LoadedConfig {
        let mut loaded = LoadedConfig::default();

        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        loaded.config = config;
                        loaded.source = Some(path);
                        return loaded;
                    }
                    Err(e) => loaded.failures.push((path, e.to_string())),
                }
            }
        }

        loaded
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/aicost/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("aicost").join("config.toml"));
        }

        // 2. Platform config dir (macOS Application Support)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("aicost").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.aicost.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".aicost.toml"));
        }

        paths
    }
}

impl LoadedConfig {
    pub(crate) fn report(&self) {
        for (path, error) in &self.failures {
            tracing::warn!(path = %path.display(), %error, "failed to parse config file");
        }
        if let Some(path) = &self.source {
            tracing::info!(path = %path.display(), "loaded config");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths() {
        let paths = Config::get_config_paths();
        assert!(paths.iter().all(|p| p.to_string_lossy().contains("aicost")));
    }

    #[test]
    fn parses_all_keys() {
        let config: Config = toml::from_str(
            r#"
compact = true
no_color = true
color = "never"
locale = "de"
settings_path = "/tmp/aicost.json"
catalog_dir = "/etc/aicost"
"#,
        )
        .unwrap();
        assert!(config.compact);
        assert!(config.no_color);
        assert!(!config.debug);
        assert_eq!(config.color, Some(ConfigColorMode::Never));
        assert_eq!(config.locale.as_deref(), Some("de"));
        assert_eq!(config.settings_path, Some(PathBuf::from("/tmp/aicost.json")));
        assert_eq!(config.catalog_dir, Some(PathBuf::from("/etc/aicost")));
    }

    #[test]
    fn empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.compact);
        assert!(config.color.is_none());
        assert!(config.settings_path.is_none());
    }

    #[test]
    fn rejects_unknown_color_mode() {
        assert!(toml::from_str::<Config>(r#"color = "rainbow""#).is_err());
    }
}
