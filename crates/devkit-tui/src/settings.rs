use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    Context,
    Result,
};
use devkit_shortcuts::DispatcherConfig;
use serde::{
    Deserialize,
    Serialize,
};

pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Contents of the settings file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub shortcuts: DispatcherConfig,
    /// Pattern id to chord, e.g. `"search-focus": "Mod+P"`.
    pub bindings: BTreeMap<String, String>,
}

impl Settings {
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to determine config directory")?;
        Ok(config_dir.join("devkit").join(SETTINGS_FILE_NAME))
    }

    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Ok(path) => Self::load(&path),
                Err(e) => {
                    log::warn!("{e:#}; using default settings");
                    Ok(Self::default())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load(&temp_dir.path().join("missing.json")).unwrap();

        assert_eq!(settings, Settings::default());
        assert!(settings.shortcuts.enabled);
    }

    #[test]
    fn test_load_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(SETTINGS_FILE_NAME);
        fs::write(
            &path,
            r#"{
                "shortcuts": { "prevent_default": false, "debug": true },
                "bindings": { "search-focus": "Mod+P" }
            }"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();

        assert!(settings.shortcuts.enabled);
        assert!(!settings.shortcuts.prevent_default);
        assert!(settings.shortcuts.debug);
        assert_eq!(
            settings.bindings.get("search-focus").map(String::as_str),
            Some("Mod+P")
        );
    }

    #[test]
    fn test_malformed_settings_report_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        let err = Settings::load(&path).unwrap_err();

        assert!(format!("{err:#}").contains("Failed to parse settings"));
    }

    #[test]
    fn test_load_or_default_with_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, r#"{ "shortcuts": { "enabled": false } }"#).unwrap();

        let settings = Settings::load_or_default(Some(&path)).unwrap();

        assert!(!settings.shortcuts.enabled);
        assert!(settings.bindings.is_empty());
    }
}
