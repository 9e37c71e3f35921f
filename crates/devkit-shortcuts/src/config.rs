use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};

use crate::models::ShortcutResult;

pub const DEFAULT_ENABLED: bool = true;

pub const DEFAULT_PREVENT_DEFAULT: bool = true;

pub const DEFAULT_DEBUG: bool = false;

pub const DEFAULT_WARN_ON_DUPLICATES: bool = true;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    pub enabled: bool,
    pub prevent_default: bool,
    pub debug: bool,
    pub warn_on_duplicates: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_ENABLED,
            prevent_default: DEFAULT_PREVENT_DEFAULT,
            debug: DEFAULT_DEBUG,
            warn_on_duplicates: DEFAULT_WARN_ON_DUPLICATES,
        }
    }
}

impl DispatcherConfig {
    pub fn builder() -> DispatcherConfigBuilder {
        DispatcherConfigBuilder::default()
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> ShortcutResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> ShortcutResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

#[derive(Debug, Default)]
pub struct DispatcherConfigBuilder {
    enabled: Option<bool>,
    prevent_default: Option<bool>,
    debug: Option<bool>,
    warn_on_duplicates: Option<bool>,
}

impl DispatcherConfigBuilder {
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn prevent_default(mut self, prevent_default: bool) -> Self {
        self.prevent_default = Some(prevent_default);
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    pub fn warn_on_duplicates(mut self, warn: bool) -> Self {
        self.warn_on_duplicates = Some(warn);
        self
    }

    pub fn build(self) -> DispatcherConfig {
        DispatcherConfig {
            enabled: self.enabled.unwrap_or(DEFAULT_ENABLED),
            prevent_default: self.prevent_default.unwrap_or(DEFAULT_PREVENT_DEFAULT),
            debug: self.debug.unwrap_or(DEFAULT_DEBUG),
            warn_on_duplicates: self
                .warn_on_duplicates
                .unwrap_or(DEFAULT_WARN_ON_DUPLICATES),
        }
    }
}
