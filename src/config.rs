//! Controller configuration: storage key, DOM names, and media query.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages embedding the controller share stylesheet rules keyed off the root
//! attribute, so the defaults here are the page contract. Overrides arrive as
//! a JSON object (camelCase keys, every field optional).

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_STORAGE_KEY: &str = "clp.theme";
pub const DEFAULT_ATTRIBUTE: &str = "data-theme";
pub const DEFAULT_TOGGLE_ID: &str = "themeToggle";
pub const DEFAULT_MEDIA_QUERY: &str = "(prefers-color-scheme: dark)";

/// Error returned by [`ThemeConfig::from_json`] and [`ThemeConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input was not a JSON object matching the config shape.
    #[error("failed to parse theme config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A required name was set to the empty string.
    #[error("theme config field `{0}` must not be empty")]
    Empty(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemeConfig {
    /// `localStorage` key holding the persisted preference.
    pub storage_key: String,
    /// Attribute set on the document root element.
    pub attribute: String,
    /// Element id of the optional toggle control.
    pub toggle_id: String,
    /// Media query reporting the OS dark-mode preference.
    pub media_query: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            attribute: DEFAULT_ATTRIBUTE.to_owned(),
            toggle_id: DEFAULT_TOGGLE_ID.to_owned(),
            media_query: DEFAULT_MEDIA_QUERY.to_owned(),
        }
    }
}

impl ThemeConfig {
    /// Parse and validate a JSON override object.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty names; the host APIs would accept them but never match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("storageKey", &self.storage_key),
            ("attribute", &self.attribute),
            ("toggleId", &self.toggle_id),
            ("mediaQuery", &self.media_query),
        ];
        match fields.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(ConfigError::Empty(name)),
            None => Ok(()),
        }
    }
}
