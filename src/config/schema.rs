use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::api::DEFAULT_BASE_URL;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CometConfig {
    pub version: String,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    /// File holding the API key; read and trimmed at startup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_file: Option<PathBuf>,
    /// Inline key; takes precedence over `key_file`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: String,
    pub sidebar_collapsed: bool,
    pub forum_post_count: u32,
    pub auto_save: bool,
    pub features: BTreeMap<String, bool>,
}

impl Default for CometConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            api: ApiSettings::default(),
            settings: Settings::default(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            key_file: None,
            api_key: None,
            timeout_seconds: 30,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            sidebar_collapsed: false,
            forum_post_count: 10,
            auto_save: true,
            features: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Feature toggles default to on when absent.
    pub fn feature(&self, name: &str) -> bool {
        self.features.get(name).copied().unwrap_or(true)
    }
}
