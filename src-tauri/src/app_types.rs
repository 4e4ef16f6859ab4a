use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{
    DEFAULT_PRELOAD_SCRIPT, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_MIN_HEIGHT,
    DEFAULT_WINDOW_MIN_WIDTH, DEFAULT_WINDOW_TITLE, DEFAULT_WINDOW_WIDTH,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebPreferences {
    /// Relative to the resource dir in defaults; absolute once the window is built.
    pub preload: PathBuf,
    pub node_integration: bool,
    pub context_isolation: bool,
}

impl Default for WebPreferences {
    fn default() -> Self {
        Self {
            preload: PathBuf::from(DEFAULT_PRELOAD_SCRIPT),
            node_integration: false,
            context_isolation: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WindowConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
    pub title: String,
    pub show: bool,
    pub web_preferences: WebPreferences,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            min_width: DEFAULT_WINDOW_MIN_WIDTH,
            min_height: DEFAULT_WINDOW_MIN_HEIGHT,
            title: DEFAULT_WINDOW_TITLE.to_string(),
            show: true,
            web_preferences: WebPreferences::default(),
        }
    }
}

/// Payload of the `app-config` message pushed after every finished load.
#[derive(Debug, Clone, Serialize)]
pub struct AppConfigMessage<'a> {
    pub config: &'a crate::AppConfig,
    pub debug: bool,
    pub system: serde_json::Value,
}
