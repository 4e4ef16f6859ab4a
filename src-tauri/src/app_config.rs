use serde::Serialize;
use std::env;
use url::Url;

use crate::{
    WindowConfig, DEFAULT_SERVER_PORT, DEFAULT_SERVER_URL, SERVER_PORT_ENV, SERVER_URL_ENV,
};

/// Static shell configuration. Sent verbatim to the content layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub server_url: String,
    pub server_port: u16,
    pub main_window: WindowConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            main_window: WindowConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        let server_url = normalize_server_url(
            lookup(SERVER_URL_ENV).as_deref().unwrap_or(DEFAULT_SERVER_URL),
            DEFAULT_SERVER_URL,
        );
        let server_port = lookup(SERVER_PORT_ENV)
            .and_then(|value| value.trim().parse::<u16>().ok())
            .filter(|port| *port != 0)
            .unwrap_or(DEFAULT_SERVER_PORT);
        Self {
            server_url,
            server_port,
            main_window: WindowConfig::default(),
        }
    }

    /// Base URL the main window loads, e.g. `http://127.0.0.1:41050`.
    pub fn app_url(&self) -> String {
        format!("{}:{}", self.server_url, self.server_port)
    }

    /// Prefix every URL served by the app itself starts with.
    pub fn app_origin_prefix(&self) -> String {
        format!("{}/", self.app_url())
    }
}

/// Keeps scheme and host only. The port is configured separately.
pub fn normalize_server_url(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }

    match Url::parse(trimmed) {
        Ok(parsed) if parsed.has_host() && matches!(parsed.scheme(), "http" | "https") => {
            let host = parsed.host_str().unwrap_or_default();
            format!("{}://{}", parsed.scheme(), host)
        }
        _ => fallback.to_string(),
    }
}
