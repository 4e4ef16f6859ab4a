use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1";
pub const DEFAULT_SERVER_PORT: u16 = 41050;
pub const SERVER_URL_ENV: &str = "WP_DESKTOP_SERVER_URL";
pub const SERVER_PORT_ENV: &str = "WP_DESKTOP_SERVER_PORT";

pub const DEFAULT_WINDOW_TITLE: &str = "WordPress.com";
pub const DEFAULT_WINDOW_WIDTH: u32 = 1024;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 768;
pub const DEFAULT_WINDOW_MIN_WIDTH: u32 = 200;
pub const DEFAULT_WINDOW_MIN_HEIGHT: u32 = 150;
pub const DEFAULT_PRELOAD_SCRIPT: &str = "public_desktop/preload.js";

pub const WINDOW_SETTINGS_GROUP: &str = "window";
pub const WINDOW_SETTINGS_FIELDS: [&str; 4] = ["x", "y", "width", "height"];
pub const LAST_LOCATION_SETTING: &str = "last-location";
pub const DEBUG_SETTING: &str = "debug";
pub const SETTINGS_FILE: &str = "settings.json";

pub const APP_CONFIG_CHANNEL: &str = "app-config";
pub const COOKIE_AUTH_COMPLETE_CHANNEL: &str = "cookie-auth-complete";
pub const CONTEXT_MENU_CHANNEL: &str = "mce-contextmenu";

pub const DESKTOP_ENV: &str = "WP_DESKTOP_ENV";
pub const NODE_ENV: &str = "NODE_ENV";
pub const DEVELOPMENT_MODE: &str = "development";
pub const DEBUG_ENV: &str = "WP_DESKTOP_DEBUG";
pub const ROOT_DIR_ENV: &str = "WP_DESKTOP_ROOT";
pub const RESOURCE_DIR_ENV: &str = "WP_DESKTOP_RESOURCE_DIR";
pub const HOST_READY_TIMEOUT_ENV: &str = "WP_DESKTOP_HOST_READY_TIMEOUT_MS";
pub const SERVER_READY_TIMEOUT_ENV: &str = "WP_DESKTOP_SERVER_READY_TIMEOUT_MS";
pub const READY_TIMEOUT_MIN: Duration = Duration::from_millis(100);
pub const READY_TIMEOUT_MAX: Duration = Duration::from_secs(10 * 60);

pub const DESKTOP_LOG_FILE: &str = "desktop.log";
pub const DESKTOP_LOG_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub const LOG_BACKUP_COUNT: usize = 5;
