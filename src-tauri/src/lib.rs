//! Bootstrap and runtime policy for the WordPress.com desktop shell.
//!
//! The native webview runtime stays behind [`DesktopHost`], [`HostWindow`] and
//! [`network_policy::NetworkSession`]; this crate decides what to load, when, and under which
//! network rules.

use std::sync::Mutex;

mod app_config;
mod app_constants;
mod app_types;
pub mod host;
pub mod location_policy;
pub mod logging;
pub mod main_window;
pub mod network_policy;
pub mod readiness;
pub mod runtime_paths;
pub mod settings_store;
pub mod startup_mode;
pub mod startup_task;
pub mod window_settings;
pub mod window_state;

#[cfg(test)]
mod test_support;

pub use app_config::{normalize_server_url, AppConfig};
pub use app_constants::*;
pub use app_types::{AppConfigMessage, WebPreferences, WindowConfig};
pub use host::{DesktopHost, HostWindow, HostWindowEvent, SettingsStore};
pub use main_window::{MainWindowController, SharedMainWindow};
pub use readiness::{ready_channel, ReadyNotifier, ReadySignal};
pub use startup_mode::BootOptions;
pub use startup_task::{boot, boot_from_env, BootLogs, BootOutcome};

static DESKTOP_LOG_WRITE_LOCK: Mutex<()> = Mutex::new(());

pub fn append_desktop_log(message: &str) {
    append_desktop_log_with_category(logging::DesktopLogCategory::Runtime, message);
}

pub fn append_startup_log(message: &str) {
    append_desktop_log_with_category(logging::DesktopLogCategory::Startup, message);
}

fn append_desktop_log_with_category(category: logging::DesktopLogCategory, message: &str) {
    logging::append_desktop_log(
        category,
        message,
        runtime_paths::default_root_dir(),
        DESKTOP_LOG_FILE,
        DESKTOP_LOG_MAX_BYTES,
        LOG_BACKUP_COUNT,
        &DESKTOP_LOG_WRITE_LOCK,
    )
}
