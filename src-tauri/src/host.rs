//! Seams to the native shell: process, webview window, and persisted settings.

use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::{network_policy::NetworkSession, ReadyNotifier, ReadySignal, WindowConfig};

pub type CookieAuthCallback = Box<dyn FnOnce() + Send>;
pub type WindowEventHandler = Box<dyn Fn(HostWindowEvent) + Send + Sync>;
pub type ContentMessageHandler = Box<dyn Fn(Value) + Send + Sync>;

/// Lifecycle notifications a native window reports to its subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostWindowEvent {
    /// The page finished loading, including after reloads and in-app navigation.
    LoadFinished,
    /// The user asked to close the window. Delivered synchronously, while
    /// `current_url` still answers.
    CloseRequested,
    /// The native window is gone.
    Closed,
}

pub trait HostWindow: Clone + Send + 'static {
    fn load_url(&self, url: &str) -> Result<(), String>;
    /// Destroys the native window.
    fn close(&self) -> Result<(), String>;
    /// Full URL of the page currently shown, if any.
    fn current_url(&self) -> Option<String>;
    /// Pushes a message to the content layer on `channel`.
    fn send(&self, channel: &str, payload: Value) -> Result<(), String>;
    fn session(&self) -> &dyn NetworkSession;
    fn on_window_event(&self, handler: WindowEventHandler);
    /// Subscribes to messages the content layer posts on `channel`.
    fn on_content_message(&self, channel: &str, handler: ContentMessageHandler);
}

pub trait DesktopHost {
    type Window: HostWindow;

    /// False when another process already owns the single-instance lock.
    fn is_single_instance(&self) -> bool;
    fn is_ready(&self) -> bool;
    /// Resolves once the host process reports ready.
    fn when_ready(&self) -> ReadySignal;
    /// Starts the local server that serves the app bundle.
    fn start_server(&self, on_ready: ReadyNotifier);
    fn resource_dir(&self) -> PathBuf {
        crate::runtime_paths::default_resource_dir().unwrap_or_else(|| PathBuf::from("."))
    }
    fn build_window(&self, config: &WindowConfig) -> Result<Self::Window, String>;
    /// Runs the cookie handshake for `window` and calls `on_complete` when done.
    fn cookie_auth(&self, window: &Self::Window, on_complete: CookieAuthCallback);
    /// `None` unregisters the main window.
    fn set_main_window(&self, window: Option<&Self::Window>);
    fn system_details(&self) -> Value;
}

pub trait SettingsStore {
    fn get_setting(&self, key: &str) -> Option<Value>;
    fn save_setting(&mut self, key: &str, value: Value) -> Result<(), String>;
    fn is_debug(&self) -> bool;

    /// `defaults` with the listed `fields` replaced by the values stored under `namespace`.
    fn get_setting_group(&self, defaults: &Value, namespace: &str, fields: &[&str]) -> Value {
        let mut merged = match defaults {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };
        if let Some(Value::Object(stored)) = self.get_setting(namespace) {
            for field in fields {
                if let Some(value) = stored.get(*field) {
                    merged.insert((*field).to_string(), value.clone());
                }
            }
        }
        Value::Object(merged)
    }
}
