use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    location_policy,
    network_policy::{self, NetworkPolicy},
    window_settings,
    window_state::{self, WindowEffect, WindowEvent, WindowPhase},
    AppConfig, AppConfigMessage, DesktopHost, HostWindow, HostWindowEvent, SettingsStore,
    APP_CONFIG_CHANNEL, CONTEXT_MENU_CHANNEL, COOKIE_AUTH_COMPLETE_CHANNEL,
    LAST_LOCATION_SETTING, WINDOW_SETTINGS_FIELDS, WINDOW_SETTINGS_GROUP,
};

/// Owns the single main window of the process and drives its lifecycle.
pub struct MainWindowController<H: DesktopHost, S: SettingsStore> {
    host: Arc<H>,
    settings: S,
    config: AppConfig,
    window: Option<H::Window>,
    phase: WindowPhase,
    app_url: String,
    log: fn(&str),
}

/// The controller as shared with the window's event subscriptions.
pub type SharedMainWindow<H, S> = Arc<Mutex<MainWindowController<H, S>>>;

/// Locks the controller. A panic in an earlier handler does not stop later events.
pub fn lock<H: DesktopHost, S: SettingsStore>(
    shared: &SharedMainWindow<H, S>,
) -> MutexGuard<'_, MainWindowController<H, S>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Base app URL plus the restored location, when the persisted one may be restored.
pub fn resolve_app_url(config: &AppConfig, last_location: Option<Value>) -> String {
    let mut app_url = config.app_url();
    if let Some(path) = location_policy::startup_path(last_location) {
        app_url.push_str(&path);
    }
    app_url
}

impl<H, S> MainWindowController<H, S>
where
    H: DesktopHost + Send + Sync + 'static,
    S: SettingsStore + Send + 'static,
{
    /// Builds the main window, secures its session and subscribes to its events before the
    /// first navigation. The host is only told about the window once the load has started.
    pub fn create(
        host: H,
        settings: S,
        config: AppConfig,
        log: fn(&str),
    ) -> Result<SharedMainWindow<H, S>, String> {
        let preload = window_settings::resolve_preload_path(
            &host.resource_dir(),
            &config.main_window.web_preferences.preload,
        )?;
        let app_url = resolve_app_url(&config, settings.get_setting(LAST_LOCATION_SETTING));
        log(&format!("loading app ({app_url}) in main window"));

        let defaults = serde_json::to_value(&config.main_window)
            .map_err(|error| format!("Failed to serialize main window defaults: {error}"))?;
        let group =
            settings.get_setting_group(&defaults, WINDOW_SETTINGS_GROUP, &WINDOW_SETTINGS_FIELDS);
        let mut window_config = window_settings::merge_window_settings(&config.main_window, &group);
        window_config.web_preferences.preload = preload;

        let host = Arc::new(host);
        let window = host.build_window(&window_config)?;

        network_policy::install(window.session(), NetworkPolicy::new(&config), log);

        let controller = Arc::new(Mutex::new(Self {
            host: Arc::clone(&host),
            settings,
            config,
            window: Some(window.clone()),
            phase: WindowPhase::Uninitialized,
            app_url: app_url.clone(),
            log,
        }));
        subscribe(&window, &controller);

        let auth_controller = Arc::downgrade(&controller);
        host.cookie_auth(
            &window,
            Box::new(move || {
                if let Some(controller) = auth_controller.upgrade() {
                    lock(&controller).send(COOKIE_AUTH_COMPLETE_CHANNEL, Value::Null);
                }
            }),
        );

        lock(&controller).handle_event(WindowEvent::Constructed);

        if let Err(error) = window.load_url(&app_url) {
            if let Err(close_error) = window.close() {
                log(&format!("failed to close main window after load failure: {close_error}"));
            }
            return Err(format!("Failed to load {app_url} in main window: {error}"));
        }
        host.set_main_window(Some(&window));
        Ok(controller)
    }
}

/// Routes the window's lifecycle events and the context-menu bridge into `controller`.
/// Subscriptions hold a weak reference, so they go quiet once the controller is dropped.
fn subscribe<H, S>(window: &H::Window, controller: &SharedMainWindow<H, S>)
where
    H: DesktopHost + Send + Sync + 'static,
    S: SettingsStore + Send + 'static,
{
    let events = Arc::downgrade(controller);
    window.on_window_event(Box::new(move |event: HostWindowEvent| {
        let Some(controller) = events.upgrade() else {
            return;
        };
        let mut controller = lock(&controller);
        match event {
            HostWindowEvent::LoadFinished => controller.handle_event(WindowEvent::LoadFinished),
            HostWindowEvent::CloseRequested => controller.request_close(),
            HostWindowEvent::Closed => controller.handle_event(WindowEvent::Closed),
        }
    }));

    let messages = Arc::downgrade(controller);
    window.on_content_message(
        CONTEXT_MENU_CHANNEL,
        Box::new(move |payload: Value| {
            if let Some(controller) = messages.upgrade() {
                lock(&controller).handle_event(WindowEvent::ContextMenuRequested(payload));
            }
        }),
    );
}

impl<H: DesktopHost, S: SettingsStore> MainWindowController<H, S> {
    pub fn window(&self) -> Option<&H::Window> {
        self.window.as_ref()
    }

    pub fn phase(&self) -> WindowPhase {
        self.phase
    }

    pub fn app_url(&self) -> &str {
        &self.app_url
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    /// Reads the window's current URL and handles the close synchronously, so the last
    /// location is written before the host destroys the window.
    pub fn request_close(&mut self) {
        let current_url = self.window.as_ref().and_then(HostWindow::current_url);
        self.handle_event(WindowEvent::CloseRequested { current_url });
    }

    pub fn handle_event(&mut self, event: WindowEvent) {
        let step = window_state::transition(self.phase, event);
        self.phase = step.phase;
        for effect in step.effects {
            self.apply(effect);
        }
    }

    fn send(&self, channel: &str, payload: Value) {
        let Some(window) = self.window.as_ref() else {
            (self.log)(&format!("dropping {channel} message: main window is gone"));
            return;
        };
        if let Err(error) = window.send(channel, payload) {
            (self.log)(&format!("failed to send {channel} to main window: {error}"));
        }
    }

    fn apply(&mut self, effect: WindowEffect) {
        match effect {
            WindowEffect::PushAppConfig => {
                let message = AppConfigMessage {
                    config: &self.config,
                    debug: self.settings.is_debug(),
                    system: self.host.system_details(),
                };
                match serde_json::to_value(&message) {
                    Ok(payload) => self.send(APP_CONFIG_CHANNEL, payload),
                    Err(error) => {
                        (self.log)(&format!("failed to serialize app config: {error}"))
                    }
                }
            }
            WindowEffect::ForwardContextMenu(payload) => self.send(CONTEXT_MENU_CHANNEL, payload),
            WindowEffect::PersistLastLocation(path) => {
                if let Err(error) = self
                    .settings
                    .save_setting(LAST_LOCATION_SETTING, Value::String(path))
                {
                    (self.log)(&format!("failed to save last location: {error}"));
                }
            }
            WindowEffect::ReleaseWindow => {
                self.window = None;
                self.host.set_main_window(None);
                (self.log)("main window closed");
            }
        }
    }
}
