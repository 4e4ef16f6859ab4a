use crate::{
    main_window,
    readiness::{ready_channel, wait_until_ready},
    runtime_paths,
    settings_store::JsonFileSettings,
    AppConfig, BootOptions, DesktopHost, MainWindowController, SettingsStore, SharedMainWindow,
};

pub enum BootOutcome<H: DesktopHost, S: SettingsStore> {
    /// Another process owns the single-instance lock; nothing was started.
    SecondaryInstance,
    Started(SharedMainWindow<H, S>),
}

/// Log sinks for the boot steps and for the window once it is running.
#[derive(Clone, Copy)]
pub struct BootLogs {
    pub startup: fn(&str),
    pub runtime: fn(&str),
}

impl BootLogs {
    /// The `startup` and `runtime` categories of the desktop log.
    pub fn desktop() -> Self {
        Self {
            startup: crate::append_startup_log,
            runtime: crate::append_desktop_log,
        }
    }
}

/// Brings up the main window: single-instance check, host readiness, local server (outside
/// development mode), then the window. `on_ready` receives the new window.
pub async fn boot<H, S, R>(
    host: H,
    settings: S,
    config: AppConfig,
    options: &BootOptions,
    on_ready: R,
    logs: BootLogs,
) -> Result<BootOutcome<H, S>, String>
where
    H: DesktopHost + Send + Sync + 'static,
    S: SettingsStore + Send + 'static,
    R: FnOnce(&H::Window),
{
    let log = logs.startup;
    log("checking for other instances");
    if !host.is_single_instance() {
        log("another instance is running, not starting");
        return Ok(BootOutcome::SecondaryInstance);
    }

    if !host.is_ready() {
        log("no other instances, waiting for app ready");
        wait_until_ready(host.when_ready(), "host process", options.host_ready_timeout).await?;
    }

    if options.development {
        log("skipping server initialization in development mode");
    } else {
        log("app is ready, starting server");
        let (notifier, signal) = ready_channel();
        host.start_server(notifier);
        wait_until_ready(signal, "local server", options.server_ready_timeout).await?;
    }

    let controller = MainWindowController::create(host, settings, config, logs.runtime)?;
    let window = main_window::lock(&controller).window().cloned();
    if let Some(window) = window {
        on_ready(&window);
    }
    Ok(BootOutcome::Started(controller))
}

/// [`boot`] with configuration, options and settings taken from the environment.
pub async fn boot_from_env<H, R>(
    host: H,
    on_ready: R,
) -> Result<BootOutcome<H, JsonFileSettings>, String>
where
    H: DesktopHost + Send + Sync + 'static,
    R: FnOnce(&H::Window),
{
    let root_dir = runtime_paths::default_root_dir()
        .ok_or_else(|| "Cannot resolve the desktop data directory.".to_string())?;
    crate::append_startup_log(&format!(
        "desktop log path: {}",
        crate::logging::resolve_desktop_log_path(Some(root_dir.clone()), crate::DESKTOP_LOG_FILE)
            .display()
    ));
    let settings = JsonFileSettings::open(&root_dir, crate::append_desktop_log);
    boot(
        host,
        settings,
        AppConfig::from_env(),
        &BootOptions::from_env(),
        on_ready,
        BootLogs::desktop(),
    )
    .await
}
