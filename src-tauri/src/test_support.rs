//! In-memory collaborators for exercising the controller and boot sequence.

use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crate::{
    host::{ContentMessageHandler, CookieAuthCallback, HostWindowEvent, WindowEventHandler},
    network_policy::{
        NetworkSession, RequestDecision, RequestDetails, RequestHandler, ResponseDecision,
        ResponseDetails, ResponseHandler,
    },
    ready_channel, DesktopHost, HostWindow, ReadyNotifier, ReadySignal, SettingsStore,
    WindowConfig,
};

pub(crate) fn quiet_log(_message: &str) {}

/// Names of collaborator calls in the order they happened, shared by a host and its windows.
pub(crate) type CallOrder = Arc<Mutex<Vec<&'static str>>>;

fn record(order: &CallOrder, call: &'static str) {
    order.lock().expect("call order").push(call);
}

#[derive(Default)]
pub(crate) struct FakeSession {
    order: CallOrder,
    request_handlers: Mutex<Vec<RequestHandler>>,
    response_handlers: Mutex<Vec<ResponseHandler>>,
}

impl FakeSession {
    pub(crate) fn request_handler_count(&self) -> usize {
        self.request_handlers.lock().expect("handlers").len()
    }

    pub(crate) fn response_handler_count(&self) -> usize {
        self.response_handlers.lock().expect("handlers").len()
    }

    /// Runs every registered request handler and collects each completion.
    pub(crate) fn dispatch_request(&self, details: RequestDetails) -> Vec<RequestDecision> {
        let decisions = Arc::new(Mutex::new(Vec::new()));
        for handler in self.request_handlers.lock().expect("handlers").iter() {
            let sink = Arc::clone(&decisions);
            handler(
                details.clone(),
                Box::new(move |decision: RequestDecision| {
                    sink.lock().expect("decisions").push(decision)
                }),
            );
        }
        let collected = decisions.lock().expect("decisions").clone();
        collected
    }

    pub(crate) fn dispatch_response(&self, details: ResponseDetails) -> Vec<ResponseDecision> {
        let decisions = Arc::new(Mutex::new(Vec::new()));
        for handler in self.response_handlers.lock().expect("handlers").iter() {
            let sink = Arc::clone(&decisions);
            handler(
                details.clone(),
                Box::new(move |decision: ResponseDecision| {
                    sink.lock().expect("decisions").push(decision)
                }),
            );
        }
        let collected = decisions.lock().expect("decisions").clone();
        collected
    }
}

impl NetworkSession for FakeSession {
    fn on_before_request(&self, handler: RequestHandler) {
        record(&self.order, "on_before_request");
        self.request_handlers.lock().expect("handlers").push(handler);
    }

    fn on_headers_received(&self, handler: ResponseHandler) {
        record(&self.order, "on_headers_received");
        self.response_handlers.lock().expect("handlers").push(handler);
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeWindow {
    pub(crate) session: Arc<FakeSession>,
    order: CallOrder,
    fail_load: bool,
    current_url: Arc<Mutex<Option<String>>>,
    loaded: Arc<Mutex<Vec<String>>>,
    sent: Arc<Mutex<Vec<(String, Value)>>>,
    closed: Arc<Mutex<bool>>,
    event_handlers: Arc<Mutex<Vec<WindowEventHandler>>>,
    message_handlers: Arc<Mutex<Vec<(String, ContentMessageHandler)>>>,
}

impl FakeWindow {
    fn recording(order: CallOrder, fail_load: bool) -> Self {
        Self {
            session: Arc::new(FakeSession {
                order: Arc::clone(&order),
                ..FakeSession::default()
            }),
            order,
            fail_load,
            ..Self::default()
        }
    }

    pub(crate) fn set_current_url(&self, url: &str) {
        *self.current_url.lock().expect("url") = Some(url.to_string());
    }

    pub(crate) fn loaded_urls(&self) -> Vec<String> {
        self.loaded.lock().expect("loaded").clone()
    }

    pub(crate) fn sent(&self) -> Vec<(String, Value)> {
        self.sent.lock().expect("sent").clone()
    }

    pub(crate) fn sent_channels(&self) -> Vec<String> {
        self.sent().into_iter().map(|(channel, _)| channel).collect()
    }

    pub(crate) fn is_closed(&self) -> bool {
        *self.closed.lock().expect("closed")
    }

    pub(crate) fn event_handler_count(&self) -> usize {
        self.event_handlers.lock().expect("handlers").len()
    }

    /// Delivers `event` to every subscriber, the way the native window would.
    pub(crate) fn fire(&self, event: HostWindowEvent) {
        for handler in self.event_handlers.lock().expect("handlers").iter() {
            handler(event);
        }
    }

    /// Posts `payload` from the content layer on `channel`.
    pub(crate) fn post_message(&self, channel: &str, payload: Value) {
        for (subscribed, handler) in self.message_handlers.lock().expect("handlers").iter() {
            if subscribed == channel {
                handler(payload.clone());
            }
        }
    }
}

impl HostWindow for FakeWindow {
    fn load_url(&self, url: &str) -> Result<(), String> {
        record(&self.order, "load_url");
        if self.fail_load {
            return Err("renderer crashed".to_string());
        }
        self.loaded.lock().expect("loaded").push(url.to_string());
        self.set_current_url(url);
        Ok(())
    }

    fn close(&self) -> Result<(), String> {
        *self.closed.lock().expect("closed") = true;
        Ok(())
    }

    fn current_url(&self) -> Option<String> {
        self.current_url.lock().expect("url").clone()
    }

    fn send(&self, channel: &str, payload: Value) -> Result<(), String> {
        self.sent
            .lock()
            .expect("sent")
            .push((channel.to_string(), payload));
        Ok(())
    }

    fn session(&self) -> &dyn NetworkSession {
        self.session.as_ref()
    }

    fn on_window_event(&self, handler: WindowEventHandler) {
        record(&self.order, "on_window_event");
        self.event_handlers.lock().expect("handlers").push(handler);
    }

    fn on_content_message(&self, channel: &str, handler: ContentMessageHandler) {
        record(&self.order, "on_content_message");
        self.message_handlers
            .lock()
            .expect("handlers")
            .push((channel.to_string(), handler));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Readiness {
    Immediate,
    Never,
}

#[derive(Default)]
pub(crate) struct HostCalls {
    ready_waits: usize,
    server_starts: usize,
    built: Vec<WindowConfig>,
    windows: Vec<FakeWindow>,
    cookie_auth: Vec<CookieAuthCallback>,
    cookie_auth_count: usize,
    main_window_registrations: Vec<bool>,
    parked_notifiers: Vec<ReadyNotifier>,
}

pub(crate) struct FakeHost {
    pub(crate) single_instance: bool,
    pub(crate) ready: bool,
    pub(crate) host_readiness: Readiness,
    pub(crate) server_readiness: Readiness,
    pub(crate) fail_window_build: bool,
    pub(crate) fail_load: bool,
    pub(crate) calls: Arc<Mutex<HostCalls>>,
    pub(crate) order: CallOrder,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            single_instance: true,
            ready: true,
            host_readiness: Readiness::Immediate,
            server_readiness: Readiness::Immediate,
            fail_window_build: false,
            fail_load: false,
            calls: Arc::new(Mutex::new(HostCalls::default())),
            order: CallOrder::default(),
        }
    }
}

impl FakeHost {
    fn calls(&self) -> std::sync::MutexGuard<'_, HostCalls> {
        self.calls.lock().expect("host calls")
    }

    fn signal(&self, readiness: Readiness) -> ReadySignal {
        let (notifier, signal) = ready_channel();
        match readiness {
            Readiness::Immediate => notifier.notify(),
            Readiness::Never => self.calls().parked_notifiers.push(notifier),
        }
        signal
    }

    /// Shares the call log so it survives the host being moved into a controller.
    pub(crate) fn recorder(&self) -> HostRecorder {
        HostRecorder {
            calls: Arc::clone(&self.calls),
            order: Arc::clone(&self.order),
        }
    }

    pub(crate) fn built_configs(&self) -> Vec<WindowConfig> {
        self.calls().built.clone()
    }

    pub(crate) fn cookie_auth_count(&self) -> usize {
        self.calls().cookie_auth_count
    }

    pub(crate) fn main_window_registrations(&self) -> Vec<bool> {
        self.calls().main_window_registrations.clone()
    }
}

pub(crate) struct HostRecorder {
    calls: Arc<Mutex<HostCalls>>,
    order: CallOrder,
}

impl HostRecorder {
    pub(crate) fn ready_waits(&self) -> usize {
        self.calls.lock().expect("host calls").ready_waits
    }

    pub(crate) fn server_starts(&self) -> usize {
        self.calls.lock().expect("host calls").server_starts
    }

    pub(crate) fn windows_built(&self) -> usize {
        self.calls.lock().expect("host calls").built.len()
    }

    pub(crate) fn call_order(&self) -> Vec<&'static str> {
        self.order.lock().expect("call order").clone()
    }

    pub(crate) fn built_windows(&self) -> Vec<FakeWindow> {
        self.calls.lock().expect("host calls").windows.clone()
    }

    pub(crate) fn main_window_registrations(&self) -> Vec<bool> {
        self.calls
            .lock()
            .expect("host calls")
            .main_window_registrations
            .clone()
    }

    /// Completes the oldest pending cookie handshake.
    pub(crate) fn complete_cookie_auth(&self) -> bool {
        let pending = {
            let mut calls = self.calls.lock().expect("host calls");
            if calls.cookie_auth.is_empty() {
                None
            } else {
                Some(calls.cookie_auth.remove(0))
            }
        };
        match pending {
            Some(on_complete) => {
                on_complete();
                true
            }
            None => false,
        }
    }
}

impl DesktopHost for FakeHost {
    type Window = FakeWindow;

    fn is_single_instance(&self) -> bool {
        self.single_instance
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn when_ready(&self) -> ReadySignal {
        self.calls().ready_waits += 1;
        self.signal(self.host_readiness)
    }

    fn start_server(&self, on_ready: ReadyNotifier) {
        self.calls().server_starts += 1;
        match self.server_readiness {
            Readiness::Immediate => on_ready.notify(),
            Readiness::Never => self.calls().parked_notifiers.push(on_ready),
        }
    }

    fn resource_dir(&self) -> std::path::PathBuf {
        std::env::temp_dir()
    }

    fn build_window(&self, config: &WindowConfig) -> Result<FakeWindow, String> {
        if self.fail_window_build {
            return Err("native window unavailable".to_string());
        }
        record(&self.order, "build_window");
        let window = FakeWindow::recording(Arc::clone(&self.order), self.fail_load);
        let mut calls = self.calls();
        calls.built.push(config.clone());
        calls.windows.push(window.clone());
        Ok(window)
    }

    fn cookie_auth(&self, _window: &FakeWindow, on_complete: CookieAuthCallback) {
        record(&self.order, "cookie_auth");
        let mut calls = self.calls();
        calls.cookie_auth_count += 1;
        calls.cookie_auth.push(on_complete);
    }

    fn set_main_window(&self, window: Option<&FakeWindow>) {
        record(&self.order, "set_main_window");
        self.calls()
            .main_window_registrations
            .push(window.is_some());
    }

    fn system_details(&self) -> Value {
        json!({ "platform": "linux", "version": "test" })
    }
}

#[derive(Default)]
pub(crate) struct MemorySettings {
    values: HashMap<String, Value>,
    saved: Vec<(String, Value)>,
    debug: bool,
}

impl MemorySettings {
    pub(crate) fn with(mut self, key: &str, value: Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    pub(crate) fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub(crate) fn saved(&self) -> Vec<(String, Value)> {
        self.saved.clone()
    }
}

impl SettingsStore for MemorySettings {
    fn get_setting(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn save_setting(&mut self, key: &str, value: Value) -> Result<(), String> {
        self.saved.push((key.to_string(), value.clone()));
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn is_debug(&self) -> bool {
        self.debug
    }
}
