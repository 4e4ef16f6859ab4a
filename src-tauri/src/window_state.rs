//! Lifecycle of the main window as a pure transition function.
//!
//! `Uninitialized -> Constructing -> Loaded -> Closing -> Closed`. The controller feeds host
//! events in and executes the returned effects.

use serde_json::Value;
use url::Url;

use crate::location_policy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowPhase {
    #[default]
    Uninitialized,
    Constructing,
    Loaded,
    Closing,
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    Constructed,
    /// May fire again on every navigation.
    LoadFinished,
    ContextMenuRequested(Value),
    CloseRequested { current_url: Option<String> },
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WindowEffect {
    PushAppConfig,
    ForwardContextMenu(Value),
    PersistLastLocation(String),
    ReleaseWindow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub phase: WindowPhase,
    pub effects: Vec<WindowEffect>,
}

impl Transition {
    fn to(phase: WindowPhase, effects: Vec<WindowEffect>) -> Self {
        Self { phase, effects }
    }

    fn stay(phase: WindowPhase) -> Self {
        Self::to(phase, Vec::new())
    }
}

/// Path component of an http(s) `current_url`, only when it may be restored next launch.
pub fn location_to_persist(current_url: Option<&str>) -> Option<String> {
    let parsed = Url::parse(current_url?).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let path = parsed.path();
    location_policy::is_restorable_path(path).then(|| path.to_string())
}

pub fn transition(phase: WindowPhase, event: WindowEvent) -> Transition {
    use WindowEvent as E;
    use WindowPhase as P;

    match (phase, event) {
        (P::Uninitialized, E::Constructed) => Transition::stay(P::Constructing),
        (P::Constructing | P::Loaded, E::LoadFinished) => {
            Transition::to(P::Loaded, vec![WindowEffect::PushAppConfig])
        }
        (P::Loaded, E::ContextMenuRequested(payload)) => {
            Transition::to(P::Loaded, vec![WindowEffect::ForwardContextMenu(payload)])
        }
        (P::Constructing | P::Loaded, E::CloseRequested { current_url }) => {
            let effects = location_to_persist(current_url.as_deref())
                .map(WindowEffect::PersistLastLocation)
                .into_iter()
                .collect();
            Transition::to(P::Closing, effects)
        }
        // The native window can be destroyed without a close request, e.g. on crash.
        (P::Constructing | P::Loaded | P::Closing, E::Closed) => {
            Transition::to(P::Closed, vec![WindowEffect::ReleaseWindow])
        }
        (phase, _) => Transition::stay(phase),
    }
}
