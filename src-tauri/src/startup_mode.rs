use std::{env, time::Duration};

use crate::{
    DESKTOP_ENV, DEVELOPMENT_MODE, HOST_READY_TIMEOUT_ENV, NODE_ENV, READY_TIMEOUT_MAX,
    READY_TIMEOUT_MIN, SERVER_READY_TIMEOUT_ENV,
};

/// How `startup_task::boot` should sequence startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootOptions {
    /// Skip the local server and load the window directly.
    pub development: bool,
    pub host_ready_timeout: Option<Duration>,
    pub server_ready_timeout: Option<Duration>,
}

impl BootOptions {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        let mode = lookup(DESKTOP_ENV)
            .filter(|value| !value.trim().is_empty())
            .or_else(|| lookup(NODE_ENV));
        Self {
            development: is_development_mode(mode.as_deref()),
            host_ready_timeout: parse_ready_timeout(lookup(HOST_READY_TIMEOUT_ENV).as_deref()),
            server_ready_timeout: parse_ready_timeout(
                lookup(SERVER_READY_TIMEOUT_ENV).as_deref(),
            ),
        }
    }
}

pub fn is_development_mode(raw: Option<&str>) -> bool {
    raw.map(|value| value.trim().eq_ignore_ascii_case(DEVELOPMENT_MODE))
        .unwrap_or(false)
}

/// `None` means wait forever. Zero and unparsable values also mean wait forever.
pub fn parse_ready_timeout(raw: Option<&str>) -> Option<Duration> {
    let millis = raw?.trim().parse::<u64>().ok()?;
    if millis == 0 {
        return None;
    }
    Some(Duration::from_millis(millis).clamp(READY_TIMEOUT_MIN, READY_TIMEOUT_MAX))
}
