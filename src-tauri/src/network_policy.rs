//! Request and response rules attached to the main window's network session.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};

use crate::AppConfig;

const PLAIN_SCHEME_PREFIX: &str = "http://";
const SECURE_SCHEME_PREFIX: &str = "https://";
const FRAME_OPTIONS_HEADER: &str = "x-frame-options";

pub type HeaderMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceType {
    MainFrame,
    SubFrame,
    Stylesheet,
    Script,
    Image,
    Font,
    Xhr,
    Media,
    WebSocket,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDetails {
    pub resource_type: ResourceType,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDetails {
    pub resource_type: ResourceType,
    pub url: String,
    #[serde(default)]
    pub response_headers: HeaderMap,
}

/// Serializes to `{}` for pass-through and `{ "redirectURL": ... }` for a redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestDecision {
    #[serde(rename = "redirectURL", skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

/// `response_headers: None` keeps the headers as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDecision {
    pub cancel: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_headers: Option<HeaderMap>,
}

pub type RequestCallback = Box<dyn FnOnce(RequestDecision) + Send>;
pub type ResponseCallback = Box<dyn FnOnce(ResponseDecision) + Send>;
pub type RequestHandler = Box<dyn Fn(RequestDetails, RequestCallback) + Send + Sync>;
pub type ResponseHandler = Box<dyn Fn(ResponseDetails, ResponseCallback) + Send + Sync>;

/// Interception hooks of a webview's network stack. The host must call every callback it
/// hands out before the request proceeds.
pub trait NetworkSession {
    fn on_before_request(&self, handler: RequestHandler);
    fn on_headers_received(&self, handler: ResponseHandler);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkPolicy {
    app_origin_prefix: String,
}

impl NetworkPolicy {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            app_origin_prefix: config.app_origin_prefix(),
        }
    }

    /// Upgrades plain-http scripts from foreign origins to https. The upgraded URL no longer
    /// starts with `http://`, so a re-submitted redirect passes through.
    pub fn decide_request(&self, details: &RequestDetails) -> RequestDecision {
        if details.resource_type != ResourceType::Script
            || details.url.starts_with(&self.app_origin_prefix)
        {
            return RequestDecision::default();
        }

        match details.url.strip_prefix(PLAIN_SCHEME_PREFIX) {
            Some(rest) => RequestDecision {
                redirect_url: Some(format!("{SECURE_SCHEME_PREFIX}{rest}")),
            },
            None => RequestDecision::default(),
        }
    }

    /// Lets sub-frames embed pages that send `X-Frame-Options`, so previews render.
    pub fn decide_response(&self, details: ResponseDetails) -> ResponseDecision {
        if details.resource_type != ResourceType::SubFrame {
            return ResponseDecision::default();
        }

        let mut headers = details.response_headers;
        headers.retain(|name, _| !name.eq_ignore_ascii_case(FRAME_OPTIONS_HEADER));
        ResponseDecision {
            cancel: false,
            response_headers: Some(headers),
        }
    }
}

/// Registers both interceptors on `session`. Call once per window.
pub fn install<F>(session: &dyn NetworkSession, policy: NetworkPolicy, log: F)
where
    F: Fn(&str) + Send + Sync + 'static,
{
    let policy = Arc::new(policy);

    let request_policy = Arc::clone(&policy);
    session.on_before_request(Box::new(
        move |details: RequestDetails, callback: RequestCallback| {
            let decision = request_policy.decide_request(&details);
            if let Some(target) = decision.redirect_url.as_deref() {
                log(&format!(
                    "redirecting http request {} to {}",
                    details.url, target
                ));
            }
            callback(decision);
        },
    ));

    let response_policy = policy;
    session.on_headers_received(Box::new(
        move |details: ResponseDetails, callback: ResponseCallback| {
            callback(response_policy.decide_response(details));
        },
    ));
}
