//! Decides which persisted location may be restored when the main window opens.
//!
//! Some editor locations force a fresh login when loaded cold, so they are rewritten to the
//! matching list view before restoring.

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteAction {
    /// Drop the final path segment, then swap the prefix.
    TruncateAndReplace(&'static str),
    /// Swap the prefix and keep the rest.
    Replace(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteRule {
    pub prefix: &'static str,
    pub action: RewriteAction,
}

/// Checked in order; the first matching prefix wins.
pub const STARTUP_REWRITE_RULES: [RewriteRule; 3] = [
    RewriteRule {
        prefix: "/block-editor/post/",
        action: RewriteAction::TruncateAndReplace("/posts/"),
    },
    RewriteRule {
        prefix: "/block-editor/page/",
        action: RewriteAction::TruncateAndReplace("/pages/"),
    },
    RewriteRule {
        prefix: "/customize/",
        action: RewriteAction::Replace("/posts/"),
    },
];

pub const NON_RESTORABLE_PREFIXES: [&str; 2] = [
    // shown when the page is opened outside the desktop shell
    "/desktop/",
    // signup flow
    "/start",
];

fn replace_prefix(path: &str, prefix: &str, replacement: &str) -> String {
    if let Some(rest) = path.strip_prefix(prefix) {
        return format!("{replacement}{rest}");
    }
    // Truncation can eat the prefix's own trailing slash, e.g. `/block-editor/page/5`.
    if path == prefix.trim_end_matches('/') {
        return replacement.trim_end_matches('/').to_string();
    }
    path.to_string()
}

fn apply_rule(rule: &RewriteRule, path: &str) -> String {
    match rule.action {
        RewriteAction::TruncateAndReplace(replacement) => {
            let truncated = path.rfind('/').map_or(path, |index| &path[..index]);
            replace_prefix(truncated, rule.prefix, replacement)
        }
        RewriteAction::Replace(replacement) => replace_prefix(path, rule.prefix, replacement),
    }
}

pub fn rewrite_startup_path(path: &str) -> String {
    STARTUP_REWRITE_RULES
        .iter()
        .find(|rule| path.starts_with(rule.prefix))
        .map(|rule| apply_rule(rule, path))
        .unwrap_or_else(|| path.to_string())
}

/// Non-string values are returned unchanged.
pub fn rewrite_startup_location(location: Value) -> Value {
    match location {
        Value::String(path) => Value::String(rewrite_startup_path(&path)),
        other => other,
    }
}

pub fn is_restorable_path(path: &str) -> bool {
    !NON_RESTORABLE_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

pub fn is_restorable(location: &Value) -> bool {
    location.as_str().is_some_and(is_restorable_path)
}

/// Path to append to the app URL at startup, if the persisted location may be restored.
pub fn startup_path(persisted: Option<Value>) -> Option<String> {
    let rewritten = rewrite_startup_location(persisted?);
    if !is_restorable(&rewritten) {
        return None;
    }
    rewritten.as_str().map(str::to_string)
}
