use std::{env, path::PathBuf};

use crate::{RESOURCE_DIR_ENV, ROOT_DIR_ENV};

fn non_empty_path(raw: String) -> Option<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

pub fn default_root_dir() -> Option<PathBuf> {
    if let Some(root) = env::var(ROOT_DIR_ENV).ok().and_then(non_empty_path) {
        return Some(root);
    }
    home::home_dir().map(|home| home.join(".wp-desktop"))
}

/// Directory holding bundled resources such as the preload script.
pub fn default_resource_dir() -> Option<PathBuf> {
    if let Some(dir) = env::var(RESOURCE_DIR_ENV).ok().and_then(non_empty_path) {
        return Some(dir);
    }
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
}
