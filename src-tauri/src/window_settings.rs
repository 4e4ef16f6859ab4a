use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::WindowConfig;

fn read_i32(group: &Value, field: &str) -> Option<i32> {
    group
        .get(field)?
        .as_i64()
        .and_then(|value| i32::try_from(value).ok())
}

fn read_u32(group: &Value, field: &str) -> Option<u32> {
    group
        .get(field)?
        .as_u64()
        .and_then(|value| u32::try_from(value).ok())
        .filter(|value| *value > 0)
}

/// Applies persisted geometry over the defaults. Fields of the wrong JSON type are ignored.
pub fn merge_window_settings(defaults: &WindowConfig, group: &Value) -> WindowConfig {
    let mut merged = defaults.clone();
    if let Some(x) = read_i32(group, "x") {
        merged.x = Some(x);
    }
    if let Some(y) = read_i32(group, "y") {
        merged.y = Some(y);
    }
    if let Some(width) = read_u32(group, "width") {
        merged.width = width.max(merged.min_width);
    }
    if let Some(height) = read_u32(group, "height") {
        merged.height = height.max(merged.min_height);
    }
    merged
}

pub fn resolve_preload_path(resource_dir: &Path, preload: &Path) -> Result<PathBuf, String> {
    let joined = if preload.is_absolute() {
        preload.to_path_buf()
    } else {
        resource_dir.join(preload)
    };
    if let Ok(canonical) = joined.canonicalize() {
        return Ok(canonical);
    }
    std::path::absolute(&joined).map_err(|error| {
        format!(
            "Failed to resolve preload script path {}: {}",
            joined.display(),
            error
        )
    })
}
