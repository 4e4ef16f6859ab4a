use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopLogCategory {
    Startup,
    Runtime,
}

impl DesktopLogCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Runtime => "runtime",
        }
    }
}

pub fn resolve_desktop_log_path(root_dir: Option<PathBuf>, log_file_name: &str) -> PathBuf {
    match root_dir {
        Some(root) => root.join("logs").join(log_file_name),
        None => PathBuf::from(log_file_name),
    }
}

pub(crate) fn format_log_line(category: DesktopLogCategory, message: &str) -> String {
    format!(
        "[{}] [{}] {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        category.as_str(),
        message
    )
}

fn backup_path(log_path: &Path, index: usize) -> PathBuf {
    let mut name = log_path.as_os_str().to_os_string();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

/// Shifts `desktop.log` to `desktop.log.1`, `.1` to `.2`, and so on, dropping the oldest backup.
pub(crate) fn rotate_log_if_needed(
    log_path: &Path,
    max_bytes: u64,
    backup_count: usize,
) -> Result<(), String> {
    let size = match fs::metadata(log_path) {
        Ok(metadata) => metadata.len(),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(error) => {
            return Err(format!(
                "Failed to read log metadata {}: {}",
                log_path.display(),
                error
            ))
        }
    };
    if size < max_bytes {
        return Ok(());
    }

    if backup_count == 0 {
        return fs::remove_file(log_path).map_err(|error| {
            format!("Failed to truncate log {}: {}", log_path.display(), error)
        });
    }

    let oldest = backup_path(log_path, backup_count);
    if oldest.exists() {
        fs::remove_file(&oldest).map_err(|error| {
            format!("Failed to remove log backup {}: {}", oldest.display(), error)
        })?;
    }
    for index in (1..backup_count).rev() {
        let from = backup_path(log_path, index);
        if from.exists() {
            let to = backup_path(log_path, index + 1);
            fs::rename(&from, &to).map_err(|error| {
                format!("Failed to rotate log backup {}: {}", from.display(), error)
            })?;
        }
    }
    fs::rename(log_path, backup_path(log_path, 1))
        .map_err(|error| format!("Failed to rotate log {}: {}", log_path.display(), error))
}

fn write_log_line(
    log_path: &Path,
    line: &str,
    max_bytes: u64,
    backup_count: usize,
) -> Result<(), String> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent).map_err(|error| {
            format!(
                "Failed to create log directory {}: {}",
                parent.display(),
                error
            )
        })?;
    }
    rotate_log_if_needed(log_path, max_bytes, backup_count)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|error| format!("Failed to open log {}: {}", log_path.display(), error))?;
    file.write_all(line.as_bytes())
        .map_err(|error| format!("Failed to write log {}: {}", log_path.display(), error))
}

pub fn append_desktop_log(
    category: DesktopLogCategory,
    message: &str,
    root_dir: Option<PathBuf>,
    log_file_name: &str,
    max_bytes: u64,
    backup_count: usize,
    write_lock: &Mutex<()>,
) {
    let line = format_log_line(category, message);
    if root_dir.is_none() {
        eprint!("{line}");
        return;
    }

    let log_path = resolve_desktop_log_path(root_dir, log_file_name);
    let _guard = match write_lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Err(error) = write_log_line(&log_path, &line, max_bytes, backup_count) {
        eprintln!("{error}");
        eprint!("{line}");
    }
}
