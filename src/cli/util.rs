use std::path::{Path, PathBuf};

use actionkit::config::Settings;
use actionkit::model::layout::{load_layout, Layout};

pub fn layout_path(arg: Option<PathBuf>, settings: &Settings) -> PathBuf {
    arg.unwrap_or_else(|| settings.layout.clone())
}

pub fn load(path: &Path) -> Result<Layout, String> {
    load_layout(path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Splits `NAME=VALUE`.
pub fn split_assignment(raw: &str) -> Result<(&str, &str), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => Err(format!("expected NAME=VALUE, got `{}`", raw)),
    }
}
