use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::expr::Substitution;

pub const CONFIG_FILE_NAME: &str = "actionkit.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectToml {
    pub project: Option<ProjectSection>,
    pub eval: Option<EvalSection>,
    pub log: Option<LogSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectSection {
    pub name: Option<String>,
    pub layout: Option<String>,
    pub tables: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EvalSection {
    pub substitution: Option<Substitution>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogSection {
    pub level: Option<String>,
}

/// Resolved settings: file values over built-in defaults. CLI flags are
/// applied on top by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub name: String,
    pub layout: PathBuf,
    pub tables: PathBuf,
    pub substitution: Substitution,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: "actionkit-app".into(),
            layout: PathBuf::from(crate::model::layout::LAYOUT_FILE_NAME),
            tables: PathBuf::from("tables"),
            substitution: Substitution::Token,
            log_level: "warn".into(),
        }
    }
}

impl Settings {
    /// Reads `path` if it exists. Relative layout/table paths are resolved
    /// against the config file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Settings::from_toml_str(&src, base).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(src: &str, base: &Path) -> Result<Self, toml::de::Error> {
        let parsed: ProjectToml = toml::from_str(src)?;
        let mut settings = Settings::default();
        if let Some(project) = parsed.project {
            if let Some(name) = project.name {
                settings.name = name;
            }
            if let Some(layout) = project.layout {
                settings.layout = base.join(layout);
            }
            if let Some(tables) = project.tables {
                settings.tables = base.join(tables);
            }
        }
        if let Some(mode) = parsed.eval.and_then(|e| e.substitution) {
            settings.substitution = mode;
        }
        if let Some(level) = parsed.log.and_then(|l| l.level) {
            settings.log_level = level;
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_keep_defaults() {
        let settings = Settings::from_toml_str("[project]\nname = \"calc\"\n", Path::new("")).unwrap();
        assert_eq!(settings.name, "calc");
        assert_eq!(settings.substitution, Substitution::Token);
        assert_eq!(settings.layout, PathBuf::from("saved_layout.json"));
    }

    #[test]
    fn legacy_mode_and_relative_paths() {
        let src = "[project]\nlayout = \"ui.json\"\n[eval]\nsubstitution = \"legacy\"\n";
        let settings = Settings::from_toml_str(src, Path::new("proj")).unwrap();
        assert_eq!(settings.substitution, Substitution::Legacy);
        assert_eq!(settings.layout, Path::new("proj").join("ui.json"));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Settings::from_toml_str("[eval]\nsubstitution = \"fuzzy\"\n", Path::new("")).is_err());
    }
}
