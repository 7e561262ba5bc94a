use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::element::Element;

/// Default file name of a saved layout inside a project folder.
pub const LAYOUT_FILE_NAME: &str = "saved_layout.json";

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid layout: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate element id '{0}'")]
    DuplicateId(String),
}

/// The persisted canvas: every element with its attached events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Layout {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let layout: Layout = serde_json::from_str(json)?;
        layout.check_unique_ids()?;
        Ok(layout)
    }

    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Elements keyed by id, the shape display substitution expects.
    pub fn by_id(&self) -> HashMap<String, &Element> {
        self.elements.iter().map(|e| (e.id.clone(), e)).collect()
    }

    fn check_unique_ids(&self) -> Result<(), LayoutError> {
        let mut seen = HashSet::new();
        for element in &self.elements {
            if !seen.insert(element.id.as_str()) {
                return Err(LayoutError::DuplicateId(element.id.clone()));
            }
        }
        Ok(())
    }
}

pub fn load_layout(path: &Path) -> Result<Layout, LayoutError> {
    let json = fs::read_to_string(path).map_err(|source| LayoutError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let layout = Layout::from_json(&json)?;
    tracing::info!(path = %path.display(), elements = layout.elements.len(), "layout loaded");
    Ok(layout)
}

pub fn save_layout(path: &Path, layout: &Layout) -> Result<(), LayoutError> {
    let json = layout.to_json()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| LayoutError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, json).map_err(|source| LayoutError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "layout saved");
    Ok(())
}

/// Replaces the layout at `path` with `json`, but only after it decodes
/// completely. A rejected document leaves the existing file untouched.
pub fn import_layout(path: &Path, json: &str) -> Result<Layout, LayoutError> {
    let layout = Layout::from_json(json)?;
    save_layout(path, &layout)?;
    Ok(layout)
}
