use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::{ColumnInfo, TableRow, TableSchema};

#[derive(Error, Debug)]
pub enum TableError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid table file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid table name '{0}'")]
    InvalidName(String),
    #[error("table '{0}' has no row ids left")]
    RowIdsExhausted(String),
}

/// A table name becomes `<name>.json` inside the tables directory, so it must
/// be a single non-empty path component that does not climb out of it.
pub fn check_table_name(name: &str) -> Result<(), TableError> {
    let bad = name.trim().is_empty()
        || name.contains(|c: char| matches!(c, '/' | '\\' | '\0'))
        || name.contains("..");
    if bad {
        Err(TableError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

/// A named input value captured for a new row.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    pub column_id: String,
    pub column_name: String,
    pub value: String,
}

/// Data tables the entry events operate on, keyed by table name. Each table
/// persists as `<name>.json` in a directory.
#[derive(Debug, Clone, Default)]
pub struct TableStore {
    tables: BTreeMap<String, TableSchema>,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, table: TableSchema) {
        self.tables.insert(name.into(), table);
    }

    /// Appends a row built from `fields`, creating the table on first use.
    /// Returns the new row id.
    pub fn create_entry(&mut self, name: &str, fields: &[FieldValue]) -> Result<i32, TableError> {
        check_table_name(name)?;
        let row_id = match self.tables.get(name) {
            Some(table) => table
                .next_row_id()
                .ok_or_else(|| TableError::RowIdsExhausted(name.to_string()))?,
            None => 0,
        };
        let table = self.tables.entry(name.to_string()).or_default();
        for field in fields {
            if !table.columns.iter().any(|c| c.id == field.column_id) {
                let order = table.columns.len() as i32;
                table
                    .columns
                    .push(ColumnInfo::text(field.column_id.clone(), field.column_name.clone(), order));
            }
        }
        let values = fields
            .iter()
            .map(|f| (f.column_id.clone(), f.value.clone()))
            .collect();
        table.add_row(TableRow { row_id, values });
        Ok(row_id)
    }

    /// Removes the most recent row of `name`.
    pub fn delete_last(&mut self, name: &str) -> Option<TableRow> {
        let table = self.tables.get_mut(name)?;
        let last = table.rows.iter().map(|r| r.row_id).max()?;
        table.remove_row(last)
    }

    pub fn load_dir(dir: &Path) -> Result<Self, TableError> {
        let mut store = TableStore::new();
        if !dir.exists() {
            return Ok(store);
        }
        let entries = fs::read_dir(dir).map_err(|source| TableError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let json = fs::read_to_string(&path).map_err(|source| TableError::Io {
                path: path.clone(),
                source,
            })?;
            let table: TableSchema = serde_json::from_str(&json).map_err(|source| TableError::Json {
                path: path.clone(),
                source,
            })?;
            store.tables.insert(name.to_string(), table);
        }
        tracing::info!(dir = %dir.display(), tables = store.tables.len(), "tables loaded");
        Ok(store)
    }

    /// Writes every table as `<name>.json`. All names are checked before
    /// anything is written.
    pub fn save_dir(&self, dir: &Path) -> Result<(), TableError> {
        for name in self.tables.keys() {
            check_table_name(name)?;
        }
        fs::create_dir_all(dir).map_err(|source| TableError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        for (name, table) in &self.tables {
            let path = dir.join(format!("{name}.json"));
            let json = serde_json::to_string_pretty(table).map_err(|source| TableError::Json {
                path: path.clone(),
                source,
            })?;
            fs::write(&path, json).map_err(|source| TableError::Io { path, source })?;
        }
        Ok(())
    }
}
