use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Stable id; row values are keyed by it.
    pub id: String,
    /// Display name, e.g. the hint of the input field the column came from.
    pub name: String,
    /// `"text"` or `"number"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub row_id: i32,
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl ColumnInfo {
    pub fn text(id: impl Into<String>, name: impl Into<String>, order: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: "text".into(),
            order,
        }
    }
}

impl TableSchema {
    pub fn new(columns: Vec<ColumnInfo>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    fn sorted_columns(&self) -> Vec<&ColumnInfo> {
        let mut cols: Vec<&ColumnInfo> = self.columns.iter().collect();
        cols.sort_by_key(|c| c.order);
        cols
    }

    fn sorted_rows(&self) -> Vec<&TableRow> {
        let mut rows: Vec<&TableRow> = self.rows.iter().collect();
        rows.sort_by_key(|r| r.row_id);
        rows
    }

    /// One past the largest id in use, or `None` once `i32::MAX` is taken.
    pub fn next_row_id(&self) -> Option<i32> {
        match self.rows.iter().map(|r| r.row_id).max() {
            Some(max) => max.checked_add(1),
            None => Some(0),
        }
    }

    /// Adds any columns the row introduces, then inserts it keeping rows
    /// ordered by id.
    pub fn add_row(&mut self, row: TableRow) {
        for key in row.values.keys() {
            if !self.columns.iter().any(|c| &c.id == key) {
                let order = self.columns.len() as i32;
                self.columns.push(ColumnInfo::text(key.clone(), key.clone(), order));
            }
        }
        self.rows.push(row);
        self.rows.sort_by_key(|r| r.row_id);
    }

    /// Returns the removed row, if one had that id.
    pub fn remove_row(&mut self, row_id: i32) -> Option<TableRow> {
        let idx = self.rows.iter().position(|r| r.row_id == row_id)?;
        Some(self.rows.remove(idx))
    }

    /// Returns `false` when no row has `row_id`.
    pub fn update_value(&mut self, row_id: i32, column_id: &str, value: impl Into<String>) -> bool {
        match self.rows.iter_mut().find(|r| r.row_id == row_id) {
            Some(row) => {
                row.values.insert(column_id.to_string(), value.into());
                true
            }
            None => false,
        }
    }

    /// Plain-text grid: header, dashed rule, one line per row, each cell
    /// padded to its column's widest value.
    pub fn format_aligned(&self) -> String {
        let columns = self.sorted_columns();
        let rows = self.sorted_rows();

        let widths: Vec<usize> = columns
            .iter()
            .map(|col| {
                rows.iter()
                    .map(|r| r.values.get(&col.id).map_or(0, |v| v.chars().count()))
                    .chain(std::iter::once(col.name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header = columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| pad_end(&col.name, *w))
            .collect::<Vec<_>>()
            .join(" | ");
        let separator = "-".repeat(header.chars().count());

        let mut lines = vec![header, separator];
        for row in rows {
            let line = columns
                .iter()
                .zip(&widths)
                .map(|(col, w)| pad_end(row.values.get(&col.id).map_or("", String::as_str), *w))
                .collect::<Vec<_>>()
                .join(" | ");
            lines.push(line);
        }
        lines.join("\n")
    }

    /// `|`-separated export with a leading `id` column.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        let headers = self.columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>().join("|");
        out.push_str(&format!("id|{}\n", headers));
        for row in &self.rows {
            let values = self
                .columns
                .iter()
                .map(|c| row.values.get(&c.id).map_or("", String::as_str))
                .collect::<Vec<_>>()
                .join("|");
            out.push_str(&format!("{}|{}\n", row.row_id, values));
        }
        out
    }

    /// `CREATE TABLE` plus one `INSERT` per row.
    pub fn to_sql(&self, table_name: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("CREATE TABLE IF NOT EXISTS {} (\n", table_name));
        out.push_str("  id INTEGER PRIMARY KEY,\n");
        let defs = self
            .columns
            .iter()
            .map(|c| {
                let ty = if c.kind == "number" { "INTEGER" } else { "TEXT" };
                format!("  {} {}", sql_column_name(&c.name), ty)
            })
            .collect::<Vec<_>>()
            .join(",\n");
        out.push_str(&defs);
        out.push_str("\n);\n\n");

        let names = self
            .columns
            .iter()
            .map(|c| sql_column_name(&c.name))
            .collect::<Vec<_>>()
            .join(", ");
        for row in &self.rows {
            let values = self
                .columns
                .iter()
                .map(|c| match row.values.get(&c.id).map(String::as_str) {
                    None | Some("") => "NULL".to_string(),
                    Some(v) => format!("'{}'", v.replace('\'', "''")),
                })
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!(
                "INSERT INTO {} (id, {}) VALUES ({}, {});\n",
                table_name, names, row.row_id, values
            ));
        }
        out
    }
}

fn sql_column_name(name: &str) -> String {
    name.replace(' ', "_").to_lowercase()
}

fn pad_end(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_end_counts_chars_not_bytes() {
        assert_eq!(pad_end("Имя", 5), "Имя  ");
    }

    #[test]
    fn next_row_id_starts_at_zero() {
        let mut table = TableSchema::default();
        assert_eq!(table.next_row_id(), Some(0));
        table.add_row(TableRow {
            row_id: 4,
            values: BTreeMap::new(),
        });
        assert_eq!(table.next_row_id(), Some(5));
        table.add_row(TableRow {
            row_id: i32::MAX,
            values: BTreeMap::new(),
        });
        assert_eq!(table.next_row_id(), None);
    }
}
