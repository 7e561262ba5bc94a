use std::path::Path;

use actionkit::host::TableStore;

use crate::cli::TableFormat;

pub fn handle_table(name: &str, dir: &Path, format: TableFormat) -> Result<(), String> {
    let store = TableStore::load_dir(dir).map_err(|e| e.to_string())?;
    let table = store.get(name).ok_or_else(|| {
        let known: Vec<&str> = store.names().collect();
        if known.is_empty() {
            format!("no tables in {}", dir.display())
        } else {
            format!("unknown table `{}` (have: {})", name, known.join(", "))
        }
    })?;
    match format {
        TableFormat::Text => println!("{}", table.format_aligned()),
        TableFormat::Csv => print!("{}", table.to_csv()),
        TableFormat::Sql => print!("{}", table.to_sql(&sql_table_name(name))),
    }
    Ok(())
}

fn sql_table_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}
