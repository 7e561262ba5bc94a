use std::fs;
use std::path::Path;

use actionkit::config::CONFIG_FILE_NAME;
use actionkit::model::event::{CreateEntry, MathOperation, OpenTable};
use actionkit::model::layout::{save_layout, Layout, LAYOUT_FILE_NAME};
use actionkit::model::{Element, ElementEvent, ElementKind};

pub fn handle_new(name: &str) -> Result<(), String> {
    let root = Path::new(name);
    if root.exists() {
        return Err(format!("`{}` already exists", name));
    }
    fs::create_dir_all(root.join("tables")).map_err(|e| format!("cannot create tables/: {e}"))?;

    let toml = format!(
        r#"[project]
name = "{name}"
layout = "{LAYOUT_FILE_NAME}"
tables = "tables"

[eval]
substitution = "token"

[log]
level = "warn"
"#
    );
    fs::write(root.join(CONFIG_FILE_NAME), toml).map_err(|e| format!("cannot write {CONFIG_FILE_NAME}: {e}"))?;

    save_layout(&root.join(LAYOUT_FILE_NAME), &starter_layout()).map_err(|e| e.to_string())?;
    println!("Created project at `{}`", name);
    println!("  try: actionkit --config {}/{} run -t calc --set a=2 --set b=3", name, CONFIG_FILE_NAME);
    Ok(())
}

/// Two inputs, a result label, a button that adds them and a button that
/// files the inputs into a table.
fn starter_layout() -> Layout {
    Layout::new(vec![
        Element::new("a", ElementKind::EditText).with_hint("First"),
        Element::new("b", ElementKind::EditText).with_hint("Second"),
        Element::new("result", ElementKind::TextView),
        Element::new("calc", ElementKind::Button)
            .with_text("=")
            .with_event(MathOperation::new("a+b").with_result_tag("result"))
            .with_event(ElementEvent::toast("Calculated")),
        Element::new("save", ElementKind::Button)
            .with_text("Save")
            .with_event(CreateEntry {
                table_name: "entries".into(),
            })
            .with_event(OpenTable {
                table_name: "entries".into(),
            }),
    ])
}
