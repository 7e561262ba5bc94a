use std::path::Path;

use colored::Colorize;

use actionkit::expr::substitute_for_display;
use actionkit::model::{describe, ElementEvent};

use crate::cli::util;

pub fn handle_inspect(path: &Path) -> Result<(), String> {
    let layout = util::load(path)?;
    let by_id = layout.by_id();
    for element in &layout.elements {
        println!("{} {:?}", element.id.bold(), element.kind);
        if !element.hint.is_empty() {
            println!("  hint: {}", element.hint.dimmed());
        }
        for (i, event) in element.events.iter().enumerate() {
            let detail = match event {
                ElementEvent::MathOperation(m) => {
                    format!("{}  ({})", m.expression, substitute_for_display(&m.expression, &by_id))
                }
                ElementEvent::ShowToast(t) => t.message.clone(),
                ElementEvent::ShowDialog(d) => format!("{}: {}", d.title, d.message),
                ElementEvent::CreateEntry(e) => e.table_name.clone(),
                ElementEvent::DeleteEntry(e) => e.table_name.clone(),
                ElementEvent::OpenTable(e) => e.table_name.clone(),
                ElementEvent::AddText(a) => format!("{:?}", a.new_text),
                ElementEvent::ChangeText(c) => format!("{:?}", c.new_text),
                ElementEvent::GetTextFromEditText(g) => format!("#{}", g.edit_text_id),
                ElementEvent::RunCustomCode(c) => format!("{} chars", c.code.chars().count()),
            };
            println!("  {}. {} {}", i + 1, format!("{:<24}", describe(event)).cyan(), detail);
        }
    }
    Ok(())
}

pub fn handle_check(path: &Path) -> Result<(), String> {
    let layout = util::load(path)?;
    let events: usize = layout.elements.iter().map(|e| e.events.len()).sum();
    println!(
        "{} {}: {} elements, {} events",
        "✔".green(),
        path.display(),
        layout.elements.len(),
        events
    );
    Ok(())
}
