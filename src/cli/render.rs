use colored::Colorize;

use actionkit::expr::format_result;
use actionkit::host::Notice;
use actionkit::model::Element;

pub fn render_notices(notices: &[Notice]) {
    for notice in notices {
        match notice {
            Notice::Toast(msg) => println!("{} {}", "toast".cyan().bold(), msg),
            Notice::Dialog { title, message } => {
                println!("{} {}", "dialog".magenta().bold(), title.bold());
                println!("       {}", message);
            }
            Notice::EntryCreated { table, row_id } => {
                println!("{} {} #{}", "+entry".green().bold(), table, row_id)
            }
            Notice::EntryDeleted { table, row_id } => {
                println!("{} {} #{}", "-entry".yellow().bold(), table, row_id)
            }
            Notice::Table { name, rendered } => {
                println!("{} {}", "table".blue().bold(), name);
                for line in rendered.lines() {
                    println!("  {}", line);
                }
            }
            Notice::Math { expression, result } => {
                let shown = format_result(*result);
                let shown = if result.is_nan() { shown.red() } else { shown.normal() };
                println!("{} {} = {}", "math".bright_black().bold(), expression, shown);
            }
        }
    }
}

pub fn render_elements(elements: &[Element]) {
    for el in elements {
        println!("  {:<16} {:?} {}", el.id, el.kind, format!("\"{}\"", el.text).dimmed());
    }
}

/// Points at byte `pos` of `line`, in the style of a compiler diagnostic.
pub fn print_snippet(line: &str, pos: usize) {
    let col = line.get(..pos).map_or(0, |prefix| prefix.chars().count());
    eprintln!("  | {}", line);
    eprintln!("  | {}{}", " ".repeat(col), "^".red());
}
