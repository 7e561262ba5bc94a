use std::path::PathBuf;

use colored::Colorize;

use actionkit::config::Settings;
use actionkit::expr::Substitution;
use actionkit::host::{ReplayHost, TableStore};
use actionkit::runtime::ActionExecutor;

use crate::cli::{render, util};

#[derive(Debug)]
pub struct RunOptions {
    pub layout: Option<PathBuf>,
    pub triggers: Vec<String>,
    pub sets: Vec<String>,
    pub substitution: Option<Substitution>,
    pub tables: Option<PathBuf>,
    pub save: bool,
}

pub fn handle_run(settings: &Settings, opts: RunOptions) -> Result<(), String> {
    let layout_path = util::layout_path(opts.layout, settings);
    let layout = util::load(&layout_path)?;
    let tables_dir = opts.tables.unwrap_or_else(|| settings.tables.clone());
    let tables = TableStore::load_dir(&tables_dir).map_err(|e| e.to_string())?;
    let substitution = opts.substitution.unwrap_or(settings.substitution);

    let host = ReplayHost::new(layout, tables, substitution);
    for raw in &opts.sets {
        let (id, text) = util::split_assignment(raw)?;
        host.set_text(id, text)?;
    }

    let mut executor = ActionExecutor::new(host.dispatcher());
    let mut failure = None;
    for id in &opts.triggers {
        let events = host
            .events_of(id)
            .ok_or_else(|| format!("no element with id '{}' in {}", id, layout_path.display()))?;
        println!("{} {}", "▶".green(), id.bold());
        let outcome = executor.execute(&events);
        render::render_notices(&host.take_notices());
        if let Err(err) = outcome {
            failure = Some(format!("{}: {}", id, err));
            break;
        }
    }
    drop(executor);

    let (screen, tables) = host.into_parts();
    println!("{}", "elements".bold());
    render::render_elements(&screen.layout.elements);
    if !screen.variables.is_empty() {
        println!("{}", "variables".bold());
        for (name, value) in &screen.variables {
            println!("  {:<16} {}", name, actionkit::expr::format_result(*value));
        }
    }

    if opts.save {
        tables.save_dir(&tables_dir).map_err(|e| e.to_string())?;
        println!("{} tables saved to {}", "✔".green(), tables_dir.display());
    }

    match failure {
        Some(msg) => Err(msg),
        None => Ok(()),
    }
}
