use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use actionkit::config::{Settings, CONFIG_FILE_NAME};
use actionkit::expr::Substitution;
use actionkit::logging;

pub mod eval;
pub mod inspect;
pub mod new;
pub mod render;
pub mod run;
pub mod table;
pub mod util;

const ACTIONKIT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(
    name = "actionkit",
    version = ACTIONKIT_VERSION,
    about = "Replay and inspect saved app-builder layouts",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Project config file
    #[arg(long, global = true, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Text,
    Csv,
    Sql,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Trigger elements of a layout and print what their events did
    Run {
        layout: Option<PathBuf>,
        #[arg(long = "trigger", short = 't', required = true)]
        triggers: Vec<String>,
        /// Pre-fill an element's text: ID=TEXT
        #[arg(long = "set", value_name = "ID=TEXT")]
        sets: Vec<String>,
        #[arg(long)]
        substitution: Option<Substitution>,
        #[arg(long)]
        tables: Option<PathBuf>,
        /// Write table changes back to the tables directory
        #[arg(long)]
        save: bool,
    },
    /// Evaluate an arithmetic expression
    Eval {
        expression: String,
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,
        #[arg(long)]
        substitution: Option<Substitution>,
    },
    /// List elements, their events and math previews
    Inspect { layout: Option<PathBuf> },
    /// Decode a layout and report the first error
    Check { layout: Option<PathBuf> },
    /// Export a stored data table
    Table {
        name: String,
        #[arg(long)]
        dir: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "text")]
        format: TableFormat,
    },
    /// Scaffold a project folder
    New { name: String },
}

pub fn run(cli: Cli) -> Result<(), String> {
    let settings = Settings::load(&cli.config).map_err(|e| e.to_string())?;
    logging::init(&settings.log_level);
    tracing::debug!(config = %cli.config.display(), ?settings, "settings resolved");

    match cli.command {
        Command::Run {
            layout,
            triggers,
            sets,
            substitution,
            tables,
            save,
        } => run::handle_run(
            &settings,
            run::RunOptions {
                layout,
                triggers,
                sets,
                substitution,
                tables,
                save,
            },
        ),
        Command::Eval {
            expression,
            vars,
            substitution,
        } => eval::handle_eval(&expression, &vars, substitution.unwrap_or(settings.substitution)),
        Command::Inspect { layout } => inspect::handle_inspect(&util::layout_path(layout, &settings)),
        Command::Check { layout } => inspect::handle_check(&util::layout_path(layout, &settings)),
        Command::Table { name, dir, format } => {
            table::handle_table(&name, &dir.unwrap_or_else(|| settings.tables.clone()), format)
        }
        Command::New { name } => new::handle_new(&name),
    }
}
