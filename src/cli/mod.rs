//! Command-line interface.

pub mod completions;
pub mod list;
pub mod output;
pub mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use tracing::debug;

use crate::core::config::Config;
use crate::core::constants;
use crate::core::registry::Registry;
use crate::error::Result;

/// git-crypt-tasks - Run git-crypt tasks for a repository.
#[derive(Parser)]
#[command(
    name = "git-crypt-tasks",
    about = "Run git-crypt tasks for a repository",
    version
)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = constants::CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Namespace to define the git-crypt tasks in (overrides the config)
    #[arg(long, global = true)]
    pub namespace: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Run a task, e.g. `git_crypt:install`
    Run {
        /// Task name
        task: String,
        /// Arguments passed to the task
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List defined tasks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    let Cli {
        config,
        namespace,
        command,
        ..
    } = cli;

    match command {
        Command::Run { task, args } => {
            let registry = registry(config, namespace)?;
            run::execute(&registry, &task, &args)
        }
        Command::List { json } => {
            let registry = registry(config, namespace)?;
            list::execute(&registry, json)
        }
        Command::Completions { shell } => completions::execute(shell),
    }
}

/// Load the config and build the registry it describes.
///
/// An explicit config path must exist; the default one may be absent.
fn registry(path: Option<PathBuf>, namespace: Option<String>) -> Result<Registry> {
    let required = path.is_some();
    let path = path.unwrap_or_else(Config::config_path);
    let mut config = Config::load(&path, required)?;

    if let Some(namespace) = namespace {
        debug!(%namespace, "namespace overridden");
        config.options.namespace = Some(namespace);
        config.validate()?;
    }

    let tools = config.tools();
    config.registry(&tools)
}
