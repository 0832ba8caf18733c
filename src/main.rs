//! git-crypt-tasks - Named, composable tasks for managing git-crypt.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use git_crypt_tasks::cli::output;
use git_crypt_tasks::cli::{execute, Cli};
use git_crypt_tasks::core::constants;
use git_crypt_tasks::error::{Error, GitCryptError, GpgError, TaskError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("git_crypt_tasks=debug")
        } else {
            EnvFilter::new("git_crypt_tasks=info")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::GitCrypt(GitCryptError::NotFound(_)) => {
                Some("install git-crypt or set tools.git_crypt in .git-crypt-tasks.toml")
            }
            Error::Gpg(GpgError::NotFound(_)) => {
                Some("install gpg or set tools.gpg in .git-crypt-tasks.toml")
            }
            Error::Task(TaskError::DependencyTaskMissing(_)) => Some("run: git-crypt-tasks list"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
