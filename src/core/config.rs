//! Configuration file management.
//!
//! Handles reading and validating `.git-crypt-tasks.toml`, and building the
//! task registry it describes.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::core::command::{CommandSpec, CommandTask};
use crate::core::constants;
use crate::core::name::Scope;
use crate::core::registry::Registry;
use crate::core::task_set::{Options, Standard};
use crate::core::tasks::Tools;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `.git-crypt-tasks.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// External binaries and the repository they operate on
    pub tools: ToolsConfig,
    /// Options for the standard task set
    pub options: Options,
    /// Extra tasks that run external commands
    pub commands: Vec<CommandSpec>,
}

/// The `[tools]` section.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub git_crypt: String,
    pub gpg: String,
    pub repository: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git_crypt: constants::GIT_CRYPT_BINARY.to_string(),
            gpg: constants::GPG_BINARY.to_string(),
            repository: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Default path of the configuration file.
    pub fn config_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults unless `required` is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file cannot be read,
    /// `ConfigError::Parse` if the TOML is malformed, or
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !required && !path.exists() {
            debug!("no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents)?;

        debug!(commands = config.commands.len(), "config loaded");
        Ok(config)
    }

    /// Parse and validate configuration text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` or `ConfigError::InvalidValue`.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate values serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on the first problem found.
    pub fn validate(&self) -> Result<()> {
        if let Err(e) = self.options.scope() {
            return Err(ConfigError::InvalidValue {
                field: "options.namespace".to_string(),
                reason: e.to_string(),
            }
            .into());
        }

        for (field, value) in [("tools.git_crypt", &self.tools.git_crypt), ("tools.gpg", &self.tools.gpg)] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
        }

        for command in &self.commands {
            if command.program.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("commands.{}.program", command.name),
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Tools backed by the configured binaries.
    pub fn tools(&self) -> Tools {
        Tools::cli(
            &self.tools.git_crypt,
            &self.tools.gpg,
            self.tools.repository.clone(),
        )
    }

    /// Build a registry holding the task set and the command tasks.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::AlreadyDefined` on name collisions.
    pub fn registry(&self, tools: &Tools) -> Result<Registry> {
        let mut registry = Registry::new();
        Standard::define(&mut registry, &self.options, tools)?;

        for spec in &self.commands {
            registry.define(
                &Scope::root(),
                &spec.name,
                spec.description(),
                CommandTask::new(spec, tools.repository.clone()),
            )?;
        }

        debug!(tasks = registry.len(), "registry built");
        Ok(registry)
    }
}
