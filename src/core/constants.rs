//! Constants used throughout git-crypt-tasks.
//!
//! Centralizes magic strings and default values.

/// Configuration file name (.git-crypt-tasks.toml).
pub const CONFIG_FILE: &str = ".git-crypt-tasks.toml";

/// Environment variable overriding the config file path.
pub const CONFIG_ENV: &str = "GIT_CRYPT_TASKS_CONFIG";

/// Environment variable holding a tracing filter.
pub const LOG_ENV: &str = "GIT_CRYPT_TASKS_LOG";

/// Default git-crypt binary.
pub const GIT_CRYPT_BINARY: &str = "git-crypt";

/// Default gpg binary.
pub const GPG_BINARY: &str = "gpg";

/// Environment variable git-crypt and gpg read the key store location from.
pub const GNUPGHOME: &str = "GNUPGHOME";

/// Prefix of temporary key store directories.
pub const TEMPORARY_HOME_PREFIX: &str = "home";

/// git-crypt state directories removed on uninstall, relative to the
/// repository root.
pub const STATE_DIRECTORIES: &[&str] = &[".git-crypt", ".git/git-crypt"];

/// Default commit message templates.
pub mod messages {
    pub const INSTALL: &str = "Installing git-crypt.";
    pub const UNINSTALL: &str = "Uninstalling git-crypt.";
    pub const ADD_USERS: &str = "Adding users to git-crypt.";
    pub const ADD_USER: &str = "Adding git-crypt GPG user with {type}: '{value}'.";
}
