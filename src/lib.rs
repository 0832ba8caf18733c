//! git-crypt-tasks - Named, composable tasks for managing git-crypt.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── run           # Invoke a task by name
//! │   ├── list          # List defined tasks
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── name          # Task names and scopes
//!     ├── registry      # Task registry, lookup and invocation
//!     ├── tasks/        # init, lock, unlock, add_user(s), (re|un)install
//!     ├── task_set      # Standard task set under one namespace
//!     ├── git_crypt     # git-crypt CLI wrapper
//!     ├── gpg           # gpg CLI wrapper
//!     ├── home          # GPG key store selection
//!     ├── key_paths     # Key file discovery
//!     ├── template      # Commit message templates
//!     ├── command       # Tasks running external commands
//!     └── config        # .git-crypt-tasks.toml management
//! ```
//!
//! # Features
//!
//! - Namespaced task names with scope-relative lookup
//! - Composite install, uninstall and reinstall workflows
//! - GPG users added by id or by public key file
//! - Ephemeral key stores for importing keys

pub mod cli;
pub mod core;
pub mod error;
