//! Core library components.
//!
//! This module contains the task registry and naming rules, the git-crypt
//! operation tasks, and the wrappers around the external CLIs they drive.

pub mod command;
pub mod config;
pub mod constants;
pub mod git_crypt;
pub mod gpg;
pub mod home;
pub mod key_paths;
pub mod name;
pub mod registry;
pub mod task_set;
pub mod tasks;
pub mod template;
