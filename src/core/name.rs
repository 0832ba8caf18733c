//! Task names and scopes.
//!
//! Names are `:`-separated paths such as `init`, `git:commit` or
//! `git_crypt:add_users`. A leading `:` anchors a name at the root and a
//! leading `^` steps one scope level up before resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TaskError;

/// Separator between name segments.
pub const SEPARATOR: char = ':';

/// A symbolic reference to a task, resolved lazily against a registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskName {
    absolute: bool,
    up: usize,
    segments: Vec<String>,
}

impl TaskName {
    /// Parse a task name.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::InvalidName` for empty names or empty segments.
    pub fn parse(raw: &str) -> Result<Self, TaskError> {
        let invalid = |reason| TaskError::InvalidName {
            name: raw.to_string(),
            reason,
        };

        let mut rest = raw.trim();
        let absolute = rest.starts_with(SEPARATOR);
        if absolute {
            rest = &rest[1..];
        }

        let mut up = 0;
        while let Some(stripped) = rest.strip_prefix('^') {
            up += 1;
            rest = stripped;
        }
        if absolute && up > 0 {
            return Err(invalid("cannot combine ':' and '^' prefixes"));
        }
        if rest.is_empty() {
            return Err(invalid("name is empty"));
        }

        let segments: Vec<String> = rest.split(SEPARATOR).map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(invalid("name has an empty segment"));
        }
        if segments.iter().any(|s| s.chars().any(char::is_whitespace)) {
            return Err(invalid("name contains whitespace"));
        }

        Ok(Self {
            absolute,
            up,
            segments,
        })
    }

    /// Whether the name bypasses scope resolution.
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Number of scope levels to step up before resolution.
    pub fn up(&self) -> usize {
        self.up
    }

    /// The `:`-joined path without any prefix.
    pub fn path(&self) -> String {
        self.segments.join(":")
    }

    /// The final segment.
    pub fn base(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Fully-qualify this name inside `scope`, ignoring prefixes.
    pub fn qualified_in(&self, scope: &Scope) -> String {
        scope
            .segments()
            .iter()
            .map(String::as_str)
            .chain(self.segments.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(":")
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute {
            f.write_str(":")?;
        }
        for _ in 0..self.up {
            f.write_str("^")?;
        }
        f.write_str(&self.path())
    }
}

impl FromStr for TaskName {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TaskName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TaskName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Deserialize an optional task name where an empty string means unset.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<TaskName>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(name) => TaskName::parse(name)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// The namespace a task was defined in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Scope(Vec<String>);

impl Scope {
    /// The root scope.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a `:`-separated namespace. Empty input is the root scope.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::InvalidName` if any segment is empty.
    pub fn parse(raw: &str) -> Result<Self, TaskError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::root());
        }
        let name = TaskName::parse(raw)?;
        if name.is_absolute() || name.up() > 0 {
            return Err(TaskError::InvalidName {
                name: raw.to_string(),
                reason: "namespaces cannot carry ':' or '^' prefixes",
            });
        }
        Ok(Self(name.segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The scope `levels` steps towards the root.
    pub fn ancestor(&self, levels: usize) -> Self {
        let keep = self.0.len().saturating_sub(levels);
        Self(self.0[..keep].to_vec())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(":"))
    }
}

/// Build a `TaskName` from a literal known to be valid.
///
/// Used for built-in defaults only.
pub(crate) fn literal(raw: &'static str) -> TaskName {
    TaskName {
        absolute: false,
        up: 0,
        segments: raw.split(SEPARATOR).map(str::to_string).collect(),
    }
}
