//! Commit message templates.
//!
//! Templates substitute `{field}` placeholders from a fixed set of fields
//! supplied by the task doing the rendering. `{{` and `}}` produce literal
//! braces. Unknown fields are an error rather than being left in place.

use std::fmt;

use crate::error::TemplateError;

/// How a GPG user was identified when added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddedBy {
    Id,
    KeyPath,
}

impl fmt::Display for AddedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Id => "ID",
            Self::KeyPath => "key path",
        })
    }
}

/// Values available to a template.
#[derive(Debug, Default)]
pub struct Fields {
    values: Vec<(&'static str, String)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &'static str, value: impl fmt::Display) -> Self {
        self.values.push((field, value.to_string()));
        self
    }

    fn get(&self, field: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value.as_str())
    }
}

/// Render `template` against `fields`.
///
/// # Errors
///
/// Returns `TemplateError::UnknownField` for a placeholder with no value and
/// `TemplateError::Unclosed` for a `{` without a matching `}`.
pub fn render(template: &str, fields: &Fields) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => field.push(ch),
                        None => return Err(TemplateError::Unclosed(template.to_string())),
                    }
                }
                let field = field.trim();
                let value = fields.get(field).ok_or_else(|| TemplateError::UnknownField {
                    field: field.to_string(),
                    template: template.to_string(),
                })?;
                out.push_str(value);
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
