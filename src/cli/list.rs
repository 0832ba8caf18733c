//! List command.

use crate::cli::output;
use crate::core::registry::Registry;
use crate::error::Result;

/// Print every defined task with its description, in definition order.
pub fn execute(registry: &Registry, json: bool) -> Result<()> {
    if json {
        let tasks: Vec<_> = registry
            .tasks()
            .map(|d| {
                serde_json::json!({
                    "name": d.name(),
                    "description": d.description(),
                })
            })
            .collect();
        let output = serde_json::json!({
            "tasks": tasks,
            "count": registry.len(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if registry.is_empty() {
        output::dimmed("no tasks defined");
    } else {
        let width = registry.tasks().map(|d| d.name().len()).max().unwrap_or(0);
        for definition in registry.tasks() {
            let name = format!("{:<width$}", definition.name());
            println!("  {}  {}", output::task(&name), definition.description());
        }
    }

    Ok(())
}
