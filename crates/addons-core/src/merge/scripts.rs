//! Script entry merge into package.json

use crate::project::ProjectContext;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Keys touched by a script merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptChanges {
    /// Keys the project did not have before
    pub added: Vec<String>,
    /// Existing keys whose command changed
    pub updated: Vec<String>,
}

/// Read a setup's script document: a JSON object of task name -> command
pub async fn read_scripts_document(path: &Path) -> Result<Map<String, Value>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let Value::Object(entries) = value else {
        anyhow::bail!("{} must contain a JSON object", path.display());
    };
    if let Some((key, _)) = entries.iter().find(|(_, v)| !v.is_string()) {
        anyhow::bail!(
            "Script '{}' in {} must be a string command",
            key,
            path.display()
        );
    }
    Ok(entries)
}

/// Overwrite every entry into the project's scripts. Setup entries win;
/// entries only the project has are left alone.
pub fn merge_scripts(project: &mut ProjectContext, entries: &Map<String, Value>) -> ScriptChanges {
    let scripts = project.scripts_mut();
    let mut changes = ScriptChanges::default();

    for (key, command) in entries {
        match scripts.insert(key.clone(), command.clone()) {
            None => changes.added.push(key.clone()),
            Some(previous) if previous != *command => changes.updated.push(key.clone()),
            Some(_) => {}
        }
    }

    changes
}
