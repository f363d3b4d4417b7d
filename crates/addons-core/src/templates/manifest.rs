//! Optional per-setup metadata (setups/<name>/template.yaml)

use serde::{Deserialize, Serialize};

/// Metadata a setup may declare next to its fragments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// One-line description shown in the selection list
    #[serde(default)]
    pub description: Option<String>,

    /// Oldest CLI version this setup was written for
    #[serde(default)]
    pub min_cli_version: Option<String>,
}
