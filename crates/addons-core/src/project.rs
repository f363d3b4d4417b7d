//! Target project resolution and `package.json` persistence

use crate::error::SetupError;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Manifest file every target project must have at its root
pub const MANIFEST_FILE: &str = "package.json";

/// Directory (relative to the project root) that receives copied setup files
pub const SCRIPTS_DIR: &str = "scripts";

/// Ignore file at the project root
pub const IGNORE_FILE: &str = ".gitignore";

/// A validated target project, produced once per run
#[derive(Debug, Clone)]
pub struct ProjectContext {
    root: PathBuf,
    manifest: Map<String, Value>,
}

impl ProjectContext {
    /// Validate `dir` as a project and load its manifest.
    ///
    /// Performs no writes. Fails with [`SetupError::NotAProject`] when
    /// `package.json` is missing and with [`SetupError::MalformedManifest`]
    /// when it exists but cannot be read as a UTF-8 JSON object with an
    /// object-valued (or absent) `scripts` field.
    pub fn resolve(dir: &Path) -> Result<Self, SetupError> {
        let root = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
        let manifest_path = root.join(MANIFEST_FILE);

        let malformed = |reason: String| SetupError::MalformedManifest {
            path: manifest_path.clone(),
            reason,
        };

        let content = match std::fs::read(&manifest_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SetupError::NotAProject(root));
            }
            Err(e) => return Err(malformed(e.to_string())),
        };

        let value: Value =
            serde_json::from_slice(&content).map_err(|e| malformed(e.to_string()))?;
        let Value::Object(manifest) = value else {
            return Err(malformed("expected a JSON object".to_string()));
        };

        match manifest.get("scripts") {
            None | Some(Value::Object(_)) => {}
            Some(_) => return Err(malformed("\"scripts\" must be an object".to_string())),
        }

        Ok(Self { root, manifest })
    }

    /// Absolute project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Declared package name, for display only
    pub fn name(&self) -> Option<&str> {
        self.manifest.get("name").and_then(Value::as_str)
    }

    /// Declared package version
    pub fn version(&self) -> Option<&str> {
        self.manifest.get("version").and_then(Value::as_str)
    }

    /// Name to show in headers: the package name, else the directory name
    pub fn display_name(&self) -> String {
        self.name()
            .map(str::to_string)
            .or_else(|| {
                self.root
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| self.root.display().to_string())
    }

    /// Current script entries, empty if the manifest declares none
    pub fn scripts(&self) -> Map<String, Value> {
        self.manifest
            .get("scripts")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }

    /// Mutable access to the `scripts` object, created at the end of the
    /// manifest when missing
    pub fn scripts_mut(&mut self) -> &mut Map<String, Value> {
        let entry = self
            .manifest
            .entry("scripts")
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        match entry {
            Value::Object(map) => map,
            _ => unreachable!("scripts was just made an object"),
        }
    }

    /// Serialize the manifest the way npm tooling writes it: one tab per
    /// level, original key order, trailing newline.
    pub fn render_manifest(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.manifest
            .serialize(&mut ser)
            .context("Failed to serialize package.json")?;
        let mut out = String::from_utf8(buf).context("package.json is not valid UTF-8")?;
        out.push('\n');
        Ok(out)
    }

    /// Write the in-memory manifest back to `package.json`
    pub async fn save_manifest(&self) -> Result<()> {
        let path = self.manifest_path();
        let content = self.render_manifest()?;
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// Whether anything (a dangling symlink included) occupies `path`.
/// Errors other than "not found" propagate.
pub async fn is_present(path: &Path) -> Result<bool> {
    match tokio::fs::symlink_metadata(path).await {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("Failed to inspect {}", path.display())),
    }
}
