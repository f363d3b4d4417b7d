//! Setup discovery from the local catalog directory

use super::manifest::TemplateManifest;
use crate::error::SetupError;
use crate::product::ProductConfig;
use crate::project::is_present;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Script entries merged into the project's package.json
pub const SCRIPTS_DOCUMENT: &str = "package-scripts.json";

/// Directory whose files are copied into the project's scripts/ directory
pub const SETUP_DIR: &str = "setup";

/// Ignore fragment merged into the project's .gitignore
pub const IGNORE_FRAGMENT: &str = ".gitignore";

/// Optional metadata file
pub const TEMPLATE_MANIFEST: &str = "template.yaml";

/// The directory holding one subdirectory per setup
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
}

impl Catalog {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve the catalog root: explicit override, then the product's
    /// environment variable, then the first existing default location.
    pub fn from_config<C: ProductConfig>(config: &C, override_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = override_dir {
            return Self::new(dir);
        }

        if let Some(dir) = std::env::var_os(config.setups_dir_env()).filter(|v| !v.is_empty()) {
            return Self::new(PathBuf::from(dir));
        }

        let candidates = config.default_setups_dirs();
        let root = candidates
            .iter()
            .find(|dir| dir.is_dir())
            .or_else(|| candidates.first())
            .cloned()
            .unwrap_or_else(|| PathBuf::from("setups"));
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List setup names in directory enumeration order.
    ///
    /// A missing root yields an empty list rather than an error.
    pub async fn list(&self) -> Result<Vec<String>> {
        if !is_present(&self.root).await? {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&self.root)
            .await
            .with_context(|| format!("Failed to read {}", self.root.display()))?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }

    /// Load a single setup by directory name
    pub async fn template(&self, name: &str) -> Result<Template> {
        let root = self.root.join(name);
        if !fs::metadata(&root).await.map(|m| m.is_dir()).unwrap_or(false) {
            return Err(SetupError::TemplateNotFound(name.to_string()).into());
        }

        let manifest_path = root.join(TEMPLATE_MANIFEST);
        let manifest = if is_present(&manifest_path).await? {
            let content = fs::read_to_string(&manifest_path)
                .await
                .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
            let manifest: TemplateManifest = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", manifest_path.display()))?;
            Some(manifest)
        } else {
            None
        };

        Ok(Template {
            name: name.to_string(),
            root,
            manifest,
        })
    }

    /// Descriptions for the selection list, `None` where a setup has none
    /// or its metadata cannot be read
    pub async fn descriptions(&self, names: &[String]) -> Vec<Option<String>> {
        let mut out = Vec::with_capacity(names.len());
        for name in names {
            let description = match self.template(name).await {
                Ok(template) => template.description().map(str::to_string),
                Err(_) => None,
            };
            out.push(description);
        }
        out
    }
}

/// A resolved setup directory. Never modified while applying.
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    pub root: PathBuf,
    pub manifest: Option<TemplateManifest>,
}

impl Template {
    pub fn description(&self) -> Option<&str> {
        self.manifest.as_ref()?.description.as_deref()
    }

    pub fn min_cli_version(&self) -> Option<&str> {
        self.manifest.as_ref()?.min_cli_version.as_deref()
    }

    pub fn scripts_document(&self) -> PathBuf {
        self.root.join(SCRIPTS_DOCUMENT)
    }

    pub fn setup_dir(&self) -> PathBuf {
        self.root.join(SETUP_DIR)
    }

    pub fn ignore_fragment(&self) -> PathBuf {
        self.root.join(IGNORE_FRAGMENT)
    }
}
