//! Keep the plugin header and block.json versions in step with package.json

use crate::project::ProjectContext;
use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

/// How deep `find` descends below its root
pub const MAX_SEARCH_DEPTH: usize = 16;

const PLUGIN_HEADER_MARKER: &str = "Plugin Name:";

static VERSION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\*[ \t]*Version:.*$").expect("valid regex"));

static VERSION_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""version"\s*:\s*"[^"]*""#).expect("valid regex"));

/// What a sync run touched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub version: String,
    /// Main plugin file, if one was found
    pub plugin_file: Option<PathBuf>,
    /// First block.json under src/, if any
    pub block_json: Option<PathBuf>,
    /// Files whose content changed
    pub updated: Vec<PathBuf>,
}

/// Depth-first search under `root` in directory enumeration order.
/// The first path accepted by `predicate` wins.
pub fn find<P>(root: &Path, predicate: P) -> Option<PathBuf>
where
    P: Fn(&Path) -> bool,
{
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(MAX_SEARCH_DEPTH)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_type().is_file() && predicate(entry.path()))
        .map(|entry| entry.into_path())
}

/// Root-level `*.php` file carrying a `Plugin Name:` header
pub fn find_plugin_file(root: &Path) -> Result<Option<PathBuf>> {
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("Failed to read {}", root.display()))?;

    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !name.ends_with(".php") || name.starts_with('.') || !entry.file_type()?.is_file() {
            continue;
        }
        let content = std::fs::read(entry.path())
            .with_context(|| format!("Failed to read {}", entry.path().display()))?;
        if String::from_utf8_lossy(&content).contains(PLUGIN_HEADER_MARKER) {
            return Ok(Some(entry.path()));
        }
    }

    Ok(None)
}

/// Replace the first ` * Version: ...` header line
pub fn rewrite_plugin_version(contents: &str, version: &str) -> String {
    let line = format!(" * Version:           {}", version);
    VERSION_HEADER.replace(contents, NoExpand(&line)).into_owned()
}

/// Replace the first `"version": "..."` field
pub fn rewrite_block_version(contents: &str, version: &str) -> String {
    let replacement = format!("\"version\": \"{}\"", version);
    VERSION_FIELD.replace(contents, NoExpand(&replacement)).into_owned()
}

fn update_file(path: &Path, updater: impl Fn(&str) -> String) -> Result<bool> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let next = updater(&contents);
    if next == contents {
        return Ok(false);
    }
    std::fs::write(path, next).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

/// Copy the package.json version into the plugin header and block.json.
/// Either file may be absent; that is reported, not an error.
pub fn sync_version(project: &ProjectContext) -> Result<SyncReport> {
    let version = project
        .version()
        .with_context(|| format!("No \"version\" in {}", project.manifest_path().display()))?
        .to_string();

    let root = project.root();
    let plugin_file = find_plugin_file(root)?;
    let block_json = find(&root.join("src"), |p| {
        p.file_name().is_some_and(|n| n == "block.json")
    });

    let mut updated = Vec::new();
    if let Some(path) = &plugin_file {
        if update_file(path, |c| rewrite_plugin_version(c, &version))? {
            updated.push(path.clone());
        }
    }
    if let Some(path) = &block_json {
        if update_file(path, |c| rewrite_block_version(c, &version))? {
            updated.push(path.clone());
        }
    }

    Ok(SyncReport {
        version,
        plugin_file,
        block_json,
        updated,
    })
}
