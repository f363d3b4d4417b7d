//! Link the project directory into an external tree (e.g. wp-content/plugins)

use crate::prompt::{is_affirmative, Prompt};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymlinkOutcome {
    Created { source: PathBuf, link: PathBuf },
    /// An existing link was removed and recreated
    Replaced { source: PathBuf, link: PathBuf },
    /// The operator gave no destination or declined the overwrite
    Cancelled,
}

/// Ask for a destination directory and create `<destination>/<project dir
/// name>` pointing at `project_root`.
///
/// Relative destinations resolve against `project_root`. A missing
/// destination or a non-link already occupying the name is an error.
pub fn create_symlink(project_root: &Path, prompt: &mut dyn Prompt) -> Result<SymlinkOutcome> {
    let name = project_root
        .file_name()
        .with_context(|| format!("Cannot derive a name from {}", project_root.display()))?;

    prompt.say(&format!("Plugin directory: {}", project_root.display()))?;
    let answer = prompt.ask(
        "Enter the full path to the WordPress plugins directory \
         (e.g. /Users/me/Sites/my-site/wp-content/plugins)",
    )?;
    let answer = answer.trim();
    if answer.is_empty() {
        prompt.say("Directory cannot be empty. Operation cancelled.")?;
        return Ok(SymlinkOutcome::Cancelled);
    }

    let destination = project_root.join(answer);
    if !destination.is_dir() {
        anyhow::bail!("The directory {} does not exist", destination.display());
    }

    let link = destination.join(name);
    let mut replaced = false;

    if let Ok(meta) = std::fs::symlink_metadata(&link) {
        if !meta.file_type().is_symlink() {
            anyhow::bail!(
                "A folder or file already exists at {}. Remove or rename it first.",
                link.display()
            );
        }

        prompt.say(&format!("A symlink already exists at {}", link.display()))?;
        let overwrite = prompt.ask("Do you want to overwrite it? (y/n)")?;
        if !is_affirmative(&overwrite) {
            prompt.say("Operation cancelled.")?;
            return Ok(SymlinkOutcome::Cancelled);
        }
        remove_link(&link)?;
        replaced = true;
    }

    symlink_dir(project_root, &link)
        .with_context(|| format!("Failed to create symlink at {}", link.display()))?;

    let source = project_root.to_path_buf();
    Ok(if replaced {
        SymlinkOutcome::Replaced { source, link }
    } else {
        SymlinkOutcome::Created { source, link }
    })
}

fn remove_link(link: &Path) -> Result<()> {
    // Directory symlinks on Windows are removed with remove_dir
    std::fs::remove_file(link)
        .or_else(|_| std::fs::remove_dir(link))
        .with_context(|| format!("Failed to remove {}", link.display()))
}

#[cfg(unix)]
fn symlink_dir(source: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(source, link)
}

#[cfg(windows)]
fn symlink_dir(source: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(source, link)
}
