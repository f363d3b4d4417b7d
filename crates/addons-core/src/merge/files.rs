//! Setup file copying into the project's scripts directory

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use walkdir::WalkDir;

/// File suffixes that get the executable bit after copying
pub const EXECUTABLE_SUFFIXES: &[&str] = &[".js", ".mjs", ".cjs", ".sh", ".py"];

/// A file written into the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedFile {
    /// Path relative to the destination directory, forward slashes
    pub name: String,
    pub executable: bool,
}

/// Copy every entry of `source_dir` into `dest_dir`, overwriting files of the
/// same name. Subdirectories are recreated. Script files are marked 0755.
pub async fn copy_setup_files(source_dir: &Path, dest_dir: &Path) -> Result<Vec<CopiedFile>> {
    fs::create_dir_all(dest_dir)
        .await
        .with_context(|| format!("Failed to create directory: {}", dest_dir.display()))?;

    let mut copied = Vec::new();

    for entry in WalkDir::new(source_dir).min_depth(1) {
        let entry = entry.with_context(|| format!("Failed to read {}", source_dir.display()))?;
        let relative = entry
            .path()
            .strip_prefix(source_dir)
            .with_context(|| format!("Unexpected path {}", entry.path().display()))?;
        let target = dest_dir.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .await
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
            continue;
        }

        fs::copy(entry.path(), &target).await.with_context(|| {
            format!(
                "Failed to copy {} to {}",
                entry.path().display(),
                target.display()
            )
        })?;

        let name = relative.to_string_lossy().replace('\\', "/");
        let executable = is_executable_script(&name);
        if executable {
            make_executable(&target).await?;
        }

        copied.push(CopiedFile { name, executable });
    }

    Ok(copied)
}

fn is_executable_script(name: &str) -> bool {
    EXECUTABLE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

#[cfg(unix)]
async fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .await
        .with_context(|| format!("Failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
async fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
