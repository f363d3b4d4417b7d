//! Ignore-list union: append setup entries the project's .gitignore lacks

use crate::project::is_present;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;

/// Lines of a fragment that are merge candidates: trimmed, non-empty,
/// not comments
pub fn candidate_lines(fragment: &str) -> Vec<&str> {
    fragment
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Append the candidates of `fragment` missing from `existing`.
///
/// Existing content is never rewritten. The marker line precedes the first
/// appended entry. Returns the new content and the appended entries; the
/// content is `None` when nothing was appended.
pub fn merge_ignore(
    existing: &str,
    fragment: &str,
    marker: &str,
) -> (Option<String>, Vec<String>) {
    let mut seen: HashSet<&str> = existing.lines().map(str::trim).collect();
    let mut buffer = existing.to_string();
    let mut added = Vec::new();

    for line in candidate_lines(fragment) {
        if !seen.insert(line) {
            continue;
        }
        if added.is_empty() {
            if !buffer.is_empty() && !buffer.ends_with('\n') {
                buffer.push('\n');
            }
            buffer.push_str(marker);
            buffer.push('\n');
        }
        buffer.push_str(line);
        buffer.push('\n');
        added.push(line.to_string());
    }

    if added.is_empty() {
        (None, added)
    } else {
        (Some(buffer), added)
    }
}

/// Merge the fragment file into the project's ignore file, writing only if
/// something was added
pub async fn merge_ignore_file(
    fragment_path: &Path,
    ignore_path: &Path,
    marker: &str,
) -> Result<Vec<String>> {
    let fragment = fs::read_to_string(fragment_path)
        .await
        .with_context(|| format!("Failed to read {}", fragment_path.display()))?;

    let existing = if is_present(ignore_path).await? {
        fs::read_to_string(ignore_path)
            .await
            .with_context(|| format!("Failed to read {}", ignore_path.display()))?
    } else {
        String::new()
    };

    let (content, added) = merge_ignore(&existing, &fragment, marker);
    if let Some(content) = content {
        fs::write(ignore_path, content)
            .await
            .with_context(|| format!("Failed to write {}", ignore_path.display()))?;
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const MARKER: &str = "# Added by wp-plugin-addons";

    #[test]
    fn test_union_without_duplicates() {
        let (content, added) =
            merge_ignore("node_modules\ndist\n", "dist\nbuild\n# comment\n", MARKER);
        let content = content.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["node_modules", "dist", MARKER, "build"]);
        assert_eq!(added, vec!["build".to_string()]);
    }

    #[test]
    fn test_nothing_new_means_no_write() {
        let fragment = "build\n\n# only comments\n  dist  \n";
        let (content, added) = merge_ignore("dist\nbuild\n", fragment, MARKER);
        assert!(content.is_none());
        assert!(added.is_empty());
    }

    #[test]
    fn test_existing_lines_compared_trimmed() {
        let (content, _) = merge_ignore("  build  \n", "build\n", MARKER);
        assert!(content.is_none());
    }

    #[test]
    fn test_unterminated_last_line_is_terminated() {
        let (content, _) = merge_ignore("vendor", "build", MARKER);
        assert_eq!(content.unwrap(), format!("vendor\n{}\nbuild\n", MARKER));
    }

    #[test]
    fn test_empty_target() {
        let (content, _) = merge_ignore("", "build\n*.zip\n", MARKER);
        assert_eq!(content.unwrap(), format!("{}\nbuild\n*.zip\n", MARKER));
    }

    #[test]
    fn test_fragment_duplicates_added_once() {
        let (content, added) = merge_ignore("", "build\nbuild\n", MARKER);
        assert_eq!(added, vec!["build".to_string()]);
        assert_eq!(content.unwrap().matches("build").count(), 1);
    }

    #[test]
    fn test_existing_comments_untouched() {
        let existing = "# mine\n\nnode_modules\n";
        let (content, _) = merge_ignore(existing, "# theirs\nbuild\n", MARKER);
        let content = content.unwrap();
        assert!(content.starts_with(existing));
        assert!(!content.contains("# theirs"));
    }

    #[tokio::test]
    async fn test_file_merge_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let fragment = dir.path().join("fragment");
        let target = dir.path().join(".gitignore");
        std::fs::write(&fragment, "build\n").unwrap();

        let first = merge_ignore_file(&fragment, &target, MARKER).await.unwrap();
        let after_first = std::fs::read_to_string(&target).unwrap();
        let second = merge_ignore_file(&fragment, &target, MARKER).await.unwrap();
        let after_second = std::fs::read_to_string(&target).unwrap();

        assert_eq!(first, vec!["build".to_string()]);
        assert!(second.is_empty());
        assert_eq!(after_first, after_second);
        assert_eq!(after_second.matches(MARKER).count(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dangling_ignore_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let fragment = dir.path().join("fragment");
        let target = dir.path().join(".gitignore");
        std::fs::write(&fragment, "build\n").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), &target).unwrap();

        assert!(merge_ignore_file(&fragment, &target, MARKER).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_target_created() {
        let dir = TempDir::new().unwrap();
        let fragment = dir.path().join("fragment");
        let target = dir.path().join(".gitignore");
        std::fs::write(&fragment, "# just a comment\n").unwrap();

        let added = merge_ignore_file(&fragment, &target, MARKER).await.unwrap();
        assert!(added.is_empty());
        assert!(!target.exists());
    }
}
