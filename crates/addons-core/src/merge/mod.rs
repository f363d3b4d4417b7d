//! Applying a setup to a project
//!
//! Three independent steps run in a fixed order:
//! 1. script entries merged into package.json
//! 2. setup files copied into scripts/
//! 3. ignore entries merged into .gitignore
//!
//! A step whose fragment the setup does not ship is reported as not
//! applicable. An I/O error stops the run; steps already finished stay
//! applied.

pub mod files;
pub mod ignore;
pub mod scripts;

use crate::project::{is_present, ProjectContext, IGNORE_FILE, SCRIPTS_DIR};
use crate::templates::Template;
use anyhow::Result;
use std::fmt;

pub use files::{copy_setup_files, CopiedFile};
pub use ignore::{merge_ignore, merge_ignore_file};
pub use scripts::{merge_scripts, read_scripts_document, ScriptChanges};

/// Marker written when no product supplies one
pub const DEFAULT_IGNORE_MARKER: &str = "# Added by wp-plugin-addons";

#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Comment line written above the first ignore entry a run adds
    pub ignore_marker: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            ignore_marker: DEFAULT_IGNORE_MARKER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStep {
    Scripts,
    Files,
    Ignore,
}

impl fmt::Display for MergeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MergeStep::Scripts => "package.json scripts",
            MergeStep::Files => "script files",
            MergeStep::Ignore => ".gitignore",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The setup does not ship this fragment
    NotApplicable,
    Scripts(ScriptChanges),
    Files(Vec<CopiedFile>),
    /// Entries appended; empty when the ignore file already had them all
    Ignore(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: MergeStep,
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationReport {
    pub steps: Vec<StepReport>,
}

impl ApplicationReport {
    /// True when no step had anything to apply
    pub fn nothing_applicable(&self) -> bool {
        self.steps
            .iter()
            .all(|s| s.outcome == StepOutcome::NotApplicable)
    }
}

/// Apply `template` to `project`.
///
/// `on_step` runs after each step finishes so callers can report progress
/// before a later step fails.
pub async fn apply<F>(
    template: &Template,
    project: &mut ProjectContext,
    options: &MergeOptions,
    mut on_step: F,
) -> Result<ApplicationReport>
where
    F: FnMut(&StepReport) -> Result<()>,
{
    let mut report = ApplicationReport::default();

    // 1. Scripts
    let document = template.scripts_document();
    let outcome = if is_present(&document).await? {
        let entries = read_scripts_document(&document).await?;
        let changes = merge_scripts(project, &entries);
        project.save_manifest().await?;
        StepOutcome::Scripts(changes)
    } else {
        StepOutcome::NotApplicable
    };
    record(&mut report, MergeStep::Scripts, outcome, &mut on_step)?;

    // 2. Files
    let setup_dir = template.setup_dir();
    let outcome = if is_present(&setup_dir).await? {
        let dest = project.root().join(SCRIPTS_DIR);
        StepOutcome::Files(copy_setup_files(&setup_dir, &dest).await?)
    } else {
        StepOutcome::NotApplicable
    };
    record(&mut report, MergeStep::Files, outcome, &mut on_step)?;

    // 3. Ignore list
    let fragment = template.ignore_fragment();
    let outcome = if is_present(&fragment).await? {
        let target = project.root().join(IGNORE_FILE);
        StepOutcome::Ignore(merge_ignore_file(&fragment, &target, &options.ignore_marker).await?)
    } else {
        StepOutcome::NotApplicable
    };
    record(&mut report, MergeStep::Ignore, outcome, &mut on_step)?;

    Ok(report)
}

fn record<F>(
    report: &mut ApplicationReport,
    step: MergeStep,
    outcome: StepOutcome,
    on_step: &mut F,
) -> Result<()>
where
    F: FnMut(&StepReport) -> Result<()>,
{
    let entry = StepReport { step, outcome };
    on_step(&entry)?;
    report.steps.push(entry);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::MANIFEST_FILE;
    use crate::templates::catalog::{IGNORE_FRAGMENT, SCRIPTS_DOCUMENT, SETUP_DIR};
    use crate::templates::Catalog;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::path::Path;
    use tempfile::TempDir;

    struct Fixture {
        _setups: TempDir,
        project_dir: TempDir,
        template: Template,
    }

    async fn fixture(with_scripts: bool, with_files: bool, with_ignore: bool) -> Fixture {
        let setups = TempDir::new().unwrap();
        let setup = setups.path().join("block");
        std::fs::create_dir(&setup).unwrap();
        if with_scripts {
            std::fs::write(
                setup.join(SCRIPTS_DOCUMENT),
                r#"{"b": "z", "c": "w"}"#,
            )
            .unwrap();
        }
        if with_files {
            std::fs::create_dir(setup.join(SETUP_DIR)).unwrap();
            std::fs::write(setup.join(SETUP_DIR).join("sync.sh"), "#!/bin/sh\necho ok\n").unwrap();
        }
        if with_ignore {
            std::fs::write(setup.join(IGNORE_FRAGMENT), "dist\nbuild\n# comment\n").unwrap();
        }

        let project_dir = TempDir::new().unwrap();
        std::fs::write(
            project_dir.path().join(MANIFEST_FILE),
            "{\n\t\"name\": \"demo\",\n\t\"scripts\": {\n\t\t\"a\": \"x\",\n\t\t\"b\": \"y\"\n\t}\n}\n",
        )
        .unwrap();
        std::fs::write(project_dir.path().join(IGNORE_FILE), "node_modules\ndist\n").unwrap();

        let template = Catalog::new(setups.path().to_path_buf())
            .template("block")
            .await
            .unwrap();

        Fixture {
            _setups: setups,
            project_dir,
            template,
        }
    }

    async fn run(fx: &Fixture) -> ApplicationReport {
        let mut project = ProjectContext::resolve(fx.project_dir.path()).unwrap();
        apply(&fx.template, &mut project, &MergeOptions::default(), |_| Ok(()))
            .await
            .unwrap()
    }

    fn snapshot(root: &Path) -> (String, String, Vec<u8>) {
        (
            std::fs::read_to_string(root.join(MANIFEST_FILE)).unwrap(),
            std::fs::read_to_string(root.join(IGNORE_FILE)).unwrap(),
            std::fs::read(root.join(SCRIPTS_DIR).join("sync.sh")).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_full_application() {
        let fx = fixture(true, true, true).await;
        let report = run(&fx).await;

        let manifest: Value = serde_json::from_str(
            &std::fs::read_to_string(fx.project_dir.path().join(MANIFEST_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(manifest["scripts"], json!({"a": "x", "b": "z", "c": "w"}));

        let ignore = std::fs::read_to_string(fx.project_dir.path().join(IGNORE_FILE)).unwrap();
        assert_eq!(
            ignore.lines().collect::<Vec<_>>(),
            vec!["node_modules", "dist", DEFAULT_IGNORE_MARKER, "build"]
        );

        assert_eq!(
            report.steps.iter().map(|s| s.step).collect::<Vec<_>>(),
            vec![MergeStep::Scripts, MergeStep::Files, MergeStep::Ignore]
        );
        assert_eq!(
            report.steps[1].outcome,
            StepOutcome::Files(vec![CopiedFile {
                name: "sync.sh".to_string(),
                executable: true
            }])
        );
    }

    #[tokio::test]
    async fn test_second_application_changes_nothing() {
        let fx = fixture(true, true, true).await;
        run(&fx).await;
        let first = snapshot(fx.project_dir.path());

        let report = run(&fx).await;
        let second = snapshot(fx.project_dir.path());

        assert_eq!(first, second);
        assert_eq!(
            report.steps[0].outcome,
            StepOutcome::Scripts(ScriptChanges::default())
        );
        assert_eq!(report.steps[2].outcome, StepOutcome::Ignore(Vec::new()));
    }

    #[tokio::test]
    async fn test_missing_fragments_are_skipped() {
        let fx = fixture(false, false, false).await;
        let before = std::fs::read_to_string(fx.project_dir.path().join(MANIFEST_FILE)).unwrap();

        let report = run(&fx).await;

        assert!(report.nothing_applicable());
        assert!(!fx.project_dir.path().join(SCRIPTS_DIR).exists());
        let after = std::fs::read_to_string(fx.project_dir.path().join(MANIFEST_FILE)).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_manifest_written_with_tabs_and_newline() {
        let fx = fixture(true, false, false).await;
        run(&fx).await;
        let manifest = std::fs::read_to_string(fx.project_dir.path().join(MANIFEST_FILE)).unwrap();
        assert_eq!(
            manifest,
            "{\n\t\"name\": \"demo\",\n\t\"scripts\": {\n\t\t\"a\": \"x\",\n\t\t\"b\": \"z\",\n\t\t\"c\": \"w\"\n\t}\n}\n"
        );
    }

    #[tokio::test]
    async fn test_on_step_sees_each_step_in_order() {
        let fx = fixture(true, false, true).await;
        let mut project = ProjectContext::resolve(fx.project_dir.path()).unwrap();
        let mut seen = Vec::new();
        apply(&fx.template, &mut project, &MergeOptions::default(), |s| {
            seen.push((s.step, s.outcome == StepOutcome::NotApplicable));
            Ok(())
        })
        .await
        .unwrap();

        assert_eq!(
            seen,
            vec![
                (MergeStep::Scripts, false),
                (MergeStep::Files, true),
                (MergeStep::Ignore, false)
            ]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dangling_fragment_aborts_instead_of_skipping() {
        let fx = fixture(false, false, true).await;
        let before = std::fs::read_to_string(fx.project_dir.path().join(IGNORE_FILE)).unwrap();
        std::os::unix::fs::symlink(
            fx.template.root.join("missing.json"),
            fx.template.scripts_document(),
        )
        .unwrap();

        let mut project = ProjectContext::resolve(fx.project_dir.path()).unwrap();
        let mut seen = Vec::new();
        let result = apply(&fx.template, &mut project, &MergeOptions::default(), |s| {
            seen.push(s.step);
            Ok(())
        })
        .await;

        assert!(result.is_err());
        assert!(seen.is_empty());
        let after = std::fs::read_to_string(fx.project_dir.path().join(IGNORE_FILE)).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_failure_leaves_earlier_steps_applied() {
        let fx = fixture(true, false, true).await;
        // A directory where the ignore file should be makes the read fail
        std::fs::remove_file(fx.project_dir.path().join(IGNORE_FILE)).unwrap();
        std::fs::create_dir(fx.project_dir.path().join(IGNORE_FILE)).unwrap();

        let mut project = ProjectContext::resolve(fx.project_dir.path()).unwrap();
        let result = apply(&fx.template, &mut project, &MergeOptions::default(), |_| Ok(())).await;

        assert!(result.is_err());
        let manifest = std::fs::read_to_string(fx.project_dir.path().join(MANIFEST_FILE)).unwrap();
        assert!(manifest.contains("\"c\": \"w\""));
    }
}
