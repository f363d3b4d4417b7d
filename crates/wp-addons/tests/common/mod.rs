//! Shared testing utilities for wp-addons CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch plugin project plus a private setups catalog.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    project: PathBuf,
    setups: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Empty project directory (no package.json yet) and empty catalog.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let project = root.path().join("my-block");
        let setups = root.path().join("setups");
        fs::create_dir_all(&project).expect("Failed to create project directory");
        fs::create_dir_all(&setups).expect("Failed to create setups directory");
        Self { root, project, setups }
    }

    pub fn project(&self) -> &Path {
        &self.project
    }

    pub fn setups(&self) -> &Path {
        &self.setups
    }

    pub fn write_manifest(&self, content: &str) {
        fs::write(self.project.join("package.json"), content).expect("Failed to write package.json");
    }

    /// Create a setup with the given script document, setup files and ignore fragment.
    pub fn add_setup(&self, name: &str, scripts: Option<&str>, files: &[(&str, &str)], ignore: Option<&str>) {
        let dir = self.setups.join(name);
        fs::create_dir_all(&dir).expect("Failed to create setup directory");
        if let Some(scripts) = scripts {
            fs::write(dir.join("package-scripts.json"), scripts).unwrap();
        }
        if !files.is_empty() {
            fs::create_dir_all(dir.join("setup")).unwrap();
            for (file, content) in files {
                fs::write(dir.join("setup").join(file), content).unwrap();
            }
        }
        if let Some(ignore) = ignore {
            fs::write(dir.join(".gitignore"), ignore).unwrap();
        }
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.project.join(relative)).unwrap_or_default()
    }

    /// `wp-addons` run inside the project with the private catalog.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("wp-addons").expect("Failed to find wp-addons binary");
        cmd.current_dir(&self.project)
            .env("WP_ADDONS_SETUPS_DIR", &self.setups)
            .env("NO_COLOR", "1");
        cmd
    }
}
