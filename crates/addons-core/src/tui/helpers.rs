//! cliclack front ends for the project helpers

use super::prompts::CliclackPrompt;
use crate::helpers::{self, CommitOutcome, Git, SymlinkOutcome, SystemRunner};
use crate::product::ProductConfig;
use crate::project::ProjectContext;
use crate::prompt::with_prompt;
use anyhow::Result;
use std::path::Path;

/// Copy the package.json version into the plugin header and block.json
pub fn run_sync_version<C: ProductConfig>(config: &C, directory: &Path) -> Result<()> {
    cliclack::intro(format!("{} - sync version", config.display_name()))?;

    let project = ProjectContext::resolve(directory)?;
    let report = helpers::sync_version(&project)?;

    if report.plugin_file.is_none() {
        cliclack::log::warning("Main PHP file not found. Continuing without updating it...")?;
    }
    if report.block_json.is_none() {
        cliclack::log::warning("block.json not found in src/. Continuing without updating it...")?;
    }
    for path in &report.updated {
        let shown = path.strip_prefix(project.root()).unwrap_or(path);
        cliclack::log::success(format!("Version updated in {}", shown.display()))?;
    }

    cliclack::outro(format!("Version synced: {}", report.version))?;
    Ok(())
}

/// Ask for a plugins directory and link the project into it
pub fn run_symlink<C: ProductConfig>(config: &C, directory: &Path) -> Result<()> {
    cliclack::intro(format!("{} - create plugin symlink", config.display_name()))?;

    let mut prompt = CliclackPrompt::new();
    let outcome = with_prompt(&mut prompt, |p| helpers::create_symlink(directory, p))?;

    match outcome {
        SymlinkOutcome::Created { source, link } | SymlinkOutcome::Replaced { source, link } => {
            cliclack::log::success(format!(
                "Symlink created\nSource: {}\nTarget: {}",
                source.display(),
                link.display()
            ))?;
            cliclack::outro("Done")?;
        }
        SymlinkOutcome::Cancelled => cliclack::outro_cancel("Operation cancelled.")?,
    }
    Ok(())
}

/// Interactive add/commit/push
pub fn run_update_git<C: ProductConfig>(config: &C, directory: &Path) -> Result<()> {
    cliclack::intro(format!("{} - commit and push", config.display_name()))?;

    let runner = SystemRunner;
    let git = Git::new(&runner, directory);
    let mut prompt = CliclackPrompt::new();
    let outcome = with_prompt(&mut prompt, |p| helpers::commit_and_push(&git, p))?;

    match outcome {
        CommitOutcome::Pushed => cliclack::outro("Changes pushed")?,
        CommitOutcome::NothingToCommit => cliclack::outro("Nothing to do")?,
        CommitOutcome::Cancelled => cliclack::outro_cancel("Operation cancelled.")?,
    }
    Ok(())
}
