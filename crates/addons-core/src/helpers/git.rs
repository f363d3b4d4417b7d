//! Interactive add/commit/push wrapper around git

use crate::error::SetupError;
use crate::prompt::{is_affirmative, Prompt};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Exit code and interleaved stdout/stderr of one external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: i32,
    pub output: String,
}

/// Seam for running external programs
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput>;
}

/// Runs programs on the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .with_context(|| format!("Failed to run {} {}", program, args.join(" ")))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandOutput {
            // Killed by a signal: no code
            code: output.status.code().unwrap_or(-1),
            output: combined,
        })
    }
}

/// git invocations rooted at a working tree
pub struct Git<'a, R: CommandRunner> {
    runner: &'a R,
    root: PathBuf,
}

impl<'a, R: CommandRunner> Git<'a, R> {
    pub fn new(runner: &'a R, root: &Path) -> Self {
        Self {
            runner,
            root: root.to_path_buf(),
        }
    }

    /// Run git; a non-zero exit becomes [`SetupError::CommandFailed`]
    pub fn run(&self, args: &[&str]) -> Result<String> {
        let result = self.runner.run("git", args, &self.root)?;
        if result.code != 0 {
            return Err(SetupError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                code: result.code,
                output: result.output.trim_end().to_string(),
            }
            .into());
        }
        Ok(result.output)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Working tree was clean; nothing staged
    NothingToCommit,
    Cancelled,
    Pushed,
}

/// Ask for a message, show the pending changes, confirm, then
/// `git add .`, `git commit -m <message>`, `git push`.
pub fn commit_and_push<R: CommandRunner>(
    git: &Git<'_, R>,
    prompt: &mut dyn Prompt,
) -> Result<CommitOutcome> {
    let message = prompt.ask("Commit message")?;
    let message = message.trim();
    if message.is_empty() {
        return Err(SetupError::EmptyCommitMessage.into());
    }

    prompt.say(git.run(&["status", "-sb"])?.trim_end())?;
    let diff = git.run(&["diff", "--stat"])?;
    if !diff.trim().is_empty() {
        prompt.say(diff.trim_end())?;
    }

    if git.run(&["status", "--porcelain"])?.trim().is_empty() {
        prompt.say("No changes to commit.")?;
        return Ok(CommitOutcome::NothingToCommit);
    }

    let answer = prompt.ask("Continue with add/commit/push? (y/N)")?;
    if !is_affirmative(&answer) {
        prompt.say("Operation cancelled.")?;
        return Ok(CommitOutcome::Cancelled);
    }

    for args in [
        vec!["add", "."],
        vec!["commit", "-m", message],
        vec!["push"],
    ] {
        let output = git.run(&args)?;
        if !output.trim().is_empty() {
            prompt.say(output.trim_end())?;
        }
    }

    Ok(CommitOutcome::Pushed)
}
