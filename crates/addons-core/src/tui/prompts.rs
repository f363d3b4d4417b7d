//! Charm-style CLI prompts using cliclack

use crate::error::SetupError;
use crate::merge::{self, MergeOptions, StepOutcome, StepReport};
use crate::product::ProductConfig;
use crate::project::ProjectContext;
use crate::prompt::{with_prompt, Prompt};
use crate::selector::{self, SelectedBy};
use crate::templates::{version, Catalog, Template};
use anyhow::Result;
use std::path::PathBuf;

/// CLI arguments for the apply command
#[derive(Debug, Clone, Default)]
pub struct ApplyArgs {
    /// Setups directory to use instead of the default catalog
    pub setups_dir: Option<PathBuf>,

    /// Setup name to apply
    pub template: Option<String>,

    /// Project directory (the binary passes the working directory)
    pub directory: PathBuf,
}

/// Terminal prompt backed by cliclack. Closes itself on drop so error paths
/// also hand the terminal back.
#[derive(Debug, Default)]
pub struct CliclackPrompt {
    closed: bool,
}

impl CliclackPrompt {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prompt for CliclackPrompt {
    fn say(&mut self, message: &str) -> Result<()> {
        cliclack::log::info(message)?;
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        anyhow::ensure!(!self.closed, "prompt already closed");
        let answer: String = cliclack::input(question).required(false).interact()?;
        Ok(answer)
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            console::Term::stderr().show_cursor()?;
        }
        Ok(())
    }
}

impl Drop for CliclackPrompt {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

/// Apply a setup to the project with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: ApplyArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Validate the target before anything else runs
    let mut project = ProjectContext::resolve(&args.directory)?;
    cliclack::log::info(format!(
        "Plugin: {}\nDirectory: {}",
        project.display_name(),
        project.root().display()
    ))?;

    // Step 2: Discover setups
    let catalog = Catalog::from_config(config, args.setups_dir.clone());
    let names = catalog.list().await?;
    if names.is_empty() {
        return Err(SetupError::EmptyCatalog(catalog.root().to_path_buf()).into());
    }

    // Step 3: Pick one
    let template = select_template(&catalog, &names, args.template.as_deref()).await?;

    if let Some(min) = template.min_cli_version() {
        if let Some(warning) =
            version::check_compatibility(cli_version, min, config.upgrade_command())
        {
            cliclack::log::warning(warning)?;
        }
    }

    // Step 4: Merge
    cliclack::log::step(format!("Applying setup: {}", template.name))?;
    let options = MergeOptions {
        ignore_marker: config.ignore_marker(),
    };
    let report = merge::apply(&template, &mut project, &options, log_step).await?;

    if report.nothing_applicable() {
        cliclack::log::info("This setup has nothing to apply")?;
    }

    // Step 5: Show next steps
    print_next_steps(config, &project)?;

    Ok(())
}

async fn select_template(
    catalog: &Catalog,
    names: &[String],
    requested: Option<&str>,
) -> Result<Template> {
    if let Some(name) = requested.filter(|n| !n.is_empty()) {
        if !names.iter().any(|n| n == name) {
            cliclack::log::warning(format!(
                "Setup '{}' not found. Available setups: {}",
                name,
                names.join(", ")
            ))?;
        }
    }

    let descriptions = if names.len() > 1 {
        catalog.descriptions(names).await
    } else {
        Vec::new()
    };

    let mut prompt = CliclackPrompt::new();
    let selection = with_prompt(&mut prompt, |p| {
        selector::select(names, &descriptions, requested, catalog.root(), p)
    })?;
    let template = catalog.template(&selection.name).await?;

    if selection.by == SelectedBy::OnlyOption {
        let label = match template.description() {
            Some(desc) => format!("{} - {}", template.name, desc),
            None => template.name.clone(),
        };
        cliclack::log::info(format!("Using setup: {}", label))?;
    }

    Ok(template)
}

fn log_step(report: &StepReport) -> Result<()> {
    match &report.outcome {
        StepOutcome::NotApplicable => {
            cliclack::log::remark(format!("No {} in this setup, skipped", report.step))?;
        }
        StepOutcome::Scripts(changes) => {
            let mut detail = Vec::new();
            if !changes.added.is_empty() {
                detail.push(format!("added {}", changes.added.join(", ")));
            }
            if !changes.updated.is_empty() {
                detail.push(format!("updated {}", changes.updated.join(", ")));
            }
            if detail.is_empty() {
                cliclack::log::success("Scripts already up to date in package.json")?;
            } else {
                cliclack::log::success(format!(
                    "Scripts added to package.json ({})",
                    detail.join("; ")
                ))?;
            }
        }
        StepOutcome::Files(files) => {
            for file in files {
                cliclack::log::success(format!("Script copied: {}", file.name))?;
            }
        }
        StepOutcome::Ignore(added) if added.is_empty() => {
            cliclack::log::success(".gitignore already up to date")?;
        }
        StepOutcome::Ignore(added) => {
            cliclack::log::success(format!(".gitignore updated ({} entries)", added.len()))?;
        }
    }
    Ok(())
}

fn print_next_steps<C: ProductConfig>(config: &C, project: &ProjectContext) -> Result<()> {
    let steps = config.next_steps(project);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Setup applied successfully!")?;

    Ok(())
}
