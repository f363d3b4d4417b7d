//! wp-addons CLI - apply setups to WordPress block plugin projects

use addons_core::tui::{self, ApplyArgs};
use addons_core::{ProductConfig, ProjectContext};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Setups bundled with the source tree, for `cargo run` and `cargo install --path`
const BUNDLED_SETUPS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../setups");

/// wp-addons product configuration
#[derive(Clone)]
pub struct AddonsConfig;

impl ProductConfig for AddonsConfig {
    fn name(&self) -> &'static str {
        "wp-plugin-addons"
    }

    fn display_name(&self) -> &'static str {
        "WP Plugin Addons"
    }

    fn setups_dir_env(&self) -> &'static str {
        "WP_ADDONS_SETUPS_DIR"
    }

    fn default_setups_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(PathBuf::from))
        {
            dirs.push(exe_dir.join("setups"));
            dirs.push(exe_dir.join("../share/wp-addons/setups"));
        }
        dirs.push(PathBuf::from(BUNDLED_SETUPS_DIR));
        dirs
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install wp-addons --force"
    }

    fn next_steps(&self, _project: &ProjectContext) -> Vec<String> {
        vec![
            "Run \"npm install\" if needed".to_string(),
            "Use \"npm run symlink\" to create the plugin symlink".to_string(),
            "Use \"npm run updateGIT\" to commit/push".to_string(),
        ]
    }
}

#[derive(Parser, Debug)]
#[command(name = "wp-addons")]
#[command(about = "Apply setups (scripts, helper files, .gitignore entries) to WordPress block plugin projects")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Apply arguments when no subcommand is given (`wp-addons <setup>`)
    #[command(flatten)]
    pub apply: CliApplyArgs,

    /// Project directory (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub directory: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply a setup to the project
    Apply(CliApplyArgs),
    /// Copy the package.json version into the plugin header and block.json
    SyncVersion,
    /// Symlink the project into a WordPress plugins directory
    Symlink,
    /// Show changes, then add, commit and push them
    UpdateGit,
}

#[derive(clap::Args, Debug, Default)]
pub struct CliApplyArgs {
    /// Setup name to apply (prompted for when omitted or unknown)
    pub template: Option<String>,

    /// Directory containing setups, instead of the bundled catalog
    #[arg(long = "setups-dir")]
    pub setups_dir: Option<PathBuf>,
}

impl CliApplyArgs {
    fn into_apply_args(self, directory: PathBuf) -> ApplyArgs {
        ApplyArgs {
            setups_dir: self.setups_dir,
            template: self.template,
            directory,
        }
    }
}

async fn dispatch(args: Args) -> Result<()> {
    let config = AddonsConfig;

    // The only place the working directory is read
    let directory = match args.directory {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match args.command {
        Some(Command::Apply(apply_args)) => {
            tui::run(&config, apply_args.into_apply_args(directory), CLI_VERSION).await
        }
        Some(Command::SyncVersion) => tui::run_sync_version(&config, &directory),
        Some(Command::Symlink) => tui::run_symlink(&config, &directory),
        Some(Command::UpdateGit) => tui::run_update_git(&config, &directory),
        None => {
            // No subcommand provided, default to apply
            tui::run(&config, args.apply.into_apply_args(directory), CLI_VERSION).await
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let result = dispatch(args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(e) = result {
        let _ = cliclack::outro_cancel(format!("{:#}", e));
        std::process::exit(1);
    }
}
