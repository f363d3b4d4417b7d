//! CLI prompts using cliclack (Charm-style inline prompts)
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod helpers;
#[cfg(feature = "tui")]
mod prompts;

#[cfg(feature = "tui")]
pub use helpers::{run_symlink, run_sync_version, run_update_git};
#[cfg(feature = "tui")]
pub use prompts::{run, ApplyArgs, CliclackPrompt};
