//! Addons Core - apply setup templates to existing plugin projects
//!
//! A setup is a directory in a local catalog that may carry script entries
//! for `package.json`, helper files for the project's `scripts/` directory,
//! and `.gitignore` entries. Applying one merges all three into a project
//! without losing anything the project already had.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - target resolution (`project`), setup
//!   discovery (`templates`), selection (`selector`), and the merge steps
//!   (`merge`), plus the project helpers (`helpers`)
//! - **Layer 2: Product Configuration** - the `ProductConfig` trait a binary implements
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use addons_core::{merge, templates::Catalog, ProjectContext};
//!
//! let mut project = ProjectContext::resolve(&dir)?;
//! let catalog = Catalog::new(setups_dir);
//! let template = catalog.template("create-block-carmo-addon").await?;
//! let report = merge::apply(&template, &mut project, &Default::default(), |_| Ok(())).await?;
//! ```

pub mod error;
pub mod helpers;
pub mod merge;
pub mod product;
pub mod project;
pub mod prompt;
pub mod selector;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::SetupError;
pub use merge::{apply, ApplicationReport, MergeOptions, StepOutcome};
pub use product::ProductConfig;
pub use project::ProjectContext;
pub use prompt::Prompt;
pub use selector::{select, Selection};
pub use templates::{Catalog, Template};

#[cfg(feature = "tui")]
pub use tui::run;
