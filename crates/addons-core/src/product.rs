//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface a binary implements to configure where
//! setups are discovered and how results are presented.

use crate::project::ProjectContext;
use std::path::PathBuf;

/// Configuration trait for the setup applier
///
/// A product defines:
/// - Product identity (name, display name)
/// - Where the setup catalog lives
/// - The marker written above merged ignore entries
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the marker comment)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable name for overriding the setups directory
    fn setups_dir_env(&self) -> &'static str;

    /// Candidate setups directories, most preferred first
    fn default_setups_dirs(&self) -> Vec<PathBuf>;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Generate the "next steps" instructions after a setup is applied
    fn next_steps(&self, project: &ProjectContext) -> Vec<String>;

    /// Comment line written once above ignore entries added by a run
    fn ignore_marker(&self) -> String {
        format!("# Added by {}", self.name())
    }
}
