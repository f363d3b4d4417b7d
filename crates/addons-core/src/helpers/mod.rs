//! Helpers the scaffolded project runs after a setup is applied
//!
//! - `sync_version`: package.json version into the plugin header and block.json
//! - `symlink`: link the project into a WordPress plugins directory
//! - `git`: interactive add/commit/push

pub mod git;
pub mod symlink;
pub mod sync_version;

pub use git::{commit_and_push, CommandOutput, CommandRunner, CommitOutcome, Git, SystemRunner};
pub use symlink::{create_symlink, SymlinkOutcome};
pub use sync_version::{find, sync_version, SyncReport};
