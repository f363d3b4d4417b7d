//! Setup catalog, metadata, and compatibility checking
//!
//! This module provides:
//! - Setup discovery from a local directory (`Catalog`)
//! - The resolved `Template` and its optional fragments
//! - Optional per-setup metadata (`TemplateManifest`)
//! - Version compatibility checking

pub mod catalog;
pub mod manifest;
pub mod version;

pub use catalog::{Catalog, Template};
pub use manifest::TemplateManifest;
pub use version::check_compatibility;
