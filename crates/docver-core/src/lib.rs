//! Version and substitution helpers for the Coopr documentation build.
//!
//! This crate holds everything the docs build needs before the renderer
//! runs, independent of the command-line front end:
//! - Build descriptor parsing and release-form derivation.
//! - The documentation settings record.
//! - Renderer substitutions (epilog, short title, copyright).
//! - The versions index served to the theme's version switcher.

mod config;
mod descriptor;
mod error;
mod substitutions;
mod version;
mod versions_index;

/// Documentation settings loaded once per build.
pub use config::DocsConfig;
/// Build descriptor parsing.
pub use descriptor::{resolve_from_path, resolve_from_str, version_report};
/// Error types for extraction and configuration loading.
pub use error::{ConfigError, VersionExtractionError};
/// Values handed to the documentation renderer.
pub use substitutions::Substitutions;
/// Resolved version model and suffix handling.
pub use version::{DEFAULT_SUFFIX_MARKER, VersionInfo, versions_match};
/// Version switcher index and classification.
pub use versions_index::{VersionEntry, VersionStatus, VersionsData};
