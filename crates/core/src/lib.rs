//! Core types for the mosaic resolver.
//!
//! This crate holds everything that does not talk to the network:
//!
//! - [`config`] - the mosaic config types and their JSON Schema validator
//! - [`locator`] - where a repository's config lives (in-repo or in the registry)
//! - [`manifest`] - `package.json` parsing and validation
//! - [`project`] - the resolved [`Project`] records
//! - [`settings`] - explicit runtime [`Settings`]
//! - [`error`] - the [`Error`] type and its [`ErrorKind`] taxonomy
//!
//! ```rust,ignore
//! use mosaic_core::{ConfigLocation, SchemaValidator};
//!
//! let location = ConfigLocation::locate("luxass", "vercel", "next.js");
//! assert!(location.is_external);
//!
//! let validator = SchemaValidator::new()?;
//! let config = validator.parse_toml("[project]\nname = \"next.js\"")?;
//! ```

pub mod config;
pub mod error;
pub mod locator;
pub mod manifest;
pub mod project;
pub mod settings;

pub use config::{
    Deprecated, MosaicConfig, NpmSetting, ProjectConfig, ReadmeSetting, SchemaValidator,
    WebsiteOptions, WebsiteSetting, WorkspaceConfig, WorkspaceOverride,
};
pub use error::{Error, ErrorKind, Result, Violation};
pub use locator::{CONFIG_FILE, ConfigLocation, REGISTRY_DIR, parse_registry_path};
pub use manifest::{MANIFEST_FILE, PackageManifest, manifest_path, parse_manifest};
pub use project::{NpmPackage, Project, ProjectWebsite};
pub use settings::Settings;
