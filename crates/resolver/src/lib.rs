//! Mosaic resolution engine.
//!
//! Given `owner/repository`, the [`Resolver`]:
//! 1. locates the mosaic config (in the repository itself for the home
//!    owner, in the home registry otherwise)
//! 2. validates it against the config schema
//! 3. assembles one project, or one per workspace package, enriching each
//!    with repository metadata, npm data and a resolved version
//!
//! Providers are injected as trait objects so the engine can be driven by
//! the HTTP clients or by in-memory fakes.

pub mod assembler;
pub mod batch;
pub mod engine;
pub mod manifest;
pub mod registry;
pub mod version;
pub mod workspace;

pub use assembler::ProjectAssembler;
pub use batch::{BatchOutcome, RepositoryRef};
pub use engine::{ProjectListing, ResolvedConfig, Resolver};
pub use manifest::ManifestReader;
pub use registry::registry_repositories;
pub use version::{ManifestFallback, VersionResolver};
pub use workspace::WorkspaceExpander;
