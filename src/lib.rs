//! multiproject - directory-driven composite builds
//!
//! Turns every child of one configured source root into a unit of a larger
//! composite build, without listing units by hand.
//!
//! # Core Concepts
//!
//! - **Source root**: the directory whose immediate children become units,
//!   one per child, named after the child's final path segment
//! - **Build root**: every unit writes its artifacts to `<build root>/<unit name>`
//! - **Shared-tree layout**: a unit's sources live at `<source root>/<unit>/<rest>`
//!   rather than the host default `<source root>/<unit>/src/<rest>`; default
//!   source-set directories are rewritten after each unit finishes configuring
//!
//! # Example Usage
//!
//! ```no_run
//! use multiproject::{Lifecycle, MultiProjectPlugin, RealFileSystem, Settings};
//!
//! # fn main() -> Result<(), multiproject::MultiProjectError> {
//! let mut plugin = MultiProjectPlugin::new(RealFileSystem::new(), "/work/repo");
//! plugin.set_source_directory("modules")?;
//!
//! let mut lifecycle = Lifecycle::new(plugin, Settings::new("/work/repo")).subprojects(|p| {
//!     p.apply_java();
//! });
//! let graph = lifecycle.run()?;
//!
//! println!("{}", lifecycle.plugin().layout(&graph).to_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`config`]: source and build root configuration
//! - [`discovery`]: listing the source root and declaring units
//! - [`relocate`]: per-unit build directories
//! - [`remap`]: default-layout to shared-tree source directory rewrite
//! - [`host`]: traits the host orchestrator implements, plus an in-memory model
//! - [`plugin`]: lifecycle wiring and the layout report

pub mod config;
pub mod discovery;
pub mod error;
pub mod fs;
pub mod host;
pub mod plugin;
pub mod relocate;
pub mod remap;
pub mod util;

pub use config::{ConfigError, MultiProjectConfig};
pub use discovery::{discover, DiscoveredUnit};
pub use error::{MultiProjectError, Result};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use host::{
    BuildUnit, Project, RootProject, Settings, SourceDirectorySet, SourceSet, SourceSetContainer,
    UnitGraph, UnitRegistry,
};
pub use plugin::{CompositeLayout, Lifecycle, MultiProjectPlugin};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
