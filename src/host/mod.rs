//! Host build orchestrator model
//!
//! The core never talks to a concrete orchestrator. It needs three seams:
//!
//! - [`UnitRegistry`]: where discovered units are declared
//! - [`UnitGraph`]: the realized root unit and its sub-units
//! - [`BuildUnit`]: one sub-unit, optionally exposing source sets
//!
//! [`Settings`], [`RootProject`] and [`Project`] are in-memory
//! implementations used by embedders and tests.

mod project;
mod settings;
pub mod source_set;

pub use project::{Project, RootProject};
pub use settings::{ProjectDescriptor, Settings};
pub use source_set::{SourceDirectorySet, SourceSet, SourceSetContainer};

use std::path::{Path, PathBuf};

/// Accepts unit declarations during the configuration phase.
pub trait UnitRegistry {
    /// Root directory of the composite build
    fn root_dir(&self) -> &Path;

    /// Declares a unit named `name` rooted at `project_dir`
    fn include(&mut self, name: &str, project_dir: PathBuf);

    /// Declares a unit at the host's default location `<root_dir>/<name>`.
    fn include_default(&mut self, name: &str) {
        let dir = self.root_dir().join(name);
        self.include(name, dir);
    }
}

/// A realized build unit.
pub trait BuildUnit {
    fn name(&self) -> &str;

    fn project_dir(&self) -> &Path;

    /// Directory the unit writes its build artifacts to
    fn build_dir(&self) -> &Path;

    fn set_build_dir(&mut self, dir: PathBuf);

    /// Source sets of the unit, if it has that capability at all.
    fn source_sets(&self) -> Option<&SourceSetContainer> {
        None
    }

    fn source_sets_mut(&mut self) -> Option<&mut SourceSetContainer> {
        None
    }
}

/// The realized unit graph of a composite build.
pub trait UnitGraph {
    type Unit: BuildUnit;

    /// Build directory of the root unit
    fn build_dir(&self) -> &Path;

    fn subunits(&self) -> &[Self::Unit];

    fn subunits_mut(&mut self) -> &mut [Self::Unit];
}
