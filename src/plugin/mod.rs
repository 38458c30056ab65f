//! Wiring of discovery, relocation and remapping into the host lifecycle
//!
//! The host drives [`MultiProjectPlugin`] through three extension points:
//!
//! 1. [`settings_evaluated`](MultiProjectPlugin::settings_evaluated), once
//!    all user configuration has run: discovers and declares units.
//! 2. [`root_realized`](MultiProjectPlugin::root_realized), once the unit
//!    graph exists: relocates build directories and names the units whose
//!    remap must be scheduled.
//! 3. [`unit_evaluated`](MultiProjectPlugin::unit_evaluated), after each
//!    scheduled unit has finished its own configuration: remaps its source sets.
//!
//! [`Lifecycle`] drives these points in order for the in-memory host model.

mod layout;
mod lifecycle;

pub use layout::{CompositeLayout, SourceSetLayout, UnitLayout};
pub use lifecycle::Lifecycle;

use crate::config::{ConfigError, MultiProjectConfig};
use crate::discovery::{self, DiscoveredUnit};
use crate::error::{MultiProjectError, Result};
use crate::fs::FileSystem;
use crate::host::{BuildUnit, UnitGraph, UnitRegistry};
use crate::relocate;
use crate::remap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Configuring,
    SettingsEvaluated,
}

pub struct MultiProjectPlugin<F: FileSystem> {
    fs: F,
    config: MultiProjectConfig,
    phase: Phase,
    discovered: Vec<DiscoveredUnit>,
}

impl<F: FileSystem> MultiProjectPlugin<F> {
    /// Attaches the plugin with the default configuration for `root_dir`.
    pub fn new(fs: F, root_dir: impl Into<PathBuf>) -> Self {
        Self::with_config(fs, MultiProjectConfig::new(root_dir))
    }

    pub fn with_config(fs: F, config: MultiProjectConfig) -> Self {
        debug!(
            source_dir = %config.source_directory().display(),
            build_dir = ?config.build_directory(),
            "Multiproject plugin attached"
        );
        Self {
            fs,
            config,
            phase: Phase::Configuring,
            discovered: Vec::new(),
        }
    }

    pub fn config(&self) -> &MultiProjectConfig {
        &self.config
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// Units found by the discovery pass, empty before it ran.
    pub fn discovered(&self) -> &[DiscoveredUnit] {
        &self.discovered
    }

    /// Applies a configuration change. Rejected once settings were evaluated.
    pub fn configure<T>(
        &mut self,
        change: impl FnOnce(&mut MultiProjectConfig, &dyn FileSystem) -> std::result::Result<T, ConfigError>,
    ) -> Result<T> {
        if self.phase != Phase::Configuring {
            return Err(MultiProjectError::ConfigFrozen);
        }
        Ok(change(&mut self.config, &self.fs)?)
    }

    pub fn set_source_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.configure(|config, fs| config.set_source_directory(fs, path))
    }

    pub fn set_build_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.configure(|config, fs| config.set_build_directory(fs, path))
    }

    /// Discovers the units under the source root and declares them with `registry`.
    /// Freezes the configuration.
    pub fn settings_evaluated(&mut self, registry: &mut dyn UnitRegistry) -> Result<&[DiscoveredUnit]> {
        if self.phase != Phase::Configuring {
            return Err(MultiProjectError::AlreadyEvaluated);
        }
        self.config.validate()?;

        self.discovered =
            discovery::discover_and_register(&self.fs, self.config.source_directory(), registry)?;
        self.phase = Phase::SettingsEvaluated;

        Ok(&self.discovered)
    }

    /// The directory sub-units of `graph` are relocated under: the configured
    /// build directory, or the root unit's own build directory when unset.
    pub fn build_root<'a, G: UnitGraph>(&'a self, graph: &'a G) -> &'a Path {
        self.config.build_root(graph.build_dir())
    }

    /// Relocates every sub-unit's build directory under the
    /// [build root](Self::build_root). Returns the names of the units that need
    /// [`unit_evaluated`](Self::unit_evaluated) once they finish configuring.
    pub fn root_realized<G: UnitGraph>(&self, graph: &mut G) -> Result<Vec<String>> {
        let build_root = self.build_root(&*graph).to_path_buf();
        let assignments = relocate::relocate(&build_root, graph)?;
        Ok(assignments.into_iter().map(|(name, _)| name).collect())
    }

    /// Remaps the source sets of one unit against the source root.
    pub fn unit_evaluated(&self, unit: &mut dyn BuildUnit) -> usize {
        let rewritten = remap::remap_unit(self.config.source_directory(), unit);
        if rewritten > 0 {
            info!(unit = %unit.name(), rewritten, "Source sets moved to the shared tree");
        }
        rewritten
    }

    /// Reports the layout of a realized graph against the configured source root.
    pub fn layout<G: UnitGraph>(&self, graph: &G) -> CompositeLayout {
        CompositeLayout::from_graph(self.config.source_directory(), self.build_root(graph), graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use crate::host::{Project, RootProject, Settings};

    fn plugin() -> MultiProjectPlugin<MockFileSystem> {
        let fs = MockFileSystem::with_root(PathBuf::from("/repo"));
        fs.add_dir("src/app");
        fs.add_dir("src/lib");
        fs.add_dir("modules/core");
        fs.add_file("settings.toml", "");
        MultiProjectPlugin::new(fs, "/repo")
    }

    #[test]
    fn test_settings_evaluated_registers_units() {
        let mut plugin = plugin();
        let mut settings = Settings::new("/repo");

        let units = plugin.settings_evaluated(&mut settings).unwrap();

        assert_eq!(units.len(), 2);
        assert!(settings.project("app").is_some());
        assert!(settings.project("lib").is_some());
    }

    #[test]
    fn test_source_directory_override() {
        let mut plugin = plugin();
        plugin.set_source_directory("modules").unwrap();
        let mut settings = Settings::new("/repo");

        plugin.settings_evaluated(&mut settings).unwrap();

        assert_eq!(settings.projects().len(), 1);
        assert_eq!(
            settings.project("core").unwrap().project_dir,
            PathBuf::from("/repo/modules/core")
        );
    }

    #[test]
    fn test_source_directory_rejects_file() {
        let mut plugin = plugin();

        let err = plugin.set_source_directory("settings.toml").unwrap_err();

        assert!(matches!(
            err,
            MultiProjectError::InvalidConfiguration(ConfigError::NotADirectory(_))
        ));
        assert_eq!(plugin.config().source_directory(), Path::new("/repo/src"));
    }

    #[test]
    fn test_config_frozen_after_evaluation() {
        let mut plugin = plugin();
        plugin.settings_evaluated(&mut Settings::new("/repo")).unwrap();

        assert!(matches!(
            plugin.set_build_directory("out"),
            Err(MultiProjectError::ConfigFrozen)
        ));
        assert!(matches!(
            plugin.settings_evaluated(&mut Settings::new("/repo")),
            Err(MultiProjectError::AlreadyEvaluated)
        ));
    }

    #[test]
    fn test_root_realized_relocates_all_subunits() {
        let mut plugin = plugin();
        plugin.set_build_directory("out").unwrap();
        let mut settings = Settings::new("/repo");
        settings.include_default("tools");
        plugin.settings_evaluated(&mut settings).unwrap();
        let mut graph = settings.realize();

        let scheduled = plugin.root_realized(&mut graph).unwrap();

        // user declarations come first, discovered units follow in listing order
        assert_eq!(scheduled[0], "tools");
        let mut sorted = scheduled.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["app", "lib", "tools"]);
        for unit in graph.subprojects() {
            assert_eq!(unit.build_dir(), Path::new("/repo/out").join(unit.name()));
        }
    }

    #[test]
    fn test_root_realized_follows_root_build_dir() {
        let plugin = plugin();
        let mut graph = RootProject::new(
            Project::new("repo", "/repo"),
            vec![Project::new("a", "/repo/src/a"), Project::new("b", "/repo/src/b")],
        );
        graph.root_mut().set_build_dir(PathBuf::from("/custom/out"));

        plugin.root_realized(&mut graph).unwrap();

        assert_eq!(graph.subproject("a").unwrap().build_dir(), Path::new("/custom/out/a"));
        assert_eq!(graph.subproject("b").unwrap().build_dir(), Path::new("/custom/out/b"));
        assert_eq!(graph.root().build_dir(), Path::new("/custom/out"));
    }

    #[test]
    fn test_layout_reports_build_root_in_use() {
        let mut plugin = plugin();
        plugin.set_build_directory("out").unwrap();
        let mut settings = Settings::new("/repo");
        plugin.settings_evaluated(&mut settings).unwrap();
        let mut graph = settings.realize();
        plugin.root_realized(&mut graph).unwrap();

        let layout = plugin.layout(&graph);

        assert_eq!(layout.build_root, PathBuf::from("/repo/out"));
        for unit in &layout.units {
            assert!(unit.build_dir.starts_with(&layout.build_root));
        }
    }

    #[test]
    fn test_unit_evaluated_remaps() {
        let plugin = plugin();
        let mut project = Project::new("app", "/repo/src/app");
        project.apply_java();

        assert_eq!(plugin.unit_evaluated(&mut project), 8);
        let main = project.source_sets().unwrap().get("main").unwrap();
        assert!(main.sources.contains("/repo/src/app/main/java"));
    }
}
