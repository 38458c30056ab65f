use super::MultiProjectPlugin;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::host::{Project, RootProject, Settings};
use std::collections::HashMap;
use tracing::debug;

type ProjectHook = Box<dyn FnMut(&mut Project)>;

/// Drives a composite build through its configuration lifecycle:
/// settings evaluation, root realization, then each sub-unit's own
/// configuration followed by its source-set remap.
pub struct Lifecycle<F: FileSystem> {
    plugin: MultiProjectPlugin<F>,
    settings: Settings,
    subproject_hooks: Vec<ProjectHook>,
    project_hooks: HashMap<String, Vec<ProjectHook>>,
}

impl<F: FileSystem> Lifecycle<F> {
    pub fn new(plugin: MultiProjectPlugin<F>, settings: Settings) -> Self {
        Self {
            plugin,
            settings,
            subproject_hooks: Vec::new(),
            project_hooks: HashMap::new(),
        }
    }

    pub fn plugin(&self) -> &MultiProjectPlugin<F> {
        &self.plugin
    }

    /// Plugin access for configuration overrides before [`run`](Self::run).
    pub fn plugin_mut(&mut self) -> &mut MultiProjectPlugin<F> {
        &mut self.plugin
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings access for manual unit declarations before [`run`](Self::run).
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Configuration applied to every sub-unit, before its per-name hooks.
    pub fn subprojects(mut self, hook: impl FnMut(&mut Project) + 'static) -> Self {
        self.subproject_hooks.push(Box::new(hook));
        self
    }

    /// Configuration applied to the sub-unit named `name`.
    pub fn project(mut self, name: &str, hook: impl FnMut(&mut Project) + 'static) -> Self {
        self.project_hooks
            .entry(name.to_string())
            .or_default()
            .push(Box::new(hook));
        self
    }

    /// Runs every lifecycle point once and returns the realized unit graph.
    pub fn run(&mut self) -> Result<RootProject> {
        self.plugin.settings_evaluated(&mut self.settings)?;

        let mut graph = self.settings.realize();
        let scheduled = self.plugin.root_realized(&mut graph)?;

        for name in scheduled {
            let Some(unit) = graph.subproject_mut(&name) else {
                continue;
            };

            for hook in self.subproject_hooks.iter_mut() {
                hook(&mut *unit);
            }
            if let Some(hooks) = self.project_hooks.get_mut(&name) {
                for hook in hooks.iter_mut() {
                    hook(&mut *unit);
                }
            }
            debug!(unit = %name, "Unit configuration finished");

            self.plugin.unit_evaluated(unit);
        }

        Ok(graph)
    }
}
