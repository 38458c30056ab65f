//! Source sets: named roles (sources, resources, all sources) each holding a
//! set of directories that the host reads when it builds a unit.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub const MAIN_SOURCE_SET: &str = "main";
pub const TEST_SOURCE_SET: &str = "test";

/// A set of directories for one role. Duplicates collapse and order carries
/// no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceDirectorySet {
    dirs: BTreeSet<PathBuf>,
}

impl SourceDirectorySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn src_dirs(&self) -> &BTreeSet<PathBuf> {
        &self.dirs
    }

    /// Replaces the whole collection.
    pub fn set_src_dirs(&mut self, dirs: impl IntoIterator<Item = PathBuf>) {
        self.dirs = dirs.into_iter().collect();
    }

    pub fn src_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.dirs.insert(dir.into());
        self
    }

    pub fn contains(&self, dir: impl AsRef<Path>) -> bool {
        self.dirs.contains(dir.as_ref())
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for SourceDirectorySet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            dirs: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// One named source set of a unit, e.g. `main` or `test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSet {
    name: String,
    pub sources: SourceDirectorySet,
    pub resources: SourceDirectorySet,
    pub all_source: SourceDirectorySet,
}

impl SourceSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: SourceDirectorySet::new(),
            resources: SourceDirectorySet::new(),
            all_source: SourceDirectorySet::new(),
        }
    }

    /// The host's default per-unit layout:
    /// `<project_dir>/src/<name>/<language>` and `<project_dir>/src/<name>/resources`.
    pub fn conventional(project_dir: &Path, name: &str, language: &str) -> Self {
        let base = project_dir.join("src").join(name);
        let mut set = Self::new(name);
        set.add_source_dir(base.join(language));
        set.add_resource_dir(base.join("resources"));
        set
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a source directory, keeping `all_source` a superset.
    pub fn add_source_dir(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        self.all_source.src_dir(dir.clone());
        self.sources.src_dir(dir);
    }

    /// Adds a resource directory, keeping `all_source` a superset.
    pub fn add_resource_dir(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        self.all_source.src_dir(dir.clone());
        self.resources.src_dir(dir);
    }

    /// Every role-named directory collection of this source set.
    pub fn directory_sets_mut(&mut self) -> [&mut SourceDirectorySet; 3] {
        [&mut self.sources, &mut self.resources, &mut self.all_source]
    }
}

/// The source sets a unit exposes, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceSetContainer {
    sets: BTreeMap<String, SourceSet>,
}

impl SourceSetContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source set, replacing any existing set with the same name.
    pub fn add(&mut self, set: SourceSet) {
        self.sets.insert(set.name().to_string(), set);
    }

    pub fn get(&self, name: &str) -> Option<&SourceSet> {
        self.sets.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SourceSet> {
        self.sets.get_mut(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceSet> {
        self.sets.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SourceSet> {
        self.sets.values_mut()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
