use super::source_set::{SourceSet, SourceSetContainer, MAIN_SOURCE_SET, TEST_SOURCE_SET};
use super::{BuildUnit, UnitGraph};
use std::path::{Path, PathBuf};

const DEFAULT_BUILD_DIR: &str = "build";

/// A realized build unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    name: String,
    project_dir: PathBuf,
    build_dir: PathBuf,
    source_sets: Option<SourceSetContainer>,
}

impl Project {
    /// Creates a unit with the host's default build directory `<project_dir>/build`
    /// and no source-set capability.
    pub fn new(name: impl Into<String>, project_dir: impl Into<PathBuf>) -> Self {
        let project_dir = project_dir.into();
        Self {
            name: name.into(),
            build_dir: project_dir.join(DEFAULT_BUILD_DIR),
            project_dir,
            source_sets: None,
        }
    }

    /// Attaches the `main` and `test` source sets in the host's default layout
    /// for `language`, e.g. `<project_dir>/src/main/java`.
    pub fn apply_language(&mut self, language: &str) -> &mut SourceSetContainer {
        let project_dir = self.project_dir.clone();
        let container = self.source_sets.get_or_insert_with(SourceSetContainer::new);
        for name in [MAIN_SOURCE_SET, TEST_SOURCE_SET] {
            if container.get(name).is_none() {
                container.add(SourceSet::conventional(&project_dir, name, language));
            }
        }
        container
    }

    pub fn apply_java(&mut self) -> &mut SourceSetContainer {
        self.apply_language("java")
    }
}

impl BuildUnit for Project {
    fn name(&self) -> &str {
        &self.name
    }

    fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    fn set_build_dir(&mut self, dir: PathBuf) {
        self.build_dir = dir;
    }

    fn source_sets(&self) -> Option<&SourceSetContainer> {
        self.source_sets.as_ref()
    }

    fn source_sets_mut(&mut self) -> Option<&mut SourceSetContainer> {
        self.source_sets.as_mut()
    }
}

/// The root unit of a composite build together with its sub-units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootProject {
    root: Project,
    subprojects: Vec<Project>,
}

impl RootProject {
    pub fn new(root: Project, subprojects: Vec<Project>) -> Self {
        Self { root, subprojects }
    }

    pub fn root(&self) -> &Project {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Project {
        &mut self.root
    }

    pub fn subprojects(&self) -> &[Project] {
        &self.subprojects
    }

    pub fn subproject(&self, name: &str) -> Option<&Project> {
        self.subprojects.iter().find(|p| p.name() == name)
    }

    pub fn subproject_mut(&mut self, name: &str) -> Option<&mut Project> {
        self.subprojects.iter_mut().find(|p| p.name() == name)
    }
}

impl UnitGraph for RootProject {
    type Unit = Project;

    fn build_dir(&self) -> &Path {
        self.root.build_dir()
    }

    fn subunits(&self) -> &[Project] {
        &self.subprojects
    }

    fn subunits_mut(&mut self) -> &mut [Project] {
        &mut self.subprojects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_defaults() {
        let project = Project::new("app", "/repo/src/app");

        assert_eq!(project.name(), "app");
        assert_eq!(project.build_dir(), Path::new("/repo/src/app/build"));
        assert!(project.source_sets().is_none());
    }

    #[test]
    fn test_apply_java_uses_default_convention() {
        let mut project = Project::new("app", "/repo/src/app");
        project.apply_java();

        let sets = project.source_sets().unwrap();
        let main = sets.get("main").unwrap();
        assert!(main.sources.contains("/repo/src/app/src/main/java"));
        assert!(sets.get("test").unwrap().resources.contains("/repo/src/app/src/test/resources"));
    }

    #[test]
    fn test_apply_language_keeps_existing_sets() {
        let mut project = Project::new("app", "/repo/src/app");
        project.apply_java().get_mut("main").unwrap().add_source_dir("/elsewhere/custom");
        project.apply_java();

        let main = project.source_sets().unwrap().get("main").unwrap();
        assert!(main.sources.contains("/elsewhere/custom"));
    }

    #[test]
    fn test_root_project_lookup() {
        let mut graph = RootProject::new(
            Project::new("repo", "/repo"),
            vec![Project::new("a", "/repo/src/a"), Project::new("b", "/repo/src/b")],
        );

        assert_eq!(graph.build_dir(), Path::new("/repo/build"));
        assert_eq!(graph.subunits().len(), 2);
        assert!(graph.subproject("b").is_some());
        graph.root_mut().set_build_dir(PathBuf::from("/custom/out"));
        assert_eq!(graph.build_dir(), Path::new("/custom/out"));
        graph.subproject_mut("a").unwrap().set_build_dir(PathBuf::from("/out/a"));
        assert_eq!(graph.subproject("a").unwrap().build_dir(), Path::new("/out/a"));
    }
}
