use super::project::{Project, RootProject};
use super::UnitRegistry;
use std::path::{Path, PathBuf};

/// A declared, not yet realized, build unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    pub name: String,
    pub project_dir: PathBuf,
}

/// Declarations of a composite build before its unit graph is realized.
///
/// Units are kept in declaration order. Declaring a name twice keeps the
/// original position and takes the newer directory.
#[derive(Debug, Clone)]
pub struct Settings {
    root_name: String,
    root_dir: PathBuf,
    projects: Vec<ProjectDescriptor>,
}

impl Settings {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        let root_dir = root_dir.into();
        let root_name = root_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "root".to_string());
        Self {
            root_name,
            root_dir,
            projects: Vec::new(),
        }
    }

    pub fn project(&self, name: &str) -> Option<&ProjectDescriptor> {
        self.projects.iter().find(|p| p.name == name)
    }

    pub fn projects(&self) -> &[ProjectDescriptor] {
        &self.projects
    }

    /// Turns every declaration into a [`Project`] under a root unit whose
    /// build directory is `<root_dir>/build`.
    pub fn realize(&self) -> RootProject {
        let root = Project::new(self.root_name.clone(), self.root_dir.clone());
        let subprojects = self
            .projects
            .iter()
            .map(|d| Project::new(d.name.clone(), d.project_dir.clone()))
            .collect();
        RootProject::new(root, subprojects)
    }
}

impl UnitRegistry for Settings {
    fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn include(&mut self, name: &str, project_dir: PathBuf) {
        match self.projects.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.project_dir = project_dir,
            None => self.projects.push(ProjectDescriptor {
                name: name.to_string(),
                project_dir,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{BuildUnit, UnitGraph};

    #[test]
    fn test_include_default_location() {
        let mut settings = Settings::new("/repo");
        settings.include_default("tools");

        let tools = settings.project("tools").unwrap();
        assert_eq!(tools.project_dir, PathBuf::from("/repo/tools"));
    }

    #[test]
    fn test_include_twice_replaces_directory() {
        let mut settings = Settings::new("/repo");
        settings.include_default("app");
        settings.include_default("lib");
        settings.include("app", PathBuf::from("/repo/src/app"));

        assert_eq!(settings.projects().len(), 2);
        assert_eq!(settings.projects()[0].name, "app");
        assert_eq!(settings.projects()[0].project_dir, PathBuf::from("/repo/src/app"));
    }

    #[test]
    fn test_realize() {
        let mut settings = Settings::new("/repo");
        settings.include("app", PathBuf::from("/repo/src/app"));

        let graph = settings.realize();

        assert_eq!(graph.root().name(), "repo");
        assert_eq!(graph.build_dir(), Path::new("/repo/build"));
        assert_eq!(graph.subunits()[0].project_dir(), Path::new("/repo/src/app"));
    }
}
