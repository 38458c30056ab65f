//! Serializable report of a realized composite build: where each unit lives,
//! where its artifacts go and which source directories it ended up with.

use crate::error::Result;
use crate::host::{BuildUnit, SourceDirectorySet, UnitGraph};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSetLayout {
    pub sources: Vec<PathBuf>,
    pub resources: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitLayout {
    pub name: String,
    pub project_dir: PathBuf,
    pub build_dir: PathBuf,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub source_sets: BTreeMap<String, SourceSetLayout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositeLayout {
    pub source_root: PathBuf,
    pub build_root: PathBuf,
    pub units: Vec<UnitLayout>,
}

fn dirs(set: &SourceDirectorySet) -> Vec<PathBuf> {
    set.src_dirs().iter().cloned().collect()
}

impl CompositeLayout {
    /// Reports `graph` as relocated under `build_root`.
    pub fn from_graph<G: UnitGraph>(source_root: &Path, build_root: &Path, graph: &G) -> Self {
        let units = graph
            .subunits()
            .iter()
            .map(|unit| UnitLayout {
                name: unit.name().to_string(),
                project_dir: unit.project_dir().to_path_buf(),
                build_dir: unit.build_dir().to_path_buf(),
                source_sets: unit
                    .source_sets()
                    .map(|sets| {
                        sets.iter()
                            .map(|set| {
                                (
                                    set.name().to_string(),
                                    SourceSetLayout {
                                        sources: dirs(&set.sources),
                                        resources: dirs(&set.resources),
                                    },
                                )
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            source_root: source_root.to_path_buf(),
            build_root: build_root.to_path_buf(),
            units,
        }
    }

    pub fn unit(&self, name: &str) -> Option<&UnitLayout> {
        self.units.iter().find(|u| u.name == name)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
