//! Relocation of every sub-unit's build directory to `<build root>/<unit name>`

use crate::error::{MultiProjectError, Result};
use crate::host::{BuildUnit, UnitGraph};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The build directory a unit named `name` gets under `build_root`.
pub fn build_dir_for(build_root: &Path, name: &str) -> PathBuf {
    build_root.join(name)
}

/// Points every sub-unit of `graph` at its own directory under `build_root`.
///
/// Returns the `(unit name, build dir)` assignments in graph order. Fails
/// without touching any unit if two units would share a directory.
pub fn relocate<G: UnitGraph>(build_root: &Path, graph: &mut G) -> Result<Vec<(String, PathBuf)>> {
    let mut owners: BTreeMap<PathBuf, &str> = BTreeMap::new();
    let mut assignments = Vec::with_capacity(graph.subunits().len());

    for unit in graph.subunits() {
        let dir = build_dir_for(build_root, unit.name());
        if let Some(first) = owners.insert(dir.clone(), unit.name()) {
            return Err(MultiProjectError::BuildDirCollision {
                first: first.to_string(),
                second: unit.name().to_string(),
                dir,
            });
        }
        assignments.push((unit.name().to_string(), dir));
    }

    for (unit, (name, dir)) in graph.subunits_mut().iter_mut().zip(&assignments) {
        debug!(unit = %name, build_dir = %dir.display(), "Relocating build directory");
        unit.set_build_dir(dir.clone());
    }

    info!(
        build_root = %build_root.display(),
        units = assignments.len(),
        "Relocated build directories"
    );

    Ok(assignments)
}
