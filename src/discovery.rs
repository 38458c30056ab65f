//! Discovery of sub-units under the shared source root
//!
//! Every immediate child of the source root becomes a unit named after its
//! final path segment. The listing is non-recursive and keeps the order the
//! filesystem returns; the host keys units by name so order is irrelevant.
//! Children whose name is not valid UTF-8 cannot be named as units and are
//! skipped with a warning.

use crate::error::{MultiProjectError, Result};
use crate::fs::FileSystem;
use crate::host::UnitRegistry;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A unit found under the source root
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscoveredUnit {
    pub name: String,
    pub directory: PathBuf,
}

/// Lists the children of `source_root` as units.
///
/// A missing source root yields no units. A failing listing is fatal.
pub fn discover(fs: &dyn FileSystem, source_root: &Path) -> Result<Vec<DiscoveredUnit>> {
    if !fs.exists(source_root) {
        debug!(
            source_root = %source_root.display(),
            "Source root does not exist, no units to discover"
        );
        return Ok(Vec::new());
    }

    let entries = fs
        .read_dir(source_root)
        .map_err(|source| MultiProjectError::Discovery {
            path: source_root.to_path_buf(),
            source,
        })?;

    let units: Vec<DiscoveredUnit> = entries
        .into_iter()
        .filter_map(|entry| {
            let Some(name) = entry.path().file_name().and_then(|n| n.to_str()) else {
                warn!(
                    path = %entry.path().display(),
                    "Skipping source root entry without a UTF-8 name"
                );
                return None;
            };
            Some(DiscoveredUnit {
                name: name.to_string(),
                directory: entry.path,
            })
        })
        .collect();

    info!(
        source_root = %source_root.display(),
        units = units.len(),
        "Discovered units"
    );

    Ok(units)
}

/// Declares every discovered unit with the host.
pub fn register(registry: &mut dyn UnitRegistry, units: &[DiscoveredUnit]) {
    for unit in units {
        debug!(
            unit = %unit.name,
            dir = %unit.directory.display(),
            "Registering unit"
        );
        registry.include(&unit.name, unit.directory.clone());
    }
}

/// Discovers the units under `source_root` and declares them with `registry`.
pub fn discover_and_register(
    fs: &dyn FileSystem,
    source_root: &Path,
    registry: &mut dyn UnitRegistry,
) -> Result<Vec<DiscoveredUnit>> {
    let units = discover(fs, source_root)?;
    register(registry, &units);
    Ok(units)
}
