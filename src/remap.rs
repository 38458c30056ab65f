//! Rewrites source directories from the host's per-unit default layout into
//! the shared-tree layout.
//!
//! The host defaults a unit at `<root>/<unit>` to sources under
//! `<root>/<unit>/src/<rest>`. In a shared tree the first path segment below
//! the root already names the unit, so the `src` segment is dropped:
//!
//! ```text
//! <root>/app/src/main/java  ->  <root>/app/main/java
//! <root>/app/main/java      ->  unchanged
//! <root>/lib/src/main/java  ->  unchanged while remapping `app`
//! /elsewhere/custom         ->  unchanged
//! ```
//!
//! The rewrite is purely lexical and idempotent.

use crate::host::{BuildUnit, SourceDirectorySet, SourceSet};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

const DEFAULT_LAYOUT_SEGMENT: &str = "src";

/// Remaps one directory for the unit named `unit`.
///
/// Only directories under `<root>/<unit>/src/` with at least one segment
/// after `src` are rewritten; everything else is returned as is.
pub fn remap_dir(root: &Path, unit: &str, dir: &Path) -> PathBuf {
    let rel = match dir.strip_prefix(root) {
        Ok(rel) => rel,
        Err(_) => return dir.to_path_buf(),
    };

    let segments: Vec<Component<'_>> = rel.components().collect();
    if segments.len() < 3 {
        return dir.to_path_buf();
    }

    match (segments[0], segments[1]) {
        (Component::Normal(first), Component::Normal(second))
            if first == OsStr::new(unit) && second == OsStr::new(DEFAULT_LAYOUT_SEGMENT) =>
        {
            let mut remapped = root.join(first);
            remapped.extend(&segments[2..]);
            remapped
        }
        _ => dir.to_path_buf(),
    }
}

/// Replaces the collection with its remapped form. Returns how many
/// directories were rewritten.
pub fn remap_set(root: &Path, unit: &str, set: &mut SourceDirectorySet) -> usize {
    let mut rewritten = 0;
    let remapped: Vec<PathBuf> = set
        .src_dirs()
        .iter()
        .map(|dir| {
            let new_dir = remap_dir(root, unit, dir);
            if new_dir != *dir {
                debug!(
                    unit,
                    from = %dir.display(),
                    to = %new_dir.display(),
                    "Remapped source directory"
                );
                rewritten += 1;
            }
            new_dir
        })
        .collect();

    set.set_src_dirs(remapped);
    rewritten
}

/// Remaps the sources, resources and all-sources collections independently.
pub fn remap_source_set(root: &Path, unit: &str, source_set: &mut SourceSet) -> usize {
    source_set
        .directory_sets_mut()
        .into_iter()
        .map(|set| remap_set(root, unit, set))
        .sum()
}

/// Remaps every source set of `unit`. Units without source sets are left alone.
pub fn remap_unit(root: &Path, unit: &mut dyn BuildUnit) -> usize {
    let name = unit.name().to_string();
    let source_sets = match unit.source_sets_mut() {
        Some(sets) => sets,
        None => {
            debug!(unit = %name, "Unit exposes no source sets, nothing to remap");
            return 0;
        }
    };

    let rewritten: usize = source_sets
        .iter_mut()
        .map(|set| remap_source_set(root, &name, set))
        .sum();

    info!(unit = %name, rewritten, "Remapped source sets");
    rewritten
}
