//! Hierarchy configuration files.
//!
//! A config file describes the inheritance facts the comparator consults:
//!
//! ```json
//! {
//!   "extends": "./base.json",
//!   "root": "java.lang.Object",
//!   "hierarchy": {
//!     "java.lang.Integer": ["java.lang.Number", "java.lang.Comparable"],
//!     "java.lang.Number": ["java.io.Serializable"]
//!   }
//! }
//! ```
//!
//! `extends` is resolved relative to the including file. Entries in the
//! including file replace base entries for the same type name.

use anyhow::{Context, Result, anyhow, bail};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use sigtree_solver::InheritanceGraph;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name searched for when no config path is given.
pub const CONFIG_FILE_NAME: &str = "sigtree.json";

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HierarchyConfig {
    #[serde(default)]
    pub extends: Option<String>,
    /// Universal ancestor of every known type.
    #[serde(default)]
    pub root: Option<String>,
    /// Type name to its direct supertypes.
    #[serde(default)]
    pub hierarchy: FxHashMap<String, Vec<String>>,
}

impl HierarchyConfig {
    pub fn into_graph(self) -> InheritanceGraph {
        let mut graph = match &self.root {
            Some(root) => InheritanceGraph::with_root(root),
            None => InheritanceGraph::new(),
        };
        for (name, parents) in &self.hierarchy {
            let parents: Vec<&str> = parents.iter().map(String::as_str).collect();
            graph.set_supertypes(name, &parents);
        }
        graph
    }
}

pub fn parse_config(source: &str) -> Result<HierarchyConfig> {
    serde_json::from_str(source).context("failed to parse hierarchy config JSON")
}

/// Load `path`, following its `extends` chain.
pub fn load_config(path: &Path) -> Result<HierarchyConfig> {
    let mut visited = FxHashSet::default();
    load_config_inner(path, &mut visited)
}

fn load_config_inner(path: &Path, visited: &mut FxHashSet<PathBuf>) -> Result<HierarchyConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        bail!("config extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let mut config =
        parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))?;

    if let Some(extends) = config.extends.take() {
        let base_path = resolve_extends_path(path, &extends)?;
        debug!(config = %path.display(), base = %base_path.display(), "loading base config");
        let base = load_config_inner(&base_path, visited)?;
        config = merge_configs(base, config);
    }

    visited.remove(&canonical);
    Ok(config)
}

fn resolve_extends_path(current_path: &Path, extends: &str) -> Result<PathBuf> {
    let base_dir = current_path
        .parent()
        .ok_or_else(|| anyhow!("config has no parent directory"))?;
    let mut candidate = PathBuf::from(extends);
    if candidate.extension().is_none() {
        candidate.set_extension("json");
    }

    if candidate.is_absolute() {
        Ok(candidate)
    } else {
        Ok(base_dir.join(candidate))
    }
}

fn merge_configs(base: HierarchyConfig, child: HierarchyConfig) -> HierarchyConfig {
    let mut hierarchy = base.hierarchy;
    hierarchy.extend(child.hierarchy);
    HierarchyConfig {
        extends: None,
        root: child.root.or(base.root),
        hierarchy,
    }
}

/// Find the nearest `sigtree.json` in `start` or any of its ancestors.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
