//! Name-based inheritance graph.
//!
//! Records, for each known type name, the names of its direct supertypes
//! (superclass and implemented interfaces alike) and answers transitive
//! "is derived from" queries over them. An optional universal root, such as
//! `java.lang.Object`, is treated as an ancestor of every known name.
//!
//! The graph does not reject cycles on insert. Callers that care can ask
//! [`InheritanceGraph::detects_cycle`] before adding an edge; queries stay
//! terminating either way.

use crate::relation::{Relation, ResolveError, TypeRelationshipResolver};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct InheritanceGraph {
    supertypes: FxHashMap<Box<str>, SmallVec<[Box<str>; 2]>>,
    root: Option<Box<str>>,
}

impl InheritanceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph in which `root` is an ancestor of every other known name.
    pub fn with_root(root: &str) -> Self {
        let mut graph = Self::default();
        graph.set_root(root);
        graph
    }

    pub fn set_root(&mut self, root: &str) {
        self.add_type(root);
        self.root = Some(root.into());
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Register `name` without any supertypes.
    pub fn add_type(&mut self, name: &str) {
        if !self.supertypes.contains_key(name) {
            self.supertypes.insert(name.into(), SmallVec::new());
        }
    }

    /// Record that `child` directly extends or implements each of `parents`.
    ///
    /// Parents are registered as known names too. Repeated edges are ignored.
    pub fn add_inheritance(&mut self, child: &str, parents: &[&str]) {
        for parent in parents {
            self.add_type(parent);
        }
        let entry = self.supertypes.entry(child.into()).or_default();
        for parent in parents {
            if !entry.iter().any(|p| &**p == *parent) {
                entry.push((*parent).into());
            }
        }
    }

    /// Replace the direct supertypes of `child`.
    pub fn set_supertypes(&mut self, child: &str, parents: &[&str]) {
        for parent in parents {
            self.add_type(parent);
        }
        self.supertypes
            .insert(child.into(), parents.iter().map(|p| (*p).into()).collect());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.supertypes.contains_key(name)
    }

    /// Direct supertypes of `name`, in insertion order.
    pub fn supertypes(&self, name: &str) -> Option<impl Iterator<Item = &str>> {
        self.supertypes
            .get(name)
            .map(|parents| parents.iter().map(|p| &**p))
    }

    /// Number of known type names.
    pub fn type_count(&self) -> usize {
        self.supertypes.len()
    }

    /// Whether `child` is a proper descendant of `ancestor`.
    pub fn is_derived_from(&self, child: &str, ancestor: &str) -> bool {
        if child == ancestor || !self.contains(child) {
            return false;
        }
        if self.root.as_deref() == Some(ancestor) {
            return true;
        }

        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.push_back(child);
        visited.insert(child);

        while let Some(current) = queue.pop_front() {
            let Some(parents) = self.supertypes.get(current) else {
                continue;
            };
            for parent in parents {
                let parent: &str = parent;
                if parent == ancestor {
                    return true;
                }
                if visited.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }
        false
    }

    /// Whether adding the edge `child -> parent` would close a cycle.
    pub fn detects_cycle(&self, child: &str, parent: &str) -> bool {
        child == parent || self.is_derived_from(parent, child)
    }
}

impl TypeRelationshipResolver for InheritanceGraph {
    fn relate(&self, left: &str, right: &str) -> Result<Relation, ResolveError> {
        if left == right {
            return Ok(Relation::Equal);
        }
        for name in [left, right] {
            if !self.contains(name) {
                return Err(ResolveError::unresolvable(name));
            }
        }

        Ok(if self.is_derived_from(right, left) {
            Relation::LeftAncestorOfRight
        } else if self.is_derived_from(left, right) {
            Relation::RightAncestorOfLeft
        } else {
            Relation::Unrelated
        })
    }
}

#[cfg(test)]
#[path = "tests/hierarchy_tests.rs"]
mod tests;
