//! Structural comparison of type trees.
//!
//! This crate grades how two [`TypeTree`](sigtree_parser::TypeTree)s relate:
//!
//! - **Relations**: [`TypeRelationshipResolver`] is the injected oracle that
//!   decides whether one type name is an ancestor of another
//! - **Hierarchies**: [`InheritanceGraph`] is a ready-made, name-based resolver
//! - **Caching**: [`CachingResolver`] memoizes any resolver
//! - **Comparison**: [`TreeComparator`] produces a [`Grade`] or a strict
//!   pass/fail with a [`TypeMismatch`] diagnostic

mod cache;
pub mod compare;
pub mod diagnostics;
mod hierarchy;
pub mod relation;

pub use cache::CachingResolver;
pub use compare::{Grade, TreeComparator};
pub use diagnostics::{Divergence, TypeMismatch};
pub use hierarchy::InheritanceGraph;
pub use relation::{FnResolver, NoopResolver, Relation, ResolveError, TypeRelationshipResolver};
