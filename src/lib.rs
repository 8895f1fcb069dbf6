//! sigtree: generic type descriptors as trees, and graded comparison of them.
//!
//! The member crates are re-exported here:
//!
//! - [`common`]: shared limits and the reserved "no value" name
//! - [`parser`]: [`TypeTree`], [`TypeTreeBuilder`] and [`SignatureParser`]
//! - [`solver`]: [`TypeRelationshipResolver`], [`InheritanceGraph`] and [`TreeComparator`]
//!
//! plus descriptor-level shortcuts that parse and compare in one call.

pub use sigtree_common as common;
pub use sigtree_parser as parser;
pub use sigtree_solver as solver;

pub use sigtree_parser::{
    DescriptorError, NamePattern, NodeId, NodeRef, SignatureParser, TypeTree, TypeTreeBuilder,
};
pub use sigtree_solver::{
    CachingResolver, Grade, InheritanceGraph, Relation, TreeComparator, TypeMismatch,
    TypeRelationshipResolver,
};

use thiserror::Error;
use tracing::debug;

/// Failure of a descriptor-level strict comparison.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error(transparent)]
    Mismatch(#[from] TypeMismatch),
}

/// Parse both descriptors and grade `left` against `right`.
pub fn compare_descriptors<R>(
    resolver: &R,
    left: &str,
    right: &str,
) -> Result<Grade, DescriptorError>
where
    R: TypeRelationshipResolver + ?Sized,
{
    let left_tree = SignatureParser::parse(left)?;
    let right_tree = SignatureParser::parse(right)?;
    let grade = TreeComparator::new(resolver).graded_compare(left_tree.root(), right_tree.root());
    debug!(left, right, %grade, "compared descriptors");
    Ok(grade)
}

/// Parse both descriptors and require them to be identical.
pub fn strict_compare_descriptors<R>(
    resolver: &R,
    left: &str,
    right: Option<&str>,
) -> Result<(), CompareError>
where
    R: TypeRelationshipResolver + ?Sized,
{
    let left_tree = SignatureParser::parse(left)?;
    let right_tree = right.map(SignatureParser::parse).transpose()?;
    TreeComparator::new(resolver)
        .strict_compare(left_tree.root(), right_tree.as_ref().map(TypeTree::root))?;
    Ok(())
}
