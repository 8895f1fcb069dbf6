//! The type-relationship boundary consulted by the comparator.
//!
//! The comparator never decides on its own whether one name is an ancestor
//! of another. It asks a [`TypeRelationshipResolver`], which may be backed by
//! an [`InheritanceGraph`](crate::InheritanceGraph), a class loader, a
//! symbol table, or anything else that can answer the question.

use std::sync::Arc;
use thiserror::Error;

/// How two type names relate, from the point of view of the call's
/// argument order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// Same type.
    Equal,
    /// The left name is a proper ancestor of the right name.
    LeftAncestorOfRight,
    /// The right name is a proper ancestor of the left name.
    RightAncestorOfLeft,
    /// Neither is an ancestor of the other.
    Unrelated,
}

impl Relation {
    /// The same relation seen with the arguments swapped.
    pub const fn flip(self) -> Self {
        match self {
            Self::LeftAncestorOfRight => Self::RightAncestorOfLeft,
            Self::RightAncestorOfLeft => Self::LeftAncestorOfRight,
            other => other,
        }
    }
}

/// Failure to answer a relation query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("cannot resolve type name `{name}`")]
    UnresolvableName { name: String },
}

impl ResolveError {
    pub fn unresolvable(name: impl Into<String>) -> Self {
        Self::UnresolvableName { name: name.into() }
    }
}

/// Answers ancestor/descendant questions about pairs of type names.
///
/// Implementations must be deterministic for a given pair within one
/// session. Caching, if any, belongs to the implementation; see
/// [`CachingResolver`](crate::CachingResolver).
pub trait TypeRelationshipResolver {
    fn relate(&self, left: &str, right: &str) -> Result<Relation, ResolveError>;
}

impl<R: TypeRelationshipResolver + ?Sized> TypeRelationshipResolver for &R {
    fn relate(&self, left: &str, right: &str) -> Result<Relation, ResolveError> {
        (**self).relate(left, right)
    }
}

impl<R: TypeRelationshipResolver + ?Sized> TypeRelationshipResolver for Box<R> {
    fn relate(&self, left: &str, right: &str) -> Result<Relation, ResolveError> {
        (**self).relate(left, right)
    }
}

impl<R: TypeRelationshipResolver + ?Sized> TypeRelationshipResolver for Arc<R> {
    fn relate(&self, left: &str, right: &str) -> Result<Relation, ResolveError> {
        (**self).relate(left, right)
    }
}

/// Adapts a closure into a resolver.
///
/// ```ignore
/// let resolver = FnResolver::new(|left, right| match (left, right) {
///     ("Object", _) => Ok(Relation::LeftAncestorOfRight),
///     (_, "Object") => Ok(Relation::RightAncestorOfLeft),
///     _ => Ok(Relation::Unrelated),
/// });
/// ```
pub struct FnResolver<F>(F);

impl<F> FnResolver<F>
where
    F: Fn(&str, &str) -> Result<Relation, ResolveError>,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> TypeRelationshipResolver for FnResolver<F>
where
    F: Fn(&str, &str) -> Result<Relation, ResolveError>,
{
    fn relate(&self, left: &str, right: &str) -> Result<Relation, ResolveError> {
        (self.0)(left, right)
    }
}

/// A resolver that knows no relationships at all.
///
/// Every pair of distinct names is unrelated, which reduces graded
/// comparison to exact structural equality.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl TypeRelationshipResolver for NoopResolver {
    fn relate(&self, left: &str, right: &str) -> Result<Relation, ResolveError> {
        Ok(if left == right {
            Relation::Equal
        } else {
            Relation::Unrelated
        })
    }
}
