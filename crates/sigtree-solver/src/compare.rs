//! Graded structural comparison of type trees.
//!
//! `graded_compare(a, b)` classifies how `a` relates to `b`:
//!
//! | Grade            | Code | Meaning                                              |
//! |------------------|------|------------------------------------------------------|
//! | `Unrelated`      | -1   | some pair of names has no ancestor relationship      |
//! | `Identical`      | 0    | same names, same shape                               |
//! | `LeftBroader`    | 1    | every difference has `a`'s name as the ancestor      |
//! | `RightBroader`   | 2    | every difference has `b`'s name as the ancestor      |
//! | `Conflicting`    | 3    | differences point both ways                          |
//! | `ArityMismatch`  | 3    | same name, different number of parameters           |
//!
//! The grade follows the call's own argument order, so swapping the
//! arguments swaps `LeftBroader` and `RightBroader`.
//!
//! Recursion is bounded by tree depth, which `TypeTreeBuilder` caps at
//! `MAX_TREE_DEPTH`.

use crate::diagnostics::{Divergence, TypeMismatch};
use crate::relation::{Relation, TypeRelationshipResolver};
use sigtree_parser::NodeRef;
use std::fmt;
use tracing::{debug, trace};

/// Outcome of [`TreeComparator::graded_compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    Unrelated,
    Identical,
    LeftBroader,
    RightBroader,
    Conflicting,
    /// Names match but the parameter counts differ.
    ///
    /// Reported with code 3 like [`Grade::Conflicting`], but kept as its own
    /// variant so callers can tell a shape mismatch from mixed directions.
    ArityMismatch,
}

impl Grade {
    /// Numeric code in `{-1, 0, 1, 2, 3}`.
    pub const fn code(self) -> i8 {
        match self {
            Self::Unrelated => -1,
            Self::Identical => 0,
            Self::LeftBroader => 1,
            Self::RightBroader => 2,
            Self::Conflicting | Self::ArityMismatch => 3,
        }
    }

    pub const fn from_relation(relation: Relation) -> Self {
        match relation {
            Relation::Equal => Self::Identical,
            Relation::LeftAncestorOfRight => Self::LeftBroader,
            Relation::RightAncestorOfLeft => Self::RightBroader,
            Relation::Unrelated => Self::Unrelated,
        }
    }

    #[inline]
    pub const fn is_identical(self) -> bool {
        matches!(self, Self::Identical)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Fold per-child grades, left to right, into one grade.
///
/// Stops at the first `Unrelated`. A child that is itself `Conflicting` or
/// an `ArityMismatch` makes the whole list `Conflicting`.
fn aggregate(grades: impl Iterator<Item = Grade>) -> Grade {
    let mut left = false;
    let mut right = false;
    let mut conflicting = false;

    for grade in grades {
        match grade {
            Grade::Unrelated => return Grade::Unrelated,
            Grade::Identical => {}
            Grade::LeftBroader => left = true,
            Grade::RightBroader => right = true,
            Grade::Conflicting | Grade::ArityMismatch => conflicting = true,
        }
    }

    match (conflicting, left, right) {
        (true, _, _) | (false, true, true) => Grade::Conflicting,
        (false, true, false) => Grade::LeftBroader,
        (false, false, true) => Grade::RightBroader,
        (false, false, false) => Grade::Identical,
    }
}

/// Compares type trees, consulting a resolver for differing names.
pub struct TreeComparator<'r, R: ?Sized> {
    resolver: &'r R,
}

impl<'r, R: TypeRelationshipResolver + ?Sized> TreeComparator<'r, R> {
    pub fn new(resolver: &'r R) -> Self {
        Self { resolver }
    }

    /// Grade how `a` relates to `b`.
    pub fn graded_compare(&self, a: NodeRef<'_>, b: NodeRef<'_>) -> Grade {
        if let Some(grade) = self.name_grade(a, b) {
            return grade;
        }
        if a.is_leaf() && b.is_leaf() {
            return Grade::Identical;
        }
        if a.child_count() != b.child_count() {
            trace!(
                name = a.name(),
                left = a.child_count(),
                right = b.child_count(),
                "parameter count mismatch"
            );
            return Grade::ArityMismatch;
        }

        aggregate(
            a.children()
                .zip(b.children())
                .map(|(x, y)| self.graded_compare(x, y)),
        )
    }

    /// Succeed only if `a` and `b` are identical.
    pub fn strict_compare(&self, a: NodeRef<'_>, b: Option<NodeRef<'_>>) -> Result<(), TypeMismatch> {
        let Some(b) = b else {
            return Err(TypeMismatch::MissingTarget {
                source_type: a.name().to_string(),
            });
        };

        let grade = self.graded_compare(a, b);
        if grade.is_identical() {
            return Ok(());
        }
        Err(TypeMismatch::Mismatch {
            source_type: a.name().to_string(),
            target_type: b.name().to_string(),
            grade,
            divergence: self.explain(a, b),
        })
    }

    /// Locate the deepest pair at which `a` and `b` stop matching.
    ///
    /// Follows the child that decided the parent's grade: the first
    /// unrelated child when the trees are unrelated, otherwise the first
    /// child that is not identical. Returns `None` for identical trees.
    pub fn explain(&self, a: NodeRef<'_>, b: NodeRef<'_>) -> Option<Divergence> {
        let mut grade = self.graded_compare(a, b);
        if grade.is_identical() {
            return None;
        }

        let (mut a, mut b) = (a, b);
        let mut path = Vec::new();
        loop {
            let names_differ = self.name_grade(a, b).is_some();
            if names_differ || grade == Grade::ArityMismatch {
                break;
            }

            let wanted = |g: Grade| {
                if grade == Grade::Unrelated {
                    g == Grade::Unrelated
                } else {
                    !g.is_identical()
                }
            };
            let next = a
                .children()
                .zip(b.children())
                .enumerate()
                .map(|(i, (x, y))| (i, x, y, self.graded_compare(x, y)))
                .find(|&(_, _, _, g)| wanted(g));

            match next {
                Some((index, x, y, child_grade)) => {
                    path.push(index);
                    a = x;
                    b = y;
                    grade = child_grade;
                }
                None => break,
            }
        }

        Some(Divergence {
            source_type: a.name().to_string(),
            target_type: b.name().to_string(),
            grade,
            path,
        })
    }

    /// Grade decided by the two names alone, or `None` when the names are
    /// the same and the children must be compared.
    fn name_grade(&self, a: NodeRef<'_>, b: NodeRef<'_>) -> Option<Grade> {
        if a.name() == b.name() {
            return None;
        }
        match self.relate_names(a.name(), b.name()) {
            // The resolver treats the two names as aliases of one type.
            Relation::Equal => None,
            relation => {
                let grade = Grade::from_relation(relation);
                trace!(left = a.name(), right = b.name(), %grade, "names differ");
                Some(grade)
            }
        }
    }

    /// Resolver boundary: a name that cannot be resolved is unrelated.
    fn relate_names(&self, left: &str, right: &str) -> Relation {
        match self.resolver.relate(left, right) {
            Ok(relation) => relation,
            Err(err) => {
                debug!(left, right, error = %err, "treating unresolvable pair as unrelated");
                Relation::Unrelated
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/compare_tests.rs"]
mod tests;
