//! Failure reporting for strict comparison.

use crate::compare::Grade;
use std::fmt;
use thiserror::Error;

/// The deepest pair of nodes at which two trees stop matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    pub source_type: String,
    pub target_type: String,
    /// Grade of this pair on its own.
    pub grade: Grade,
    /// Child indices leading from the roots to this pair; empty at the roots.
    pub path: Vec<usize>,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` vs `{}`", self.source_type, self.target_type)?;
        if self.grade == Grade::ArityMismatch {
            f.write_str(" (different number of type parameters)")?;
        }
        if !self.path.is_empty() {
            f.write_str(" at parameter ")?;
            for (i, index) in self.path.iter().enumerate() {
                if i > 0 {
                    f.write_str(".")?;
                }
                write!(f, "{index}")?;
            }
        }
        Ok(())
    }
}

/// Strict comparison failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeMismatch {
    #[error("type `{source_type}` cannot be compared against an absent type")]
    MissingTarget { source_type: String },

    #[error("type `{source_type}` does not match `{target_type}` (grade {grade})")]
    Mismatch {
        source_type: String,
        target_type: String,
        grade: Grade,
        divergence: Option<Divergence>,
    },
}

impl TypeMismatch {
    pub fn source_type(&self) -> &str {
        match self {
            Self::MissingTarget { source_type } | Self::Mismatch { source_type, .. } => {
                source_type
            }
        }
    }

    /// `None` when the comparison target was absent.
    pub fn target_type(&self) -> Option<&str> {
        match self {
            Self::MissingTarget { .. } => None,
            Self::Mismatch { target_type, .. } => Some(target_type),
        }
    }

    pub fn grade(&self) -> Option<Grade> {
        match self {
            Self::MissingTarget { .. } => None,
            Self::Mismatch { grade, .. } => Some(*grade),
        }
    }

    pub fn divergence(&self) -> Option<&Divergence> {
        match self {
            Self::MissingTarget { .. } => None,
            Self::Mismatch { divergence, .. } => divergence.as_ref(),
        }
    }
}
