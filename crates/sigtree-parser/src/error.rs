//! Error types for descriptor parsing and tree construction.

use crate::node::NodeId;
use std::fmt;
use thiserror::Error;

/// Why a descriptor was rejected as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// The descriptor is empty or whitespace only.
    EmptyDescriptor,
    /// A type name is missing, e.g. `<B>` or `A<<B>>`.
    EmptyName,
    /// A parameter list contains an empty segment, e.g. `A<>` or `A<B,>`.
    EmptyParameter,
    /// A `<` has no matching `>`.
    UnclosedParameterList,
    /// A `>` has no matching `<`.
    UnexpectedClose,
    /// Text follows a closed parameter list, e.g. `A<B>C` or a top-level `,`.
    TrailingInput,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::EmptyDescriptor => "descriptor is empty",
            Self::EmptyName => "missing type name",
            Self::EmptyParameter => "empty type parameter",
            Self::UnclosedParameterList => "`<` is never closed",
            Self::UnexpectedClose => "`>` has no matching `<`",
            Self::TrailingInput => "unexpected text after type",
        };
        f.write_str(text)
    }
}

/// Failure to turn descriptor text into a [`TypeTree`](crate::TypeTree).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("malformed descriptor `{descriptor}` at offset {offset}: {reason}")]
    Malformed {
        descriptor: String,
        offset: usize,
        reason: MalformedReason,
    },

    #[error("descriptor `{descriptor}` nests deeper than {limit} levels")]
    DepthExceeded { descriptor: String, limit: u32 },

    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl DescriptorError {
    /// The malformation reason, if this is a syntax failure.
    pub fn malformed_reason(&self) -> Option<MalformedReason> {
        match self {
            Self::Malformed { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

/// Failure while assembling a tree through [`TypeTreeBuilder`](crate::TypeTreeBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("type tree exceeds the maximum depth of {limit}")]
    DepthExceeded { limit: u32 },

    #[error("invalid type name `{name}`")]
    InvalidName { name: String },

    #[error("tree already has a root node")]
    RootAlreadySet,

    #[error("tree has no root node")]
    MissingRoot,

    #[error("node {0:?} does not belong to this tree")]
    UnknownNode(NodeId),
}

/// Out-of-range child access through [`NodeRef::child_at`](crate::NodeRef::child_at).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("child index {index} is out of range for `{name}` with {len} children")]
pub struct IndexError {
    pub name: String,
    pub index: usize,
    pub len: usize,
}
