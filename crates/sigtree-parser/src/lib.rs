//! Generic type descriptors and the trees they describe.
//!
//! - [`TypeTree`] / [`NodeRef`]: an immutable, arena-backed tree of type names
//! - [`TypeTreeBuilder`]: the append-only construction phase of a tree
//! - [`SignatureParser`]: descriptor text such as `Map<K, List<V>>` to a tree
//! - [`NamePattern`]: whole-name regular expressions for child lookup

pub mod error;
pub use error::{DescriptorError, IndexError, MalformedReason, TreeError};

pub mod node;
pub use node::{NodeId, NodeRef, TypeSnapshot, TypeTree, TypeTreeBuilder};

pub mod parser;
pub use parser::SignatureParser;

pub mod pattern;
pub use pattern::NamePattern;
