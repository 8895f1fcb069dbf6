//! Recursive-descent parser for generic type descriptors.
//!
//! Grammar:
//!
//! ```text
//! TypeDesc   := Identifier ('<' TypeDesc (',' TypeDesc)* '>')?
//! Identifier := one or more characters other than '<', '>', ','
//! ```
//!
//! Each parameter list is parsed by a nested call, so a `,` or `>` always
//! belongs to the innermost open list. `A<B<C, D>, E>` yields `A` with the
//! children `B<C, D>` and `E`.
//!
//! Parsing is purely syntactic. Names are never resolved or validated
//! beyond the delimiters above, and broken input is rejected rather than
//! repaired.

use crate::error::{DescriptorError, MalformedReason, TreeError};
use crate::node::{NodeId, TypeTree, TypeTreeBuilder};
use sigtree_common::limits::{MAX_DESCRIPTOR_DEPTH, TREE_INITIAL_CAPACITY};
use tracing::{debug, trace};

/// Entry points for turning descriptor text into type trees.
pub struct SignatureParser;

impl SignatureParser {
    /// Parse `descriptor` into a new tree.
    pub fn parse(descriptor: &str) -> Result<TypeTree, DescriptorError> {
        let mut builder = TypeTreeBuilder::with_capacity(TREE_INITIAL_CAPACITY);
        Self::parse_into(&mut builder, descriptor, None)?;
        Ok(builder.build()?)
    }

    /// Parse `descriptor` into `builder`.
    ///
    /// With `parent` set, the parsed type becomes the last child of that
    /// node; otherwise it becomes the builder's root. On failure the builder
    /// is left exactly as it was.
    pub fn parse_into(
        builder: &mut TypeTreeBuilder,
        descriptor: &str,
        parent: Option<NodeId>,
    ) -> Result<NodeId, DescriptorError> {
        let checkpoint = builder.node_count();
        let result = DescriptorCursor::new(descriptor).parse_descriptor(builder, parent);
        match &result {
            Ok(id) => trace!(descriptor, node = id.0, "parsed descriptor"),
            Err(err) => {
                debug!(descriptor, error = %err, "rejected descriptor");
                builder.rollback(checkpoint);
            }
        }
        result
    }
}

struct DescriptorCursor<'s> {
    descriptor: &'s str,
    pos: usize,
}

impl<'s> DescriptorCursor<'s> {
    fn new(descriptor: &'s str) -> Self {
        Self { descriptor, pos: 0 }
    }

    fn parse_descriptor(
        &mut self,
        builder: &mut TypeTreeBuilder,
        parent: Option<NodeId>,
    ) -> Result<NodeId, DescriptorError> {
        if self.descriptor.trim().is_empty() {
            return Err(self.malformed(0, MalformedReason::EmptyDescriptor));
        }

        let id = self.parse_type(builder, parent, 0)?;

        self.skip_whitespace();
        match self.peek() {
            None => Ok(id),
            Some(b'>') => Err(self.malformed(self.pos, MalformedReason::UnexpectedClose)),
            Some(_) => Err(self.malformed(self.pos, MalformedReason::TrailingInput)),
        }
    }

    /// Parse one `TypeDesc` starting at the cursor.
    ///
    /// `depth` counts the parameter lists enclosing this type.
    fn parse_type(
        &mut self,
        builder: &mut TypeTreeBuilder,
        parent: Option<NodeId>,
        depth: u32,
    ) -> Result<NodeId, DescriptorError> {
        let start = self.pos;
        let end = self.name_end();
        let name = self.descriptor[start..end].trim();
        self.pos = end;

        if name.is_empty() {
            let reason = match (depth, self.peek()) {
                (0, Some(b'>')) => MalformedReason::UnexpectedClose,
                (_, Some(b'<')) | (0, _) => MalformedReason::EmptyName,
                _ => MalformedReason::EmptyParameter,
            };
            return Err(self.malformed(start, reason));
        }

        let id = self.add_node(builder, parent, name)?;

        if self.peek() != Some(b'<') {
            return Ok(id);
        }
        if depth + 1 > MAX_DESCRIPTOR_DEPTH {
            return Err(DescriptorError::DepthExceeded {
                descriptor: self.descriptor.to_string(),
                limit: MAX_DESCRIPTOR_DEPTH,
            });
        }

        let open = self.pos;
        self.pos += 1;
        loop {
            self.parse_type(builder, Some(id), depth + 1)?;
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'>') => {
                    self.pos += 1;
                    return Ok(id);
                }
                None => return Err(self.malformed(open, MalformedReason::UnclosedParameterList)),
                Some(_) => return Err(self.malformed(self.pos, MalformedReason::TrailingInput)),
            }
        }
    }

    fn add_node(
        &self,
        builder: &mut TypeTreeBuilder,
        parent: Option<NodeId>,
        name: &str,
    ) -> Result<NodeId, DescriptorError> {
        let added = match parent {
            Some(parent) => builder.add(parent, name),
            None => builder.add_root(name),
        };
        added.map_err(|err| match err {
            TreeError::DepthExceeded { limit } => DescriptorError::DepthExceeded {
                descriptor: self.descriptor.to_string(),
                limit,
            },
            other => DescriptorError::Tree(other),
        })
    }

    /// Offset of the next structural delimiter, or the end of input.
    fn name_end(&self) -> usize {
        let rest = &self.descriptor.as_bytes()[self.pos..];
        memchr::memchr3(b'<', b'>', b',', rest).map_or(self.descriptor.len(), |i| self.pos + i)
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.descriptor[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.descriptor.as_bytes().get(self.pos).copied()
    }

    fn malformed(&self, offset: usize, reason: MalformedReason) -> DescriptorError {
        DescriptorError::Malformed {
            descriptor: self.descriptor.to_string(),
            offset,
            reason,
        }
    }
}

#[cfg(test)]
#[path = "tests/parser_tests.rs"]
mod tests;
