//! Centralized limits for descriptor parsing and tree construction.
//!
//! Both the parser and the tree builder are recursive or build structures
//! that are later walked recursively. Every walk is bounded by the depth of
//! the tree, so bounding depth at construction bounds every later traversal.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth of angle-bracket parameter lists in a descriptor.
///
/// `A<B<C>>` has depth 2. Parsing a descriptor that nests deeper fails with
/// a depth error instead of recursing further.
///
/// ```text
/// java.util.Map<java.lang.String, java.util.List<java.lang.Integer>>
/// //           ^ depth 1          ^ depth 2
/// ```
pub const MAX_DESCRIPTOR_DEPTH: u32 = 256;

/// Maximum depth of any node in a `TypeTree`.
///
/// The root sits at depth 0. Trees built programmatically are held to the
/// same bound as parsed ones so the comparator never needs its own guard.
pub const MAX_TREE_DEPTH: u32 = MAX_DESCRIPTOR_DEPTH;

// =============================================================================
// Capacity Hints
// =============================================================================

/// Initial node capacity for a tree built from a descriptor.
///
/// Most real signatures have fewer than a dozen nodes.
pub const TREE_INITIAL_CAPACITY: usize = 8;
