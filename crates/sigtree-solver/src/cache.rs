//! Memoizing resolver wrapper.

use crate::relation::{Relation, ResolveError, TypeRelationshipResolver};
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use tracing::trace;

/// Caches successful answers of an inner resolver per ordered name pair.
///
/// Failures are not cached, so a name that becomes resolvable later is
/// picked up on the next query. The cache is a `DashMap`, which keeps the
/// wrapper `Sync` for concurrent comparisons over shared trees.
pub struct CachingResolver<R> {
    inner: R,
    cache: DashMap<(Box<str>, Box<str>), Relation, FxBuildHasher>,
}

impl<R: TypeRelationshipResolver> CachingResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Number of cached pairs.
    pub fn cached_pairs(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: TypeRelationshipResolver> TypeRelationshipResolver for CachingResolver<R> {
    fn relate(&self, left: &str, right: &str) -> Result<Relation, ResolveError> {
        let key: (Box<str>, Box<str>) = (left.into(), right.into());
        if let Some(hit) = self.cache.get(&key) {
            return Ok(*hit);
        }

        let relation = self.inner.relate(left, right)?;
        trace!(left, right, ?relation, "caching relation");
        self.cache.insert(key, relation);
        Ok(relation)
    }
}
