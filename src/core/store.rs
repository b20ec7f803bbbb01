//! Cache of decomposed domains, keyed by mesh name and domain id.
//!
//! A multi-domain mesh is decomposed one domain at a time, and plot pipelines
//! ask for the same domain's remap tables many times over (once per field).
//! [`RemapStore`] keeps each decomposed domain behind an [`Arc`] so repeated
//! lookups are a map probe plus a reference count, not a re-decomposition.
//!
//! The store does no locking of its own. Decomposition is single-threaded per
//! domain, and after construction a [`ZooMesh`] is immutable, so concurrent
//! readers simply hold their own `Arc`s; callers that insert or evict from
//! several threads wrap the store in their own synchronization. Eviction only
//! drops the store's reference, so a reader that already fetched a mesh keeps
//! a valid one.

#![forbid(unsafe_code)]

// =============================================================================
// IMPORTS
// =============================================================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::collections::{fast_hash_map_with_capacity, DomainId, FastHashMap};
use crate::core::mesh::ZooMesh;

// =============================================================================
// DOMAIN KEY
// =============================================================================

/// Identifies one decomposed domain: which mesh, and which domain of it.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct DomainKey {
    /// Name of the mesh the domain belongs to.
    pub mesh: String,
    /// Domain id within that mesh.
    pub domain: DomainId,
}

impl DomainKey {
    /// Creates a key for `domain` of the named mesh.
    pub fn new(mesh: impl Into<String>, domain: DomainId) -> Self {
        Self {
            mesh: mesh.into(),
            domain,
        }
    }
}

impl std::fmt::Display for DomainKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "domain {} of mesh {}", self.domain, self.mesh)
    }
}

// =============================================================================
// REMAP STORE
// =============================================================================

/// In-memory registry of decomposed domains.
///
/// # Examples
///
/// ```
/// use zoomesh::core::cell::SourceCell;
/// use zoomesh::core::mesh::{SourceMesh, ZooMesh};
/// use zoomesh::core::store::{DomainKey, RemapStore};
///
/// let source = SourceMesh::new(
///     0,
///     2,
///     vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
///     vec![SourceCell::polygon(vec![0, 1, 2, 3])],
/// )
/// .unwrap();
///
/// let mut store = RemapStore::new();
/// store.insert(DomainKey::new("flow", 0), ZooMesh::decompose(&source));
///
/// let cached = store.get(&DomainKey::new("flow", 0)).unwrap();
/// assert_eq!(cached.cell_count(), 4);
/// assert!(store.get(&DomainKey::new("flow", 1)).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RemapStore {
    domains: FastHashMap<DomainKey, Arc<ZooMesh>>,
}

impl RemapStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with room for `capacity` domains.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            domains: fast_hash_map_with_capacity(capacity),
        }
    }

    /// Stores a decomposed domain, replacing any previous entry for the key.
    ///
    /// Returns the shared handle; readers holding the replaced entry keep it
    /// until they drop their `Arc`s.
    pub fn insert(&mut self, key: DomainKey, mesh: ZooMesh) -> Arc<ZooMesh> {
        let shared = Arc::new(mesh);
        self.domains.insert(key, Arc::clone(&shared));
        shared
    }

    /// Fetches the decomposed domain for `key`, if cached.
    #[must_use]
    pub fn get(&self, key: &DomainKey) -> Option<Arc<ZooMesh>> {
        self.domains.get(key).map(Arc::clone)
    }

    /// `true` when the key has a cached entry.
    #[must_use]
    pub fn contains(&self, key: &DomainKey) -> bool {
        self.domains.contains_key(key)
    }

    /// Drops the entry for `key`, returning it if it was cached.
    pub fn evict(&mut self, key: &DomainKey) -> Option<Arc<ZooMesh>> {
        self.domains.remove(key)
    }

    /// Drops every domain of the named mesh, returning how many were cached.
    pub fn evict_mesh(&mut self, mesh: &str) -> usize {
        let before = self.domains.len();
        self.domains.retain(|key, _| key.mesh != mesh);
        before - self.domains.len()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.domains.clear();
    }

    /// Number of cached domains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// `true` when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Keys of all cached domains, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &DomainKey> {
        self.domains.keys()
    }
}

// =============================================================================
// TESTS
// =============================================================================
