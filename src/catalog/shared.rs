//! Process-wide catalog handle.
//!
//! Mutations take the write lock, reads hold the read lock for their whole
//! duration, so a query sees each mutation either completely or not at all.
//! Construct one at startup and clone the handle into whoever needs it.

use crate::catalog::{Catalog, CatalogError, Facets, QueryFilter, QueryPage};
use crate::record::{QuestionId, QuestionRecord};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(catalog)),
        }
    }

    pub fn insert(&self, record: QuestionRecord) -> Result<(), CatalogError> {
        self.inner.write().insert(record)
    }

    pub fn replace(&self, record: QuestionRecord) -> Result<(), CatalogError> {
        self.inner.write().replace(record)
    }

    pub fn remove(&self, id: &QuestionId) -> Result<QuestionRecord, CatalogError> {
        self.inner.write().remove(id)
    }

    pub fn get(&self, id: &QuestionId) -> Option<QuestionRecord> {
        self.inner.read().get(id).cloned()
    }

    pub fn query(&self, filter: &QueryFilter) -> Result<QueryPage, CatalogError> {
        self.inner.read().query(filter)
    }

    pub fn facets(&self) -> Facets {
        self.inner.read().facets()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Point-in-time copy of the whole catalog.
    pub fn snapshot(&self) -> Catalog {
        self.inner.read().clone()
    }

    /// Run several reads against one consistent view.
    pub fn read<T>(&self, f: impl FnOnce(&Catalog) -> T) -> T {
        f(&self.inner.read())
    }
}
