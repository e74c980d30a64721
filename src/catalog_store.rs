//! The document store contract the catalog is written against.
//!
//! Everything above this layer (seeding, rendering, aggregation) receives a
//! store handle explicitly, so the same code runs against the LMDB-backed
//! [`LmdbStore`](crate::lmdb_store::LmdbStore) and the in-memory
//! [`MemoryStore`](crate::memory_store::MemoryStore).

use crate::aggregate::{run_pipeline, Stage};
use crate::app_response::AppResponse;
use crate::catalog_model::{CollectionKind, Document, DocumentId, Value};

/// Predicate selecting documents of a collection.
///
/// Field names may be dotted paths into nested documents (`list_price.value`).
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    Id(DocumentId),
    Equals(String, Value),
    Exists(String),
}

impl Filter {
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Equals(field.into(), value.into())
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Filter::Exists(field.into())
    }

    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Id(id) => document.id.as_ref() == Some(id),
            Filter::Equals(field, expected) => document.get_path(field) == Some(expected),
            Filter::Exists(field) => document.get_path(field).is_some(),
        }
    }
}

pub trait DocumentStore {
    /// Stores `document` under a freshly generated identifier and returns it.
    /// Any identifier already set on the document is replaced.
    fn insert(&self, kind: CollectionKind, document: Document) -> Result<DocumentId, AppResponse>;

    /// All documents matching `filter`, in insertion order.
    fn find(&self, kind: CollectionKind, filter: &Filter) -> Result<Vec<Document>, AppResponse>;

    /// Removes every document of the collection, returning how many were removed.
    fn delete_all(&self, kind: CollectionKind) -> Result<usize, AppResponse>;

    /// First document matching `filter`, or `None`.
    fn find_one(&self, kind: CollectionKind, filter: &Filter) -> Result<Option<Document>, AppResponse> {
        Ok(self.find(kind, filter)?.into_iter().next())
    }

    /// Runs an aggregation pipeline over the whole collection.
    fn aggregate(&self, kind: CollectionKind, stages: &[Stage]) -> Result<Document, AppResponse> {
        let documents = self.find(kind, &Filter::All)?;
        Ok(run_pipeline(documents, stages))
    }
}
