//! In-memory [`DocumentStore`] used by tests and dry runs.

use std::cell::RefCell;
use std::collections::BTreeMap;

use log::debug;

use crate::app_response::AppResponse;
use crate::catalog_model::{CollectionKind, Document, DocumentId};
use crate::catalog_store::{DocumentStore, Filter};

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RefCell<BTreeMap<CollectionKind, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a document under the identifier it already carries, generating
    /// one if it has none. Lets tests build reference graphs the normal insert
    /// path cannot produce, such as cycles.
    pub fn insert_with_id(&self, kind: CollectionKind, mut document: Document) -> DocumentId {
        let id = *document.id.get_or_insert_with(DocumentId::new);
        self.collections.borrow_mut().entry(kind).or_default().push(document);
        id
    }

    pub fn count(&self, kind: CollectionKind) -> usize {
        self.collections.borrow().get(&kind).map(Vec::len).unwrap_or(0)
    }
}

impl DocumentStore for MemoryStore {
    fn insert(&self, kind: CollectionKind, mut document: Document) -> Result<DocumentId, AppResponse> {
        let id = DocumentId::new();
        document.id = Some(id);
        debug!("Inserting {} into {} (memory)", id, kind);
        self.collections.borrow_mut().entry(kind).or_default().push(document);
        Ok(id)
    }

    fn find(&self, kind: CollectionKind, filter: &Filter) -> Result<Vec<Document>, AppResponse> {
        let collections = self.collections.borrow();
        Ok(collections
            .get(&kind)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| filter.matches(document))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn delete_all(&self, kind: CollectionKind) -> Result<usize, AppResponse> {
        let removed = self
            .collections
            .borrow_mut()
            .remove(&kind)
            .map(|documents| documents.len())
            .unwrap_or(0);
        debug!("Deleted {} documents from {} (memory)", removed, kind);
        Ok(removed)
    }
}
