//! LMDB-backed [`DocumentStore`].
//!
//! One LMDB environment holds a named database per [`CollectionKind`]. Each
//! document is stored as JSON under the key `<sequence>:<id>`, where the
//! zero-padded sequence makes cursor order equal insertion order.
//!
//! ```no_run
//! use ebike_catalog::catalog_model::{CollectionKind, Document};
//! use ebike_catalog::catalog_store::{DocumentStore, Filter};
//! use ebike_catalog::lmdb_store::LmdbStore;
//! use ebike_catalog::store_config::StoreConfig;
//!
//! let mut store = LmdbStore::open(&StoreConfig::new("bikes"))?;
//! let id = store.insert(CollectionKind::Manufacturers, Document::named("Yamaha"))?;
//! let found = store.find_one(CollectionKind::Manufacturers, &Filter::Id(id))?;
//! assert_eq!(found.and_then(|d| d.name().map(str::to_string)), Some("Yamaha".to_string()));
//! store.close()?;
//! # Ok::<(), ebike_catalog::app_response::AppResponse>(())
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use lmdb::{Cursor, Database, DatabaseFlags, Environment, Error as LmdbError, RwTransaction, Transaction, WriteFlags};
use lmdb_sys::MDB_LAST;
use log::{debug, info, warn};

use crate::app_response::AppResponse;
use crate::catalog_model::{CollectionKind, Document, DocumentId};
use crate::catalog_store::{DocumentStore, Filter};
use crate::store_config::StoreConfig;

pub struct LmdbStore {
    env: Option<Environment>,
    collections: BTreeMap<CollectionKind, Database>,
    path: String,
}

impl LmdbStore {
    /// Opens (creating if needed) the environment at `<config.name>.lmdb`
    /// and both collection databases.
    pub fn open(config: &StoreConfig) -> Result<Self, AppResponse> {
        let path = config.lmdb_dir();

        if config.name.trim().is_empty() {
            return Err(AppResponse::ValidationError("Database name cannot be empty".to_string()));
        }

        std::fs::create_dir_all(&path)
            .map_err(|e| AppResponse::DatabaseError(format!("Cannot create directory {}: {}", path, e)))?;

        let env = Environment::new()
            .set_max_dbs(config.max_dbs)
            .set_map_size(config.map_size)
            .open(Path::new(&path))?;

        let mut collections = BTreeMap::new();
        for kind in CollectionKind::ALL {
            let db = env.create_db(Some(kind.collection_name()), DatabaseFlags::empty())?;
            collections.insert(kind, db);
        }

        info!("Opened catalog store at {}", path);

        Ok(LmdbStore { env: Some(env), collections, path })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.env.is_some()
    }

    /// Flushes the environment to disk and releases it. Further operations on
    /// this handle fail with [`AppResponse::DatabaseError`].
    pub fn close(&mut self) -> Result<(), AppResponse> {
        match self.env.take() {
            Some(env) => {
                env.sync(true)?;
                self.collections.clear();
                info!("Closed catalog store at {}", self.path);
                Ok(())
            }
            None => {
                warn!("Close requested on already closed store {}", self.path);
                Ok(())
            }
        }
    }

    fn env(&self) -> Result<&Environment, AppResponse> {
        self.env
            .as_ref()
            .ok_or_else(|| AppResponse::DatabaseError(format!("Store {} is closed", self.path)))
    }

    fn database(&self, kind: CollectionKind) -> Result<Database, AppResponse> {
        self.collections
            .get(&kind)
            .copied()
            .ok_or_else(|| AppResponse::DatabaseError(format!("Collection {} is not open", kind)))
    }

    /// Sequence following the last key of `db`, 0 when it is empty.
    fn next_sequence(txn: &RwTransaction, db: Database) -> Result<u64, AppResponse> {
        let cursor = txn.open_ro_cursor(db)?;
        match cursor.get(None, None, MDB_LAST) {
            Ok((Some(key), _)) => Ok(sequence_of(key)? + 1),
            Ok((None, _)) | Err(LmdbError::NotFound) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}

fn record_key(sequence: u64, id: &DocumentId) -> String {
    format!("{:020}:{}", sequence, id)
}

fn sequence_of(key: &[u8]) -> Result<u64, AppResponse> {
    std::str::from_utf8(key)
        .ok()
        .and_then(|key| key.split(':').next())
        .and_then(|seq| seq.parse().ok())
        .ok_or_else(|| AppResponse::DatabaseError(format!("Malformed record key {:?}", key)))
}

fn key_has_id(key: &[u8], id: &DocumentId) -> bool {
    std::str::from_utf8(key)
        .map(|key| key.ends_with(&format!(":{}", id)))
        .unwrap_or(false)
}

impl DocumentStore for LmdbStore {
    fn insert(&self, kind: CollectionKind, mut document: Document) -> Result<DocumentId, AppResponse> {
        let env = self.env()?;
        let db = self.database(kind)?;

        let id = DocumentId::new();
        document.id = Some(id);
        let json = serde_json::to_vec(&document)?;

        let mut txn = env.begin_rw_txn()?;
        let key = record_key(Self::next_sequence(&txn, db)?, &id);
        txn.put(db, &key, &json, WriteFlags::NO_OVERWRITE)?;
        txn.commit()?;

        debug!("Inserted {} into {}", id, kind);
        Ok(id)
    }

    fn find(&self, kind: CollectionKind, filter: &Filter) -> Result<Vec<Document>, AppResponse> {
        let env = self.env()?;
        let db = self.database(kind)?;

        let txn = env.begin_ro_txn()?;
        let mut documents = Vec::new();
        {
            let mut cursor = txn.open_ro_cursor(db)?;
            for (key, value) in cursor.iter() {
                if let Filter::Id(id) = filter {
                    if !key_has_id(key, id) {
                        continue;
                    }
                }
                let document: Document = serde_json::from_slice(value)?;
                if filter.matches(&document) {
                    documents.push(document);
                }
            }
        }
        txn.commit()?;

        debug!("Found {} documents in {} for {:?}", documents.len(), kind, filter);
        Ok(documents)
    }

    fn delete_all(&self, kind: CollectionKind) -> Result<usize, AppResponse> {
        let env = self.env()?;
        let db = self.database(kind)?;

        let mut txn = env.begin_rw_txn()?;
        let count = {
            let mut cursor = txn.open_ro_cursor(db)?;
            cursor.iter().count()
        };
        txn.clear_db(db)?;
        txn.commit()?;

        debug!("Deleted {} documents from {}", count, kind);
        Ok(count)
    }
}
