//! Settings for opening the LMDB-backed catalog store.

use std::env;

/// Environment variable overriding the database name.
pub const DB_NAME_ENV: &str = "EBIKE_CATALOG_DB";

#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Database name; the environment lives in the directory `<name>.lmdb`.
    pub name: String,
    /// Maximum size of the memory map in bytes.
    pub map_size: usize,
    /// Maximum number of named databases in the environment.
    pub max_dbs: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            name: "bikes".to_string(),
            map_size: 10 * 1024 * 1024,
            max_dbs: 4,
        }
    }
}

impl StoreConfig {
    pub fn new(name: impl Into<String>) -> Self {
        StoreConfig { name: name.into(), ..Self::default() }
    }

    /// Defaults, with the name taken from `EBIKE_CATALOG_DB` when it is set and non-empty.
    pub fn from_env() -> Self {
        match env::var(DB_NAME_ENV) {
            Ok(name) if !name.trim().is_empty() => Self::new(name.trim()),
            _ => Self::default(),
        }
    }

    pub fn lmdb_dir(&self) -> String {
        format!("{}.lmdb", self.name)
    }
}
