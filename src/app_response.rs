//! Error and response type shared by every catalog operation.

use std::fmt::{Display, Formatter};

use lmdb::Error as LmdbError;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppResponse {
    DatabaseError(String),
    SerializationError(String),
    NotFound(String),
    /// A value was decoded as a reference but does not carry the reference tag
    /// or a well-formed identifier.
    InvalidReference(String),
    /// Rendering followed a reference back into a component that is still being expanded.
    CyclicReference(String),
    ValidationError(String),
    IoError(String),
}

impl Display for AppResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AppResponse::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppResponse::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            AppResponse::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppResponse::InvalidReference(msg) => write!(f, "Invalid reference: {}", msg),
            AppResponse::CyclicReference(id) => write!(f, "Cyclic reference to component {}", id),
            AppResponse::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppResponse::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppResponse {}

impl From<LmdbError> for AppResponse {
    fn from(err: LmdbError) -> Self {
        match err {
            LmdbError::NotFound => AppResponse::NotFound("Key not found in LMDB".to_string()),
            LmdbError::MapFull => {
                AppResponse::DatabaseError("LMDB map is full, raise map_size".to_string())
            }
            LmdbError::Corrupted => AppResponse::DatabaseError("Database is corrupted".to_string()),
            LmdbError::Other(code) => {
                AppResponse::DatabaseError(format!("LMDB system error code {}", code))
            }
            _ => AppResponse::DatabaseError(format!("LMDB error: {}", err)),
        }
    }
}

impl From<SerdeError> for AppResponse {
    fn from(err: SerdeError) -> Self {
        AppResponse::SerializationError(format!("JSON serialization error: {}", err))
    }
}

impl From<std::io::Error> for AppResponse {
    fn from(err: std::io::Error) -> Self {
        AppResponse::IoError(err.to_string())
    }
}
