//! # E-bike Catalog
//!
//! A schemaless parts catalog for e-bikes stored in LMDB. Bikes, sub-assemblies
//! and individual parts all live in one `component` collection and can each
//! carry whatever properties make sense for them; parts point at their makers
//! in the `manufacturer` collection and assemblies point at their parts.
//!
//! ## Features
//!
//! - **Typed schemaless documents**: [`catalog_model::Document`] holds ordered
//!   fields of any [`catalog_model::Value`], including typed references
//! - **Pluggable storage**: code is written against [`catalog_store::DocumentStore`],
//!   backed by LMDB ([`lmdb_store::LmdbStore`]) or memory ([`memory_store::MemoryStore`])
//! - **Reference-following renderer**: [`renderer::render`] prints a document
//!   with every referenced part inlined beneath it
//! - **Price rollup**: [`aggregate::total_list_price`] sums list prices across parts
//!
//! ## Quick Start
//!
//! ```rust
//! use ebike_catalog::catalog_model::CollectionKind;
//! use ebike_catalog::catalog_store::Filter;
//! use ebike_catalog::memory_store::MemoryStore;
//! use ebike_catalog::{aggregate, renderer, seed};
//!
//! let store = MemoryStore::new();
//! seed::seed_demo_catalog(&store)?;
//!
//! let mut out = Vec::new();
//! renderer::dump_collection(&store, CollectionKind::Components, &Filter::equals("full-build", true), &mut out)?;
//! assert!(String::from_utf8_lossy(&out).contains("manufacturer: Yamaha"));
//!
//! let total = aggregate::total_list_price(&store)?;
//! assert_eq!(total.to_string(), "895");
//! # Ok::<(), ebike_catalog::app_response::AppResponse>(())
//! ```

pub mod aggregate;
pub mod app_response;
pub mod catalog_model;
pub mod catalog_store;
pub mod lmdb_store;
pub mod memory_store;
pub mod reference_codec;
pub mod renderer;
pub mod seed;
pub mod store_config;

pub use crate::app_response::AppResponse;
pub use crate::catalog_model::{CollectionKind, Document, DocumentId, Reference, Value};
pub use crate::catalog_store::{DocumentStore, Filter};
