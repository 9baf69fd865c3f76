//! # fhirgraph-db-memory
//!
//! In-memory storage backend for the fhirgraph server.
//!
//! Backed by a lock-free concurrent map, suitable for development and
//! tests. Search is a naive but deterministic scan: prefix matching on
//! string elements, exact matching on references, with `_count`, `_offset`
//! and `_sort` applied in that order after filtering.

mod query;
mod storage;

pub use storage::InMemoryStorage;
