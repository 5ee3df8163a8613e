//! Document store abstraction for MediTrack
//!
//! Provides the collection/query/cursor primitives the data access layer is
//! built on:
//! - Schemaless documents with store-assigned identifiers
//! - Equality-filtered, ordered queries with forward-only cursor pagination
//! - An async backend trait with an in-memory implementation
//! - A shared client handle constructed once and passed by reference

pub mod backend;
pub mod client;
pub mod cursor;
pub mod document;
pub mod error;
pub mod memory;
pub mod query;

pub use backend::*;
pub use client::*;
pub use cursor::*;
pub use document::*;
pub use error::*;
pub use memory::*;
pub use query::*;
