//! JSON file storage implementation for Patrimoine.
//!
//! This crate implements the repository traits defined in `patrimoine-core`
//! over a single JSON document on disk. It contains:
//! - Loading and atomically saving the document
//! - A single writer task that serializes every mutation
//! - The possession repository
//!
//! # Architecture
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-json (this crate)
//!              │
//!              ▼
//!         data.json
//! ```

pub mod db;
pub mod errors;
pub mod possessions;

pub use db::{init, spawn_writer, JsonStore, WriteHandle};
pub use errors::StorageError;
pub use possessions::{JsonPossessionRepository, PossessionsDocument};

// Re-export from patrimoine-core for convenience
pub use patrimoine_core::errors::{Error, RepositoryError, Result};
