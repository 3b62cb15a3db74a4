//! SQLite storage implementation for DRT.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `drt-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for students and semester result lines
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.
//!
//! ```text
//!   core (sync engine, traits)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```
//!
//! Reads use pooled connections. Writes are funnelled through a single
//! writer task ([`WriteHandle`]) running each job in an immediate transaction.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod semester_results;
pub mod students;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use semester_results::SemesterResultRepository;
pub use students::StudentRepository;

// Re-export from drt-core for convenience
pub use drt_core::errors::{DatabaseError, Error, Result};
