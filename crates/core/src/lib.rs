//! DRT Core - field mapping, domain entities, sync services and traits.
//!
//! This crate keeps a local store of DIU student records in step with the
//! remote result service. It is database-agnostic and defines repository
//! traits that are implemented by the `storage-sqlite` crate.
//!
//! ```text
//!   drt-remote (lookups)
//!         │
//!         ▼
//!   mapping ──► sync::SyncService ──► students / semester_results traits
//!         │                                   │
//!         └──► probe::RangeProber             ▼
//!                                     storage-sqlite
//! ```

pub mod errors;
pub mod mapping;
pub mod probe;
pub mod semester_results;
pub mod students;
pub mod sync;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
