//! Sync module - remote to local reconciliation of students and result lines.

mod sync_model;
mod sync_service;
mod sync_traits;


pub use sync_model::{BatchSummary, SyncOutcome, SyncRecord, SyncStatus};
pub use sync_service::SyncService;
pub use sync_traits::SyncServiceTrait;
