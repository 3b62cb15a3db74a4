//! DRT Remote Crate
//!
//! Read-only access to the DIU result lookup service.
//!
//! # Overview
//!
//! The service exposes two lookups:
//! - student info by student id (`result/studentInfo`)
//! - course results by student id and semester id (`result`)
//!
//! Both return flat JSON records keyed by camelCase field names. This crate
//! hands those records back untouched as [`RawRecord`]s; translating them into
//! the internal schema is the job of `drt-core`.
//!
//! # Signals
//!
//! ```text
//! fetch_student_info    -> record without `studentId`   => student does not exist
//! fetch_semester_result -> empty list                   => no courses that semester
//! either                -> Err(RemoteError)             => could not determine
//! ```

pub mod client;
pub mod errors;
pub mod models;

pub use client::diu::{DiuClientConfig, DiuResultClient, DEFAULT_BASE_URL};
pub use client::ResultLookupClient;
pub use errors::RemoteError;
pub use models::RawRecord;
