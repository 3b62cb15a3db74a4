//! Result lookup clients.

pub mod diu;
mod traits;

pub use traits::ResultLookupClient;
