//! Payload types returned by the result lookup service.

use serde_json::{Map, Value};

/// A flat record as delivered by the service, keyed by remote field names.
pub type RawRecord = Map<String, Value>;
