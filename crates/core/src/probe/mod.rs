//! Discovery of which student identifiers exist remotely.

mod range_prober;

pub use range_prober::{build_student_id, IdentifierRange, RangeProber};
