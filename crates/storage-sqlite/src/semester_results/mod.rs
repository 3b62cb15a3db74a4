//! SQLite storage implementation for semester result lines.

mod model;
mod repository;

pub use model::{NewSemesterResultDB, SemesterResultChangesDB, SemesterResultDB};
pub use repository::SemesterResultRepository;
