//! SQLite storage implementation for students.

mod model;
mod repository;

pub use model::{NewStudentDB, StudentChangesDB, StudentDB};
pub use repository::StudentRepository;
