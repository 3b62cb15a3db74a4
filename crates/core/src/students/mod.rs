//! Students module - identity records, domain models and traits.

mod students_model;
mod students_traits;

pub use students_model::{NewStudent, Student, StudentInfo};
pub use students_traits::StudentRepositoryTrait;
