//! Semester results module - per-course result lines, domain models and traits.

mod semester_results_model;
mod semester_results_traits;

pub use semester_results_model::{
    NewSemesterResult, SemesterResult, SemesterResultInfo, SemesterResultKey,
};
pub use semester_results_traits::SemesterResultRepositoryTrait;
