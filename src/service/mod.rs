//! Database operations per resource. Compound sequences run in a single transaction.

mod classes;
mod health;
mod rows;
mod students;
mod subjects;
mod validation;
pub use classes::ClassService;
pub use health::HealthService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use validation::{parse_id, RequestValidator};
