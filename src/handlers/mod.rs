//! HTTP handlers for students, subjects and classes.

pub mod classes;
pub mod students;
pub mod subjects;
pub use classes::*;
pub use students::*;
pub use subjects::*;
