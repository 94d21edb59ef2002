//! Row structs and DTOs, one module per table.

pub mod component;
pub mod content;
pub mod course;
pub mod learning_line;
pub mod program;
pub mod session;
pub mod track;
pub mod user;
