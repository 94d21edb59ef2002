//! HTTP handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod component;
pub mod content;
pub mod course;
pub mod learning_line;
pub mod program;
pub mod track;
