//! Program entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use curricula_core::types::{DbId, Timestamp};

use crate::models::course::Course;
use crate::models::learning_line::{LearningLine, LearningLineWithComponents};

/// A row from the `programs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Program {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Program list item with its courses and linked learning lines embedded.
#[derive(Debug, Serialize)]
pub struct ProgramWithRelations {
    #[serde(flatten)]
    pub program: Program,
    pub courses: Vec<Course>,
    pub learning_lines: Vec<LearningLine>,
}

/// Program detail: linked learning lines, each with its ordered components.
#[derive(Debug, Serialize)]
pub struct ProgramDetail {
    #[serde(flatten)]
    pub program: Program,
    pub learning_lines: Vec<LearningLineWithComponents>,
}

/// DTO for creating a new program.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProgram {
    pub name: String,
}

/// DTO for updating an existing program.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProgram {
    pub name: Option<String>,
}
