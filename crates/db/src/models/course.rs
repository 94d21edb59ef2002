//! Course entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use curricula_core::types::{DbId, Timestamp};

use crate::models::program::Program;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub name: String,
    pub program_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Course list item with its parent program embedded.
#[derive(Debug, Serialize)]
pub struct CourseWithProgram {
    #[serde(flatten)]
    pub course: Course,
    pub program: Program,
}

/// DTO for creating a new course.
#[derive(Debug, Clone)]
pub struct CreateCourse {
    pub name: String,
    pub program_id: DbId,
}

/// DTO for updating an existing course.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCourse {
    pub name: Option<String>,
    pub program_id: Option<DbId>,
}
