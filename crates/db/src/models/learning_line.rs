//! Learning line entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use curricula_core::types::{DbId, Timestamp};

use crate::models::component::Component;

/// A row from the `learning_lines` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LearningLine {
    pub id: DbId,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Learning line with its components, ordered by sort_order.
#[derive(Debug, Serialize)]
pub struct LearningLineWithComponents {
    #[serde(flatten)]
    pub learning_line: LearningLine,
    pub components: Vec<Component>,
}

/// Learning line list item: ordered components plus linked programs.
#[derive(Debug, Serialize)]
pub struct LearningLineWithRelations {
    #[serde(flatten)]
    pub learning_line: LearningLine,
    pub components: Vec<Component>,
    pub programs: Vec<crate::models::program::Program>,
}

/// DTO for creating a new learning line.
#[derive(Debug, Clone)]
pub struct CreateLearningLine {
    pub title: String,
}

/// DTO for updating an existing learning line.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLearningLine {
    pub title: Option<String>,
}
