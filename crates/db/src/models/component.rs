//! Component entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use curricula_core::types::{DbId, Timestamp};

use crate::models::learning_line::LearningLine;

/// A row from the `components` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Component {
    pub id: DbId,
    pub name: String,
    pub learning_line_id: DbId,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Component list item with its parent learning line embedded.
#[derive(Debug, Serialize)]
pub struct ComponentWithLine {
    #[serde(flatten)]
    pub component: Component,
    pub learning_line: LearningLine,
}

/// DTO for creating a new component.
#[derive(Debug, Clone)]
pub struct CreateComponent {
    pub name: String,
    pub learning_line_id: DbId,
    pub sort_order: Option<i32>,
}

/// DTO for updating an existing component.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateComponent {
    pub name: Option<String>,
    pub learning_line_id: Option<DbId>,
    pub sort_order: Option<i32>,
}
