//! Track entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use curricula_core::types::{DbId, Timestamp};

use crate::models::program::Program;

/// A row from the `tracks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Track {
    pub id: DbId,
    pub name: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Track list item with its linked programs embedded.
#[derive(Debug, Serialize)]
pub struct TrackWithPrograms {
    #[serde(flatten)]
    pub track: Track,
    pub programs: Vec<Program>,
}

/// DTO for creating a new track.
#[derive(Debug, Clone)]
pub struct CreateTrack {
    pub name: String,
    pub sort_order: Option<i32>,
}

/// DTO for updating an existing track.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTrack {
    pub name: Option<String>,
    pub sort_order: Option<i32>,
}
