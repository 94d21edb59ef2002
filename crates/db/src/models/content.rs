//! Content entity model and DTOs.
//!
//! List/detail queries join all five taxonomy tables plus the author, so
//! the repository reads a flat [`ContentDetailRow`] and folds it into the
//! nested [`ContentDetail`] shape the API serializes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use curricula_core::types::{DbId, Timestamp};

/// A row from the `contents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Content {
    pub id: DbId,
    pub rich_text_body: String,
    pub program_id: DbId,
    pub learning_line_id: DbId,
    pub component_id: DbId,
    pub track_id: DbId,
    pub course_id: DbId,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Compact reference to a taxonomy entry embedded in content responses.
#[derive(Debug, Clone, Serialize)]
pub struct TaxonomyRef {
    pub id: DbId,
    pub name: String,
}

/// Author info embedded in content responses. Never includes the hash.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorInfo {
    pub id: DbId,
    pub email: String,
    pub role: String,
}

/// Content with all five taxonomy entries and the author embedded.
#[derive(Debug, Serialize)]
pub struct ContentDetail {
    #[serde(flatten)]
    pub content: Content,
    pub program: TaxonomyRef,
    pub learning_line: TaxonomyRef,
    pub component: TaxonomyRef,
    pub track: TaxonomyRef,
    pub course: TaxonomyRef,
    pub created_by_user: AuthorInfo,
}

/// Flat row produced by the joined list/detail query.
#[derive(Debug, FromRow)]
pub struct ContentDetailRow {
    pub id: DbId,
    pub rich_text_body: String,
    pub program_id: DbId,
    pub learning_line_id: DbId,
    pub component_id: DbId,
    pub track_id: DbId,
    pub course_id: DbId,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub program_name: String,
    pub learning_line_title: String,
    pub component_name: String,
    pub track_name: String,
    pub course_name: String,
    pub author_email: String,
    pub author_role: String,
}

impl From<ContentDetailRow> for ContentDetail {
    fn from(row: ContentDetailRow) -> Self {
        ContentDetail {
            program: TaxonomyRef {
                id: row.program_id,
                name: row.program_name,
            },
            learning_line: TaxonomyRef {
                id: row.learning_line_id,
                name: row.learning_line_title,
            },
            component: TaxonomyRef {
                id: row.component_id,
                name: row.component_name,
            },
            track: TaxonomyRef {
                id: row.track_id,
                name: row.track_name,
            },
            course: TaxonomyRef {
                id: row.course_id,
                name: row.course_name,
            },
            created_by_user: AuthorInfo {
                id: row.created_by,
                email: row.author_email,
                role: row.author_role,
            },
            content: Content {
                id: row.id,
                rich_text_body: row.rich_text_body,
                program_id: row.program_id,
                learning_line_id: row.learning_line_id,
                component_id: row.component_id,
                track_id: row.track_id,
                course_id: row.course_id,
                created_by: row.created_by,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

/// DTO for creating a new content entry. The author comes from the caller's
/// token, not the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContent {
    pub rich_text_body: String,
    pub program_id: DbId,
    pub learning_line_id: DbId,
    pub component_id: DbId,
    pub track_id: DbId,
    pub course_id: DbId,
}

/// Equality filters for content listing. All present filters combine with AND.
#[derive(Debug, Default, Clone)]
pub struct ContentFilter {
    pub program_id: Option<DbId>,
    pub learning_line_id: Option<DbId>,
    pub component_id: Option<DbId>,
    pub track_id: Option<DbId>,
    pub course_id: Option<DbId>,
}
