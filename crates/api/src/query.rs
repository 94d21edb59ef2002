//! Shared query parameter types for API handlers.

use serde::Deserialize;

use curricula_core::types::DbId;

/// Query parameters for `GET /programs`.
///
/// `assigned=true` restricts a DOCENT caller to programs they are assigned to.
#[derive(Debug, Default, Deserialize)]
pub struct ProgramListParams {
    #[serde(default)]
    pub assigned: bool,
}

/// Query parameters for list endpoints filtered by a parent program.
#[derive(Debug, Default, Deserialize)]
pub struct ProgramScopedParams {
    pub program_id: Option<DbId>,
}

/// Query parameters for `GET /components`.
#[derive(Debug, Default, Deserialize)]
pub struct LearningLineScopedParams {
    pub learning_line_id: Option<DbId>,
}

/// Equality filters for `GET /contents`. Present filters combine with AND.
#[derive(Debug, Default, Deserialize)]
pub struct ContentListParams {
    pub program_id: Option<DbId>,
    pub learning_line_id: Option<DbId>,
    pub component_id: Option<DbId>,
    pub track_id: Option<DbId>,
    pub course_id: Option<DbId>,
}
