//! Repository for the `courses` table.

use sqlx::PgPool;

use curricula_core::types::DbId;

use crate::models::course::{Course, CourseWithProgram, CreateCourse, UpdateCourse};
use crate::models::program::Program;

const COLUMNS: &str = "id, name, program_id, created_at, updated_at";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (name, program_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.name)
            .bind(input.program_id)
            .fetch_one(pool)
            .await
    }

    /// Find a course by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List courses ordered by name, each with its parent program embedded.
    /// Optionally filtered to one program.
    pub async fn list_with_program(
        pool: &PgPool,
        program_id: Option<DbId>,
    ) -> Result<Vec<CourseWithProgram>, sqlx::Error> {
        #[derive(sqlx::FromRow)]
        struct Row {
            #[sqlx(flatten)]
            course: Course,
            program_name: String,
            program_created_at: curricula_core::types::Timestamp,
            program_updated_at: curricula_core::types::Timestamp,
        }

        let base = "SELECT c.id, c.name, c.program_id, c.created_at, c.updated_at,
                           p.name AS program_name,
                           p.created_at AS program_created_at,
                           p.updated_at AS program_updated_at
                    FROM courses c
                    JOIN programs p ON p.id = c.program_id";

        let rows: Vec<Row> = match program_id {
            Some(program_id) => {
                let query = format!("{base} WHERE c.program_id = $1 ORDER BY c.name");
                sqlx::query_as(&query)
                    .bind(program_id)
                    .fetch_all(pool)
                    .await?
            }
            None => {
                let query = format!("{base} ORDER BY c.name");
                sqlx::query_as(&query).fetch_all(pool).await?
            }
        };

        Ok(rows
            .into_iter()
            .map(|row| CourseWithProgram {
                program: Program {
                    id: row.course.program_id,
                    name: row.program_name,
                    created_at: row.program_created_at,
                    updated_at: row.program_updated_at,
                },
                course: row.course,
            })
            .collect())
    }

    /// Update a course. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                name = COALESCE($2, name),
                program_id = COALESCE($3, program_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.program_id)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a course. Contents referencing it cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
