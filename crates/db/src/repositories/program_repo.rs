//! Repository for the `programs` table.
//!
//! List and detail queries embed related courses, learning lines, and
//! components by fetching the relation sets in bulk and grouping in memory.

use std::collections::HashMap;

use sqlx::PgPool;

use curricula_core::types::DbId;

use crate::models::component::Component;
use crate::models::course::Course;
use crate::models::learning_line::{LearningLine, LearningLineWithComponents};
use crate::models::program::{
    CreateProgram, Program, ProgramDetail, ProgramWithRelations, UpdateProgram,
};

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for programs.
pub struct ProgramRepo;

impl ProgramRepo {
    /// Insert a new program, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProgram) -> Result<Program, sqlx::Error> {
        let query = format!("INSERT INTO programs (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Program>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a program by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Program>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM programs WHERE id = $1");
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List programs ordered by name, each with its courses and linked
    /// learning lines embedded.
    ///
    /// When `assigned_to` is `Some`, only programs that user is assigned to
    /// (via `user_programs`) are returned.
    pub async fn list_with_relations(
        pool: &PgPool,
        assigned_to: Option<DbId>,
    ) -> Result<Vec<ProgramWithRelations>, sqlx::Error> {
        let programs = match assigned_to {
            Some(user_id) => {
                sqlx::query_as::<_, Program>(
                    "SELECT p.id, p.name, p.created_at, p.updated_at
                     FROM programs p
                     JOIN user_programs up ON up.program_id = p.id
                     WHERE up.user_id = $1
                     ORDER BY p.name",
                )
                .bind(user_id)
                .fetch_all(pool)
                .await?
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM programs ORDER BY name");
                sqlx::query_as::<_, Program>(&query).fetch_all(pool).await?
            }
        };

        let ids: Vec<DbId> = programs.iter().map(|p| p.id).collect();
        let mut courses = Self::courses_by_program(pool, &ids).await?;
        let mut lines = Self::learning_lines_by_program(pool, &ids).await?;

        Ok(programs
            .into_iter()
            .map(|program| {
                let courses = courses.remove(&program.id).unwrap_or_default();
                let learning_lines = lines.remove(&program.id).unwrap_or_default();
                ProgramWithRelations {
                    program,
                    courses,
                    learning_lines,
                }
            })
            .collect())
    }

    /// Fetch one program with its linked learning lines, each carrying its
    /// components ordered by sort_order.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<ProgramDetail>, sqlx::Error> {
        let Some(program) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, LearningLine>(
            "SELECT l.id, l.title, l.created_at, l.updated_at
             FROM learning_lines l
             JOIN program_learning_lines pll ON pll.learning_line_id = l.id
             WHERE pll.program_id = $1
             ORDER BY l.title",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let line_ids: Vec<DbId> = lines.iter().map(|l| l.id).collect();
        let mut components = Self::components_by_line(pool, &line_ids).await?;

        let learning_lines = lines
            .into_iter()
            .map(|line| {
                let components = components.remove(&line.id).unwrap_or_default();
                LearningLineWithComponents {
                    learning_line: line,
                    components,
                }
            })
            .collect();

        Ok(Some(ProgramDetail {
            program,
            learning_lines,
        }))
    }

    /// Update a program. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProgram,
    ) -> Result<Option<Program>, sqlx::Error> {
        let query = format!(
            "UPDATE programs SET name = COALESCE($2, name), updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a program. Courses, link rows, and contents cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM programs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn courses_by_program(
        pool: &PgPool,
        program_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Course>>, sqlx::Error> {
        if program_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let courses = sqlx::query_as::<_, Course>(
            "SELECT id, name, program_id, created_at, updated_at
             FROM courses WHERE program_id = ANY($1) ORDER BY name",
        )
        .bind(program_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<DbId, Vec<Course>> = HashMap::new();
        for course in courses {
            grouped.entry(course.program_id).or_default().push(course);
        }
        Ok(grouped)
    }

    async fn learning_lines_by_program(
        pool: &PgPool,
        program_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<LearningLine>>, sqlx::Error> {
        if program_ids.is_empty() {
            return Ok(HashMap::new());
        }

        #[derive(sqlx::FromRow)]
        struct Row {
            program_id: DbId,
            #[sqlx(flatten)]
            line: LearningLine,
        }

        let rows: Vec<Row> = sqlx::query_as(
            "SELECT pll.program_id, l.id, l.title, l.created_at, l.updated_at
             FROM learning_lines l
             JOIN program_learning_lines pll ON pll.learning_line_id = l.id
             WHERE pll.program_id = ANY($1)
             ORDER BY l.title",
        )
        .bind(program_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<DbId, Vec<LearningLine>> = HashMap::new();
        for row in rows {
            grouped.entry(row.program_id).or_default().push(row.line);
        }
        Ok(grouped)
    }

    async fn components_by_line(
        pool: &PgPool,
        line_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Component>>, sqlx::Error> {
        if line_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let components = sqlx::query_as::<_, Component>(
            "SELECT id, name, learning_line_id, sort_order, created_at, updated_at
             FROM components WHERE learning_line_id = ANY($1)
             ORDER BY sort_order, name",
        )
        .bind(line_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<DbId, Vec<Component>> = HashMap::new();
        for component in components {
            grouped
                .entry(component.learning_line_id)
                .or_default()
                .push(component);
        }
        Ok(grouped)
    }
}
