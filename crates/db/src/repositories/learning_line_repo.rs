//! Repository for the `learning_lines` table and its program links.

use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};

use curricula_core::types::DbId;

use crate::models::component::Component;
use crate::models::learning_line::{
    CreateLearningLine, LearningLine, LearningLineWithRelations, UpdateLearningLine,
};
use crate::models::program::Program;

const COLUMNS: &str = "id, title, created_at, updated_at";

/// Provides CRUD operations for learning lines.
pub struct LearningLineRepo;

impl LearningLineRepo {
    /// Insert a new learning line and link it to the given programs in one
    /// transaction, returning the created row.
    pub async fn create_with_programs(
        pool: &PgPool,
        input: &CreateLearningLine,
        program_ids: &[DbId],
    ) -> Result<LearningLine, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("INSERT INTO learning_lines (title) VALUES ($1) RETURNING {COLUMNS}");
        let line = sqlx::query_as::<_, LearningLine>(&query)
            .bind(&input.title)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_links(&mut tx, line.id, program_ids).await?;

        tx.commit().await?;
        Ok(line)
    }

    /// Find a learning line by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LearningLine>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM learning_lines WHERE id = $1");
        sqlx::query_as::<_, LearningLine>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List learning lines ordered by title, each with its ordered components
    /// and linked programs embedded.
    ///
    /// When `program_id` is `Some`, only lines linked to that program are
    /// returned.
    pub async fn list_with_relations(
        pool: &PgPool,
        program_id: Option<DbId>,
    ) -> Result<Vec<LearningLineWithRelations>, sqlx::Error> {
        let lines = match program_id {
            Some(program_id) => {
                sqlx::query_as::<_, LearningLine>(
                    "SELECT l.id, l.title, l.created_at, l.updated_at
                     FROM learning_lines l
                     JOIN program_learning_lines pll ON pll.learning_line_id = l.id
                     WHERE pll.program_id = $1
                     ORDER BY l.title",
                )
                .bind(program_id)
                .fetch_all(pool)
                .await?
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM learning_lines ORDER BY title");
                sqlx::query_as::<_, LearningLine>(&query)
                    .fetch_all(pool)
                    .await?
            }
        };

        let ids: Vec<DbId> = lines.iter().map(|l| l.id).collect();
        let mut components = Self::components_by_line(pool, &ids).await?;
        let mut programs = Self::programs_by_line(pool, &ids).await?;

        Ok(lines
            .into_iter()
            .map(|line| {
                let id = line.id;
                LearningLineWithRelations {
                    learning_line: line,
                    components: components.remove(&id).unwrap_or_default(),
                    programs: programs.remove(&id).unwrap_or_default(),
                }
            })
            .collect())
    }

    /// Update a learning line. When `program_ids` is `Some`, the program
    /// links are replaced wholesale in the same transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLearningLine,
        program_ids: Option<&[DbId]>,
    ) -> Result<Option<LearningLine>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE learning_lines SET title = COALESCE($2, title), updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let line = sqlx::query_as::<_, LearningLine>(&query)
            .bind(id)
            .bind(&input.title)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(line) = line else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(program_ids) = program_ids {
            sqlx::query("DELETE FROM program_learning_lines WHERE learning_line_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::insert_links(&mut tx, id, program_ids).await?;
        }

        tx.commit().await?;
        Ok(Some(line))
    }

    /// Hard-delete a learning line. Components, link rows, and contents cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM learning_lines WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_links(
        tx: &mut Transaction<'_, Postgres>,
        learning_line_id: DbId,
        program_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        for program_id in program_ids {
            sqlx::query(
                "INSERT INTO program_learning_lines (program_id, learning_line_id) VALUES ($1, $2)",
            )
            .bind(program_id)
            .bind(learning_line_id)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
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

    async fn programs_by_line(
        pool: &PgPool,
        line_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Program>>, sqlx::Error> {
        if line_ids.is_empty() {
            return Ok(HashMap::new());
        }

        #[derive(sqlx::FromRow)]
        struct Row {
            learning_line_id: DbId,
            #[sqlx(flatten)]
            program: Program,
        }

        let rows: Vec<Row> = sqlx::query_as(
            "SELECT pll.learning_line_id, p.id, p.name, p.created_at, p.updated_at
             FROM programs p
             JOIN program_learning_lines pll ON pll.program_id = p.id
             WHERE pll.learning_line_id = ANY($1)
             ORDER BY p.name",
        )
        .bind(line_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<DbId, Vec<Program>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.learning_line_id)
                .or_default()
                .push(row.program);
        }
        Ok(grouped)
    }
}
