//! Repository for the `components` table.

use sqlx::PgPool;

use curricula_core::types::DbId;

use crate::models::component::{Component, ComponentWithLine, CreateComponent, UpdateComponent};
use crate::models::learning_line::LearningLine;

const COLUMNS: &str = "id, name, learning_line_id, sort_order, created_at, updated_at";

/// Provides CRUD operations for components.
pub struct ComponentRepo;

impl ComponentRepo {
    /// Insert a new component, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateComponent) -> Result<Component, sqlx::Error> {
        let query = format!(
            "INSERT INTO components (name, learning_line_id, sort_order)
             VALUES ($1, $2, COALESCE($3, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Component>(&query)
            .bind(&input.name)
            .bind(input.learning_line_id)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Find a component by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Component>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM components WHERE id = $1");
        sqlx::query_as::<_, Component>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List components ordered by sort_order, each with its parent learning
    /// line embedded. Optionally filtered to one learning line.
    pub async fn list_with_line(
        pool: &PgPool,
        learning_line_id: Option<DbId>,
    ) -> Result<Vec<ComponentWithLine>, sqlx::Error> {
        #[derive(sqlx::FromRow)]
        struct Row {
            #[sqlx(flatten)]
            component: Component,
            line_title: String,
            line_created_at: curricula_core::types::Timestamp,
            line_updated_at: curricula_core::types::Timestamp,
        }

        let base = "SELECT c.id, c.name, c.learning_line_id, c.sort_order,
                           c.created_at, c.updated_at,
                           l.title AS line_title,
                           l.created_at AS line_created_at,
                           l.updated_at AS line_updated_at
                    FROM components c
                    JOIN learning_lines l ON l.id = c.learning_line_id";

        let rows: Vec<Row> = match learning_line_id {
            Some(line_id) => {
                let query =
                    format!("{base} WHERE c.learning_line_id = $1 ORDER BY c.sort_order, c.name");
                sqlx::query_as(&query).bind(line_id).fetch_all(pool).await?
            }
            None => {
                let query = format!("{base} ORDER BY c.sort_order, c.name");
                sqlx::query_as(&query).fetch_all(pool).await?
            }
        };

        Ok(rows
            .into_iter()
            .map(|row| ComponentWithLine {
                learning_line: LearningLine {
                    id: row.component.learning_line_id,
                    title: row.line_title,
                    created_at: row.line_created_at,
                    updated_at: row.line_updated_at,
                },
                component: row.component,
            })
            .collect())
    }

    /// Update a component. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateComponent,
    ) -> Result<Option<Component>, sqlx::Error> {
        let query = format!(
            "UPDATE components SET
                name = COALESCE($2, name),
                learning_line_id = COALESCE($3, learning_line_id),
                sort_order = COALESCE($4, sort_order),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Component>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.learning_line_id)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a component. Contents referencing it cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM components WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
