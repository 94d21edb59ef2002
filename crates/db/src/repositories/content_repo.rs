//! Repository for the `contents` table.
//!
//! All read paths go through one joined query so every response carries the
//! five taxonomy entries plus the author.

use sqlx::PgPool;

use curricula_core::types::DbId;

use crate::models::content::{
    Content, ContentDetail, ContentDetailRow, ContentFilter, CreateContent,
};

const COLUMNS: &str = "id, rich_text_body, program_id, learning_line_id, component_id, \
                       track_id, course_id, created_by, created_at, updated_at";

/// Shared joined SELECT for detail rows.
const DETAIL_SELECT: &str = "SELECT c.id, c.rich_text_body, c.program_id, c.learning_line_id, \
            c.component_id, c.track_id, c.course_id, c.created_by, c.created_at, c.updated_at, \
            p.name AS program_name, \
            l.title AS learning_line_title, \
            cp.name AS component_name, \
            t.name AS track_name, \
            cr.name AS course_name, \
            u.email AS author_email, \
            u.role AS author_role \
     FROM contents c \
     JOIN programs p ON p.id = c.program_id \
     JOIN learning_lines l ON l.id = c.learning_line_id \
     JOIN components cp ON cp.id = c.component_id \
     JOIN tracks t ON t.id = c.track_id \
     JOIN courses cr ON cr.id = c.course_id \
     JOIN users u ON u.id = c.created_by";

/// Provides CRUD operations for content entries.
pub struct ContentRepo;

impl ContentRepo {
    /// Insert a new content entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContent,
        created_by: DbId,
    ) -> Result<Content, sqlx::Error> {
        let query = format!(
            "INSERT INTO contents
                (rich_text_body, program_id, learning_line_id, component_id,
                 track_id, course_id, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Content>(&query)
            .bind(&input.rich_text_body)
            .bind(input.program_id)
            .bind(input.learning_line_id)
            .bind(input.component_id)
            .bind(input.track_id)
            .bind(input.course_id)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Insert several content entries in one transaction, all attributed to
    /// the same author. Either every row is written or none.
    pub async fn bulk_create(
        pool: &PgPool,
        inputs: &[CreateContent],
        created_by: DbId,
    ) -> Result<Vec<Content>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "INSERT INTO contents
                (rich_text_body, program_id, learning_line_id, component_id,
                 track_id, course_id, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );

        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            let content = sqlx::query_as::<_, Content>(&query)
                .bind(&input.rich_text_body)
                .bind(input.program_id)
                .bind(input.learning_line_id)
                .bind(input.component_id)
                .bind(input.track_id)
                .bind(input.course_id)
                .bind(created_by)
                .fetch_one(&mut *tx)
                .await?;
            created.push(content);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Find a bare content row by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Content>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contents WHERE id = $1");
        sqlx::query_as::<_, Content>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch one content entry with relations embedded.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<ContentDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE c.id = $1");
        let row = sqlx::query_as::<_, ContentDetailRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(ContentDetail::from))
    }

    /// Fetch several content entries with relations embedded, in id order.
    pub async fn find_details(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<ContentDetail>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("{DETAIL_SELECT} WHERE c.id = ANY($1) ORDER BY c.id");
        let rows = sqlx::query_as::<_, ContentDetailRow>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ContentDetail::from).collect())
    }

    /// List content entries newest-first, applying the given equality filters.
    pub async fn list(
        pool: &PgPool,
        filter: &ContentFilter,
    ) -> Result<Vec<ContentDetail>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut binds: Vec<DbId> = Vec::new();

        let mut add = |column: &str, value: Option<DbId>| {
            if let Some(value) = value {
                binds.push(value);
                conditions.push(format!("c.{column} = ${}", binds.len()));
            }
        };
        add("program_id", filter.program_id);
        add("learning_line_id", filter.learning_line_id);
        add("component_id", filter.component_id);
        add("track_id", filter.track_id);
        add("course_id", filter.course_id);

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let query = format!("{DETAIL_SELECT}{where_clause} ORDER BY c.created_at DESC, c.id DESC");

        let mut q = sqlx::query_as::<_, ContentDetailRow>(&query);
        for bind in &binds {
            q = q.bind(*bind);
        }
        let rows = q.fetch_all(pool).await?;
        Ok(rows.into_iter().map(ContentDetail::from).collect())
    }

    /// Update a content entry, replacing body and all taxonomy references.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateContent,
    ) -> Result<Option<Content>, sqlx::Error> {
        let query = format!(
            "UPDATE contents SET
                rich_text_body = $2,
                program_id = $3,
                learning_line_id = $4,
                component_id = $5,
                track_id = $6,
                course_id = $7,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Content>(&query)
            .bind(id)
            .bind(&input.rich_text_body)
            .bind(input.program_id)
            .bind(input.learning_line_id)
            .bind(input.component_id)
            .bind(input.track_id)
            .bind(input.course_id)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a content entry.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
