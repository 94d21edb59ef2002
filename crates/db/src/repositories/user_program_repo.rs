//! Repository for the `user_programs` join table.
//!
//! Docent membership in a program is what gates teacher write access to
//! content, so `is_assigned` sits on the hot path of every content write.

use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};

use curricula_core::types::DbId;

use crate::models::program::Program;

/// Provides operations on docent <-> program assignments.
pub struct UserProgramRepo;

impl UserProgramRepo {
    /// Whether the user is assigned to the given program.
    pub async fn is_assigned(
        pool: &PgPool,
        user_id: DbId,
        program_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM user_programs WHERE user_id = $1 AND program_id = $2",
        )
        .bind(user_id)
        .bind(program_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.is_some())
    }

    /// Programs assigned to a single user, ordered by name.
    pub async fn programs_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Program>, sqlx::Error> {
        sqlx::query_as::<_, Program>(
            "SELECT p.id, p.name, p.created_at, p.updated_at
             FROM programs p
             JOIN user_programs up ON up.program_id = p.id
             WHERE up.user_id = $1
             ORDER BY p.name",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Programs assigned to each of the given users, keyed by user id.
    ///
    /// Users without assignments are absent from the map.
    pub async fn programs_for_users(
        pool: &PgPool,
        user_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Program>>, sqlx::Error> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        #[derive(sqlx::FromRow)]
        struct Row {
            user_id: DbId,
            #[sqlx(flatten)]
            program: Program,
        }

        let rows: Vec<Row> = sqlx::query_as(
            "SELECT up.user_id, p.id, p.name, p.created_at, p.updated_at
             FROM programs p
             JOIN user_programs up ON up.program_id = p.id
             WHERE up.user_id = ANY($1)
             ORDER BY p.name",
        )
        .bind(user_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<DbId, Vec<Program>> = HashMap::new();
        for row in rows {
            grouped.entry(row.user_id).or_default().push(row.program);
        }
        Ok(grouped)
    }

    /// Insert assignment links for a user inside an open transaction.
    pub async fn insert_links(
        tx: &mut Transaction<'_, Postgres>,
        user_id: DbId,
        program_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        for program_id in program_ids {
            sqlx::query("INSERT INTO user_programs (user_id, program_id) VALUES ($1, $2)")
                .bind(user_id)
                .bind(program_id)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }

    /// Replace all assignment links for a user inside an open transaction.
    pub async fn replace_links(
        tx: &mut Transaction<'_, Postgres>,
        user_id: DbId,
        program_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM user_programs WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut **tx)
            .await?;
        Self::insert_links(tx, user_id, program_ids).await
    }
}
