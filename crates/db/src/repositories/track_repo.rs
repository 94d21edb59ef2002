//! Repository for the `tracks` table and its program links.

use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};

use curricula_core::types::DbId;

use crate::models::program::Program;
use crate::models::track::{CreateTrack, Track, TrackWithPrograms, UpdateTrack};

const COLUMNS: &str = "id, name, sort_order, created_at, updated_at";

/// Provides CRUD operations for tracks.
pub struct TrackRepo;

impl TrackRepo {
    /// Insert a new track and link it to the given programs in one
    /// transaction, returning the created row.
    pub async fn create_with_programs(
        pool: &PgPool,
        input: &CreateTrack,
        program_ids: &[DbId],
    ) -> Result<Track, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO tracks (name, sort_order)
             VALUES ($1, COALESCE($2, 0))
             RETURNING {COLUMNS}"
        );
        let track = sqlx::query_as::<_, Track>(&query)
            .bind(&input.name)
            .bind(input.sort_order)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_links(&mut tx, track.id, program_ids).await?;

        tx.commit().await?;
        Ok(track)
    }

    /// Find a track by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE id = $1");
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tracks ordered by sort_order, each with its linked programs.
    pub async fn list_with_programs(pool: &PgPool) -> Result<Vec<TrackWithPrograms>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks ORDER BY sort_order, name");
        let tracks = sqlx::query_as::<_, Track>(&query).fetch_all(pool).await?;

        let ids: Vec<DbId> = tracks.iter().map(|t| t.id).collect();
        let mut programs = Self::programs_by_track(pool, &ids).await?;

        Ok(tracks
            .into_iter()
            .map(|track| {
                let id = track.id;
                TrackWithPrograms {
                    track,
                    programs: programs.remove(&id).unwrap_or_default(),
                }
            })
            .collect())
    }

    /// Update a track. When `program_ids` is `Some`, the program links are
    /// replaced wholesale in the same transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTrack,
        program_ids: Option<&[DbId]>,
    ) -> Result<Option<Track>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE tracks SET
                name = COALESCE($2, name),
                sort_order = COALESCE($3, sort_order),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let track = sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.sort_order)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(track) = track else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(program_ids) = program_ids {
            sqlx::query("DELETE FROM program_tracks WHERE track_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::insert_links(&mut tx, id, program_ids).await?;
        }

        tx.commit().await?;
        Ok(Some(track))
    }

    /// Hard-delete a track. Link rows and contents referencing it cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tracks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_links(
        tx: &mut Transaction<'_, Postgres>,
        track_id: DbId,
        program_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        for program_id in program_ids {
            sqlx::query("INSERT INTO program_tracks (program_id, track_id) VALUES ($1, $2)")
                .bind(program_id)
                .bind(track_id)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }

    async fn programs_by_track(
        pool: &PgPool,
        track_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Program>>, sqlx::Error> {
        if track_ids.is_empty() {
            return Ok(HashMap::new());
        }

        #[derive(sqlx::FromRow)]
        struct Row {
            track_id: DbId,
            #[sqlx(flatten)]
            program: Program,
        }

        let rows: Vec<Row> = sqlx::query_as(
            "SELECT pt.track_id, p.id, p.name, p.created_at, p.updated_at
             FROM programs p
             JOIN program_tracks pt ON pt.program_id = p.id
             WHERE pt.track_id = ANY($1)
             ORDER BY p.name",
        )
        .bind(track_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<DbId, Vec<Program>> = HashMap::new();
        for row in rows {
            grouped.entry(row.track_id).or_default().push(row.program);
        }
        Ok(grouped)
    }
}
