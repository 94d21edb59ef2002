//! Schema convention checks against the migrated database.

use sqlx::PgPool;

/// All `id` columns must be bigint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(
            data_type, "bigint",
            "Table {table}.id should be bigint, got {data_type}"
        );
    }
}

/// Every table must carry a timestamptz created_at.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_created_at(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        let result: Option<(String,)> = sqlx::query_as(
            "SELECT data_type
             FROM information_schema.columns
             WHERE table_schema = 'public'
               AND table_name = $1
               AND column_name = 'created_at'",
        )
        .bind(table)
        .fetch_optional(&pool)
        .await
        .unwrap();

        let (data_type,) =
            result.unwrap_or_else(|| panic!("Table {table} is missing created_at"));
        assert_eq!(
            data_type, "timestamp with time zone",
            "Table {table}.created_at should be timestamptz"
        );
    }
}

/// Unique constraints use the `uq_` prefix so the API can classify 23505
/// violations as 409 Conflict.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_constraints_use_uq_prefix(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT tc.table_name, tc.constraint_name
         FROM information_schema.table_constraints tc
         WHERE tc.constraint_type = 'UNIQUE'
           AND tc.table_schema = 'public'
         ORDER BY tc.table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, name) in &rows {
        assert!(
            name.starts_with("uq_"),
            "Unique constraint {name} on {table} must use the uq_ prefix"
        );
    }
}

/// Every foreign key column on contents must be indexed; the filters hit
/// these columns constantly.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_contents_fk_columns_indexed(pool: PgPool) {
    for column in [
        "program_id",
        "learning_line_id",
        "component_id",
        "track_id",
        "course_id",
    ] {
        let index: Option<(String,)> = sqlx::query_as(
            "SELECT indexname
             FROM pg_indexes
             WHERE schemaname = 'public'
               AND tablename = 'contents'
               AND indexdef LIKE '%' || $1 || '%'",
        )
        .bind(column)
        .fetch_optional(&pool)
        .await
        .unwrap();
        assert!(index.is_some(), "contents.{column} must be indexed");
    }
}
