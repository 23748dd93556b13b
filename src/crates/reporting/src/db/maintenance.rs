//! Schema inspection and bulk maintenance
//!
//! Table names are only ever taken from [`list_tables`] before being placed
//! into SQL text; caller input is matched against that list first.

use serde::Serialize;

use crate::db::connection::{DatabaseConnection, DatabasePool};
use crate::db::error::{DatabaseError, DbResult};

/// One column of a table as reported by SQLite
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ColumnInfo {
    pub column: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub column_type: String,
    pub nullable: bool,
}

/// Row count of one table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRowCount {
    pub table: String,
    pub rows: i64,
}

/// List user tables, excluding SQLite internals and the migration ledger
pub async fn list_tables(pool: &DatabasePool) -> DbResult<Vec<String>> {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations'
         ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(tables.into_iter().map(|(name,)| name).collect())
}

/// Check whether a user table exists
pub async fn table_exists(pool: &DatabasePool, table: &str) -> DbResult<bool> {
    Ok(list_tables(pool).await?.iter().any(|t| t == table))
}

async fn resolve_table(pool: &DatabasePool, table: &str) -> DbResult<String> {
    list_tables(pool)
        .await?
        .into_iter()
        .find(|t| t == table)
        .ok_or_else(|| DatabaseError::not_found(format!("table '{}'", table)))
}

/// Describe the columns of a table in declaration order
pub async fn table_columns(pool: &DatabasePool, table: &str) -> DbResult<Vec<ColumnInfo>> {
    let table = resolve_table(pool, table).await?;
    let columns = sqlx::query_as::<_, ColumnInfo>(
        "SELECT name AS \"column\", type AS \"type\", \"notnull\" = 0 AND pk = 0 AS nullable
         FROM pragma_table_info(?)
         ORDER BY cid",
    )
    .bind(&table)
    .fetch_all(pool)
    .await?;
    Ok(columns)
}

/// Count rows in every user table
pub async fn row_counts(pool: &DatabasePool) -> DbResult<Vec<TableRowCount>> {
    let mut counts = Vec::new();
    for table in list_tables(pool).await? {
        let (rows,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM \"{}\"", table))
            .fetch_one(pool)
            .await?;
        counts.push(TableRowCount { table, rows });
    }
    Ok(counts)
}

async fn reset_sequence(pool: &DatabasePool, table: Option<&str>) -> DbResult<()> {
    let (present,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_sequence'")
            .fetch_one(pool)
            .await?;
    if present == 0 {
        return Ok(());
    }
    match table {
        Some(table) => {
            sqlx::query("DELETE FROM sqlite_sequence WHERE name = ?")
                .bind(table)
                .execute(pool)
                .await?;
        }
        None => {
            sqlx::query("DELETE FROM sqlite_sequence").execute(pool).await?;
        }
    }
    Ok(())
}

/// Delete every row of every table, returning the number of rows removed
///
/// AUTOINCREMENT counters restart at 1 afterwards.
pub async fn clear_all(pool: &DatabasePool) -> DbResult<u64> {
    let mut removed = 0;
    for table in list_tables(pool).await? {
        let result = sqlx::query(&format!("DELETE FROM \"{}\"", table))
            .execute(pool)
            .await?;
        tracing::debug!(table = %table, rows = result.rows_affected(), "Cleared table");
        removed += result.rows_affected();
    }
    reset_sequence(pool, None).await?;
    tracing::info!(rows = removed, "Cleared all tables");
    Ok(removed)
}

/// Delete every row of one table
pub async fn clear_table(pool: &DatabasePool, table: &str) -> DbResult<u64> {
    let table = resolve_table(pool, table).await?;
    let result = sqlx::query(&format!("DELETE FROM \"{}\"", table))
        .execute(pool)
        .await?;
    reset_sequence(pool, Some(&table)).await?;
    tracing::info!(table = %table, rows = result.rows_affected(), "Cleared table");
    Ok(result.rows_affected())
}

/// Drop every table, including the migration ledger
pub async fn drop_all(pool: &DatabasePool) -> DbResult<Vec<String>> {
    let tables = list_tables(pool).await?;
    for table in &tables {
        sqlx::query(&format!("DROP TABLE IF EXISTS \"{}\"", table))
            .execute(pool)
            .await?;
    }
    sqlx::query("DROP TABLE IF EXISTS _sqlx_migrations")
        .execute(pool)
        .await?;
    reset_sequence(pool, None).await?;
    tracing::warn!(tables = tables.len(), "Dropped all tables");
    Ok(tables)
}

/// Insert a throwaway user inside a transaction, then roll it back
pub async fn check_user_insert(pool: &DatabasePool) -> DbResult<()> {
    let tag = uuid::Uuid::new_v4().simple().to_string();
    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO users (username, password, email, first_name, last_name, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(format!("db_check_{}", tag))
    .bind("unusable")
    .bind(format!("db_check_{}@example.invalid", tag))
    .bind("Test")
    .bind("User")
    .bind(chrono::Utc::now().to_rfc3339())
    .execute(&mut *tx)
    .await?;
    tx.rollback().await?;
    Ok(())
}

/// Drop all tables and recreate the schema
pub async fn reset(conn: &DatabaseConnection) -> DbResult<()> {
    drop_all(conn.pool()).await?;
    conn.run_migrations().await?;
    tracing::info!("Database schema recreated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{NewTransitMetric, Requirement};
    use crate::db::repositories::{RequirementRepository, TransitMetricRepository};

    #[tokio::test]
    async fn test_list_tables_hides_internal_tables() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let tables = list_tables(conn.pool()).await.unwrap();

        assert_eq!(
            tables,
            vec![
                "defects",
                "requirements",
                "test_cases",
                "test_runs",
                "test_type_summary",
                "transit_metrics_daily",
                "users",
            ]
        );
    }

    #[tokio::test]
    async fn test_table_columns_reports_nullability() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let columns = table_columns(conn.pool(), "requirements").await.unwrap();

        assert_eq!(columns[0].column, "requirement_id");
        assert!(!columns[0].nullable);
        let description = columns.iter().find(|c| c.column == "description").unwrap();
        assert!(description.nullable);
        assert_eq!(description.column_type, "TEXT");
    }

    #[tokio::test]
    async fn test_unknown_table_is_not_found() {
        let conn = DatabaseConnection::in_memory().await.unwrap();

        let err = table_columns(conn.pool(), "users; DROP TABLE users").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(clear_table(conn.pool(), "nope").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_clear_all_resets_counters() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();
        RequirementRepository::create(pool, &Requirement::new("F-FVM-101", "Purchase card"))
            .await
            .unwrap();
        let first = TransitMetricRepository::create(
            pool,
            &NewTransitMetric { date: "2025-01-01".into(), ..Default::default() },
        )
        .await
        .unwrap();

        let removed = clear_all(pool).await.unwrap();
        assert_eq!(removed, 2);
        assert!(row_counts(pool).await.unwrap().iter().all(|c| c.rows == 0));

        let second = TransitMetricRepository::create(
            pool,
            &NewTransitMetric { date: "2025-01-02".into(), ..Default::default() },
        )
        .await
        .unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_reset_recreates_schema() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        RequirementRepository::create(conn.pool(), &Requirement::new("F-GATE-200", "Tap card"))
            .await
            .unwrap();

        reset(&conn).await.unwrap();

        assert_eq!(list_tables(conn.pool()).await.unwrap().len(), 7);
        assert_eq!(RequirementRepository::count(conn.pool()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_user_insert_check_leaves_no_rows() {
        let conn = DatabaseConnection::in_memory().await.unwrap();

        check_user_insert(conn.pool()).await.unwrap();
        check_user_insert(conn.pool()).await.unwrap();

        let users = row_counts(conn.pool()).await.unwrap();
        let users = users.iter().find(|c| c.table == "users").unwrap();
        assert_eq!(users.rows, 0);
    }

    #[tokio::test]
    async fn test_user_insert_check_fails_without_schema() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        drop_all(conn.pool()).await.unwrap();

        assert!(check_user_insert(conn.pool()).await.is_err());
    }

    #[tokio::test]
    async fn test_drop_all_leaves_no_tables() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let dropped = drop_all(conn.pool()).await.unwrap();

        assert_eq!(dropped.len(), 7);
        assert!(list_tables(conn.pool()).await.unwrap().is_empty());
    }
}
