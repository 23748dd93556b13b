//! Test-type summary repository for database operations

use crate::db::connection::DatabasePool;
use crate::db::models::{NewTestTypeSummary, TestTypeSummary};

/// Test-type summary repository
pub struct TestTypeSummaryRepository;

impl TestTypeSummaryRepository {
    /// Insert a summary; the ID is assigned by the database
    pub async fn create(pool: &DatabasePool, summary: &NewTestTypeSummary) -> Result<TestTypeSummary, sqlx::Error> {
        sqlx::query_as::<_, TestTypeSummary>(
            "INSERT INTO test_type_summary (test_type, metrics, expected, actual, status, test_date)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&summary.test_type)
        .bind(&summary.metrics)
        .bind(&summary.expected)
        .bind(&summary.actual)
        .bind(&summary.status)
        .bind(&summary.test_date)
        .fetch_one(pool)
        .await
    }

    /// Get a summary by ID
    pub async fn get_by_id(pool: &DatabasePool, id: i64) -> Result<Option<TestTypeSummary>, sqlx::Error> {
        sqlx::query_as::<_, TestTypeSummary>("SELECT * FROM test_type_summary WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a summary with the same natural key
    ///
    /// `test_date` compares with `IS` so that two undated rows match.
    pub async fn find_duplicate(
        pool: &DatabasePool,
        test_type: &str,
        metrics: &str,
        test_date: Option<&str>,
    ) -> Result<Option<TestTypeSummary>, sqlx::Error> {
        sqlx::query_as::<_, TestTypeSummary>(
            "SELECT * FROM test_type_summary WHERE test_type = ? AND metrics = ? AND test_date IS ? LIMIT 1",
        )
        .bind(test_type)
        .bind(metrics)
        .bind(test_date)
        .fetch_optional(pool)
        .await
    }

    /// List all summaries, latest test date first
    pub async fn list(pool: &DatabasePool) -> Result<Vec<TestTypeSummary>, sqlx::Error> {
        sqlx::query_as::<_, TestTypeSummary>("SELECT * FROM test_type_summary ORDER BY test_date DESC, id DESC")
            .fetch_all(pool)
            .await
    }

    /// Rewrite every column of an existing summary
    pub async fn update(
        pool: &DatabasePool,
        id: i64,
        summary: &NewTestTypeSummary,
    ) -> Result<Option<TestTypeSummary>, sqlx::Error> {
        sqlx::query_as::<_, TestTypeSummary>(
            "UPDATE test_type_summary
             SET test_type = ?, metrics = ?, expected = ?, actual = ?, status = ?, test_date = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&summary.test_type)
        .bind(&summary.metrics)
        .bind(&summary.expected)
        .bind(&summary.actual)
        .bind(&summary.status)
        .bind(&summary.test_date)
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a summary, returning whether a row was removed
    pub async fn delete(pool: &DatabasePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM test_type_summary WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count total summaries
    pub async fn count(pool: &DatabasePool) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM test_type_summary")
            .fetch_one(pool)
            .await?;
        Ok(result.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DatabaseConnection;

    fn summary(test_type: &str, metrics: &str, test_date: Option<&str>) -> NewTestTypeSummary {
        NewTestTypeSummary {
            test_type: test_type.to_string(),
            metrics: metrics.to_string(),
            expected: Some("< 500ms".to_string()),
            actual: Some("420ms".to_string()),
            status: Some("Pass".to_string()),
            test_date: test_date.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();

        let first = TestTypeSummaryRepository::create(pool, &summary("Load Test", "Latency", Some("2025-01-01")))
            .await
            .unwrap();
        let second = TestTypeSummaryRepository::create(pool, &summary("Load Test", "CPU", Some("2025-01-01")))
            .await
            .unwrap();
        assert_eq!(second.id, first.id + 1);
        assert_eq!(TestTypeSummaryRepository::get_by_id(pool, first.id).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_find_duplicate_matches_natural_key() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();
        let dated = TestTypeSummaryRepository::create(pool, &summary("Load Test", "Latency", Some("2025-01-01")))
            .await
            .unwrap();
        let undated = TestTypeSummaryRepository::create(pool, &summary("Soak Test", "Memory", None))
            .await
            .unwrap();

        let found = TestTypeSummaryRepository::find_duplicate(pool, "Load Test", "Latency", Some("2025-01-01"))
            .await
            .unwrap();
        assert_eq!(found.map(|s| s.id), Some(dated.id));

        let found = TestTypeSummaryRepository::find_duplicate(pool, "Soak Test", "Memory", None)
            .await
            .unwrap();
        assert_eq!(found.map(|s| s.id), Some(undated.id));

        let missing = TestTypeSummaryRepository::find_duplicate(pool, "Load Test", "Latency", Some("2025-01-02"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_latest_date_first() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();
        TestTypeSummaryRepository::create(pool, &summary("A", "m", Some("2025-01-01"))).await.unwrap();
        TestTypeSummaryRepository::create(pool, &summary("B", "m", Some("2025-01-03"))).await.unwrap();
        TestTypeSummaryRepository::create(pool, &summary("C", "m", Some("2025-01-03"))).await.unwrap();

        let types: Vec<_> = TestTypeSummaryRepository::list(pool)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.test_type)
            .collect();
        assert_eq!(types, vec!["C", "B", "A"]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();
        let created = TestTypeSummaryRepository::create(pool, &summary("Load Test", "Latency", None))
            .await
            .unwrap();

        let mut values = NewTestTypeSummary::from(created.clone());
        values.status = Some("Fail".to_string());
        let updated = TestTypeSummaryRepository::update(pool, created.id, &values).await.unwrap().unwrap();
        assert_eq!(updated.status.as_deref(), Some("Fail"));
        assert_eq!(updated.actual, created.actual);

        assert!(TestTypeSummaryRepository::delete(pool, created.id).await.unwrap());
        assert!(TestTypeSummaryRepository::update(pool, created.id, &values).await.unwrap().is_none());
        assert_eq!(TestTypeSummaryRepository::count(pool).await.unwrap(), 0);
    }
}
