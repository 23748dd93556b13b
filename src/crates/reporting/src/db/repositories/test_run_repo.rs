//! Test run repository for database operations

use crate::db::connection::DatabasePool;
use crate::db::models::TestRun;

/// Test run repository for managing test run database operations
pub struct TestRunRepository;

impl TestRunRepository {
    /// Insert a test run
    pub async fn create(pool: &DatabasePool, run: &TestRun) -> Result<TestRun, sqlx::Error> {
        sqlx::query_as::<_, TestRun>(
            "INSERT INTO test_runs (run_id, test_run_id, customer_id, source_system, test_case_id, execution_date,
                                    result, observed_time, executed_by, remarks, artifacts)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&run.run_id)
        .bind(&run.test_run_id)
        .bind(run.customer_id)
        .bind(&run.source_system)
        .bind(&run.test_case_id)
        .bind(&run.execution_date)
        .bind(&run.result)
        .bind(run.observed_time)
        .bind(&run.executed_by)
        .bind(&run.remarks)
        .bind(&run.artifacts)
        .fetch_one(pool)
        .await
    }

    /// Get a test run by its row ID
    pub async fn get_by_id(pool: &DatabasePool, run_id: &str) -> Result<Option<TestRun>, sqlx::Error> {
        sqlx::query_as::<_, TestRun>("SELECT * FROM test_runs WHERE run_id = ?")
            .bind(run_id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a test run exists
    pub async fn exists(pool: &DatabasePool, run_id: &str) -> Result<bool, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM test_runs WHERE run_id = ?")
            .bind(run_id)
            .fetch_one(pool)
            .await?;
        Ok(result.0 > 0)
    }

    /// List all test runs, most recent execution first
    pub async fn list(pool: &DatabasePool) -> Result<Vec<TestRun>, sqlx::Error> {
        sqlx::query_as::<_, TestRun>("SELECT * FROM test_runs ORDER BY execution_date DESC")
            .fetch_all(pool)
            .await
    }

    /// List the runs uploaded together under one `test_run_id`
    pub async fn list_by_test_run_id(pool: &DatabasePool, test_run_id: &str) -> Result<Vec<TestRun>, sqlx::Error> {
        sqlx::query_as::<_, TestRun>(
            "SELECT * FROM test_runs WHERE test_run_id = ? ORDER BY execution_date DESC",
        )
        .bind(test_run_id)
        .fetch_all(pool)
        .await
    }

    /// List runs reported for one customer
    pub async fn list_by_customer(pool: &DatabasePool, customer_id: i64) -> Result<Vec<TestRun>, sqlx::Error> {
        sqlx::query_as::<_, TestRun>(
            "SELECT * FROM test_runs WHERE customer_id = ? ORDER BY execution_date DESC",
        )
        .bind(customer_id)
        .fetch_all(pool)
        .await
    }

    /// Count runs grouped by source system
    pub async fn count_by_source_system(pool: &DatabasePool) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (String, i64)>(
            "SELECT source_system, COUNT(*) FROM test_runs GROUP BY source_system ORDER BY source_system",
        )
        .fetch_all(pool)
        .await
    }

    /// Rewrite every column of an existing test run
    pub async fn update(pool: &DatabasePool, run: &TestRun) -> Result<Option<TestRun>, sqlx::Error> {
        sqlx::query_as::<_, TestRun>(
            "UPDATE test_runs
             SET test_run_id = ?, customer_id = ?, source_system = ?, test_case_id = ?, execution_date = ?,
                 result = ?, observed_time = ?, executed_by = ?, remarks = ?, artifacts = ?
             WHERE run_id = ?
             RETURNING *",
        )
        .bind(&run.test_run_id)
        .bind(run.customer_id)
        .bind(&run.source_system)
        .bind(&run.test_case_id)
        .bind(&run.execution_date)
        .bind(&run.result)
        .bind(run.observed_time)
        .bind(&run.executed_by)
        .bind(&run.remarks)
        .bind(&run.artifacts)
        .bind(&run.run_id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a test run, returning whether a row was removed
    pub async fn delete(pool: &DatabasePool, run_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM test_runs WHERE run_id = ?")
            .bind(run_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count total test runs
    pub async fn count(pool: &DatabasePool) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM test_runs")
            .fetch_one(pool)
            .await?;
        Ok(result.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DatabaseConnection;

    fn run(run_id: &str, test_run_id: &str, customer_id: i64, source: &str, executed: &str) -> TestRun {
        let mut run = TestRun::new(Some("TC-1".to_string()));
        run.run_id = run_id.to_string();
        run.test_run_id = test_run_id.to_string();
        run.customer_id = customer_id;
        run.source_system = source.to_string();
        run.execution_date = Some(executed.to_string());
        run
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();

        let mut record = run("RUN-1", "BATCH-1", 42, "crm", "2025-02-01 09:00:00");
        record.observed_time = Some(850);
        let created = TestRunRepository::create(pool, &record).await.unwrap();
        assert_eq!(created, record);
        assert_eq!(TestRunRepository::get_by_id(pool, "RUN-1").await.unwrap(), Some(record));
        assert!(TestRunRepository::exists(pool, "RUN-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_latest_execution_first() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();
        TestRunRepository::create(pool, &run("RUN-1", "BATCH-1", 1, "crm", "2025-02-01 09:00:00")).await.unwrap();
        TestRunRepository::create(pool, &run("RUN-2", "BATCH-1", 1, "crm", "2025-02-03 09:00:00")).await.unwrap();
        TestRunRepository::create(pool, &run("RUN-3", "BATCH-2", 2, "pos", "2025-02-02 09:00:00")).await.unwrap();

        let ids: Vec<_> = TestRunRepository::list(pool).await.unwrap().into_iter().map(|r| r.run_id).collect();
        assert_eq!(ids, vec!["RUN-2", "RUN-3", "RUN-1"]);

        let batch: Vec<_> = TestRunRepository::list_by_test_run_id(pool, "BATCH-1")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.run_id)
            .collect();
        assert_eq!(batch, vec!["RUN-2", "RUN-1"]);

        let customer = TestRunRepository::list_by_customer(pool, 2).await.unwrap();
        assert_eq!(customer.len(), 1);
        assert_eq!(customer[0].run_id, "RUN-3");
    }

    #[tokio::test]
    async fn test_count_by_source_system() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();
        TestRunRepository::create(pool, &run("RUN-1", "B", 1, "pos", "2025-02-01 09:00:00")).await.unwrap();
        TestRunRepository::create(pool, &run("RUN-2", "B", 1, "crm", "2025-02-01 09:00:00")).await.unwrap();
        TestRunRepository::create(pool, &run("RUN-3", "B", 1, "crm", "2025-02-01 09:00:00")).await.unwrap();

        let counts = TestRunRepository::count_by_source_system(pool).await.unwrap();
        assert_eq!(counts, vec![("crm".to_string(), 2), ("pos".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();
        let mut record = TestRunRepository::create(pool, &run("RUN-7", "B", 3, "manual", "2025-02-01 09:00:00"))
            .await
            .unwrap();

        record.result = Some("Fail".to_string());
        record.remarks = Some("Gate stayed closed".to_string());
        let updated = TestRunRepository::update(pool, &record).await.unwrap().unwrap();
        assert_eq!(updated, record);

        assert!(TestRunRepository::delete(pool, "RUN-7").await.unwrap());
        assert!(!TestRunRepository::exists(pool, "RUN-7").await.unwrap());
        assert_eq!(TestRunRepository::count(pool).await.unwrap(), 0);
    }
}
