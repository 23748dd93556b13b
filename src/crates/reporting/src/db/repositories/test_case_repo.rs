//! Test case repository for database operations

use crate::db::connection::DatabasePool;
use crate::db::models::{TestCase, TestCaseWithDescription};

/// Test case repository for managing test case database operations
pub struct TestCaseRepository;

impl TestCaseRepository {
    /// Insert a test case
    pub async fn create(pool: &DatabasePool, tc: &TestCase) -> Result<TestCase, sqlx::Error> {
        sqlx::query_as::<_, TestCase>(
            "INSERT INTO test_cases (test_case_id, title, type, component, requirement_id, status, created_by,
                                     created_at, pre_condition, test_steps, expected_result, uploaded_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&tc.test_case_id)
        .bind(&tc.title)
        .bind(&tc.test_type)
        .bind(&tc.component)
        .bind(&tc.requirement_id)
        .bind(&tc.status)
        .bind(&tc.created_by)
        .bind(&tc.created_at)
        .bind(&tc.pre_condition)
        .bind(&tc.test_steps)
        .bind(&tc.expected_result)
        .bind(&tc.uploaded_at)
        .fetch_one(pool)
        .await
    }

    /// Get a test case by ID
    pub async fn get_by_id(pool: &DatabasePool, id: &str) -> Result<Option<TestCase>, sqlx::Error> {
        sqlx::query_as::<_, TestCase>("SELECT * FROM test_cases WHERE test_case_id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a test case exists
    pub async fn exists(pool: &DatabasePool, id: &str) -> Result<bool, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM test_cases WHERE test_case_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(result.0 > 0)
    }

    /// List all test cases, newest first
    pub async fn list(pool: &DatabasePool) -> Result<Vec<TestCase>, sqlx::Error> {
        sqlx::query_as::<_, TestCase>("SELECT * FROM test_cases ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    /// List test cases covering one requirement
    pub async fn list_by_requirement(pool: &DatabasePool, requirement_id: &str) -> Result<Vec<TestCase>, sqlx::Error> {
        sqlx::query_as::<_, TestCase>(
            "SELECT * FROM test_cases WHERE requirement_id = ? ORDER BY created_at DESC",
        )
        .bind(requirement_id)
        .fetch_all(pool)
        .await
    }

    /// List test cases with the description of the requirement they cover
    pub async fn list_with_requirement_description(
        pool: &DatabasePool,
    ) -> Result<Vec<TestCaseWithDescription>, sqlx::Error> {
        sqlx::query_as::<_, TestCaseWithDescription>(
            "SELECT tc.*, r.description AS requirement_description
             FROM test_cases tc
             LEFT JOIN requirements r ON tc.requirement_id = r.requirement_id
             ORDER BY tc.created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Rewrite every column of an existing test case
    pub async fn update(pool: &DatabasePool, tc: &TestCase) -> Result<Option<TestCase>, sqlx::Error> {
        sqlx::query_as::<_, TestCase>(
            "UPDATE test_cases
             SET title = ?, type = ?, component = ?, requirement_id = ?, status = ?, created_by = ?,
                 created_at = ?, pre_condition = ?, test_steps = ?, expected_result = ?, uploaded_at = ?
             WHERE test_case_id = ?
             RETURNING *",
        )
        .bind(&tc.title)
        .bind(&tc.test_type)
        .bind(&tc.component)
        .bind(&tc.requirement_id)
        .bind(&tc.status)
        .bind(&tc.created_by)
        .bind(&tc.created_at)
        .bind(&tc.pre_condition)
        .bind(&tc.test_steps)
        .bind(&tc.expected_result)
        .bind(&tc.uploaded_at)
        .bind(&tc.test_case_id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a test case, returning whether a row was removed
    pub async fn delete(pool: &DatabasePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM test_cases WHERE test_case_id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count total test cases
    pub async fn count(pool: &DatabasePool) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM test_cases")
            .fetch_one(pool)
            .await?;
        Ok(result.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Requirement;
    use crate::db::repositories::RequirementRepository;
    use crate::db::DatabaseConnection;

    fn test_case(id: &str, requirement_id: Option<&str>, created_at: &str) -> TestCase {
        let mut tc = TestCase::new(id, format!("Case {}", id));
        tc.requirement_id = requirement_id.map(str::to_string);
        tc.created_at = Some(created_at.to_string());
        tc
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();

        let tc = test_case("TC-1", Some("F-FVM-101"), "2025-01-05T10:00:00+00:00");
        let created = TestCaseRepository::create(pool, &tc).await.unwrap();
        assert_eq!(created, tc);
        assert_eq!(TestCaseRepository::get_by_id(pool, "TC-1").await.unwrap(), Some(tc));
        assert!(TestCaseRepository::exists(pool, "TC-1").await.unwrap());
        assert!(!TestCaseRepository::exists(pool, "TC-2").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_orders_and_filters() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();
        TestCaseRepository::create(pool, &test_case("TC-A", Some("R-1"), "2025-01-01T00:00:00+00:00")).await.unwrap();
        TestCaseRepository::create(pool, &test_case("TC-B", Some("R-2"), "2025-01-03T00:00:00+00:00")).await.unwrap();
        TestCaseRepository::create(pool, &test_case("TC-C", Some("R-1"), "2025-01-02T00:00:00+00:00")).await.unwrap();

        let ids: Vec<_> = TestCaseRepository::list(pool)
            .await
            .unwrap()
            .into_iter()
            .map(|tc| tc.test_case_id)
            .collect();
        assert_eq!(ids, vec!["TC-B", "TC-C", "TC-A"]);

        let ids: Vec<_> = TestCaseRepository::list_by_requirement(pool, "R-1")
            .await
            .unwrap()
            .into_iter()
            .map(|tc| tc.test_case_id)
            .collect();
        assert_eq!(ids, vec!["TC-C", "TC-A"]);
    }

    #[tokio::test]
    async fn test_list_with_requirement_description() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();
        let mut req = Requirement::new("R-1", "Gate rejects hotlisted cards");
        req.description = Some("Hotlisted cards never open the gate".to_string());
        RequirementRepository::create(pool, &req).await.unwrap();
        TestCaseRepository::create(pool, &test_case("TC-A", Some("R-1"), "2025-01-02T00:00:00+00:00")).await.unwrap();
        TestCaseRepository::create(pool, &test_case("TC-B", Some("R-404"), "2025-01-01T00:00:00+00:00")).await.unwrap();

        let rows = TestCaseRepository::list_with_requirement_description(pool).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].test_case.test_case_id, "TC-A");
        assert_eq!(rows[0].requirement_description.as_deref(), Some("Hotlisted cards never open the gate"));
        assert_eq!(rows[1].requirement_description, None);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();
        let mut tc = TestCaseRepository::create(pool, &TestCase::new("TC-9", "Tap with low balance"))
            .await
            .unwrap();

        tc.status = Some("Approved".to_string());
        tc.test_steps = Some("1. Tap card\n2. Observe gate".to_string());
        let updated = TestCaseRepository::update(pool, &tc).await.unwrap().unwrap();
        assert_eq!(updated, tc);

        assert!(TestCaseRepository::delete(pool, "TC-9").await.unwrap());
        assert!(TestCaseRepository::get_by_id(pool, "TC-9").await.unwrap().is_none());
        assert_eq!(TestCaseRepository::count(pool).await.unwrap(), 0);
    }
}
