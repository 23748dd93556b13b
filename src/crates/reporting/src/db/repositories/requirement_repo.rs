//! Requirement repository for database operations

use crate::db::connection::DatabasePool;
use crate::db::models::Requirement;

/// Requirement repository for managing requirement database operations
pub struct RequirementRepository;

impl RequirementRepository {
    /// Insert a requirement
    pub async fn create(pool: &DatabasePool, req: &Requirement) -> Result<Requirement, sqlx::Error> {
        sqlx::query_as::<_, Requirement>(
            "INSERT INTO requirements (requirement_id, title, description, component, priority, status, jira_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&req.requirement_id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.component)
        .bind(&req.priority)
        .bind(&req.status)
        .bind(&req.jira_id)
        .bind(&req.created_at)
        .fetch_one(pool)
        .await
    }

    /// Get a requirement by ID
    pub async fn get_by_id(pool: &DatabasePool, id: &str) -> Result<Option<Requirement>, sqlx::Error> {
        sqlx::query_as::<_, Requirement>("SELECT * FROM requirements WHERE requirement_id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a requirement exists
    pub async fn exists(pool: &DatabasePool, id: &str) -> Result<bool, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM requirements WHERE requirement_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(result.0 > 0)
    }

    /// List all requirements, newest first
    pub async fn list(pool: &DatabasePool) -> Result<Vec<Requirement>, sqlx::Error> {
        sqlx::query_as::<_, Requirement>("SELECT * FROM requirements ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    /// Rewrite every column of an existing requirement
    ///
    /// Returns `None` when no row has the given ID.
    pub async fn update(pool: &DatabasePool, req: &Requirement) -> Result<Option<Requirement>, sqlx::Error> {
        sqlx::query_as::<_, Requirement>(
            "UPDATE requirements
             SET title = ?, description = ?, component = ?, priority = ?, status = ?, jira_id = ?, created_at = ?
             WHERE requirement_id = ?
             RETURNING *",
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.component)
        .bind(&req.priority)
        .bind(&req.status)
        .bind(&req.jira_id)
        .bind(&req.created_at)
        .bind(&req.requirement_id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a requirement, returning whether a row was removed
    pub async fn delete(pool: &DatabasePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM requirements WHERE requirement_id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count total requirements
    pub async fn count(pool: &DatabasePool) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM requirements")
            .fetch_one(pool)
            .await?;
        Ok(result.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DatabaseConnection;

    fn requirement(id: &str, created_at: &str) -> Requirement {
        let mut req = Requirement::new(id, format!("Requirement {}", id));
        req.created_at = created_at.to_string();
        req
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();

        let mut req = Requirement::new("F-FVM-101", "Purchase TransitCard using FVM");
        req.priority = Some("High".to_string());
        let created = RequirementRepository::create(pool, &req).await.unwrap();
        assert_eq!(created, req);

        let fetched = RequirementRepository::get_by_id(pool, "F-FVM-101").await.unwrap();
        assert_eq!(fetched, Some(req));
        assert!(RequirementRepository::exists(pool, "F-FVM-101").await.unwrap());
        assert!(RequirementRepository::get_by_id(pool, "F-FVM-999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_key_is_rejected() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();
        let req = Requirement::new("F-GATE-200", "Gate opens");

        RequirementRepository::create(pool, &req).await.unwrap();
        let err = RequirementRepository::create(pool, &req).await.unwrap_err();
        assert!(crate::db::DatabaseError::from(err).is_constraint_violation());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();
        RequirementRepository::create(pool, &requirement("R-OLD", "2025-01-01T08:00:00+00:00")).await.unwrap();
        RequirementRepository::create(pool, &requirement("R-NEW", "2025-03-01T08:00:00+00:00")).await.unwrap();
        RequirementRepository::create(pool, &requirement("R-MID", "2025-02-01T08:00:00+00:00")).await.unwrap();

        let ids: Vec<_> = RequirementRepository::list(pool)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.requirement_id)
            .collect();
        assert_eq!(ids, vec!["R-NEW", "R-MID", "R-OLD"]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();
        let mut req = RequirementRepository::create(pool, &Requirement::new("F-BUS-300", "Bus validator"))
            .await
            .unwrap();

        req.status = Some("Done".to_string());
        let updated = RequirementRepository::update(pool, &req).await.unwrap().unwrap();
        assert_eq!(updated.status.as_deref(), Some("Done"));

        assert!(RequirementRepository::delete(pool, "F-BUS-300").await.unwrap());
        assert!(!RequirementRepository::delete(pool, "F-BUS-300").await.unwrap());
        assert!(RequirementRepository::update(pool, &req).await.unwrap().is_none());
        assert_eq!(RequirementRepository::count(pool).await.unwrap(), 0);
    }
}
