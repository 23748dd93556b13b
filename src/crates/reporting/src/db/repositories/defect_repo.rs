//! Defect repository for database operations

use crate::db::connection::DatabasePool;
use crate::db::models::Defect;

/// Defect repository for managing defect database operations
pub struct DefectRepository;

impl DefectRepository {
    /// Insert a defect
    pub async fn create(pool: &DatabasePool, defect: &Defect) -> Result<Defect, sqlx::Error> {
        sqlx::query_as::<_, Defect>(
            "INSERT INTO defects (defect_id, title, severity, status, test_case_id, reported_by, created_at, fixed_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&defect.defect_id)
        .bind(&defect.title)
        .bind(&defect.severity)
        .bind(&defect.status)
        .bind(&defect.test_case_id)
        .bind(&defect.reported_by)
        .bind(&defect.created_at)
        .bind(&defect.fixed_at)
        .fetch_one(pool)
        .await
    }

    /// Get a defect by ID
    pub async fn get_by_id(pool: &DatabasePool, id: &str) -> Result<Option<Defect>, sqlx::Error> {
        sqlx::query_as::<_, Defect>("SELECT * FROM defects WHERE defect_id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a defect exists
    pub async fn exists(pool: &DatabasePool, id: &str) -> Result<bool, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM defects WHERE defect_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(result.0 > 0)
    }

    /// List all defects, newest first
    pub async fn list(pool: &DatabasePool) -> Result<Vec<Defect>, sqlx::Error> {
        sqlx::query_as::<_, Defect>("SELECT * FROM defects ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    /// Rewrite every column of an existing defect
    pub async fn update(pool: &DatabasePool, defect: &Defect) -> Result<Option<Defect>, sqlx::Error> {
        sqlx::query_as::<_, Defect>(
            "UPDATE defects
             SET title = ?, severity = ?, status = ?, test_case_id = ?, reported_by = ?, created_at = ?, fixed_at = ?
             WHERE defect_id = ?
             RETURNING *",
        )
        .bind(&defect.title)
        .bind(&defect.severity)
        .bind(&defect.status)
        .bind(&defect.test_case_id)
        .bind(&defect.reported_by)
        .bind(&defect.created_at)
        .bind(&defect.fixed_at)
        .bind(&defect.defect_id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a defect, returning whether a row was removed
    pub async fn delete(pool: &DatabasePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM defects WHERE defect_id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count total defects
    pub async fn count(pool: &DatabasePool) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM defects")
            .fetch_one(pool)
            .await?;
        Ok(result.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DatabaseConnection;

    fn defect(id: &str, created_at: &str) -> Defect {
        let mut defect = Defect::new(format!("Defect {}", id));
        defect.defect_id = id.to_string();
        defect.created_at = Some(created_at.to_string());
        defect
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();

        let mut record = defect("D-1", "2025-01-10T12:00:00+00:00");
        record.severity = Some("High".to_string());
        record.test_case_id = Some("TC-1".to_string());
        let created = DefectRepository::create(pool, &record).await.unwrap();
        assert_eq!(created, record);
        assert_eq!(DefectRepository::get_by_id(pool, "D-1").await.unwrap(), Some(record));
        assert!(DefectRepository::exists(pool, "D-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();
        DefectRepository::create(pool, &defect("D-1", "2025-01-01T00:00:00+00:00")).await.unwrap();
        DefectRepository::create(pool, &defect("D-2", "2025-01-09T00:00:00+00:00")).await.unwrap();
        DefectRepository::create(pool, &defect("D-3", "2025-01-05T00:00:00+00:00")).await.unwrap();

        let ids: Vec<_> = DefectRepository::list(pool).await.unwrap().into_iter().map(|d| d.defect_id).collect();
        assert_eq!(ids, vec!["D-2", "D-3", "D-1"]);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let pool = conn.pool();
        let mut record = DefectRepository::create(pool, &defect("D-5", "2025-01-01T00:00:00+00:00"))
            .await
            .unwrap();

        record.status = Some("Closed".to_string());
        record.fixed_at = Some("2025-01-12T00:00:00+00:00".to_string());
        let updated = DefectRepository::update(pool, &record).await.unwrap().unwrap();
        assert_eq!(updated, record);

        assert!(DefectRepository::delete(pool, "D-5").await.unwrap());
        assert!(DefectRepository::get_by_id(pool, "D-5").await.unwrap().is_none());
        assert!(DefectRepository::update(pool, &record).await.unwrap().is_none());
    }
}
