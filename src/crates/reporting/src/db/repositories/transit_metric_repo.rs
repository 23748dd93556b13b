//! Daily transit metric repository for database operations

use crate::db::connection::DatabasePool;
use crate::db::models::{NewTransitMetric, TransitMetric};

/// Transit metric repository
pub struct TransitMetricRepository;

impl TransitMetricRepository {
    /// Insert a metric row; the ID is assigned by the database
    pub async fn create(pool: &DatabasePool, metric: &NewTransitMetric) -> Result<TransitMetric, sqlx::Error> {
        sqlx::query_as::<_, TransitMetric>(
            "INSERT INTO transit_metrics_daily (date, fvm_transactions, gate_taps, bus_taps, success_rate_gate,
                                                success_rate_bus, avg_response_time, defect_count, notes)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&metric.date)
        .bind(metric.fvm_transactions)
        .bind(metric.gate_taps)
        .bind(metric.bus_taps)
        .bind(metric.success_rate_gate)
        .bind(metric.success_rate_bus)
        .bind(metric.avg_response_time)
        .bind(metric.defect_count)
        .bind(&metric.notes)
        .fetch_one(pool)
        .await
    }

    /// Get a metric row by ID
    pub async fn get_by_id(pool: &DatabasePool, id: i64) -> Result<Option<TransitMetric>, sqlx::Error> {
        sqlx::query_as::<_, TransitMetric>("SELECT * FROM transit_metrics_daily WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Get the metric row recorded for a day
    pub async fn get_by_date(pool: &DatabasePool, date: &str) -> Result<Option<TransitMetric>, sqlx::Error> {
        sqlx::query_as::<_, TransitMetric>("SELECT * FROM transit_metrics_daily WHERE date = ? LIMIT 1")
            .bind(date)
            .fetch_optional(pool)
            .await
    }

    /// List all metric rows, latest day first
    pub async fn list(pool: &DatabasePool) -> Result<Vec<TransitMetric>, sqlx::Error> {
        sqlx::query_as::<_, TransitMetric>("SELECT * FROM transit_metrics_daily ORDER BY date DESC, id DESC")
            .fetch_all(pool)
            .await
    }

    /// Rewrite every column of an existing metric row
    pub async fn update(
        pool: &DatabasePool,
        id: i64,
        metric: &NewTransitMetric,
    ) -> Result<Option<TransitMetric>, sqlx::Error> {
        sqlx::query_as::<_, TransitMetric>(
            "UPDATE transit_metrics_daily
             SET date = ?, fvm_transactions = ?, gate_taps = ?, bus_taps = ?, success_rate_gate = ?,
                 success_rate_bus = ?, avg_response_time = ?, defect_count = ?, notes = ?
             WHERE id = ?
             RETURNING *",
        )
        .bind(&metric.date)
        .bind(metric.fvm_transactions)
        .bind(metric.gate_taps)
        .bind(metric.bus_taps)
        .bind(metric.success_rate_gate)
        .bind(metric.success_rate_bus)
        .bind(metric.avg_response_time)
        .bind(metric.defect_count)
        .bind(&metric.notes)
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a metric row, returning whether a row was removed
    pub async fn delete(pool: &DatabasePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM transit_metrics_daily WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count total metric rows
    pub async fn count(pool: &DatabasePool) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM transit_metrics_daily")
            .fetch_one(pool)
            .await?;
        Ok(result.0)
    }
}
