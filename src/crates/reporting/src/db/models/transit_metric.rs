//! Daily transit metric model for database persistence

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Network-wide counters for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TransitMetric {
    pub id: i64,

    /// Day in `YYYY-MM-DD`
    pub date: String,

    pub fvm_transactions: Option<i64>,
    pub gate_taps: Option<i64>,
    pub bus_taps: Option<i64>,

    /// Percentages, 0-100
    pub success_rate_gate: Option<f64>,
    pub success_rate_bus: Option<f64>,

    /// Milliseconds
    pub avg_response_time: Option<i64>,

    pub defect_count: Option<i64>,
    pub notes: Option<String>,
}

/// Column values for inserting or rewriting a metric row
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewTransitMetric {
    pub date: String,
    pub fvm_transactions: Option<i64>,
    pub gate_taps: Option<i64>,
    pub bus_taps: Option<i64>,
    pub success_rate_gate: Option<f64>,
    pub success_rate_bus: Option<f64>,
    pub avg_response_time: Option<i64>,
    pub defect_count: Option<i64>,
    pub notes: Option<String>,
}

impl From<TransitMetric> for NewTransitMetric {
    fn from(metric: TransitMetric) -> Self {
        Self {
            date: metric.date,
            fvm_transactions: metric.fvm_transactions,
            gate_taps: metric.gate_taps,
            bus_taps: metric.bus_taps,
            success_rate_gate: metric.success_rate_gate,
            success_rate_bus: metric.success_rate_bus,
            avg_response_time: metric.avg_response_time,
            defect_count: metric.defect_count,
            notes: metric.notes,
        }
    }
}
