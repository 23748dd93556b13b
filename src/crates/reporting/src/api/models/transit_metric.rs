//! Daily transit metric API models

use serde::{Deserialize, Serialize};

use super::merge;
use crate::api::error::ApiResult;
use crate::api::middleware::validation::require_field;
use crate::db::models::NewTransitMetric;

/// Metric create/update body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransitMetricPayload {
    #[serde(alias = "Date")]
    pub date: Option<String>,
    #[serde(default, alias = "FVM_Transactions", deserialize_with = "super::flexible::opt_i64")]
    pub fvm_transactions: Option<i64>,
    #[serde(default, alias = "Gate_Taps", deserialize_with = "super::flexible::opt_i64")]
    pub gate_taps: Option<i64>,
    #[serde(default, alias = "Bus_Taps", deserialize_with = "super::flexible::opt_i64")]
    pub bus_taps: Option<i64>,
    #[serde(default, alias = "Success_Rate_Gate", deserialize_with = "super::flexible::opt_f64")]
    pub success_rate_gate: Option<f64>,
    #[serde(default, alias = "Success_Rate_Bus", deserialize_with = "super::flexible::opt_f64")]
    pub success_rate_bus: Option<f64>,
    #[serde(default, alias = "Avg_Response_Time", deserialize_with = "super::flexible::opt_i64")]
    pub avg_response_time: Option<i64>,
    #[serde(default, alias = "Defect_Count", deserialize_with = "super::flexible::opt_i64")]
    pub defect_count: Option<i64>,
    #[serde(alias = "Notes")]
    pub notes: Option<String>,
}

impl TransitMetricPayload {
    /// Build new column values; `date` is required
    pub fn into_record(self) -> ApiResult<NewTransitMetric> {
        Ok(NewTransitMetric {
            date: require_field(self.date.as_deref(), "date")?.to_string(),
            fvm_transactions: self.fvm_transactions,
            gate_taps: self.gate_taps,
            bus_taps: self.bus_taps,
            success_rate_gate: self.success_rate_gate,
            success_rate_bus: self.success_rate_bus,
            avg_response_time: self.avg_response_time,
            defect_count: self.defect_count,
            notes: self.notes,
        })
    }

    pub fn has_updates(&self) -> bool {
        self.date.is_some()
            || self.fvm_transactions.is_some()
            || self.gate_taps.is_some()
            || self.bus_taps.is_some()
            || self.success_rate_gate.is_some()
            || self.success_rate_bus.is_some()
            || self.avg_response_time.is_some()
            || self.defect_count.is_some()
            || self.notes.is_some()
    }

    pub fn apply_to(self, record: &mut NewTransitMetric) {
        if let Some(date) = self.date {
            record.date = date;
        }
        merge(&mut record.fvm_transactions, self.fvm_transactions);
        merge(&mut record.gate_taps, self.gate_taps);
        merge(&mut record.bus_taps, self.bus_taps);
        merge(&mut record.success_rate_gate, self.success_rate_gate);
        merge(&mut record.success_rate_bus, self.success_rate_bus);
        merge(&mut record.avg_response_time, self.avg_response_time);
        merge(&mut record.defect_count, self.defect_count);
        merge(&mut record.notes, self.notes);
    }
}
