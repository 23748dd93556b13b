//! Per-entity bulk upload: `POST /api/<entity>/bulk`

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::records::{ingest_payload, RunDefaults};
use super::{EntityKind, Outcome};
use crate::db::DatabasePool;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkError {
    pub index: usize,
    pub error: String,
}

/// Bulk upload response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkReport {
    pub created: usize,
    pub failed: usize,
    pub errors: Vec<BulkError>,
}

impl BulkReport {
    fn fail(&mut self, index: usize, error: String) {
        self.failed += 1;
        self.errors.push(BulkError { index, error });
    }
}

/// Insert each item independently; duplicates count as failures
pub async fn bulk_insert(pool: &DatabasePool, kind: EntityKind, items: Vec<Value>) -> BulkReport {
    let defaults = RunDefaults::default();
    let mut report = BulkReport::default();

    for (index, item) in items.into_iter().enumerate() {
        match ingest_payload(pool, kind, item, &defaults).await {
            Ok(Outcome::Created(_)) => report.created += 1,
            Ok(Outcome::Duplicate(id)) => report.fail(index, format!("{} {} already exists", kind.label(), id)),
            Err(err) => report.fail(index, err.to_string()),
        }
    }

    info!(kind = %kind, created = report.created, failed = report.failed, "Bulk upload processed");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DatabaseConnection;
    use serde_json::json;

    #[tokio::test]
    async fn test_bulk_reports_each_failure() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let items = vec![
            json!({"DefectID": "D-1", "Title": "Receipt Not Printed"}),
            json!({"DefectID": "D-1", "Title": "Receipt Not Printed"}),
            json!({"Severity": "High"}),
            json!({"DefectID": "D-2", "Title": "Screen Freeze", "Severity": "Critical"}),
        ];

        let report = bulk_insert(conn.pool(), EntityKind::Defect, items).await;
        assert_eq!(report.created, 2);
        assert_eq!(report.failed, 2);
        assert_eq!(
            report.errors,
            vec![
                BulkError {
                    index: 1,
                    error: "Defect D-1 already exists".to_string()
                },
                BulkError {
                    index: 2,
                    error: "title is required".to_string()
                },
            ]
        );
    }
}
