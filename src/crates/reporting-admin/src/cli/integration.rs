//! Integration statistics: which source systems are sending runs, and how recently

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use colored::Colorize;
use tabled::{Table, Tabled};

use reporting::db::models::TestRun;
use reporting::db::repositories::TestRunRepository;
use reporting::db::DatabaseConnection;

use crate::error::Result;

/// Runs newer than this count as recent
pub const RECENT_WINDOW_HOURS: i64 = 24;

const MAX_LISTED_RUNS: usize = 10;

/// Formats produced by the seeder, the dashboard and external runners
const EXECUTION_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d-%m-%Y %H:%M",
];

#[derive(Tabled)]
struct SourceRow {
    #[tabled(rename = "Source System")]
    source_system: String,
    #[tabled(rename = "Runs")]
    runs: i64,
}

#[derive(Tabled)]
struct RunRow {
    #[tabled(rename = "Test Run")]
    test_run_id: String,
    #[tabled(rename = "Customer")]
    customer_id: i64,
    #[tabled(rename = "Source")]
    source_system: String,
    #[tabled(rename = "Test Case")]
    test_case_id: String,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Executed")]
    execution_date: String,
}

impl From<&TestRun> for RunRow {
    fn from(run: &TestRun) -> Self {
        let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        Self {
            test_run_id: run.test_run_id.clone(),
            customer_id: run.customer_id,
            source_system: run.source_system.clone(),
            test_case_id: or_dash(&run.test_case_id),
            result: or_dash(&run.result),
            execution_date: or_dash(&run.execution_date),
        }
    }
}

/// Parse a stored execution date; RFC 3339 values are converted to UTC
pub fn parse_execution_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    EXECUTION_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Case-insensitive substring match on the source system
pub fn matches_source(run: &TestRun, source: &str) -> bool {
    run.source_system.to_lowercase().contains(&source.to_lowercase())
}

/// Runs executed within `window` before `now`; undated runs are excluded
pub fn recent_runs<'a>(runs: &'a [TestRun], now: NaiveDateTime, window: Duration) -> Vec<&'a TestRun> {
    let cutoff = now - window;
    runs.iter()
        .filter(|run| {
            run.execution_date
                .as_deref()
                .and_then(parse_execution_date)
                .map_or(false, |executed| executed >= cutoff && executed <= now)
        })
        .collect()
}

/// Handle integration command
pub async fn handle_integration(db: &DatabaseConnection, source: Option<String>) -> Result<()> {
    let pool = db.pool();

    let by_source: Vec<SourceRow> = TestRunRepository::count_by_source_system(pool)
        .await?
        .into_iter()
        .map(|(source_system, runs)| SourceRow { source_system, runs })
        .collect();
    if by_source.is_empty() {
        println!("{}", "No test runs recorded yet".yellow());
        return Ok(());
    }
    println!("{}", "Test runs by source system".bold());
    println!("{}", Table::new(by_source));

    let mut runs = TestRunRepository::list(pool).await?;
    if let Some(source) = &source {
        runs.retain(|run| matches_source(run, source));
        println!("\nRuns matching '{}': {}", source, runs.len());
    }

    let now = Utc::now().naive_utc();
    let recent = recent_runs(&runs, now, Duration::hours(RECENT_WINDOW_HOURS));
    println!(
        "\n{}",
        format!("Runs in the last {} hours: {}", RECENT_WINDOW_HOURS, recent.len()).bold()
    );

    if recent.is_empty() {
        println!("{}", "✗ No recent runs; the integration may not be sending data".red());
    } else {
        let rows: Vec<RunRow> = recent.into_iter().take(MAX_LISTED_RUNS).map(RunRow::from).collect();
        println!("{}", Table::new(rows));
    }
    Ok(())
}
