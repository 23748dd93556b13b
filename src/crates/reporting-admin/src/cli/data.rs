//! Seeding and clearing command handlers

use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tabled::{Table, Tabled};

use reporting::db::maintenance;
use reporting::db::DatabaseConnection;
use reporting::seed::{self, SeedCounts, SeedReport};

use crate::cli::confirm;
use crate::error::{AdminError, Result};

#[derive(Tabled)]
struct SeedRow {
    #[tabled(rename = "Table")]
    table: &'static str,
    #[tabled(rename = "Inserted")]
    inserted: usize,
    #[tabled(rename = "Skipped")]
    skipped: usize,
}

fn seed_rows(report: &SeedReport) -> Vec<SeedRow> {
    let row = |table: &'static str, counts: SeedCounts| SeedRow {
        table,
        inserted: counts.inserted,
        skipped: counts.skipped,
    };
    vec![
        row("requirements", report.requirements),
        row("test_cases", report.test_cases),
        row("test_runs", report.test_runs),
        row("defects", report.defects),
        row("test_type_summary", report.test_type_summaries),
        row("transit_metrics_daily", report.transit_metrics),
    ]
}

/// Handle seed command
///
/// A fixed `seed` reproduces the same dataset on an empty database.
pub async fn handle_seed(db: &DatabaseConnection, seed: Option<u64>) -> Result<SeedReport> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let report = seed::generate(db.pool(), &mut rng).await?;

    println!("{}", "✓ Test data generated".green().bold());
    println!("{}", Table::new(seed_rows(&report)));
    println!(
        "\nInserted {} rows, skipped {} existing keys",
        report.total_inserted(),
        report.total_skipped()
    );
    Ok(report)
}

/// Handle clear command for one table or every table
pub async fn handle_clear(db: &DatabaseConnection, table: Option<String>, yes: bool) -> Result<u64> {
    let prompt = match &table {
        Some(table) => format!("Delete all rows from '{}'?", table),
        None => "Delete all rows from every table?".to_string(),
    };
    if !confirm(&prompt, yes)? {
        println!("{}", "Aborted".yellow());
        return Err(AdminError::Aborted);
    }

    let removed = match &table {
        Some(table) => maintenance::clear_table(db.pool(), table).await?,
        None => maintenance::clear_all(db.pool()).await?,
    };

    println!("{}", "✓ Data cleared".green().bold());
    println!("  Rows deleted: {}", removed);
    Ok(removed)
}

/// Handle drop-all command
pub async fn handle_drop_all(db: &DatabaseConnection, yes: bool) -> Result<Vec<String>> {
    if !confirm("Drop every table? This cannot be undone", yes)? {
        println!("{}", "Aborted".yellow());
        return Err(AdminError::Aborted);
    }

    let dropped = maintenance::drop_all(db.pool()).await?;
    println!("{}", format!("✓ Dropped {} tables", dropped.len()).green().bold());
    for table in &dropped {
        println!("  - {}", table);
    }
    println!("Run 'reporting-admin init' to recreate the schema.");
    Ok(dropped)
}
