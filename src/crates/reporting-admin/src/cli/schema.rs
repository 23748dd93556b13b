//! Schema and statistics command handlers

use colored::Colorize;
use tabled::{Table, Tabled};

use reporting::db::maintenance::{self, ColumnInfo, TableRowCount};
use reporting::db::{DatabaseConnection, DatabaseError};

use crate::error::Result;

#[derive(Tabled)]
struct ColumnRow {
    #[tabled(rename = "Column")]
    column: String,
    #[tabled(rename = "Type")]
    column_type: String,
    #[tabled(rename = "Nullable")]
    nullable: String,
}

impl From<ColumnInfo> for ColumnRow {
    fn from(info: ColumnInfo) -> Self {
        Self {
            column: info.column,
            column_type: info.column_type,
            nullable: if info.nullable { "yes" } else { "no" }.to_string(),
        }
    }
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Table")]
    table: String,
    #[tabled(rename = "Rows")]
    rows: i64,
}

fn count_table(counts: Vec<TableRowCount>) -> (String, i64) {
    let total = counts.iter().map(|c| c.rows).sum();
    let rows: Vec<CountRow> = counts
        .into_iter()
        .map(|c| CountRow {
            table: c.table,
            rows: c.rows,
        })
        .collect();
    (Table::new(rows).to_string(), total)
}

/// Handle init command
pub async fn handle_init(db: &DatabaseConnection) -> Result<()> {
    db.run_migrations().await.map_err(DatabaseError::from)?;
    let tables = maintenance::list_tables(db.pool()).await?;

    println!("{}", "✓ Database initialized".green().bold());
    println!("  Database: {}", db.masked_url());
    for table in &tables {
        println!("  - {}", table);
    }
    Ok(())
}

/// Handle schema command for one table or all of them
pub async fn handle_schema(db: &DatabaseConnection, table: Option<String>) -> Result<()> {
    let pool = db.pool();
    let tables = match table {
        Some(table) => vec![table],
        None => maintenance::list_tables(pool).await?,
    };

    if tables.is_empty() {
        println!("{}", "No tables found. Run 'reporting-admin init' first.".yellow());
        return Ok(());
    }

    for table in tables {
        let columns = maintenance::table_columns(pool, &table).await?;
        let rows: Vec<ColumnRow> = columns.into_iter().map(ColumnRow::from).collect();
        println!("{}", table.bold());
        println!("{}", Table::new(rows));
        println!();
    }
    Ok(())
}

/// Handle stats command
pub async fn handle_stats(db: &DatabaseConnection) -> Result<()> {
    let counts = maintenance::row_counts(db.pool()).await?;
    if counts.is_empty() {
        println!("{}", "No tables found. Run 'reporting-admin init' first.".yellow());
        return Ok(());
    }

    let (table, total) = count_table(counts);
    println!("{}", table);
    println!("\nTotal rows: {}", total);
    Ok(())
}

/// Handle check-db command
pub async fn handle_check_db(db: &DatabaseConnection) -> Result<()> {
    println!("Database: {}", db.masked_url());

    if let Err(e) = db.health_check().await {
        println!("{} {}", "✗ Connection failed:".red().bold(), e);
        return Err(DatabaseError::from(e).into());
    }
    let version = db.sqlite_version().await?;
    println!("{}", "✓ Connection successful".green().bold());
    println!("  SQLite version: {}", version);

    let counts = maintenance::row_counts(db.pool()).await?;
    if counts.is_empty() {
        println!("{}", "  Schema not initialized".yellow());
        return Ok(());
    }
    let (table, total) = count_table(counts);
    println!("{}", table);
    println!("Total rows: {}", total);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_table_totals_rows() {
        let (rendered, total) = count_table(vec![
            TableRowCount {
                table: "defects".to_string(),
                rows: 3,
            },
            TableRowCount {
                table: "test_runs".to_string(),
                rows: 20,
            },
        ]);
        assert_eq!(total, 23);
        assert!(rendered.contains("test_runs"));
        assert!(rendered.contains("Rows"));
    }

    #[tokio::test]
    async fn test_schema_of_unknown_table_fails() {
        let db = DatabaseConnection::in_memory().await.unwrap();
        assert!(handle_schema(&db, Some("routes".to_string())).await.is_err());
        assert!(handle_schema(&db, Some("users".to_string())).await.is_ok());
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let db = DatabaseConnection::in_memory().await.unwrap();
        handle_init(&db).await.unwrap();
        handle_init(&db).await.unwrap();
        handle_stats(&db).await.unwrap();
        handle_check_db(&db).await.unwrap();
    }
}
