use std::path::PathBuf;

use anyhow::{Context, Result};

use ufc_etl::pipeline;
use ufc_etl::source::SourceTable;
use ufc_etl::store::{self, StoreConfig};

const CSV_PATH_ENV: &str = "UFC_ETL_CSV";
const DEFAULT_CSV_FILE: &str = "ufc-master.csv";

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let csv_path = parse_path_arg("--csv")
        .or_else(|| env_path(CSV_PATH_ENV))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_FILE));
    let config = StoreConfig::resolve(parse_path_arg("--db"));

    let table = SourceTable::from_csv_path(&csv_path).context("read source file")?;
    let tables = pipeline::run_transform(&table).context("transform source table")?;

    let mut conn = store::open_store(&config).context("connect to store")?;
    store::init_schema(&conn).context("bootstrap store schema")?;
    let summary = store::load_all(&mut conn, table.len(), &tables).context("load tables")?;

    println!("UFC ETL complete (run {})", summary.run_id);
    println!("Source: {} ({} records)", csv_path.display(), table.len());
    println!("DB: {}", config.db_path.display());
    for (name, rows) in &summary.table_counts {
        println!("  {name}: {rows} rows");
    }

    Ok(())
}

fn parse_path_arg(flag: &str) -> Option<PathBuf> {
    let prefix = format!("{flag}=");
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefix) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}

fn env_path(key: &str) -> Option<PathBuf> {
    let raw = std::env::var(key).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(trimmed))
}
