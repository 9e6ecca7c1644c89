use clap::Parser;
use rowmarshal::RowSource;
use rowmarshal_sqlite::SqliteRows;
use rusqlite::{Connection, OpenFlags};

#[derive(Parser)]
#[command(name = "rowmarshal-dump", about = "Print one SQLite result column as JSON")]
struct Cli {
    /// Path to the SQLite database file.
    #[arg(long, env = "ROWMARSHAL_DATABASE")]
    database: String,

    /// Query returning exactly one column.
    #[arg(long)]
    query: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match dump(&cli) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            tracing::error!(database = %cli.database, error = %e, "dump failed");
            std::process::exit(1);
        }
    }
}

fn dump(cli: &Cli) -> Result<serde_json::Value, rowmarshal_sqlite::SelectError> {
    tracing::info!(database = %cli.database, "opening database");
    let conn = Connection::open_with_flags(&cli.database, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let mut stmt = conn.prepare(&cli.query)?;
    let mut rows = SqliteRows::query(&mut stmt, [])?;
    let columns = rows.columns()?;

    // INTEGER, REAL, TEXT and UTF-8 BLOB cells all have a text form; NULL stays null.
    let mut values: Vec<Option<String>> = Vec::new();
    rowmarshal::select(&mut values, &mut rows)?;

    tracing::info!(rows = values.len(), "query done");
    Ok(serde_json::json!({
        "column": columns.first(),
        "rows": values,
    }))
}
