//! FlatDB CLI
//!
//! A thin driver over the table engine's public operations. Everything here
//! is a caller concern; the engine itself knows nothing about the CLI.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use flatdb::{Column, ColumnType, Config, SortDirection, Table};

/// FlatDB command-line interface
#[derive(Parser, Debug)]
#[command(name = "flatdb")]
#[command(about = "Minimal schema-typed flat-file record store")]
#[command(version)]
struct Args {
    /// Database file
    #[arg(short, long, default_value = "./flatdb.txt")]
    database: String,

    /// Field delimiter
    #[arg(long, default_value = ";")]
    delimiter: char,

    /// Index key column (Integer), enables auto-increment
    #[arg(short, long)]
    index: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the table from column specs like name:str or id:int
    Create {
        /// Columns as name:type (type = int | str | date)
        columns: Vec<String>,
    },

    /// Insert a record from field assignments like name=Alice
    Insert {
        /// Fields as column=value
        fields: Vec<String>,
    },

    /// Fetch records matching a needle
    Select {
        /// Column name, or * for whole-row matching
        #[arg(default_value = "*")]
        column: String,

        /// Needle: * for all, =value for exact, anything else is a pattern
        #[arg(default_value = "*")]
        needle: String,

        /// Column to order by
        #[arg(short, long, default_value = "")]
        order_by: String,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
    },

    /// Update matching records with field assignments
    Update {
        column: String,
        needle: String,

        /// Fields as column=value
        fields: Vec<String>,
    },

    /// Delete matching records
    Delete {
        column: String,
        needle: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> flatdb::Result<()> {
    let config = Config::builder()
        .path(&args.database)
        .delimiter(args.delimiter)
        .build();

    let mut table = Table::open(config)?;

    // The index key only matters once the table exists
    if !matches!(args.command, Command::Create { .. }) {
        if let Some(index) = &args.index {
            table.set_index_key(index)?;
        }
    }

    match args.command {
        Command::Create { columns } => {
            let columns = parse_columns(&columns)?;
            table.create(columns)?;
            println!("table created in {}", args.database);
        }
        Command::Insert { fields } => {
            let fields = parse_fields(&fields);
            let refs: Vec<(&str, &str)> =
                fields.iter().map(|(n, v)| (n.as_str(), v.as_str())).collect();
            table.insert(&refs)?;
            println!("inserted, last id = {}", table.last_id());
        }
        Command::Select {
            column,
            needle,
            order_by,
            desc,
        } => {
            let direction = if desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };

            for record in table.select(&column, &needle, &order_by, direction) {
                let row: Vec<String> = record
                    .iter()
                    .map(|(name, value)| format!("{}={}", name, value))
                    .collect();
                println!("{}", row.join(", "));
            }
            println!("{} row(s)", table.affected_rows());
        }
        Command::Update {
            column,
            needle,
            fields,
        } => {
            let fields = parse_fields(&fields);
            let refs: Vec<(&str, &str)> =
                fields.iter().map(|(n, v)| (n.as_str(), v.as_str())).collect();
            table.update(&column, &needle, &refs)?;
            println!("{} row(s) updated", table.affected_rows());
        }
        Command::Delete { column, needle } => {
            table.delete(&column, &needle)?;
            println!("{} row(s) deleted", table.affected_rows());
        }
    }

    Ok(())
}

/// Parse `name:type` column specs
fn parse_columns(specs: &[String]) -> flatdb::Result<Vec<Column>> {
    specs
        .iter()
        .map(|spec| {
            let (name, ty) = spec.split_once(':').ok_or_else(|| {
                flatdb::FlatError::InvalidInput(format!("expected name:type, got \"{}\"", spec))
            })?;
            let ty = ColumnType::parse(ty).ok_or_else(|| {
                flatdb::FlatError::InvalidInput(format!("unknown type \"{}\"", ty))
            })?;
            Ok(Column::new(name, ty))
        })
        .collect()
}

/// Parse `column=value` field assignments
fn parse_fields(assignments: &[String]) -> Vec<(String, String)> {
    assignments
        .iter()
        .filter_map(|a| a.split_once('='))
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect()
}
