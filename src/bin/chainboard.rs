//! chainboard CLI - supply-chain ETL pipeline and OTIF analytics dashboard
//!
//! Three subcommands cover the batch pipeline end to end: create the schema,
//! run extract→transform→load, and serve the dashboard over the loaded data.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chainboard::{
    config::Config, dashboard, db::Database, extract, load, metrics, schema_init, transform,
    PipelineError,
};

#[derive(Parser)]
#[command(name = "chainboard")]
#[command(version, about = "Supply-chain ETL pipeline and OTIF analytics dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and tables if absent (idempotent)
    InitDb,

    /// Run the extract → transform → load pipeline
    Etl {
        /// Path to the source CSV (overrides CSV_PATH)
        #[arg(short, long)]
        csv: Option<PathBuf>,
    },

    /// Load the metric dataset and serve the dashboard
    Serve {
        /// Listen port (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::InitDb => init_db(&config),
        Commands::Etl { csv } => run_etl(&config, csv),
        Commands::Serve { port } => run_serve(&config, port).await,
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn init_db(config: &Config) -> Result<(), PipelineError> {
    schema_init::create_database(&config.db)?;

    let db = Database::connect(&config.db)?;
    let mut conn = db.get_connection()?;
    schema_init::create_tables(&mut conn)?;

    Ok(())
}

fn run_etl(config: &Config, csv_override: Option<PathBuf>) -> Result<(), PipelineError> {
    let csv_path = csv_override.unwrap_or_else(|| config.csv_path.clone());

    tracing::info!(path = %csv_path.display(), "extracting CSV");
    let raw = extract::read_csv(&csv_path)?;
    tracing::info!(
        records = raw.len(),
        columns = raw.column_count(),
        "extraction complete"
    );

    let tables = transform::transform(&raw)?;
    tracing::info!(
        products = tables.products.len(),
        suppliers = tables.suppliers.len(),
        sales = tables.sales.len(),
        logistics = tables.logistics.len(),
        production = tables.production.len(),
        "transformation complete"
    );

    let db = Database::connect(&config.db)?;
    let mut conn = db.get_connection()?;
    let report = load::load_all(&mut conn, &tables)?;
    tracing::info!(rows = report.total(), "ETL pipeline complete");

    Ok(())
}

async fn run_serve(config: &Config, port_override: Option<u16>) -> Result<(), PipelineError> {
    let port = port_override.unwrap_or(config.dashboard_port);

    let db = Database::connect(&config.db)?;
    let mut conn = db.get_connection()?;
    let rows = metrics::load_dataset(&mut conn)?;
    drop(conn);

    dashboard::serve(port, rows).await
}
