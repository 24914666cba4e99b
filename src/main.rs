use clap::{Parser, builder::styling};
use eyre::{Context, Result};
use owo_colors::OwoColorize;
use rdb_loader::{Dataset, RdbClient, TableLoader};

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// rdb Loader: bulk-load a CSV dataset into an rdb schema store table
#[derive(Parser)]
#[command(name = "rdb-load", version, styles = STYLES)]
struct Cli {
    /// Table to load into; its schema must already exist in the store
    table: String,

    /// Host name of the rdb server
    host: String,

    /// Port the rdb server listens on
    port: String,

    /// CSV file to load, with a header row of column names
    #[arg(short, long, default_value = "data.csv")]
    input: String,

    /// The dotenv file to source settings from
    #[arg(short, long, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::from_filename(&cli.env).ok();

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    let dataset = Dataset::from_csv_path(&cli.input)
        .with_context(|| format!("Failed to read dataset from {}", cli.input))?;
    log::info!(
        "Read {} row(s) from {}",
        dataset.row_count(),
        cli.input.bright_black()
    );

    let client = RdbClient::try_new(&cli.host, &cli.port)?;
    log::info!(
        "Loading table {} to {}",
        cli.table.cyan(),
        client.to_string().bright_black()
    );

    let loader = TableLoader::new(client, &cli.table, dataset);

    // Transport failures propagate and exit non-zero via eyre
    let result = loader.load().await?;

    if result.succeeded() {
        log::info!("Table {} loaded ({})", cli.table.cyan(), result.status_code);
        Ok(())
    } else {
        match &result.error {
            Some(message) => log::error!(
                "Failed to load table {} ({}): {}",
                cli.table.cyan(),
                result.status_code,
                message
            ),
            None => log::error!(
                "Failed to load table {} ({})",
                cli.table.cyan(),
                result.status_code
            ),
        }
        std::process::exit(1);
    }
}
