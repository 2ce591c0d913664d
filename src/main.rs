use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::error;

use sheetcheck::app::AnalyzeSheetUseCase;
use sheetcheck::auth::StaticTokenVerifier;
use sheetcheck::config::Config;
use sheetcheck::infra::google_sheets_source::GoogleSheetsSource;
use sheetcheck::server::{start_server, ApiContext};
use sheetcheck::{logging, observability};

#[derive(Parser)]
#[command(name = "sheetcheck")]
#[command(about = "Spreadsheet data-quality analysis service")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Fetch a sheet and print its quality report as JSON
    Analyze {
        /// Shared spreadsheet URL
        #[arg(long)]
        url: String,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Initialize logging and metrics before any work happens
    logging::init_logging();
    observability::metrics::init()?;

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            let ctx = Arc::new(ApiContext {
                analyze: AnalyzeSheetUseCase::with_default_analyzer(Box::new(GoogleSheetsSource)),
                verifier: Box::new(StaticTokenVerifier::from_config(&config.auth)),
            });
            start_server(ctx, port, &config.server.allowed_origins).await?;
        }
        Commands::Analyze { url, pretty } => {
            let use_case =
                AnalyzeSheetUseCase::with_default_analyzer(Box::new(GoogleSheetsSource));
            match use_case.analyze_url(&url).await {
                Ok(response) => {
                    let json = if pretty {
                        serde_json::to_string_pretty(&response)?
                    } else {
                        serde_json::to_string(&response)?
                    };
                    println!("{}", json);
                }
                Err(e) => {
                    error!("Analysis failed: {}", e);
                    println!("❌ Analysis failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}
