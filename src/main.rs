use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hotel_gateway::{HotelGatewayConfig, HotelProvider, telemetry, web};

/// Hotel search gateway aggregating geo, rate and profile services into GeoJSON
#[derive(Parser)]
#[command(name = "hotel-gateway", version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Load and validate the configuration, then exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = HotelGatewayConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;

    match cli.command {
        Some(Command::Serve { port }) => {
            if let Some(port) = port {
                config.server.port = port;
            }
            telemetry::init(&config.logging, cli.verbose)?;

            let provider = HotelProvider::from_config(&config.services)
                .context("Failed to create backend clients")?;
            web::run(&config.server, provider).await
        }
        Some(Command::CheckConfig) => {
            println!("Configuration OK");
            if cli.verbose {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            Ok(())
        }
        None => {
            println!("hotel-gateway {}", hotel_gateway::VERSION);
            println!("Run `hotel-gateway serve` to start the server.");
            if let Some(path) = cli.config.or_else(HotelGatewayConfig::get_config_path) {
                println!("Using config from: {}", path.display());
            }
            Ok(())
        }
    }
}
