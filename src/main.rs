//! COCONUT Computer Club client
//!
//! Main application entry point

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing::{debug, error};

use coconut_club::{
    config::Settings,
    handlers::{handle_command, Command},
    state::AppContext,
    utils::logging,
};

#[derive(Parser, Debug)]
#[command(name = "coconut", author, version, about)]
struct Cli {
    /// Log at debug level
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let mut settings = Settings::new().context("Failed to load configuration")?;
    settings.validate().context("Invalid configuration")?;
    if cli.verbose {
        settings.logging.level = "debug".to_string();
    }

    // Initialize logging
    let log_guard = logging::init_logging(&settings.logging)?;
    debug!(version = coconut_club::VERSION, base_url = %settings.api.base_url, "Starting coconut");

    let context = AppContext::from_settings(settings)?;
    let today = Local::now().date_naive();

    let exit_code = match handle_command(&context, cli.command, today).await {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            error!(error = %e, severity = %e.severity(), "Command failed");
            eprintln!("{}", e.user_message());
            1
        }
    };

    // Flush the file appender before exiting
    drop(log_guard);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
