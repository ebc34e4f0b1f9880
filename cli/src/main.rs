//! agent-ui CLI - download, inject and serve the Tarko agent UI bundle

use agent_ui::cli::Cli;
use agent_ui::output::json;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.is_server() { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let as_json = cli.json;
    if let Err(e) = cli.run().await {
        match json::format_error(&format!("{e:#}"), json::error_code(&e)) {
            Ok(body) if as_json => println!("{body}"),
            _ => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}
