//! txnsift Server CLI
//!
//! Loads configuration from the environment and starts the webhook server.

use std::env;
use std::process;
use txnsift_server::{config::ServerConfig, start_server, ServerError};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();
    if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    }

    let config = ServerConfig::from_env()?;
    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("txnsift-server - Transaction-alert extraction webhook");
    println!();
    println!("USAGE:");
    println!("    txnsift-server");
    println!();
    println!("CONFIGURATION (environment variables):");
    println!("    OPENAI_API_KEY           OpenAI API key (required)");
    println!("    AIRTABLE_API_KEY         Airtable API key (required)");
    println!("    AIRTABLE_BASE_ID         Airtable base identifier (required)");
    println!("    AIRTABLE_TABLE_NAME      Destination table name (required)");
    println!("    BIND_ADDRESS             Bind address (default: 0.0.0.0)");
    println!("    BIND_PORT                Bind port (default: 8080)");
    println!("    NOTIFICATIONS_ENABLED    Deliver push notifications (default: true)");
    println!("    OPENAI_MODEL             Completion model override");
    println!("    TRAILER_MARKER           Boilerplate footer marker to strip");
    println!();
}
