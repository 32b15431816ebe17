//! RentWise - Interactive Rent Prediction Console

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use rentwise::api::{view, Command, Console, Outcome};
use rentwise::constants::{APP_NAME, APP_VERSION};
use rentwise::logic::service::RentClient;
use rentwise::ClientConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env before the logger so RUST_LOG can live there too
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ClientConfig::from_env();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);
    log::info!("   Service: {}", config.api_url);
    log::info!("   Timeout: {}s", config.timeout_secs);

    let client = Arc::new(RentClient::new(config.clone())?);
    let mut console = Console::new(client, config.sample_limit);

    // Best-effort, runs while the user starts typing
    let _ = console.start();

    println!("{} - AI-powered rent prediction. Type `help` for commands.\n", APP_NAME);
    println!("{}", view::render_form(console.form()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match console.execute(command).await {
            Outcome::Print(text) => println!("{}\n", text),
            Outcome::Quit => break,
        }
    }

    log::info!("{} shutting down", APP_NAME);
    Ok(())
}
