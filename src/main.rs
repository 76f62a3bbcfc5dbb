use anyhow::Result;
use clap::Parser;
use tracing::info;

use folio_assistant::logger::{self, LogConfig};
use folio_assistant::{AppConfig, Launcher};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cfg = AppConfig::parse();
    logger::init(LogConfig {
        format: cfg.log_format,
        default_filter: "warn,folio_assistant=info".to_string(),
        ..Default::default()
    });

    info!(version = folio_assistant::VERSION, command = ?cfg.command(), "starting folio");
    Launcher::with_config(cfg).launch().await?;
    Ok(())
}
