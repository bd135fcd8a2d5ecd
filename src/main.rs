use anyhow::Result;
use clap::{Parser, ValueEnum};
use profile_analyzer::{config::AppConfig, console, web};
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

#[derive(Parser)]
#[command(name = "linkscope")]
#[command(about = "Scrape public LinkedIn profiles and summarize them with Gemini")]
struct Cli {
    /// Run the local web UI (default) or a single console scrape
    #[arg(long, value_enum, default_value = "web")]
    mode: Mode,

    /// Run the browser without a visible window (overrides HEADLESS)
    #[arg(long)]
    headless: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Web,
    Console,
}

#[tokio::main]
async fn main() -> Result<()> {
    Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or(EnvFilter::new("linkscope=info,profile_analyzer=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if cli.headless {
        config.headless = true;
    }
    config.ensure_directories().await?;

    info!("Session directory: {}", config.session_dir.display());
    info!("Output directory: {}", config.output_dir.display());
    info!("Model: {}", config.model);

    match cli.mode {
        Mode::Console => console::run_console_mode(&config).await,
        Mode::Web => web::start_web_server(config).await,
    }
}
