use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use whirligig_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "whirligig")]
#[command(author, version, about = "A horizontal carousel controller")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive terminal carousel
    Run,
    /// Drive a headless track through scripted steps and print the trace
    Simulate {
        /// Number of slides (defaults to demo.slide_count)
        #[arg(long)]
        slides: Option<usize>,
        /// Width of each slide (defaults to demo.slide_width)
        #[arg(long)]
        slide_width: Option<f64>,
        /// Viewport width (defaults to the page width, or 2.5 slides)
        #[arg(long)]
        viewport: Option<f64>,
        /// Print the trace as JSON
        #[arg(long)]
        json: bool,
        /// Steps: next, prev, slide:N, push:N, key:NAME, swipe:DIR,
        /// scroll:OFFSET, scroll-end, touch-start, touch-end, wait[:MS], settle
        steps: Vec<String>,
    },
    /// Show or initialise the configuration file
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let interactive = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, interactive);

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Simulate {
            slides,
            slide_width,
            viewport,
            json,
            steps,
        }) => {
            let options = commands::simulate::SimulateOptions {
                slides,
                slide_width,
                viewport,
                json,
            };
            commands::simulate::run(&config, options, &steps).await
        }
        Some(Commands::Config { action }) => match action {
            Some(ConfigAction::Show) | None => commands::config::show(&config),
            Some(ConfigAction::Path) => commands::config::path(),
            Some(ConfigAction::Init { force }) => commands::config::init(force),
        },
    }
}

/// Logs go to stderr. The interactive carousel owns the terminal, so it
/// only logs when RUST_LOG asks for it.
fn init_logging(config: &AppConfig, interactive: bool) {
    let from_env = std::env::var("RUST_LOG").ok();
    if interactive && from_env.is_none() {
        return;
    }

    let filter = from_env.unwrap_or_else(|| config.general.log_level.clone());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
