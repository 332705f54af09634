//! TourAI CLI - ask about the weather and sights of any destination

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::error;
use tourai::{Intent, Orchestrator, Response, TourAiConfig, logging};

#[derive(Parser)]
#[command(name = "tourai")]
#[command(about = "TourAI - Intelligent multi-agent tourism assistant", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logs and configuration details
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print responses as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question in plain English, e.g. "What's the weather in Barcelona?"
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Current weather for a destination
    Weather {
        /// Destination name
        #[arg(short, long)]
        location: String,
    },
    /// Top tourist attractions for a destination
    Places {
        /// Destination name
        #[arg(short, long)]
        location: String,
    },
    /// Weather and attractions for a destination
    Plan {
        /// Destination name
        #[arg(short, long)]
        location: String,
        /// Include the weather section (both sections when neither flag is set)
        #[arg(long)]
        weather: bool,
        /// Include the attractions section
        #[arg(long)]
        places: bool,
    },
    /// Ask questions one line at a time
    Interactive,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = TourAiConfig::load_from_path(cli.config.clone())
        .with_context(|| "Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose)?;

    let Some(command) = cli.command else {
        print_welcome(cli.verbose, cli.config.as_deref(), &config);
        return Ok(ExitCode::SUCCESS);
    };

    let orchestrator = match Orchestrator::from_config(&config) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            error!("Failed to set up agents: {}", e);
            eprintln!("❌ {}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    let response = match command {
        Commands::Ask { query } => orchestrator.handle(&query.join(" ")).await,
        Commands::Weather { location } => {
            orchestrator.handle_destination(&location, Intent::Weather).await
        }
        Commands::Places { location } => {
            orchestrator.handle_destination(&location, Intent::Places).await
        }
        Commands::Plan {
            location,
            weather,
            places,
        } => {
            orchestrator
                .handle_destination(&location, plan_intent(weather, places))
                .await
        }
        Commands::Interactive => {
            run_interactive(&orchestrator, cli.json).await?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    print_response(&response, cli.json)?;
    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Sections for `plan`: both unless narrowed with `--weather` or `--places`
fn plan_intent(weather: bool, places: bool) -> Intent {
    Intent::from_flags(weather, places).unwrap_or(Intent::Both)
}

fn print_response(response: &Response, json: bool) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(response)
            .with_context(|| "Failed to serialize response")?;
        println!("{rendered}");
    } else {
        print!("{response}");
    }
    Ok(())
}

async fn run_interactive(orchestrator: &Orchestrator, json: bool) -> Result<()> {
    println!("🌍 TourAI - ask about any destination. Empty line or 'quit' to exit.");
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.with_context(|| "Failed to read input")?;
        let query = line.trim();
        if query.is_empty() || query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
            break;
        }

        let response = orchestrator.handle(query).await;
        print_response(&response, json)?;
        println!();
    }
    Ok(())
}

fn print_welcome(verbose: bool, config_file: Option<&Path>, config: &TourAiConfig) {
    println!("🌍 TourAI - Multi-Agent Tourism Assistant v{}", tourai::VERSION);
    println!("Weather via OpenMeteo, places via OpenStreetMap - no setup required.");
    println!();
    println!("Example queries:");
    println!("  tourai ask \"What's the weather in Barcelona?\"");
    println!("  tourai ask \"I'm going to Rome, let's plan my trip\"");
    println!("  tourai plan --location Tokyo");
    println!("  tourai interactive");

    if verbose {
        let config_path = config_file
            .map(Path::to_path_buf)
            .or_else(TourAiConfig::get_config_path)
            .map_or_else(|| "defaults".to_string(), |p| p.display().to_string());
        println!();
        println!("Using config from: {config_path}");
        println!("Geocoding: {}", config.geocoding.base_url);
        println!("Weather API: {}", config.weather.base_url);
        println!("Places API: {}", config.places.base_url);
        println!("Log level: {}", config.logging.level);
    }
}
