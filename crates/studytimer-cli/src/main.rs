use clap::{Parser, Subcommand};
use studytimer_core::Config;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod commands;
mod view;

#[derive(Parser)]
#[command(name = "studytimer-cli", version, about = "Study timer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive countdown session
    Run(commands::run::RunArgs),
    /// List the preset durations
    Presets,
    /// Format a number of seconds as MM:SS
    Format {
        /// Remaining seconds
        seconds: u64,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let (config, load_error) = match Config::load() {
        Ok(cfg) => (cfg, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_tracing(&config);
    if let Some(e) = load_error {
        warn!("using default configuration: {e}");
    }

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Commands::Run(args) => commands::run::run(args, &config).map_err(Into::into),
        Commands::Presets => commands::presets::list(),
        Commands::Format { seconds } => commands::presets::format(seconds),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
