//! Baggage kiosk service: CLI server
//!
//! Headless REST backend for the self-service baggage kiosk, suitable for a
//! systemd unit, a container, or a kiosk PC.
//!
//! ```sh
//! # Run with default config (~/.config/baggage-kiosk/config.toml)
//! kiosk-service
//!
//! # Custom config path and port
//! kiosk-service --config /etc/baggage-kiosk/config.toml --port 8081
//!
//! # Write the default config and exit
//! kiosk-service --init
//!
//! # Validate config without starting
//! kiosk-service --check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use baggage_kiosk::config::AppConfig;
use baggage_kiosk::server::{init_tracing, ServerHandle, ServerOptions};

/// Carry-on baggage compliance kiosk backend.
#[derive(Parser, Debug)]
#[command(
    name = "kiosk-service",
    version,
    about = "Carry-on baggage compliance kiosk backend",
    long_about = "REST API for measuring carry-on bags, checking them against \
                  airline limits and charging excess fees.\n\n\
                  Default config: ~/.config/baggage-kiosk/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "KIOSK_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Write the default configuration to the config path and exit.
    #[arg(long, conflicts_with = "check")]
    init: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("kiosk-service: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.config.unwrap_or_else(baggage_kiosk::default_config_path);

    if cli.init {
        if config_path.exists() {
            return Err(format!("{} already exists", config_path.display()).into());
        }
        AppConfig::default().save(&config_path)?;
        println!("Default configuration written to {}", config_path.display());
        return Ok(());
    }

    // --check must fail loudly; a normal start falls back to defaults
    let loaded = AppConfig::load(&config_path);
    if cli.check {
        let mut config = loaded?;
        apply_overrides(&mut config, &cli.port, &cli.log_level);
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!(
            "   Airline     : {} ({} rule sets)",
            config.defaults.airline.code,
            config.defaults.rules.len()
        );
        let devices = if config.devices.simulate { "simulated" } else { "manual" };
        println!("   Devices     : {}", devices);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    let mut config = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            eprintln!("Using default configuration.");
            AppConfig::default()
        }
    };
    apply_overrides(&mut config, &cli.port, &cli.log_level);

    // Init tracing after overrides so --log-level takes effect
    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    let handle = match ServerHandle::start(ServerOptions { config }).await {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start: {}", e);
            return Err(e);
        }
    };

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.wait().await;
    Ok(())
}

fn apply_overrides(config: &mut AppConfig, port: &Option<u16>, log_level: &Option<String>) {
    if let Some(port) = *port {
        config.server.port = port;
    }
    if let Some(level) = log_level {
        config.logging.level = level.clone();
    }
}
