use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loadboard_config::{Config, ConfigLoader, StorageBackend};
use loadboard_engine::MatchingEngine;
use loadboard_storage::{FileStorage, MemoryStorage, StorageInterface, StorageService};
use loadboard_types::EventBus;

mod api;

#[derive(Parser)]
#[command(name = "loadboard")]
#[command(about = "Loadboard matching service", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	#[arg(short, long, value_name = "FILE", default_value = "config/local.toml")]
	config: PathBuf,

	#[arg(long, env = "LOADBOARD_LOG_LEVEL", default_value = "info")]
	log_level: String,
}

#[derive(Subcommand)]
enum Commands {
	/// Start the matching service
	Start,
	/// Validate the configuration file
	Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	setup_tracing(&cli.log_level);

	match cli.command {
		Some(Commands::Start) | None => start_service(cli).await,
		Some(Commands::Validate) => validate_config(cli).await,
	}
}

fn setup_tracing(log_level: &str) {
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer())
		.init();
}

async fn start_service(cli: Cli) -> Result<()> {
	info!("Starting loadboard matching service");
	info!("Loading configuration from: {:?}", cli.config);

	let config = ConfigLoader::new()
		.with_file(&cli.config)
		.load()
		.await
		.context("Failed to load configuration")?;

	let storage = Arc::new(StorageService::new(build_storage(&config)));
	let engine = Arc::new(MatchingEngine::new(
		storage,
		Duration::from_millis(config.engine.lock_timeout_ms),
		config.engine.event_capacity,
	));

	spawn_event_logger(engine.event_bus());

	let state = api::AppState {
		engine: engine.clone(),
	};
	let app = api::router(state);

	let addr = format!("{}:{}", config.service.host, config.service.port);
	let listener = tokio::net::TcpListener::bind(&addr)
		.await
		.with_context(|| format!("Failed to bind {}", addr))?;
	info!("Listening on {}", listener.local_addr()?);

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await
		.context("Server error")?;

	info!("Shut down cleanly");
	Ok(())
}

async fn validate_config(cli: Cli) -> Result<()> {
	let config = ConfigLoader::new()
		.with_file(&cli.config)
		.load()
		.await
		.context("Configuration is invalid")?;

	info!("Configuration is valid");
	info!("Service: {}:{}", config.service.host, config.service.port);
	info!("Storage backend: {:?}", config.storage.backend);
	info!("Lock timeout: {}ms", config.engine.lock_timeout_ms);
	Ok(())
}

fn build_storage(config: &Config) -> Box<dyn StorageInterface> {
	match config.storage.backend {
		StorageBackend::Memory => Box::new(MemoryStorage::new()),
		StorageBackend::File => Box::new(FileStorage::new(config.storage.path.clone())),
	}
}

/// Logs every engine event. The engine itself stays silent; this task is
/// the service's observability over it.
fn spawn_event_logger(bus: &EventBus) {
	let mut receiver = bus.subscribe();
	tokio::spawn(async move {
		loop {
			match receiver.recv().await {
				Ok(event) => info!(?event, "market event"),
				Err(tokio::sync::broadcast::error::RecvError::Lagged(missed)) => {
					warn!(missed, "event logger lagged behind the bus");
				}
				Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
			}
		}
	});
}

async fn shutdown_signal() {
	if let Err(e) = signal::ctrl_c().await {
		warn!("Failed to listen for shutdown signal: {}", e);
	}
	info!("Shutdown signal received");
}
