//! CLI command implementations

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::info;

use crate::http_server::{HttpServer, ServerConfig, StoreKind};
use crate::observability::init_logging;
use crate::store::{DocumentStore, FileStore, MemoryStore};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    init_logging();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Write a default config file and create its data directory.
///
/// Refuses to overwrite an existing config. The written `api_key` is empty;
/// set it in the file or through `CASA_API_KEY` before serving.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::AlreadyInitialized(config_path.to_path_buf()));
    }

    let config = ServerConfig::default();

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(CliError::io_at(parent))?;
    }
    let data_dir = resolve_data_dir(config_path, &config);
    fs::create_dir_all(&data_dir).map_err(CliError::io_at(&data_dir))?;

    fs::write(config_path, serde_json::to_vec_pretty(&config)?)
        .map_err(CliError::io_at(config_path))?;

    write_json(&json!({
        "initialized": true,
        "config": config_path.display().to_string(),
        "data_dir": data_dir.display().to_string(),
    }))
}

/// Load config, open the store, serve until interrupted
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let config = load_config(config_path, port, |name| std::env::var(name).ok())?;

    let store = open_store(&config)?;
    info!(
        event = "STORE_OPENED",
        store = ?config.store,
        data_dir = %config.data_dir.display(),
        "document store ready"
    );

    let server = HttpServer::new(config, store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::BootFailed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::BootFailed(format!("HTTP server failed: {}", e)))
    })
}

/// Load and validate the config with `--port` applied last.
///
/// `lookup` resolves the `CASA_*` overrides; `serve` passes the environment.
pub fn load_config<F>(config_path: &Path, port: Option<u16>, lookup: F) -> CliResult<ServerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ServerConfig::load_with(config_path, lookup)?;
    if let Some(port) = port {
        config.port = port;
        config.validate()?;
    }
    config.data_dir = resolve_data_dir(config_path, &config);
    Ok(config)
}

/// Open the backend named by the config
pub fn open_store(config: &ServerConfig) -> CliResult<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config.store {
        StoreKind::Memory => Arc::new(MemoryStore::new()),
        StoreKind::File => Arc::new(FileStore::open(&config.data_dir)?),
    };
    Ok(store)
}

/// Relative data directories are resolved against the config file's directory
fn resolve_data_dir(config_path: &Path, config: &ServerConfig) -> std::path::PathBuf {
    if config.data_dir.is_absolute() {
        return config.data_dir.clone();
    }
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(&config.data_dir),
        _ => config.data_dir.clone(),
    }
}

fn write_json(value: &Value) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
