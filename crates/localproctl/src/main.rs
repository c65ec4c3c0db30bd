// # localproctl - LocalPro command line
//
// A thin layer over localpro-core: the admin console (list, show, add, edit,
// delete) and the public directory (directory, find, areas) as subcommands.
// All record logic lives in localpro-core.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// ### Snapshot Store
// - `LOCALPRO_STORAGE_TYPE`: Type of snapshot store (file, memory)
// - `LOCALPRO_STORAGE_PATH`: Path to the snapshot file (for file store)
//
// ### Bootstrap Source
// - `LOCALPRO_BOOTSTRAP_TYPE`: Type of bootstrap source (file, http)
// - `LOCALPRO_BOOTSTRAP_PATH`: Path to the bootstrap JSON (for file)
// - `LOCALPRO_BOOTSTRAP_URL`: URL of the bootstrap JSON (for http)
//
// ### Records
// - `LOCALPRO_DEFAULT_CITY`: City pre-filled on new records
//
// ### Logging
// - `LOCALPRO_LOG_LEVEL`: trace, debug, info, warn, error
//
// ## Example
//
// ```bash
// export LOCALPRO_STORAGE_PATH=/var/lib/localpro/snapshot.json
// export LOCALPRO_BOOTSTRAP_PATH=./tools.json
//
// localproctl add --name "Tom Akpan" --service Wiring --area Osongama \
//     --phone "0801 234 5678" --whatsapp "+234 801 234 5678"
// localproctl find solar
// ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error};
use tracing_subscriber::FmtSubscriber;

use localpro_core::{BootstrapConfig, LocalProConfig, StorageConfig};

mod admin;
mod directory;

/// Exit codes for the command line
#[derive(Debug, Clone, Copy)]
enum LocalProExitCode {
    /// Command completed
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Command failed
    RuntimeError = 2,
}

impl From<LocalProExitCode> for ExitCode {
    fn from(code: LocalProExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Parser, Debug)]
#[command(name = "localproctl")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    #[command(flatten)]
    Admin(admin::Command),
    #[command(flatten)]
    Directory(directory::Command),
}

/// Application configuration
struct Config {
    core: LocalProConfig,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let mut core = LocalProConfig::new();

        core.storage = match env::var("LOCALPRO_STORAGE_TYPE")
            .unwrap_or_else(|_| "file".to_string())
            .as_str()
        {
            "file" => StorageConfig::File {
                path: env::var("LOCALPRO_STORAGE_PATH")
                    .unwrap_or_else(|_| "localpro-snapshot.json".to_string()),
            },
            "memory" => StorageConfig::Memory,
            other => anyhow::bail!(
                "LOCALPRO_STORAGE_TYPE '{}' is not supported. \
                Supported types: file, memory",
                other
            ),
        };

        core.bootstrap = match env::var("LOCALPRO_BOOTSTRAP_TYPE")
            .unwrap_or_else(|_| "file".to_string())
            .as_str()
        {
            "file" => BootstrapConfig::File {
                path: env::var("LOCALPRO_BOOTSTRAP_PATH")
                    .unwrap_or_else(|_| "tools.json".to_string()),
            },
            "http" => BootstrapConfig::Http {
                url: env::var("LOCALPRO_BOOTSTRAP_URL").map_err(|_| {
                    anyhow::anyhow!(
                        "LOCALPRO_BOOTSTRAP_URL is required when LOCALPRO_BOOTSTRAP_TYPE=http"
                    )
                })?,
            },
            other => anyhow::bail!(
                "LOCALPRO_BOOTSTRAP_TYPE '{}' is not supported. \
                Supported types: file, http",
                other
            ),
        };

        if let Ok(city) = env::var("LOCALPRO_DEFAULT_CITY") {
            core.store.default_city = city;
        }

        Ok(Self {
            core,
            log_level: env::var("LOCALPRO_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.core.validate()?;

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "LOCALPRO_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return LocalProExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return LocalProExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return LocalProExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return LocalProExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        let outcome = match &cli.command {
            Command::Admin(cmd) => admin::handle(&config.core, cmd).await,
            Command::Directory(cmd) => directory::handle(&config.core, cmd).await,
        };

        match outcome {
            Ok(()) => LocalProExitCode::Success,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                LocalProExitCode::RuntimeError
            }
        }
    });

    result.into()
}

/// Open the record store described by `config`
async fn open_store(config: &LocalProConfig) -> Result<localpro_core::RecordStore> {
    let snapshots = localpro_core::storage::open(&config.storage).await?;
    let bootstrap = bootstrap_source(&config.bootstrap)?;
    Ok(localpro_core::RecordStore::new(
        snapshots,
        bootstrap,
        &config.store,
    ))
}

fn bootstrap_source(
    config: &BootstrapConfig,
) -> Result<Box<dyn localpro_core::BootstrapSource>> {
    match config {
        BootstrapConfig::File { path } => Ok(Box::new(localpro_core::FileBootstrap::new(path))),
        #[cfg(feature = "http")]
        BootstrapConfig::Http { .. } => Ok(Box::new(
            localpro_bootstrap_http::HttpBootstrap::from_config(config)?,
        )),
        #[cfg(not(feature = "http"))]
        BootstrapConfig::Http { .. } => {
            anyhow::bail!("HTTP bootstrap support was not compiled in")
        }
    }
}
