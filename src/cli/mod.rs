// CLI module - User-facing command-line interface

mod output;

pub use output::print_error;

use crate::config::{
    CompositePropertySource, EnvPropertySource, FilePropertySource, PropertySource,
    ServerConfig, EXTERNAL_FILE,
};
use crate::error::{LogFileError, Result};
use crate::http::LogFileServer;
use crate::logs::{read_last_lines, LogFileResolver};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Expose an application's log file over HTTP
#[derive(Parser)]
#[command(name = "logfile-endpoint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command
#[derive(clap::Args, Clone, Debug, Default)]
struct SourceArgs {
    /// Configuration file (.toml or .json) holding logging properties
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serve this file regardless of the logging properties
    #[arg(long)]
    external_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the log file over HTTP
    Serve {
        #[command(flatten)]
        source: SourceArgs,

        /// Address to listen on (overrides the config file)
        #[arg(short, long)]
        bind: Option<String>,

        /// Request path of the endpoint (overrides the config file)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Print the log file that would be served
    Resolve {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the last lines of the log file
    Tail {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of lines to display
        #[arg(short = 'n', long, default_value = "100")]
        lines: usize,

        /// Only show lines containing this text
        #[arg(short, long)]
        filter: Option<String>,
    },
}

impl Cli {
    /// Run the CLI application
    pub async fn run() -> Result<()> {
        let cli = Cli::parse();
        cli.execute().await
    }

    /// Execute the parsed command
    async fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Serve { source, bind, path } => {
                let mut config = match source.config {
                    Some(ref file) => ServerConfig::parse_file(file)?,
                    None => ServerConfig::default(),
                };
                if let Some(bind) = bind {
                    config.bind = bind.clone();
                }
                if let Some(path) = path {
                    config.endpoint_path = path.clone();
                }
                config.validate()?;

                let resolver = build_resolver(source, config.external_file.clone())?;
                if resolver.resolve().is_none() {
                    warn!("No log file available yet; requests will get 404 until one appears");
                }

                let server = LogFileServer::new(config, Arc::new(resolver));
                server.run(shutdown_signal()).await
            }

            Commands::Resolve { source } => {
                let external = server_external_file(source)?;
                let resolver = build_resolver(source, external)?;

                match resolver.resolve() {
                    Some(resource) => {
                        let size = resource.size().await?;
                        output::print_resolved(resource.path(), size);
                        Ok(())
                    }
                    None => Err(no_log_file(&resolver)),
                }
            }

            Commands::Tail {
                source,
                lines,
                filter,
            } => {
                let external = server_external_file(source)?;
                let resolver = build_resolver(source, external)?;

                let resource = resolver.resolve().ok_or_else(|| no_log_file(&resolver))?;
                let entries = read_last_lines(resource.path(), *lines, filter.as_deref()).await?;
                output::print_lines(&entries);
                Ok(())
            }
        }
    }
}

/// External file named in the `[server]` table of the config file, if any.
///
/// The table is not validated: `resolve` and `tail` never bind.
fn server_external_file(source: &SourceArgs) -> Result<Option<PathBuf>> {
    match source.config {
        Some(ref file) => Ok(ServerConfig::parse_file(file)?.external_file),
        None => Ok(None),
    }
}

/// Environment first, then the config file
fn build_properties(source: &SourceArgs) -> Result<CompositePropertySource> {
    let mut properties = CompositePropertySource::new();
    properties.add_last(Arc::new(EnvPropertySource::new()));

    if let Some(ref file) = source.config {
        let file_source = FilePropertySource::from_file(file)?;
        info!("Loaded properties from {}", file_source.name());
        properties.add_last(Arc::new(file_source));
    }

    Ok(properties)
}

/// The command line flag wins over the config file, which wins over the
/// external-file property.
fn build_resolver(
    source: &SourceArgs,
    config_external: Option<PathBuf>,
) -> Result<LogFileResolver> {
    let properties = build_properties(source)?;

    let external = source
        .external_file
        .clone()
        .or(config_external)
        .or_else(|| properties.get_property(EXTERNAL_FILE).map(PathBuf::from));

    let properties: Arc<dyn PropertySource> = Arc::new(properties);
    Ok(match external {
        Some(file) => LogFileResolver::with_external_file(properties, file),
        None => LogFileResolver::new(properties),
    })
}

fn no_log_file(resolver: &LogFileResolver) -> LogFileError {
    match resolver.configured_path() {
        Some(path) => LogFileError::Other(format!(
            "No log file available: {} does not exist",
            path.display()
        )),
        None => LogFileError::Other("No log file configured".to_string()),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
