use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use libris_kernel::settings::Settings;

const REDACTED: &str = "<redacted>";

/// Operator entrypoint for the Libris book catalog
#[derive(Debug, Parser)]
#[command(name = "libris", version, about)]
struct Cli {
    /// Directory holding base.toml and <env>.toml
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Deployment environment (local, staging, production)
    #[arg(long = "env", global = true)]
    environment: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Override server.host
        #[arg(long)]
        host: Option<String>,
        /// Override server.port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the effective configuration as JSON
    Config,
}

impl Cli {
    fn load_settings(&self) -> anyhow::Result<Settings> {
        if self.config_dir.is_none() && self.environment.is_none() {
            return Settings::load();
        }

        let config_dir = self
            .config_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("config"));
        let environment = match &self.environment {
            Some(env) => env.clone(),
            None => std::env::var("LIBRIS_ENV").unwrap_or_else(|_| "local".to_string()),
        };
        Settings::load_from(&config_dir, &environment)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = cli
        .load_settings()
        .with_context(|| "failed to load Libris settings")?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }

            libris_telemetry::init(&settings.telemetry)?;
            tracing::info!(
                env = ?settings.environment,
                address = %settings.server.bind_address(),
                "libris serve"
            );
            libris_app::run(settings).await
        }
        Command::Config => {
            println!("{}", render_config(settings)?);
            Ok(())
        }
    }
}

fn render_config(mut settings: Settings) -> anyhow::Result<String> {
    settings.auth.shared_secret = REDACTED.to_string();
    serde_json::to_string_pretty(&settings).context("failed to render configuration")
}
