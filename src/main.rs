//! Logistics client command line.
//!
//! ```text
//! logistics-client [--config FILE] serve
//! logistics-client [--config FILE] call GET /orders --query status=confirmed
//! logistics-client [--config FILE] login --email admin@example.com --password 123456
//! logistics-client [--config FILE] logout
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tokio::net::TcpListener;

use logistics_client::config::loader::{from_env, load_config};
use logistics_client::config::schema::ClientConfig;
use logistics_client::http::{MockServer, OutboundRequest, RequestClient};
use logistics_client::lifecycle::Shutdown;
use logistics_client::mock::MockBackend;
use logistics_client::model::Credentials;
use logistics_client::observability::{logging, metrics};
use logistics_client::routing::matcher::parse_method;
use logistics_client::routing::UrlNormalizer;
use logistics_client::storage::{FileStore, KeyValueStore, MemoryStore};

#[derive(Parser)]
#[command(name = "logistics-client")]
#[command(about = "Logistics workflow REST client with synthetic fallback", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults plus LOGISTICS_* variables when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the developer mock server
    Serve,
    /// Send one call and print the envelope
    Call {
        method: String,
        path: String,
        /// Query parameter as key=value (repeatable)
        #[arg(short, long, value_parser = parse_key_value)]
        query: Vec<(String, String)>,
        /// JSON request body
        #[arg(short, long)]
        body: Option<String>,
    },
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => from_env()?,
    };

    logging::init(&config.observability.log_level)?;

    tracing::info!(
        mode = ?config.environment.mode,
        use_mock = config.environment.use_mock,
        api_base_url = config.environment.api_base_url.as_deref().unwrap_or("-"),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    match cli.command {
        Commands::Serve => serve(&config).await?,
        Commands::Call {
            method,
            path,
            query,
            body,
        } => {
            let client = RequestClient::new(&config, open_store(&config)?)?;
            let method = parse_method(&method).ok_or_else(|| format!("invalid HTTP method: {method}"))?;
            let mut request = OutboundRequest::new(method, path);
            for (key, value) in query {
                request = request.with_param(key, value);
            }
            if let Some(body) = body {
                request = request.with_body(serde_json::from_str::<Value>(&body)?);
            }
            let envelope = client.send(request).await?.into_envelope();
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        Commands::Login { email, password } => {
            let client = RequestClient::new(&config, open_store(&config)?)?;
            let envelope = client.auth().login(&Credentials { email, password }).await?;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        Commands::Logout => {
            let client = RequestClient::new(&config, open_store(&config)?)?;
            client.auth().logout()?;
        }
    }

    Ok(())
}

fn open_store(config: &ClientConfig) -> Result<Arc<dyn KeyValueStore>, Box<dyn std::error::Error>> {
    let store: Arc<dyn KeyValueStore> = match &config.storage.path {
        Some(path) => Arc::new(FileStore::open(path)?),
        None => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}

async fn serve(config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env = &config.environment;
    let backend = Arc::new(MockBackend::seeded(UrlNormalizer::new(
        env.api_root.clone(),
        env.deploy_prefix.clone(),
    )));

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    MockServer::new(backend, &config.server).run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
