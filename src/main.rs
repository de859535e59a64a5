//! reviewd binary: load config, wire the stores, serve the API.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use reviewd::config::Config;
use reviewd::services::blobs::ArtifactStore;
use reviewd::services::blobs::signer::{StaticKeyCredentials, UrlSigner};
use reviewd::services::cache::LinkCache;
use reviewd::services::records::RecordStore;
use reviewd::workflow::{ReviewWorkflow, WorkflowConfig};

#[derive(Parser)]
#[command(
    name = "reviewd",
    version,
    about = "Invoice review workflow service",
    long_about = "Serves the invoice review API: pending listings with signed \
                  artifact links, batch approvals, and cache administration."
)]
struct Cli {
    /// Path to reviewd.toml (defaults to ./reviewd.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen address from config
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(listen) = cli.listen {
        config.listen = listen;
    }

    let records = RecordStore::file(config.records_db_path())
        .context("Failed to open record store")?;
    let artifacts =
        ArtifactStore::file(config.bucket_dir()).context("Failed to open artifact store")?;
    let cache = LinkCache::memory();

    let secret = match &config.signing_key {
        Some(hex_key) => hex::decode(hex_key).context("Invalid signing key")?,
        None => {
            // Ephemeral key: links stop verifying after a restart
            info!("No signing key configured, generating an ephemeral one");
            uuid::Uuid::new_v4().as_bytes().to_vec()
        },
    };
    let signer = Arc::new(UrlSigner::new(
        config.link_host.clone(),
        Arc::new(StaticKeyCredentials::new("local", secret)),
    ));

    let workflow_config = WorkflowConfig {
        link_validity: config.link_validity(),
        ..WorkflowConfig::default()
    };
    let workflow = ReviewWorkflow::new(records, artifacts, cache, signer, workflow_config);

    let router = reviewd::http::router(workflow);

    let listener = tokio::net::TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen))?;
    info!(listen = %config.listen, bucket = %config.bucket_dir().display(), "reviewd listening");

    axum::serve(listener, router)
        .await
        .context("Server error")?;

    Ok(())
}
