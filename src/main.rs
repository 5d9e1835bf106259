// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use anyhow::{Context, Result};
use clap::Parser;
use line_vas::app::{create_router, AppState, VERSION};
use line_vas::models::config::AppConfig;
use line_vas::services::credentials::AccessTokenSource;
use line_vas::services::ingress::WebhookIngress;
use line_vas::services::line::LineMessagingClient;
use line_vas::services::pipeline::QueryPipeline;
use line_vas::services::search::{api_endpoint, DiscoveryEngineClient};
use line_vas::services::signature::SignatureVerifier;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// LINE webhook that answers messages with Vertex AI Search summaries
#[derive(Parser, Debug)]
#[command(version = VERSION)]
struct Args {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();

    // Any missing setting stops us here, before the port is bound
    let config = AppConfig::from_env().context("Invalid configuration")?;

    let tokens = AccessTokenSource::discover(config.search.access_token.as_deref()).await?;
    let search_client = DiscoveryEngineClient::new(&config.search, tokens, config.http_timeout)?;
    let pipeline = QueryPipeline::new(Arc::new(search_client), &config.search)
        .with_related_documents_header(config.related_documents_header.clone());
    info!(
        serving_config = pipeline.serving_config(),
        endpoint = %api_endpoint(&config.search.location),
        "search backend configured"
    );

    let line_client = LineMessagingClient::new(&config.line, config.http_timeout)?;

    let state = AppState {
        verifier: SignatureVerifier::new(config.line.channel_secret.clone()),
        ingress: WebhookIngress::new(pipeline, Arc::new(line_client)),
    };

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", args.host, args.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("line-vas v{} listening on {}", VERSION, addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
