//! Example addon serving three fixed catalogs.
//!
//! ```text
//! example-addon --port 3000
//! ```
//!
//! then open `stremio://localhost:3000/manifest.json`.

use std::path::PathBuf;

use anyhow::Context;
use axum::Json;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stremio_addon::{
    Addon,
    config::ConfigLoader,
    model::{CatalogResponse, Manifest, Meta, movie_catalog, series_catalog},
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "example-addon")]
#[command(about = "Example Stremio addon with fixed movie and series catalogs")]
struct Cli {
    /// Port to listen on (overrides config and `PORT`)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind (overrides config and `HOST`)
    #[arg(long)]
    host: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long, env = "STREMIO_ADDON_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut loader = ConfigLoader::new();
    if let Some(path) = cli.config {
        loader = loader.with_config_path(path);
    }
    let mut config = loader.load().context("failed to load configuration")?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }

    let manifest = Manifest::builder()
        .with_id("org.stremio.example")
        .with_name("Example Addon")
        .with_description("An example Stremio addon")
        .with_version("1.0.0")
        .build();

    let mut addon =
        Addon::new(manifest).with_cache_max_age(config.http.cache_max_age);
    addon
        .register_movie_catalog("Top Movies", top_movies)?
        .register_movie_catalog("Recommended Movies", recommended_movies)?
        .register_series_catalog("Top Series", top_series)?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        "starting addon server"
    );

    addon
        .serve_on(&config.server.host, config.server.port)
        .await
        .context("addon server stopped")?;

    Ok(())
}

async fn top_movies() -> Json<CatalogResponse> {
    Json(movie_catalog([
        Meta::movie("The Dark Knight", "tt0468569"),
        Meta::movie("Inception", "tt1375666"),
    ]))
}

async fn recommended_movies() -> Json<CatalogResponse> {
    Json(movie_catalog([
        Meta::movie("The Shawshank Redemption", "tt0111161"),
        Meta::movie("The Godfather", "tt0068646"),
        Meta::movie("The Dark Knight", "tt0468569"),
    ]))
}

async fn top_series() -> Json<CatalogResponse> {
    Json(series_catalog([
        Meta::series("Game of Thrones", "tt0944947"),
        Meta::series("The Walking Dead", "tt1520211"),
    ]))
}
