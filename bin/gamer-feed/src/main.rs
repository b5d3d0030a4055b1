//! # Gamer Feed Binary
//!
//! The entry point that assembles the application for the configured mode.

use std::sync::Arc;

use actix_files::Files;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use gf_api::handlers::AppState;
use gf_api::middleware::{cors_policy, standard_middleware};
use gf_config::{FeedConfig, LogConfig, LogFormat};
use gf_core::{Backend, FeedService, Mode, SessionIdentity, TracingNotifier};
use gf_storage_local::LocalBlobStore;
use gf_store_demo::{DemoBlobStore, DemoPostStore};
use gf_store_document::{DocumentPostStore, JsonDocumentStore};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = FeedConfig::load()?;
    init_tracing(&config.log);

    // 1. Pick the backend once; it stays fixed for the process lifetime
    let backend = build_backend(&config).await?;

    // 2. The gateway supplies identity per request, so the base service is anonymous
    let feed = FeedService::new(
        backend,
        Arc::new(SessionIdentity::anonymous()),
        Arc::new(TracingNotifier),
    );
    let state = web::Data::new(AppState::new(feed));

    let (host, port) = config.bind_addr();
    tracing::info!(mode = %config.mode, "🚀 Gamer Feed starting on http://{host}:{port}");

    let mode = config.mode;
    let live = config.live.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors_policy())
            .wrap(standard_middleware())
            .configure(|cfg| {
                // Uploaded media is only on disk in live mode
                if mode == Mode::Live {
                    cfg.service(Files::new(&live.media_url_prefix, live.media_dir.clone()));
                }
            })
            .configure(gf_api::configure_routes)
    })
    .bind((host, port))?
    .run()
    .await?;

    Ok(())
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    match log.format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.init(),
    }
}

async fn build_backend(config: &FeedConfig) -> anyhow::Result<Backend> {
    let backend = match config.mode {
        Mode::Demo => Backend::new(
            Mode::Demo,
            Arc::new(DemoPostStore::seeded()),
            Arc::new(DemoBlobStore::new()),
        ),
        Mode::Live => {
            let docs = JsonDocumentStore::open(config.live.data_dir.clone())
                .await
                .with_context(|| {
                    format!("opening document store at {}", config.live.data_dir.display())
                })?;
            let blobs = LocalBlobStore::new(
                config.live.media_dir.clone(),
                config.live.media_url_prefix.clone(),
            );
            Backend::new(Mode::Live, Arc::new(DocumentPostStore::new(docs)), Arc::new(blobs))
        }
    };
    Ok(backend)
}
