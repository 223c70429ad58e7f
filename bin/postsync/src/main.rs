//! # postsync Binary
//!
//! Builds the three components explicitly, seeds the store from upstream, and
//! serves the read API.

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use ps_api::{configure_routes, middleware, AppState};
use ps_config::Settings;
use ps_db_sqlite::SqlitePostStore;
use ps_source_http::HttpPostSource;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = ps_config::load_dotenv();
    let settings = Settings::from_env().context("failed to load settings")?;
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(settings.log_level.as_str()));
    if let Some(path) = dotenv {
        log::debug!("Loaded environment from {}", path.display());
    }

    // 1. Local store
    let store = SqlitePostStore::connect(&settings.database_url, settings.max_connections)
        .await
        .with_context(|| format!("failed to open {}", settings.database_url))?;

    // 2. Upstream source
    let source = HttpPostSource::new(&settings.upstream_base_url)?;

    // 3. Seed, then fetch one post as a smoke check
    let report = ps_core::startup(&source, &store, settings.sync_on_startup, settings.probe_id())
        .await
        .context("startup sequence failed")?;
    if let Some(count) = report.synchronized {
        log::info!("Synchronized {} posts from {}", count, source.base_url());
    }

    // 4. Serve
    let state = web::Data::new(AppState::new(Box::new(store)));
    let (host, port) = settings.bind_address();
    log::info!("postsync listening on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::cors_policy())
            .wrap(middleware::standard_middleware())
            .configure(configure_routes)
    })
    .bind((host, port))
    .with_context(|| format!("failed to bind {host}:{port}"))?
    .run()
    .await?;

    Ok(())
}
