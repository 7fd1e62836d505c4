use std::net::SocketAddr;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use crate::routes;
use crate::state::{Repositories, ServerState};

/// Allowed origins come from config; credentials are allowed so the admin cookie crosses origins.
pub fn build_cors(cfg: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .cors
        .allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Router over the given stores; used by `run` and by integration tests.
pub fn build_app(repos: Repositories, cfg: &AppConfig) -> Router {
    let state = ServerState::new(repos, cfg);
    routes::build_router(state, build_cors(cfg))
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Connect and migrate the database, then serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!("migrations applied");

    let app = build_app(Repositories::seaorm(db), &cfg);

    let addr = bind_addr(&cfg)?;
    info!(%addr, origins = ?cfg.cors.allowed_origins, "starting cloud kitchen api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}
