//! Server mode
//!
//! Configures and starts the HTTP server with all routes.

use actix_cors::Cors;
use actix_web::middleware::{Compress, Condition};
use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use tracing::{error, warn};

use crate::api::middleware::RequestIdMiddleware;
use crate::api::services::configure_routes;
use crate::config::{CorsConfig, StaticConfig};
use crate::runtime::lifetime;

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(cors_config: &CorsConfig) {
    if !cors_config.enabled {
        return;
    }

    if cors_config.allowed_origins.is_empty() {
        warn!("CORS enabled but allowed_origins is empty; no cross-origin requests will be allowed");
    }

    let is_any_origin = cors_config.allowed_origins.iter().any(|o| o == "*");
    if is_any_origin && cors_config.allow_credentials {
        error!("CORS allow_any_origin + allow_credentials is unsafe; credentials disabled");
    }
}

/// Build CORS middleware from configuration
pub fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    let is_any_origin = cors_config.allowed_origins.iter().any(|o| o == "*");

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_header(actix_web::http::header::CONTENT_TYPE)
        .allowed_header(actix_web::http::header::AUTHORIZATION)
        .allowed_header(actix_web::http::header::ACCEPT)
        .max_age(cors_config.max_age);

    if is_any_origin {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    if cors_config.allow_credentials && !is_any_origin {
        cors = cors.supports_credentials();
    }

    cors
}

/// Run the HTTP server until it stops or Ctrl+C is received
///
/// Logging must be initialized before calling this.
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(config)
        .await
        .inspect_err(|e| error!("Server startup failed: {:#}", e))?;

    let state = web::Data::from(startup.state);
    let db_for_shutdown = startup.storage.get_db().clone();

    let cors_config = config.cors.clone();
    validate_cors_config(&cors_config);

    let workers = if config.server.workers == 0 {
        num_cpus::get()
    } else {
        config.server.workers
    };
    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            // 未启用时不挂 CORS，浏览器同源策略生效
            .wrap(Condition::new(
                cors_config.enabled,
                build_cors_middleware(&cors_config),
            ))
            .wrap(Compress::default())
            .wrap(RequestIdMiddleware)
            .app_data(state.clone())
            .configure(configure_routes)
    })
    .workers(workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    warn!("Starting server at http://{} with {} workers", bind_address, workers);

    tokio::select! {
        res = server => {
            res.context("HTTP server failed")?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(db_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
