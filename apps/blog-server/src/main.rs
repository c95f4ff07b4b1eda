//! # Inkwell Blog Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod views;

use config::AppConfig;
use inkwell_core::ports::{PasswordService, SessionService};
use inkwell_infra::{Argon2PasswordService, SignedSessionService};
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!("Starting Inkwell on {}:{}", config.host, config.port);

    // Build application state and services
    let state = AppState::new(config.database.as_ref()).await;
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
    let session_service: Arc<dyn SessionService> =
        Arc::new(SignedSessionService::new(config.session.clone()));

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(password_service.clone()))
            .app_data(web::Data::new(session_service.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,blog_server=debug,inkwell_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
