mod config;
mod models;
mod routes;
mod services;

use actix_web::{middleware, web, App, HttpServer};
use config::Settings;
use routes::contact::AppState;
use services::SendGridClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Mailform contact service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Build the outbound HTTP transport; the dispatcher receives it as an
    // explicit dependency
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|e| {
            error!("Failed to create HTTP client: {}", e);
            panic!("HTTP client error: {}", e);
        });

    // Initialize SendGrid client
    let sendgrid = Arc::new(SendGridClient::new(
        settings.sendgrid.api_base,
        settings.sendgrid.api_key,
        settings.sendgrid.from_name,
        settings.sendgrid.from_email,
        settings.sendgrid.template_id,
        http_client,
    ));

    info!("SendGrid client initialized");

    // Build application state
    let app_state = AppState { sendgrid };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(
                web::FormConfig::default()
                    .error_handler(routes::contact::handle_form_payload_error),
            )
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
