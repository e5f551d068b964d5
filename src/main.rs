mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use crate::config::Settings;
use crate::core::MentorCatalog;
use crate::routes::AppState;
use crate::services::{GeminiClient, SessionStore, SubmissionClient};
use std::sync::Arc;
use tracing::info;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting STEP matching and booking service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Load the mentor catalog (embedded seed unless a file overrides it)
    let catalog = match &settings.catalog.path {
        Some(path) => match MentorCatalog::from_toml_file(path) {
            Ok(catalog) => {
                info!("Mentor catalog loaded from {}", path);
                catalog
            }
            Err(e) => {
                tracing::error!("Failed to load catalog from {}: {}", path, e);
                panic!("Catalog error: {}", e);
            }
        },
        None => MentorCatalog::builtin(),
    };

    info!(
        "Catalog ready: {} mentors, {} industries, {} cities",
        catalog.len(),
        catalog.industries().len().saturating_sub(1),
        catalog.cities().len().saturating_sub(1)
    );

    // Initialize the external collaborators
    let recommender = Arc::new(GeminiClient::new(
        settings.gemini.endpoint,
        settings.gemini.api_key,
        settings.gemini.model,
    ));

    info!("Gemini match client initialized");

    let submissions = Arc::new(SubmissionClient::new(settings.webhook.url));

    info!("Submission webhook client initialized");

    // Initialize the session store
    let session_capacity = settings.session.capacity.unwrap_or(10_000);
    let session_ttl = settings.session.ttl_secs.unwrap_or(1800);
    let sessions = Arc::new(SessionStore::new(session_capacity, session_ttl));

    info!(
        "Session store initialized (capacity: {}, TTL: {}s)",
        session_capacity, session_ttl
    );

    // Build application state
    let app_state = AppState {
        catalog: Arc::new(catalog),
        recommender,
        submissions,
        sessions,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
