use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use care_match::config::{LoggingSettings, Settings};
use care_match::core::Matcher;
use care_match::routes::{self, handle_json_payload_error, matches::AppState};
use care_match::services::MatchCache;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// LOG_LEVEL / LOG_FORMAT override the configured values, RUST_LOG overrides both
fn init_logging(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Logging is configured from the settings, so a load failure is reported on stderr
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);

    info!("Starting Care Match compatibility service...");

    // Initialize matcher with configured weights
    let weights = settings.scoring_weights();
    let matcher = Matcher::new(weights).map_err(|e| {
        error!("Invalid scoring weights: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Matcher initialized with weights: {:?}", weights);

    let cache = Arc::new(MatchCache::new(
        settings.matching.cache_size,
        settings.matching.cache_ttl_secs,
    ));

    info!(
        "Result cache initialized ({} entries, TTL: {}s)",
        settings.matching.cache_size, settings.matching.cache_ttl_secs
    );

    let app_state = AppState {
        matcher,
        cache,
        matching: settings.matching.clone(),
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
