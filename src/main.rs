use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use car_price_api::config::{LoggingSettings, Settings};
use car_price_api::core::{GatewayState, ModelGateway};
use car_price_api::routes::{self, AppState};
use car_price_api::services::ArtifactLoader;
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "json" => subscriber.json().init(),
        "pretty" => subscriber.pretty().init(),
        _ => subscriber.init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();

    // Logging comes up before config errors are reported
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging);

    info!("Starting Car Price API...");

    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    info!("Configuration loaded successfully");

    // Load model artifacts once; failure degrades to rule-based pricing
    let loader = ArtifactLoader::from_settings(&settings.model);
    info!("Loading model artifacts from {:?}", loader.paths());

    let state = tokio::task::spawn_blocking(move || loader.load_state())
        .await
        .unwrap_or_else(|e| {
            error!("Artifact loader aborted: {}", e);
            GatewayState::unavailable(format!("artifact loader aborted: {}", e))
        });

    let gateway = Arc::new(ModelGateway::new(state));

    info!("Model gateway initialized (status: {:?})", gateway.status());

    let app_state = AppState { gateway };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
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
