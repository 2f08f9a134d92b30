// Route exports
pub mod predict;

use actix_web::{error, http::StatusCode, web, HttpResponse};
use serde::Serialize;

pub use predict::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(predict::configure);
}

/// JSON error response for JSON payload errors
#[derive(Debug, Serialize)]
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
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
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

/// JSON extractor configuration with structured error bodies
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}
