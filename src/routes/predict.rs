use actix_web::{http::StatusCode, web, HttpResponse, Responder, ResponseError};
use validator::Validate;
use crate::models::{VehicleFeatures, PredictResponse, HealthResponse, ServiceInfoResponse, ErrorResponse, GatewayStatus};
use crate::core::{ModelGateway, PredictionError};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ModelGateway>,
}

/// Configure all prediction-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(service_info))
        .route("/health", web::get().to(health_check))
        .route("/predict", web::post().to(predict_price));
}

impl ResponseError for PredictionError {
    fn status_code(&self) -> StatusCode {
        match self {
            PredictionError::UnknownCategory { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            PredictionError::Computation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error, message) = match self {
            PredictionError::UnknownCategory { .. } => ("unknown_category", self.to_string()),
            PredictionError::Computation(cause) => ("prediction_error", format!("Prediction error: {}", cause)),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error.to_string(),
            message,
            status_code: self.status_code().as_u16(),
        })
    }
}

/// Service banner
async fn service_info() -> impl Responder {
    let endpoints = BTreeMap::from([
        ("/predict".to_string(), "POST - Predict car price".to_string()),
        ("/health".to_string(), "GET - Health check".to_string()),
    ]);

    HttpResponse::Ok().json(ServiceInfoResponse {
        message: "Car Price Predictor API".to_string(),
        status: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

/// Health check endpoint
///
/// Reports which pricing path requests will take.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (method, model_loaded) = match state.gateway.status() {
        GatewayStatus::Ready => ("ml_model", true),
        GatewayStatus::Unavailable => ("rule_based_prediction", false),
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        method: method.to_string(),
        model_loaded,
        model_unavailable_reason: state.gateway.unavailable_reason().map(str::to_string),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Predict price endpoint
///
/// POST /predict
///
/// Request body: all vehicle attributes, e.g.
/// ```json
/// {
///   "symboling": 3, "fueltype": "gas", "aspiration": "std", "doornumber": 2,
///   "carbody": "convertible", "drivewheel": "rwd", "enginelocation": "front",
///   "wheelbase": 88.6, "carlength": 168.8, "carwidth": 64.1, "carheight": 48.8,
///   "curbweight": 2548, "enginetype": "dohc", "cylindernumber": 4, "enginesize": 130,
///   "fuelsystem": "mpfi", "boreratio": 3.47, "stroke": 2.68, "compressionratio": 9.0,
///   "horsepower": 111, "peakrpm": 5000, "citympg": 21, "highwaympg": 27,
///   "company": "alfa-romero"
/// }
/// ```
async fn predict_price(
    state: web::Data<AppState>,
    req: web::Json<VehicleFeatures>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for predict request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let prediction_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("predict", %prediction_id, company = %req.company);
    let _guard = span.enter();

    match state.gateway.predict(&req) {
        Ok(result) => {
            tracing::info!(
                "Predicted price {:.2} via {:?}",
                result.price(),
                result.method()
            );
            HttpResponse::Ok().json(PredictResponse::from(result))
        }
        Err(e) => {
            match &e {
                PredictionError::UnknownCategory { .. } => tracing::warn!("Rejected prediction: {}", e),
                PredictionError::Computation(_) => tracing::error!("Prediction failed: {}", e),
            }
            e.error_response()
        }
    }
}
