//! REST API for knnapi.
//!
//! Provides a stateless HTTP server with a JSON endpoint for KNN
//! classification. The reference dataset is loaded from the configured
//! [`DatasetSource`] on every request, so each request classifies against its
//! own snapshot and builds its own response.
//!
//! ## Endpoints
//!
//! - `POST /api/knn` - Classify a point for a sequence of k values
//! - `OPTIONS /api/knn` - CORS preflight
//!
//! ## Usage
//!
//! ```rust,no_run
//! use actix_web::{web, App, HttpServer};
//! use knnapi::DatasetSource;
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let source = web::Data::new(DatasetSource::from("data/sample.csv"));
//!     HttpServer::new(move || {
//!         App::new()
//!             .app_data(source.clone())
//!             .wrap(knnapi::server::cors_headers("*"))
//!             .configure(knnapi::server::config)
//!     })
//!     .bind("0.0.0.0:8080")?
//!     .run()
//!     .await
//! }
//! ```

use actix_web::http::{header, Method};
use actix_web::middleware::DefaultHeaders;
use actix_web::{web, HttpResponse, Responder};
use crate::{Classification, Classifier, DatasetSource, Point, Record, Verdict};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Methods announced to browsers in CORS responses.
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, HEAD, OPTIONS";

/// Request headers announced to browsers in CORS responses.
pub const ALLOWED_HEADERS: &str = "X-Requested-With, Content-Type, Authorization";

// --- Request structs ---

#[derive(Deserialize)]
struct KnnRequest {
    x: f64,
    y: f64,
    k: Vec<u8>,
}

// --- Response structs ---

/// Body of a successful `POST /api/knn`.
#[derive(Debug, Serialize)]
pub struct KnnResponse {
    /// Dataset as ranked by the first k.
    pub data: Vec<Record>,
    pub verdicts: Vec<Verdict>,
    /// Majority label of each classified k.
    pub labels: Vec<String>,
    pub point: Point,
}

impl From<Classification> for KnnResponse {
    fn from(result: Classification) -> Self {
        let labels = result.labels();
        KnnResponse {
            data: result.ranked,
            verdicts: result.verdicts,
            labels,
            point: result.point,
        }
    }
}

/// Middleware adding the CORS headers to every response.
pub fn cors_headers(allow_origin: &str) -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin.to_string()))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS))
}

// --- Handlers ---

async fn knn_handler(
    source: web::Data<DatasetSource>,
    body: web::Json<KnnRequest>,
) -> impl Responder {
    let records = match source.load().await {
        Ok(records) => records,
        Err(e) => {
            warn!(source = %source.get_ref(), error = %e, "dataset load failed");
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({"error": e.to_string()}));
        }
    };

    let ks: Vec<usize> = body.k.iter().map(|&k| usize::from(k)).collect();
    let query = Point::unlabeled(body.x, body.y);

    let mut classifier = Classifier::new(records);
    let result = match classifier.classify_sequence(&ks, query) {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "classification aborted");
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({"error": e.to_string()}));
        }
    };

    info!(point = %result.point, ks = ?ks, "dominant label for query");

    HttpResponse::Ok().json(KnnResponse::from(result))
}

async fn preflight_handler() -> impl Responder {
    HttpResponse::NoContent().finish()
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/knn")
            .route(web::post().to(knn_handler))
            .route(web::method(Method::OPTIONS).to(preflight_handler)),
    );
}
