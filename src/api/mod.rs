//! HTTP surface
//!
//! | Route                 | Handler                  |
//! |-----------------------|--------------------------|
//! | `GET /`               | [`index::index`]         |
//! | `POST /predict`       | [`predict::predict`]     |
//! | `POST /api/advisory`  | [`advisory::advisory`]   |
//! | `GET /api/valid-inputs` | [`inputs::valid_inputs`] |
//! | `GET /api/health`     | [`inputs::health`]       |
//! | `GET /static/*`       | static files             |

pub mod advisory;
pub mod error;
pub mod index;
pub mod inputs;
pub mod predict;

use std::any::Any;
use std::path::Path;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub use error::{ApiError, ErrorBody};

use crate::state::AppState;

/// Build the full router
pub fn build_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index::index))
        .route("/predict", post(predict::predict))
        .route("/api/advisory", post(advisory::advisory))
        .route("/api/valid-inputs", get(inputs::valid_inputs))
        .route("/api/health", get(inputs::health))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(
                    CorsLayer::new()
                        .allow_origin(AnyOrigin)
                        .allow_methods(AnyOrigin)
                        .allow_headers(AnyOrigin),
                ),
        )
        .with_state(state)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(%detail, "handler panicked");
    ApiError::internal(format!("Server error: {detail}")).into_response()
}
