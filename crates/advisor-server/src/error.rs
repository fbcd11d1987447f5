//! Handler errors and their HTTP responses

use crate::templates::TemplateError;
use advisor_market::MarketError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Chart endpoints answer 500 with `{error}`
    #[error(transparent)]
    Chart(#[from] MarketError),

    #[error(transparent)]
    Page(#[from] TemplateError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Chart(e) => {
                error!(error = %e, "Chart request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": e.to_string() })),
                )
                    .into_response()
            }
            Self::Page(e) => {
                error!(error = %e, "Page rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
