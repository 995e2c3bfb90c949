use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use ledgerlink_graph::GraphError;
use ledgerlink_quickbooks::QuickBooksError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not authenticated with Microsoft")]
    GraphAuthMissing,
    #[error("not authenticated with QuickBooks")]
    QuickBooksAuthMissing,
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    QuickBooks(#[from] QuickBooksError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::GraphAuthMissing => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "error": "Not authenticated with Microsoft",
                    "message": "Please login with your Microsoft account first",
                    "login_url": "/graph/login/",
                }),
            ),
            ApiError::QuickBooksAuthMissing => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "error": "Not authenticated with QuickBooks",
                    "login_url": "/quickbooks/login/",
                }),
            ),
            ApiError::Graph(err) if err.is_unauthorized() => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "error": "Token expired",
                    "message": "Your session has expired. Please login again.",
                    "login_url": "/graph/login/",
                }),
            ),
            ApiError::QuickBooks(err) if err.is_unauthorized() => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "error": "Token expired",
                    "login_url": "/quickbooks/login/",
                }),
            ),
            ApiError::Graph(err) => (StatusCode::BAD_GATEWAY, json!({ "error": err.to_string() })),
            ApiError::QuickBooks(err) => {
                (StatusCode::BAD_GATEWAY, json!({ "error": err.to_string() }))
            }
        };
        (status, Json(body)).into_response()
    }
}
