//! Custom error types for the accounts service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::{forms::FormErrors, middleware::LOGIN_PATH};

/// Custom error type for the accounts service
#[derive(Error, Debug)]
pub enum AppError {
    /// No valid session; the caller is sent to the login page
    #[error("Login required")]
    LoginRequired,

    /// Login with a wrong username or password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Form submission failed validation; nothing was persisted
    #[error("Validation failed")]
    Validation(FormErrors),

    /// Conflict with existing state (e.g. username already taken)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::LoginRequired => Redirect::to(LOGIN_PATH).into_response(),
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid username or password" })),
            )
                .into_response(),
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, Json(json!({ "error": msg }))).into_response()
            }
            AppError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response(),
        }
    }
}
