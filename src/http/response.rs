//! Client-facing error responses.
//!
//! # Responsibilities
//! - Map failures to a small set of fixed responses
//! - Keep internal detail (SQL, storage, panic messages) out of bodies
//!
//! # Design Decisions
//! - Body shape is always `{"code": <status>, "message": <reason>}`
//! - Messages are static; the detail goes to logs and error reports only

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// The fixed error responses this service emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorResponse {
    NotFound,
    UnprocessableEntity,
    InternalServerError,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: &'static str,
}

impl ErrorResponse {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorResponse::NotFound => StatusCode::NOT_FOUND,
            ErrorResponse::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorResponse::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorResponse::NotFound => "Not Found",
            ErrorResponse::UnprocessableEntity => "Unprocessable Entity",
            ErrorResponse::InternalServerError => "Internal Server Error",
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.status().as_u16(),
            message: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
