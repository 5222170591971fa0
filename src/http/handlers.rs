//! Route handlers.
//!
//! Handlers translate use case results into responses. Every failure leaves
//! as one of the fixed [`ErrorResponse`]s; the detail goes to the request
//! logger and, for unexpected failures, the error reporter.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::domain::{Image, Operation, UploadedImage};
use crate::gallery::{CreateImage, GalleryError};
use crate::http::request::RequestContext;
use crate::http::response::ErrorResponse;
use crate::http::server::AppState;
use crate::observability::{Field, ReportContext};

#[derive(Debug, Serialize)]
pub struct ImageList {
    #[serde(rename = "lgtmImages")]
    pub images: Vec<Image>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus { status_code: 200 })
}

pub async fn random_images(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<ImageList>, ErrorResponse> {
    let images = state
        .gallery
        .random_images()
        .await
        .map_err(|e| translate(&state, &ctx, e))?;
    Ok(Json(ImageList { images }))
}

pub async fn recently_created_images(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<ImageList>, ErrorResponse> {
    let images = state
        .gallery
        .recently_created_images()
        .await
        .map_err(|e| translate(&state, &ctx, e))?;
    Ok(Json(ImageList { images }))
}

pub async fn create_image(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Json<CreateImage>, JsonRejection>,
) -> Result<(StatusCode, Json<UploadedImage>), ErrorResponse> {
    let Json(input) = payload.map_err(|rejection| {
        ctx.logger.warn(
            "Invalid upload payload",
            &[Field::new("error", rejection.body_text())],
        );
        ErrorResponse::UnprocessableEntity
    })?;

    let uploaded = state
        .gallery
        .create_image(input)
        .await
        .map_err(|e| translate(&state, &ctx, e))?;
    Ok((StatusCode::ACCEPTED, Json(uploaded)))
}

/// Log `err` with the request logger and pick the client-facing response.
fn translate(state: &AppState, ctx: &RequestContext, err: GalleryError) -> ErrorResponse {
    match err {
        GalleryError::InsufficientImages { .. } => {
            ctx.logger.warn(&err.to_string(), &[]);
            ErrorResponse::NotFound
        }
        GalleryError::InvalidExtension(_) | GalleryError::InvalidImageData(_) => {
            ctx.logger.warn(&err.to_string(), &[]);
            ErrorResponse::UnprocessableEntity
        }
        GalleryError::InvalidBatch(ref e) => {
            ctx.logger.error(&e.to_string(), &[]);
            ErrorResponse::InternalServerError
        }
        GalleryError::Repository(ref e) => {
            ctx.logger.error(
                &e.to_string(),
                &[Field::new("operation", e.operation)],
            );
            // The object store repository reports its own failures.
            if e.operation != Operation::Upload {
                state
                    .reporter
                    .report(ReportContext::new(e.operation.as_str()), e);
            }
            ErrorResponse::InternalServerError
        }
    }
}
