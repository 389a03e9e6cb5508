use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::error::DomainError;
use crate::presentation::AppState;
use crate::presentation::handlers::multipart::MultipartForm;
use crate::presentation::middleware::auth::Viewer;

const UPLOAD_FAILED: &str = "Upload failed";

/// Multipart body posted by the editor; only used to document the endpoint.
#[derive(ToSchema)]
#[allow(dead_code)]
pub(crate) struct MediaUploadForm {
    #[schema(value_type = String, format = Binary)]
    media: Vec<u8>,
}

/// Response shape the editor's upload adapter expects.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UploadedMediaDto {
    pub(crate) url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UploadErrorDto {
    pub(crate) error: UploadErrorMessage,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UploadErrorMessage {
    pub(crate) message: String,
}

type UploadError = (StatusCode, Json<UploadErrorDto>);

fn upload_error(status: StatusCode, message: impl Into<String>) -> UploadError {
    (
        status,
        Json(UploadErrorDto {
            error: UploadErrorMessage {
                message: message.into(),
            },
        }),
    )
}

#[utoipa::path(
    post,
    path = "/admin/media",
    tag = "media",
    request_body(content = MediaUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Stored", body = UploadedMediaDto),
        (status = 400, description = "Missing or unsupported file", body = UploadErrorDto),
        (status = 401, description = "No admin session", body = UploadErrorDto),
        (status = 403, description = "Backend refused the admin's privileges", body = UploadErrorDto),
        (status = 502, description = "Backend rejected the upload", body = UploadErrorDto)
    ),
    security(("session_cookie" = []))
)]
pub(crate) async fn upload_media(
    State(state): State<AppState>,
    viewer: Viewer,
    multipart: Multipart,
) -> Result<Json<UploadedMediaDto>, UploadError> {
    let Some(session) = viewer.session else {
        return Err(upload_error(StatusCode::UNAUTHORIZED, "Not signed in"));
    };

    let mut form = MultipartForm::read(multipart)
        .await
        .map_err(|err| upload_error(StatusCode::BAD_REQUEST, err.to_string()))?;
    let Some(file) = form.take_file("media") else {
        return Err(upload_error(StatusCode::BAD_REQUEST, "No file was sent"));
    };

    match state
        .articles
        .upload_media(&session.access_token, file)
        .await
    {
        Ok(media) => Ok(Json(UploadedMediaDto { url: media.url })),
        Err(DomainError::Invalid(errors)) => Err(upload_error(
            StatusCode::BAD_REQUEST,
            errors.first_message(),
        )),
        Err(DomainError::Unauthorized) => {
            Err(upload_error(StatusCode::UNAUTHORIZED, "Session expired"))
        }
        Err(err @ DomainError::Rejected { status: 403, .. }) => {
            Err(upload_error(StatusCode::FORBIDDEN, err.banner(UPLOAD_FAILED)))
        }
        Err(err) => {
            warn!(error = %err, "editor media upload failed");
            Err(upload_error(StatusCode::BAD_GATEWAY, err.banner(UPLOAD_FAILED)))
        }
    }
}
