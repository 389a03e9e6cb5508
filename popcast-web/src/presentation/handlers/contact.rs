use axum::{Json, extract::State, http::StatusCode, response::Html};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::contact_service::ContactError;
use crate::domain::contact::ContactMessage;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::Viewer;
use crate::presentation::views::{ContactPage, Layout, render_page};

const SENT: &str = "تم إرسال الرسالة بنجاح";
const SEND_FAILED: &str = "حدث خطأ أثناء إرسال الرسالة";

pub(crate) async fn contact_page(
    State(state): State<AppState>,
    viewer: Viewer,
) -> AppResult<Html<String>> {
    let view = ContactPage {
        layout: Layout::public("تواصل معنا", "contact")
            .with_canonical(state.canonical("/contact"))
            .signed_in(viewer.is_signed_in()),
    };
    Ok(render_page(&view)?)
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub(crate) struct ContactDto {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) subject: String,
    #[serde(default)]
    pub(crate) message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ContactSentDto {
    pub(crate) message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ContactErrorDto {
    pub(crate) error: String,
}

type ContactReply = (StatusCode, Json<ContactErrorDto>);

fn reply(status: StatusCode, error: impl Into<String>) -> ContactReply {
    (
        status,
        Json(ContactErrorDto {
            error: error.into(),
        }),
    )
}

#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = ContactDto,
    responses(
        (status = 200, description = "Message relayed", body = ContactSentDto),
        (status = 400, description = "Missing fields or invalid email", body = ContactErrorDto),
        (status = 500, description = "Mail delivery failed", body = ContactErrorDto)
    )
)]
pub(crate) async fn send_contact(
    State(state): State<AppState>,
    Json(dto): Json<ContactDto>,
) -> Result<Json<ContactSentDto>, ContactReply> {
    let message = ContactMessage {
        name: dto.name,
        email: dto.email,
        subject: dto.subject,
        message: dto.message,
    };

    match state.contact.send(message, Utc::now()).await {
        Ok(()) => Ok(Json(ContactSentDto {
            message: SENT.to_string(),
        })),
        Err(ContactError::Invalid(errors)) => {
            Err(reply(StatusCode::BAD_REQUEST, errors.first_message()))
        }
        Err(ContactError::Render(_) | ContactError::Delivery(_)) => {
            Err(reply(StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED))
        }
    }
}
