use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::infrastructure::session::SESSION_COOKIE;
use crate::presentation::handlers::contact::{ContactDto, ContactErrorDto, ContactSentDto};
use crate::presentation::handlers::media::{
    MediaUploadForm, UploadErrorDto, UploadErrorMessage, UploadedMediaDto,
};
use crate::presentation::http_handlers::HealthzResponse;

/// JSON endpoints only; the HTML pages are not described here.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http_handlers::health_handler,
        crate::presentation::handlers::contact::send_contact,
        crate::presentation::handlers::media::upload_media
    ),
    components(
        schemas(
            HealthzResponse,
            ContactDto,
            ContactSentDto,
            ContactErrorDto,
            MediaUploadForm,
            UploadedMediaDto,
            UploadErrorDto,
            UploadErrorMessage
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "contact", description = "Contact form relay"),
        (name = "media", description = "Rich-text editor uploads")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        );
        openapi.components = Some(components);
    }
}
