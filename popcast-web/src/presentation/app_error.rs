use axum::{
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::Cookie;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::domain::error::{DomainError, FormErrors};
use crate::infrastructure::session::SESSION_COOKIE;
use crate::presentation::views::{ErrorPage, NotFoundPage, render_page};

pub(crate) const LOGIN_PATH: &str = "/admin/login";

const GENERIC_FAILURE: &str = "حدث خطأ غير متوقع، يرجى المحاولة لاحقاً";
const BACKEND_UNAVAILABLE: &str = "تعذر الاتصال بالخادم، يرجى المحاولة لاحقاً";

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("template error: {0}")]
    Render(#[from] askama::Error),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound | AppError::Domain(DomainError::NotFound) => {
                return not_found_response();
            }
            AppError::Unauthorized | AppError::Domain(DomainError::Unauthorized) => {
                return login_redirect();
            }
            AppError::Domain(DomainError::Invalid(errors)) => {
                (StatusCode::BAD_REQUEST, first_or_generic(&errors))
            }
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                first_or_generic(&FormErrors::from(errors)),
            ),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Domain(err @ DomainError::Rejected { status, .. }) => {
                let code = match status {
                    403 => StatusCode::FORBIDDEN,
                    500.. => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::BAD_REQUEST,
                };
                (code, err.banner(GENERIC_FAILURE))
            }
            AppError::Domain(DomainError::Unavailable(reason)) => {
                error!(%reason, "backend unavailable");
                (StatusCode::BAD_GATEWAY, BACKEND_UNAVAILABLE.to_string())
            }
            AppError::Domain(DomainError::Unexpected(reason)) => {
                error!(%reason, "unexpected domain error");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
            AppError::Render(err) => {
                error!(error = %err, "template rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
            AppError::Internal(err) => {
                error!(error = %err, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
        };

        error_page_response(status, message)
    }
}

/// Sends the visitor to the login page and drops the stale session cookie.
fn login_redirect() -> Response {
    let mut removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    removal.make_removal();
    (
        [(header::SET_COOKIE, removal.to_string())],
        Redirect::to(LOGIN_PATH),
    )
        .into_response()
}

fn first_or_generic(errors: &FormErrors) -> String {
    if errors.is_empty() {
        GENERIC_FAILURE.to_string()
    } else {
        errors.first_message().to_string()
    }
}

pub(crate) fn not_found_response() -> Response {
    match render_page(&NotFoundPage::new()) {
        Ok(html) => (StatusCode::NOT_FOUND, html).into_response(),
        Err(err) => {
            error!(error = %err, "404 page rendering failed");
            (StatusCode::NOT_FOUND, "404").into_response()
        }
    }
}

fn error_page_response(status: StatusCode, message: String) -> Response {
    match render_page(&ErrorPage::new(status.as_u16(), message.clone())) {
        Ok(html) => (status, html).into_response(),
        Err(err) => {
            error!(error = %err, "error page rendering failed");
            (status, Html(message)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::AppError;
    use crate::domain::error::DomainError;

    #[test]
    fn unauthorized_redirects_to_login() {
        let response = AppError::Domain(DomainError::Unauthorized).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get("location")
                .and_then(|value| value.to_str().ok()),
            Some("/admin/login")
        );
        let cookie = response
            .headers()
            .get("set-cookie")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        assert!(cookie.starts_with("popcast_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn missing_content_renders_404() {
        let response = AppError::Domain(DomainError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn backend_client_error_is_bad_request() {
        let response = AppError::Domain(DomainError::Rejected {
            status: 409,
            message: Some("exists".to_string()),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::Domain(DomainError::Rejected {
            status: 403,
            message: Some("Super admin access required".to_string()),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().get("location").is_none());

        let response = AppError::Domain(DomainError::Unavailable("down".to_string()))
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
