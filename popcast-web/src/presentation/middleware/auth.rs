use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use tracing::debug;

use crate::infrastructure::session::{SESSION_COOKIE, SessionClaims, SessionService};
use crate::presentation::AppState;
use crate::presentation::app_error::AppError;

/// Verified session of the signed-in admin, set by [`require_session`].
#[derive(Debug, Clone)]
pub(crate) struct AdminSession {
    pub(crate) claims: SessionClaims,
}

impl AdminSession {
    /// Backend bearer token.
    pub(crate) fn token(&self) -> &str {
        &self.claims.access_token
    }

    pub(crate) fn username(&self) -> &str {
        &self.claims.username
    }

    pub(crate) fn admin_id(&self) -> &str {
        &self.claims.sub
    }
}

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminSession>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Whoever is looking at a public page; `None` for anonymous visitors.
#[derive(Debug, Clone, Default)]
pub(crate) struct Viewer {
    pub(crate) session: Option<SessionClaims>,
}

impl Viewer {
    /// Signed in with a backend token that has not expired yet.
    pub(crate) fn is_signed_in(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|claims| claims.has_live_token(Utc::now()))
    }

    /// Backend token to read unpublished content with, only for valid admin sessions.
    pub(crate) fn admin_token(&self) -> Option<&str> {
        self.session
            .as_ref()
            .filter(|claims| claims.is_admin(Utc::now()))
            .map(|claims| claims.access_token.as_str())
    }
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Self {
            session: session_from_jar(&jar, &state.sessions),
        })
    }
}

fn session_from_jar(jar: &CookieJar, sessions: &SessionService) -> Option<SessionClaims> {
    let cookie = jar.get(SESSION_COOKIE)?;
    match sessions.verify(cookie.value()) {
        Ok(claims) => Some(claims),
        Err(err) => {
            debug!(error = %err, "ignoring invalid session cookie");
            None
        }
    }
}

/// Rejects requests without a valid session cookie or whose backend token has
/// expired; they end up on the login page with the cookie cleared.
pub(crate) async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = session_from_jar(&jar, &state.sessions)
        .filter(|claims| claims.has_live_token(Utc::now()))
        .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(AdminSession { claims });
    Ok(next.run(request).await)
}
