use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use crate::domain::error::{DomainError, FORM_FIELD, FormErrors};
use crate::infrastructure::session::SESSION_COOKIE;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::Viewer;
use crate::presentation::views::{LoginPage, render_page};

const DASHBOARD_PATH: &str = "/admin/dashboard";
const LOGIN_FAILED: &str = "Login failed, please try again";

#[derive(Debug, Default, Deserialize, Validate)]
pub(crate) struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub(crate) username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub(crate) password: String,
}

pub(crate) async fn login_form(viewer: Viewer) -> AppResult<Response> {
    if viewer.is_signed_in() {
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    }
    Ok(render_page(&LoginPage::new(String::new(), FormErrors::new()))?.into_response())
}

fn session_cookie(state: &AppState, value: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(state.site.cookie_secure)
        .max_age(cookie::time::Duration::seconds(state.sessions.ttl_seconds()))
        .build()
}

pub(crate) async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if let Err(errors) = form.validate() {
        let page = LoginPage::new(form.username, FormErrors::from(errors));
        return Ok(render_page(&page)?.into_response());
    }

    match state.accounts.login(&form.username, &form.password).await {
        Ok(result) => {
            let jar = jar.add(session_cookie(&state, result.session_token));
            Ok((jar, Redirect::to(DASHBOARD_PATH)).into_response())
        }
        Err(DomainError::Invalid(errors)) => {
            Ok(render_page(&LoginPage::new(form.username, errors))?.into_response())
        }
        Err(err) => {
            warn!(error = %err, "login failed");
            let errors = FormErrors::single(FORM_FIELD, err.banner(LOGIN_FAILED));
            Ok(render_page(&LoginPage::new(form.username, errors))?.into_response())
        }
    }
}

pub(crate) async fn logout(viewer: Viewer, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(claims) = &viewer.session {
        info!(admin_id = %claims.sub, "admin logged out");
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::LoginForm;
    use crate::domain::error::FormErrors;

    #[test]
    fn blank_credentials_report_both_fields() {
        let errors = LoginForm::default().validate().expect_err("must fail");
        let form = FormErrors::from(errors);
        assert_eq!(form.get("username"), "Username is required");
        assert_eq!(form.get("password"), "Password is required");
    }
}
