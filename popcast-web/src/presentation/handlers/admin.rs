use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::warn;

use crate::domain::account::{NewAdmin, PasswordChange};
use crate::domain::error::{DomainError, FORM_FIELD, FormErrors};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::middleware::auth::AdminSession;
use crate::presentation::views::{
    DashboardPage, Layout, ManageAdminsPage, admin_rows, render_page,
};

const PASSWORD_CHANGED: &str = "Password changed successfully!";
const PASSWORD_CHANGE_FAILED: &str = "Failed to change password";
const ADMIN_ADDED: &str = "Admin added successfully!";
const ADMINS_UNAVAILABLE: &str = "Failed to load admin users";

pub(crate) async fn admin_root(_session: AdminSession) -> Redirect {
    Redirect::to("/admin/dashboard")
}

fn dashboard_page(
    session: &AdminSession,
    errors: FormErrors,
    success: Option<String>,
) -> DashboardPage {
    DashboardPage {
        layout: Layout::admin("Admin Dashboard"),
        username: session.username().to_string(),
        errors,
        success,
    }
}

pub(crate) async fn dashboard(session: AdminSession) -> AppResult<Html<String>> {
    Ok(render_page(&dashboard_page(&session, FormErrors::new(), None))?)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PasswordForm {
    #[serde(default)]
    pub(crate) current_password: String,
    #[serde(default)]
    pub(crate) new_password: String,
    #[serde(default)]
    pub(crate) confirm_password: String,
}

pub(crate) async fn change_password(
    State(state): State<AppState>,
    session: AdminSession,
    Form(form): Form<PasswordForm>,
) -> AppResult<Html<String>> {
    let change = PasswordChange {
        current: form.current_password,
        new: form.new_password,
        confirm: form.confirm_password,
    };

    let view = match state
        .accounts
        .change_password(session.token(), &change)
        .await
    {
        Ok(()) => dashboard_page(
            &session,
            FormErrors::new(),
            Some(PASSWORD_CHANGED.to_string()),
        ),
        Err(DomainError::Invalid(errors)) => dashboard_page(&session, errors, None),
        Err(err) => {
            warn!(error = %err, "password change failed");
            dashboard_page(
                &session,
                FormErrors::single(FORM_FIELD, PASSWORD_CHANGE_FAILED),
                None,
            )
        }
    };
    Ok(render_page(&view)?)
}

async fn admins_page(
    state: &AppState,
    session: &AdminSession,
    username: String,
    errors: FormErrors,
    success: Option<String>,
    banner: Option<String>,
) -> Result<ManageAdminsPage, AppError> {
    let (admins, banner) = match state.accounts.list_admins(session.token()).await {
        Ok(admins) => (admins, banner),
        Err(DomainError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(err) => {
            let list_banner = err.banner(ADMINS_UNAVAILABLE);
            (Vec::new(), banner.or(Some(list_banner)))
        }
    };

    Ok(ManageAdminsPage {
        layout: Layout::admin("Manage Admin Users"),
        admins: admin_rows(&admins, session.admin_id()),
        username,
        errors,
        success,
        banner,
    })
}

pub(crate) async fn manage_admins(
    State(state): State<AppState>,
    session: AdminSession,
) -> AppResult<Html<String>> {
    let view = admins_page(
        &state,
        &session,
        String::new(),
        FormErrors::new(),
        None,
        None,
    )
    .await?;
    Ok(render_page(&view)?)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NewAdminForm {
    #[serde(default)]
    pub(crate) username: String,
    #[serde(default)]
    pub(crate) password: String,
}

pub(crate) async fn add_admin(
    State(state): State<AppState>,
    session: AdminSession,
    Form(form): Form<NewAdminForm>,
) -> AppResult<Html<String>> {
    let username = form.username.clone();
    let admin = NewAdmin {
        username: form.username,
        password: form.password,
    };

    let view = match state.accounts.add_admin(session.token(), admin).await {
        Ok(_) => {
            admins_page(
                &state,
                &session,
                String::new(),
                FormErrors::new(),
                Some(ADMIN_ADDED.to_string()),
                None,
            )
            .await?
        }
        Err(DomainError::Invalid(errors)) => {
            admins_page(&state, &session, username, errors, None, None).await?
        }
        Err(DomainError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(err) => {
            let banner = err.banner("Failed to add admin");
            admins_page(
                &state,
                &session,
                username,
                FormErrors::new(),
                None,
                Some(banner),
            )
            .await?
        }
    };
    Ok(render_page(&view)?)
}

pub(crate) async fn delete_admin(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Response> {
    match state.accounts.delete_admin(session.token(), &id).await {
        Ok(()) => Ok(Redirect::to("/admin/manage-admins").into_response()),
        Err(DomainError::Unauthorized) => Err(AppError::Unauthorized),
        Err(err) => {
            let banner = err.banner("Failed to delete admin");
            let view = admins_page(
                &state,
                &session,
                String::new(),
                FormErrors::new(),
                None,
                Some(banner),
            )
            .await?;
            Ok(render_page(&view)?.into_response())
        }
    }
}
