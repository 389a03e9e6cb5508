use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::admin::{
    add_admin, admin_root, change_password, dashboard, delete_admin, manage_admins,
};
use crate::presentation::handlers::article_admin::{create_article, new_article_form};
use crate::presentation::handlers::auth::{login, login_form, logout};
use crate::presentation::handlers::media::upload_media;
use crate::presentation::handlers::podcast_admin::{create_podcast, new_podcast_form};
use crate::presentation::middleware::auth::require_session;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    // The editor upload adapter answers JSON, so it checks the session itself.
    let public = Router::new()
        .route("/login", get(login_form).post(login))
        .route("/logout", post(logout))
        .route("/media", post(upload_media));

    let protected = Router::new()
        .route("/", get(admin_root))
        .route("/dashboard", get(dashboard))
        .route("/change-password", post(change_password))
        .route("/articles", get(new_article_form).post(create_article))
        .route("/podcast", get(new_podcast_form).post(create_podcast))
        .route("/manage-admins", get(manage_admins).post(add_admin))
        .route("/manage-admins/{id}/delete", post(delete_admin))
        .route_layer(middleware::from_fn_with_state(state, require_session));

    public.merge(protected)
}
