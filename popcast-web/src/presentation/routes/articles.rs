use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::article_admin::{
    change_article_status, delete_article, edit_article_form, update_article,
};
use crate::presentation::handlers::articles::{article_detail, list_articles};
use crate::presentation::middleware::auth::require_session;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_articles))
        .route("/{id}", get(article_detail));

    let protected = Router::new()
        .route("/edit/{id}", get(edit_article_form).post(update_article))
        .route("/{id}/status", post(change_article_status))
        .route("/{id}/delete", post(delete_article))
        .route_layer(middleware::from_fn_with_state(state, require_session));

    public.merge(protected)
}
