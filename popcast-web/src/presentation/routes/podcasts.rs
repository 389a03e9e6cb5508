use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::podcast_admin::{
    delete_podcast, edit_podcast_form, update_podcast,
};
use crate::presentation::handlers::podcasts::{list_podcasts, podcast_detail};
use crate::presentation::middleware::auth::require_session;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_podcasts))
        .route("/{id}", get(podcast_detail));

    let protected = Router::new()
        .route("/edit/{id}", get(edit_podcast_form).post(update_podcast))
        .route("/{id}/delete", post(delete_podcast))
        .route_layer(middleware::from_fn_with_state(state, require_session));

    public.merge(protected)
}
