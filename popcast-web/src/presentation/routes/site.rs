use axum::Router;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::contact::{contact_page, send_contact};
use crate::presentation::handlers::home::home;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/contact", get(contact_page))
        .route("/api/contact", post(send_contact))
}
