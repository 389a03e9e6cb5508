use axum::{extract::State, response::Html};

use crate::domain::listing::HOME_LIMIT;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::Viewer;
use crate::presentation::views::{HomePage, Layout, article_cards, podcast_cards, render_page};

pub(crate) async fn home(
    State(state): State<AppState>,
    viewer: Viewer,
) -> AppResult<Html<String>> {
    let (articles, podcasts) = tokio::join!(
        state.articles.recent(HOME_LIMIT, None),
        state.podcasts.recent(HOME_LIMIT, None),
    );

    let view = HomePage {
        layout: Layout::home()
            .with_canonical(state.canonical("/"))
            .signed_in(viewer.is_signed_in()),
        articles: article_cards(&articles),
        podcasts: podcast_cards(&podcasts),
    };
    Ok(render_page(&view)?)
}
