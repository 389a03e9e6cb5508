use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::error;

use crate::domain::error::DomainError;
use crate::domain::listing::PodcastListRequest;
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::handlers::articles::{load_recent, parse_page};
use crate::presentation::middleware::auth::Viewer;
use crate::presentation::views::{
    Layout, PaginationView, PodcastDetailPage, PodcastListPage, PodcastView, ShareLinks,
    category_options, page_description, podcast_cards, render_page,
};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PodcastListParams {
    pub(crate) page: Option<String>,
    pub(crate) search: Option<String>,
    pub(crate) tags: Option<String>,
    pub(crate) category: Option<String>,
}

pub(crate) async fn list_podcasts(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(params): Query<PodcastListParams>,
) -> AppResult<Html<String>> {
    let request = PodcastListRequest::new(
        parse_page(params.page.as_deref()),
        params.search,
        params.tags,
        params.category,
    );
    let (page, categories) = tokio::join!(
        state.podcasts.list(&request),
        state.podcasts.filter_categories(),
    );

    let selected = request.category.as_deref().unwrap_or_default();
    let pagination = PaginationView::new(
        &page.pagination,
        "/podcast",
        &[
            ("search", request.search.as_deref().unwrap_or_default()),
            ("tags", request.tag.as_deref().unwrap_or_default()),
            ("category", selected),
        ],
    );

    let view = PodcastListPage {
        layout: Layout::public("البودكاست", "podcasts")
            .with_canonical(state.canonical("/podcast"))
            .signed_in(viewer.is_signed_in()),
        cards: podcast_cards(&page.items),
        pagination,
        search: request.effective_search().unwrap_or_default().to_string(),
        categories: category_options(&categories, selected),
        all_categories: request.category.is_none(),
    };
    Ok(render_page(&view)?)
}

pub(crate) async fn podcast_detail(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let podcast = match state.podcasts.get(&id).await {
        Ok(podcast) => podcast,
        Err(DomainError::NotFound) => return Err(AppError::NotFound),
        Err(err) => {
            error!(error = %err, podcast_id = %id, "failed to load podcast");
            return Err(AppError::NotFound);
        }
    };

    let canonical = state.canonical(&format!("/podcast/{}", podcast.id));
    let recent = load_recent(&state, None, Some(&podcast.id)).await;
    let description = page_description(podcast.description.as_deref().unwrap_or_default());

    let view = PodcastDetailPage {
        layout: Layout::public(&podcast.title, "podcasts")
            .as_article()
            .with_description(description)
            .with_image(podcast.thumbnail_url.as_deref())
            .with_canonical(canonical.clone())
            .signed_in(viewer.is_signed_in()),
        share: ShareLinks::new(&canonical, &podcast.title),
        podcast: PodcastView::from(&podcast),
        recent,
        can_manage: viewer.is_signed_in(),
    };
    Ok(render_page(&view)?)
}
