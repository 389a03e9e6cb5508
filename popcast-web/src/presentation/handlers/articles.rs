use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::error;

use crate::domain::error::DomainError;
use crate::domain::listing::{ArticleListRequest, RECENT_LIMIT, StatusFilter};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::middleware::auth::Viewer;
use crate::presentation::views::{
    ArticleDetailPage, ArticleListPage, ArticleView, Layout, PaginationView, RecentContent,
    ShareLinks, article_cards, page_description, podcast_cards, render_page,
    status_filter_options,
};

/// Query of the article list. Everything is optional and parsed leniently.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ArticleListParams {
    pub(crate) page: Option<String>,
    pub(crate) search: Option<String>,
    pub(crate) tags: Option<String>,
    pub(crate) status: Option<String>,
}

pub(crate) fn parse_page(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|raw| raw.trim().parse::<u32>().ok())
}

pub(crate) async fn list_articles(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(params): Query<ArticleListParams>,
) -> AppResult<Html<String>> {
    let request = ArticleListRequest::new(
        parse_page(params.page.as_deref()),
        params.search,
        params.tags,
        StatusFilter::parse(params.status.as_deref()),
    );
    let admin_token = viewer.admin_token();
    let page = state.articles.list(&request, admin_token).await;

    let status = match (admin_token, request.status) {
        (Some(_), StatusFilter::Only(status)) => status.as_str(),
        _ => "",
    };
    let pagination = PaginationView::new(
        &page.pagination,
        "/article",
        &[
            ("search", request.search.as_deref().unwrap_or_default()),
            ("tags", request.tag.as_deref().unwrap_or_default()),
            ("status", status),
        ],
    );

    let view = ArticleListPage {
        layout: Layout::public("المقالات", "articles")
            .with_canonical(state.canonical("/article"))
            .signed_in(viewer.is_signed_in()),
        cards: article_cards(&page.items),
        pagination,
        search: request.effective_search().unwrap_or_default().to_string(),
        status_options: if admin_token.is_some() {
            status_filter_options(request.status)
        } else {
            Vec::new()
        },
    };
    Ok(render_page(&view)?)
}

/// Sidebar content, without the item the page is showing.
pub(crate) async fn load_recent(
    state: &AppState,
    article_id: Option<&str>,
    podcast_id: Option<&str>,
) -> RecentContent {
    let (articles, podcasts) = tokio::join!(
        state.articles.recent(RECENT_LIMIT, article_id),
        state.podcasts.recent(RECENT_LIMIT, podcast_id),
    );
    RecentContent {
        articles: article_cards(&articles),
        podcasts: podcast_cards(&podcasts),
    }
}

pub(crate) async fn article_detail(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let article = match state.articles.get(&id, viewer.admin_token()).await {
        Ok(article) => article,
        Err(DomainError::NotFound) => return Err(AppError::NotFound),
        Err(err) => {
            error!(error = %err, article_id = %id, "failed to load article");
            return Err(AppError::NotFound);
        }
    };

    let canonical = state.canonical(&format!("/article/{}", article.id));
    let recent = load_recent(&state, Some(&article.id), None).await;

    let view = ArticleDetailPage {
        layout: Layout::public(&article.title, "articles")
            .as_article()
            .with_description(page_description(&article.content))
            .with_image(article.thumbnail.as_deref())
            .with_canonical(canonical.clone())
            .signed_in(viewer.is_signed_in()),
        share: ShareLinks::new(&canonical, &article.title),
        article: ArticleView::from(&article),
        recent,
        can_manage: viewer.is_signed_in(),
    };
    Ok(render_page(&view)?)
}

#[cfg(test)]
mod tests {
    use super::parse_page;

    #[test]
    fn page_parameter_is_lenient() {
        assert_eq!(parse_page(Some("3")), Some(3));
        assert_eq!(parse_page(Some("abc")), None);
        assert_eq!(parse_page(Some("-2")), None);
        assert_eq!(parse_page(None), None);
    }
}
