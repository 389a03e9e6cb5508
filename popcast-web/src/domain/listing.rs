use popcast_client::{ArticleStatus, ListQuery};

pub(crate) const ARTICLES_PER_PAGE: u32 = 9;
pub(crate) const PODCASTS_PER_PAGE: u32 = 6;
pub(crate) const RECENT_LIMIT: u32 = 5;
pub(crate) const HOME_LIMIT: u32 = 3;

/// Status selector of the admin article list. `All` sends no filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum StatusFilter {
    #[default]
    All,
    Only(ArticleStatus),
}

impl StatusFilter {
    /// Unknown values fall back to `All`.
    pub(crate) fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|raw| raw.parse::<ArticleStatus>().ok())
            .map(StatusFilter::Only)
            .unwrap_or_default()
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ArticleListRequest {
    pub(crate) page: u32,
    pub(crate) search: Option<String>,
    /// `?tags=` link target; wins over `search`.
    pub(crate) tag: Option<String>,
    pub(crate) status: StatusFilter,
}

impl ArticleListRequest {
    pub(crate) fn new(
        page: Option<u32>,
        search: Option<String>,
        tag: Option<String>,
        status: StatusFilter,
    ) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            search: clean(search),
            tag: clean(tag),
            status,
        }
    }

    pub(crate) fn effective_search(&self) -> Option<&str> {
        self.tag.as_deref().or(self.search.as_deref())
    }

    /// Backend query for this request. Non-admin viewers only ever see published articles.
    pub(crate) fn to_query(&self, is_admin: bool) -> ListQuery {
        let status = match (is_admin, self.status) {
            (false, _) => Some(ArticleStatus::Published),
            (true, StatusFilter::All) => None,
            (true, StatusFilter::Only(status)) => Some(status),
        };

        ListQuery {
            page: self.page,
            limit: ARTICLES_PER_PAGE,
            search: self.effective_search().map(str::to_string),
            status,
            ..ListQuery::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PodcastListRequest {
    pub(crate) page: u32,
    pub(crate) search: Option<String>,
    pub(crate) tag: Option<String>,
    pub(crate) category: Option<String>,
}

impl PodcastListRequest {
    pub(crate) fn new(
        page: Option<u32>,
        search: Option<String>,
        tag: Option<String>,
        category: Option<String>,
    ) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            search: clean(search),
            tag: clean(tag),
            category: clean(category),
        }
    }

    pub(crate) fn effective_search(&self) -> Option<&str> {
        self.tag.as_deref().or(self.search.as_deref())
    }

    pub(crate) fn to_query(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            limit: PODCASTS_PER_PAGE,
            search: self.effective_search().map(str::to_string),
            category: self.category.clone(),
            ..ListQuery::default()
        }
    }
}

/// Latest published articles, newest first.
pub(crate) fn recent_articles_query(limit: u32) -> ListQuery {
    ListQuery {
        page: 1,
        limit,
        status: Some(ArticleStatus::Published),
        sort: Some("-date".to_string()),
        ..ListQuery::default()
    }
}

/// Latest podcasts, newest first.
pub(crate) fn recent_podcasts_query(limit: u32) -> ListQuery {
    ListQuery {
        page: 1,
        limit,
        sort: Some("-createdAt".to_string()),
        ..ListQuery::default()
    }
}

#[cfg(test)]
mod tests {
    use popcast_client::ArticleStatus;

    use super::{ARTICLES_PER_PAGE, ArticleListRequest, PodcastListRequest, StatusFilter};

    #[test]
    fn non_admin_always_requests_published() {
        for filter in [
            StatusFilter::All,
            StatusFilter::Only(ArticleStatus::Draft),
            StatusFilter::Only(ArticleStatus::Archived),
        ] {
            let request = ArticleListRequest::new(Some(2), None, None, filter);
            let query = request.to_query(false);
            assert_eq!(query.status, Some(ArticleStatus::Published));
            assert_eq!(query.limit, ARTICLES_PER_PAGE);
            assert_eq!(query.page, 2);
        }
    }

    #[test]
    fn admin_all_sends_no_status() {
        let request = ArticleListRequest::new(None, None, None, StatusFilter::All);
        assert_eq!(request.to_query(true).status, None);

        let drafts = ArticleListRequest::new(
            None,
            None,
            None,
            StatusFilter::Only(ArticleStatus::Draft),
        );
        assert_eq!(drafts.to_query(true).status, Some(ArticleStatus::Draft));
    }

    #[test]
    fn tag_wins_over_search_and_page_is_clamped() {
        let request = ArticleListRequest::new(
            Some(0),
            Some("typed".to_string()),
            Some(" موسيقى ".to_string()),
            StatusFilter::All,
        );
        let query = request.to_query(false);
        assert_eq!(query.page, 1);
        assert_eq!(query.search.as_deref(), Some("موسيقى"));
    }

    #[test]
    fn blank_podcast_filters_are_dropped() {
        let request =
            PodcastListRequest::new(None, Some("  ".to_string()), None, Some(String::new()));
        let query = request.to_query();
        assert!(query.search.is_none());
        assert!(query.category.is_none());
        assert!(query.status.is_none());
    }

    #[test]
    fn status_filter_parses_leniently() {
        assert_eq!(
            StatusFilter::parse(Some("Published")),
            StatusFilter::Only(ArticleStatus::Published)
        );
        assert_eq!(StatusFilter::parse(Some("all")), StatusFilter::All);
        assert_eq!(StatusFilter::parse(None), StatusFilter::All);
    }
}
