use std::sync::Arc;

use crate::application::account_service::AccountService;
use crate::application::article_service::ArticleService;
use crate::application::contact_service::ContactService;
use crate::application::podcast_service::PodcastService;
use crate::infrastructure::session::SessionService;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;
pub(crate) mod views;

/// Values pages need to build links and cookies.
#[derive(Debug, Clone)]
pub(crate) struct SiteConfig {
    /// Canonical origin without a trailing slash.
    pub(crate) public_url: String,
    pub(crate) cookie_secure: bool,
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) articles: Arc<ArticleService>,
    pub(crate) podcasts: Arc<PodcastService>,
    pub(crate) accounts: Arc<AccountService>,
    pub(crate) contact: Arc<ContactService>,
    pub(crate) sessions: Arc<SessionService>,
    pub(crate) site: Arc<SiteConfig>,
}

impl AppState {
    pub(crate) fn new(
        articles: Arc<ArticleService>,
        podcasts: Arc<PodcastService>,
        accounts: Arc<AccountService>,
        contact: Arc<ContactService>,
        sessions: Arc<SessionService>,
        site: SiteConfig,
    ) -> Self {
        Self {
            articles,
            podcasts,
            accounts,
            contact,
            sessions,
            site: Arc::new(site),
        }
    }

    pub(crate) fn canonical(&self, path: &str) -> String {
        format!("{}{}", self.site.public_url, path)
    }
}
