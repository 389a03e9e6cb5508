use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use popcast_client::PopcastClient;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::account_service::AccountService;
use application::article_service::ArticleService;
use application::contact_service::ContactService;
use application::podcast_service::PodcastService;
use infrastructure::logging::init_logging;
use infrastructure::mailer::{MailTransport, build_mailer};
use infrastructure::session::SessionService;
use infrastructure::settings::Settings;
use presentation::{AppState, SiteConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let client = PopcastClient::with_timeout(
        &settings.api_url,
        Duration::from_secs(settings.backend_timeout_secs),
    )
    .context("failed to build backend client")?;
    info!(api_url = %client.base_url(), "backend client ready");
    let backend = Arc::new(client);

    let mailer: Arc<dyn MailTransport> = Arc::from(
        build_mailer(&settings.smtp).context("failed to build SMTP transport")?,
    );
    let sessions = Arc::new(SessionService::new(
        &settings.session_secret,
        settings.session_ttl_seconds,
    ));

    let state = AppState::new(
        Arc::new(ArticleService::new(backend.clone())),
        Arc::new(PodcastService::new(backend.clone())),
        Arc::new(AccountService::new(backend, Arc::clone(&sessions))),
        Arc::new(ContactService::new(mailer, settings.smtp.inboxes.clone())),
        sessions,
        SiteConfig {
            public_url: settings.public_site_url.clone(),
            cookie_secure: settings.session_cookie_secure,
        },
    );

    server::run_http(&settings, state).await
}
