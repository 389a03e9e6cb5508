use async_trait::async_trait;
use popcast_client::{
    Admin, Article, ArticlePatch, ArticleStatus, Category, ListQuery, LoginResponse, MediaFile,
    NewArticle, NewPodcast, Page, Podcast, PodcastPatch, PopcastClient, PopcastClientError,
    UploadedMedia,
};

use crate::domain::error::DomainError;

/// Everything the site reads from or writes to the PopCast backend.
#[async_trait]
pub(crate) trait ContentBackend: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, DomainError>;
    async fn change_password(
        &self,
        token: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError>;
    async fn list_admins(&self, token: &str) -> Result<Vec<Admin>, DomainError>;
    async fn register_admin(
        &self,
        token: &str,
        username: &str,
        password: &str,
    ) -> Result<Admin, DomainError>;
    async fn delete_admin(&self, token: &str, id: &str) -> Result<(), DomainError>;

    async fn list_articles(
        &self,
        query: &ListQuery,
        token: Option<&str>,
    ) -> Result<Page<Article>, DomainError>;
    async fn get_article(&self, id: &str, token: Option<&str>) -> Result<Article, DomainError>;
    async fn create_article(&self, token: &str, article: NewArticle)
    -> Result<Article, DomainError>;
    async fn update_article(
        &self,
        token: &str,
        id: &str,
        patch: ArticlePatch,
    ) -> Result<Article, DomainError>;
    async fn set_article_status(
        &self,
        token: &str,
        id: &str,
        status: ArticleStatus,
    ) -> Result<Article, DomainError>;
    async fn delete_article(&self, token: &str, id: &str) -> Result<(), DomainError>;
    async fn upload_media(&self, token: &str, file: MediaFile)
    -> Result<UploadedMedia, DomainError>;

    async fn list_podcasts(&self, query: &ListQuery) -> Result<Page<Podcast>, DomainError>;
    async fn get_podcast(&self, id: &str) -> Result<Podcast, DomainError>;
    async fn create_podcast(&self, token: &str, podcast: NewPodcast)
    -> Result<Podcast, DomainError>;
    async fn update_podcast(
        &self,
        token: &str,
        id: &str,
        patch: PodcastPatch,
    ) -> Result<Podcast, DomainError>;
    async fn delete_podcast(&self, token: &str, id: &str) -> Result<(), DomainError>;

    async fn list_categories(&self, kind: Option<&str>) -> Result<Vec<Category>, DomainError>;
}

impl From<PopcastClientError> for DomainError {
    fn from(err: PopcastClientError) -> Self {
        match err {
            PopcastClientError::Http(err) => DomainError::Unavailable(err.to_string()),
            PopcastClientError::Unauthorized(_) => DomainError::Unauthorized,
            PopcastClientError::Forbidden(message) => DomainError::Rejected {
                status: 403,
                message,
            },
            PopcastClientError::NotFound => DomainError::NotFound,
            PopcastClientError::Api { status, message } => {
                DomainError::Rejected { status, message }
            }
            PopcastClientError::Decode(err) => {
                DomainError::Unexpected(format!("unexpected backend response: {err}"))
            }
            PopcastClientError::InvalidRequest(message) => DomainError::Unexpected(message),
        }
    }
}

#[async_trait]
impl ContentBackend for PopcastClient {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, DomainError> {
        Ok(PopcastClient::login(self, username, password).await?)
    }

    async fn change_password(
        &self,
        token: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        Ok(PopcastClient::change_password(self, token, old_password, new_password).await?)
    }

    async fn list_admins(&self, token: &str) -> Result<Vec<Admin>, DomainError> {
        Ok(PopcastClient::list_admins(self, token).await?)
    }

    async fn register_admin(
        &self,
        token: &str,
        username: &str,
        password: &str,
    ) -> Result<Admin, DomainError> {
        Ok(PopcastClient::register_admin(self, token, username, password).await?)
    }

    async fn delete_admin(&self, token: &str, id: &str) -> Result<(), DomainError> {
        Ok(PopcastClient::delete_admin(self, token, id).await?)
    }

    async fn list_articles(
        &self,
        query: &ListQuery,
        token: Option<&str>,
    ) -> Result<Page<Article>, DomainError> {
        Ok(PopcastClient::list_articles(self, query, token).await?)
    }

    async fn get_article(&self, id: &str, token: Option<&str>) -> Result<Article, DomainError> {
        Ok(PopcastClient::get_article(self, id, token).await?)
    }

    async fn create_article(
        &self,
        token: &str,
        article: NewArticle,
    ) -> Result<Article, DomainError> {
        Ok(PopcastClient::create_article(self, token, article).await?)
    }

    async fn update_article(
        &self,
        token: &str,
        id: &str,
        patch: ArticlePatch,
    ) -> Result<Article, DomainError> {
        Ok(PopcastClient::update_article(self, token, id, &patch).await?)
    }

    async fn set_article_status(
        &self,
        token: &str,
        id: &str,
        status: ArticleStatus,
    ) -> Result<Article, DomainError> {
        Ok(PopcastClient::set_article_status(self, token, id, status).await?)
    }

    async fn delete_article(&self, token: &str, id: &str) -> Result<(), DomainError> {
        Ok(PopcastClient::delete_article(self, token, id).await?)
    }

    async fn upload_media(
        &self,
        token: &str,
        file: MediaFile,
    ) -> Result<UploadedMedia, DomainError> {
        Ok(PopcastClient::upload_media(self, token, file).await?)
    }

    async fn list_podcasts(&self, query: &ListQuery) -> Result<Page<Podcast>, DomainError> {
        Ok(PopcastClient::list_podcasts(self, query).await?)
    }

    async fn get_podcast(&self, id: &str) -> Result<Podcast, DomainError> {
        Ok(PopcastClient::get_podcast(self, id).await?)
    }

    async fn create_podcast(
        &self,
        token: &str,
        podcast: NewPodcast,
    ) -> Result<Podcast, DomainError> {
        Ok(PopcastClient::create_podcast(self, token, podcast).await?)
    }

    async fn update_podcast(
        &self,
        token: &str,
        id: &str,
        patch: PodcastPatch,
    ) -> Result<Podcast, DomainError> {
        Ok(PopcastClient::update_podcast(self, token, id, &patch).await?)
    }

    async fn delete_podcast(&self, token: &str, id: &str) -> Result<(), DomainError> {
        Ok(PopcastClient::delete_podcast(self, token, id).await?)
    }

    async fn list_categories(&self, kind: Option<&str>) -> Result<Vec<Category>, DomainError> {
        Ok(PopcastClient::list_categories(self, kind).await?)
    }
}

#[cfg(test)]
mod tests {
    use popcast_client::PopcastClientError;

    use crate::domain::error::DomainError;

    #[test]
    fn client_errors_map_onto_domain_errors() {
        assert!(matches!(
            DomainError::from(PopcastClientError::NotFound),
            DomainError::NotFound
        ));
        assert!(matches!(
            DomainError::from(PopcastClientError::Unauthorized(None)),
            DomainError::Unauthorized
        ));

        let forbidden = DomainError::from(PopcastClientError::Forbidden(Some(
            "Super admin access required".to_string(),
        )));
        assert!(matches!(
            forbidden,
            DomainError::Rejected { status: 403, .. }
        ));
        assert_eq!(
            forbidden.banner("Failed to add admin"),
            "Super admin access required"
        );

        let rejected = DomainError::from(PopcastClientError::Api {
            status: 400,
            message: Some("x".to_string()),
        });
        assert_eq!(rejected.banner("fallback"), "x");
    }
}
