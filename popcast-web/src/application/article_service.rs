use std::sync::Arc;

use popcast_client::{Article, ArticleStatus, MediaFile, Page, UploadedMedia};
use tracing::{error, info};

use crate::data::backend::ContentBackend;
use crate::domain::article::{ArticleDraft, ArticleEdit};
use crate::domain::error::{DomainError, FormErrors};
use crate::domain::listing::{ARTICLES_PER_PAGE, ArticleListRequest, recent_articles_query};
use crate::domain::media::MediaKind;

pub(crate) struct ArticleService {
    backend: Arc<dyn ContentBackend>,
}

impl ArticleService {
    pub(crate) fn new(backend: Arc<dyn ContentBackend>) -> Self {
        Self { backend }
    }

    /// One page of articles. `admin_token` is only passed for admin viewers;
    /// everyone else gets published articles. Failures degrade to an empty page.
    pub(crate) async fn list(
        &self,
        request: &ArticleListRequest,
        admin_token: Option<&str>,
    ) -> Page<Article> {
        let query = request.to_query(admin_token.is_some());
        match self.backend.list_articles(&query, admin_token).await {
            Ok(page) => page,
            Err(err) => {
                error!(error = %err, page = query.page, "failed to list articles");
                Page::empty(ARTICLES_PER_PAGE)
            }
        }
    }

    /// Latest published articles, without `exclude_id`.
    pub(crate) async fn recent(&self, limit: u32, exclude_id: Option<&str>) -> Vec<Article> {
        match self
            .backend
            .list_articles(&recent_articles_query(limit), None)
            .await
        {
            Ok(page) => page
                .items
                .into_iter()
                .filter(|article| Some(article.id.as_str()) != exclude_id)
                .collect(),
            Err(err) => {
                error!(error = %err, "failed to load recent articles");
                Vec::new()
            }
        }
    }

    /// Non-admin viewers only see published articles; anything else is `NotFound`.
    pub(crate) async fn get(
        &self,
        id: &str,
        admin_token: Option<&str>,
    ) -> Result<Article, DomainError> {
        let article = self.backend.get_article(id, admin_token).await?;
        if admin_token.is_none() && article.status != ArticleStatus::Published {
            return Err(DomainError::NotFound);
        }
        Ok(article)
    }

    pub(crate) async fn create(
        &self,
        token: &str,
        draft: ArticleDraft,
    ) -> Result<Article, DomainError> {
        let article = draft.validate()?;
        let created = self.backend.create_article(token, article).await?;
        info!(article_id = %created.id, status = %created.status, "article created");
        Ok(created)
    }

    /// Uploads a replacement thumbnail first, then patches the article.
    pub(crate) async fn update(
        &self,
        token: &str,
        id: &str,
        mut edit: ArticleEdit,
    ) -> Result<Article, DomainError> {
        edit.validate()?;

        let uploaded = match edit.new_thumbnail.take() {
            Some(file) => Some(self.backend.upload_media(token, file).await?.url),
            None => None,
        };

        let updated = self
            .backend
            .update_article(token, id, edit.into_patch(uploaded))
            .await?;
        info!(article_id = %id, "article updated");
        Ok(updated)
    }

    pub(crate) async fn set_status(
        &self,
        token: &str,
        id: &str,
        status: ArticleStatus,
    ) -> Result<Article, DomainError> {
        let article = self.backend.set_article_status(token, id, status).await?;
        info!(article_id = %id, %status, "article status changed");
        Ok(article)
    }

    pub(crate) async fn delete(&self, token: &str, id: &str) -> Result<(), DomainError> {
        self.backend.delete_article(token, id).await?;
        info!(article_id = %id, "article deleted");
        Ok(())
    }

    /// Stores an image or video inserted in the rich-text editor.
    pub(crate) async fn upload_media(
        &self,
        token: &str,
        file: MediaFile,
    ) -> Result<UploadedMedia, DomainError> {
        if !MediaKind::Image.accepts(&file.content_type)
            && !MediaKind::Video.accepts(&file.content_type)
        {
            return Err(
                FormErrors::single("media", "Only image and video files can be uploaded").into(),
            );
        }
        self.backend.upload_media(token, file).await
    }
}
