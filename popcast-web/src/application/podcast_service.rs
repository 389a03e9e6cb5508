use std::sync::Arc;

use popcast_client::{Category, Page, Podcast};
use tracing::{error, info};

use crate::data::backend::ContentBackend;
use crate::domain::error::DomainError;
use crate::domain::listing::{PODCASTS_PER_PAGE, PodcastListRequest, recent_podcasts_query};
use crate::domain::podcast::{PodcastDraft, PodcastEdit};

const PODCAST_CATEGORY_KIND: &str = "podcast";

pub(crate) struct PodcastService {
    backend: Arc<dyn ContentBackend>,
}

impl PodcastService {
    pub(crate) fn new(backend: Arc<dyn ContentBackend>) -> Self {
        Self { backend }
    }

    pub(crate) async fn list(&self, request: &PodcastListRequest) -> Page<Podcast> {
        let query = request.to_query();
        match self.backend.list_podcasts(&query).await {
            Ok(page) => page,
            Err(err) => {
                error!(error = %err, page = query.page, "failed to list podcasts");
                Page::empty(PODCASTS_PER_PAGE)
            }
        }
    }

    /// Every category, for the filter bar of the list page; empty on failure.
    pub(crate) async fn filter_categories(&self) -> Vec<Category> {
        self.categories(None).await
    }

    /// Podcast categories only, for the upload and edit forms; empty on failure.
    pub(crate) async fn podcast_categories(&self) -> Vec<Category> {
        self.categories(Some(PODCAST_CATEGORY_KIND)).await
    }

    async fn categories(&self, kind: Option<&str>) -> Vec<Category> {
        match self.backend.list_categories(kind).await {
            Ok(categories) => categories,
            Err(err) => {
                error!(error = %err, ?kind, "failed to load categories");
                Vec::new()
            }
        }
    }

    pub(crate) async fn recent(&self, limit: u32, exclude_id: Option<&str>) -> Vec<Podcast> {
        match self
            .backend
            .list_podcasts(&recent_podcasts_query(limit))
            .await
        {
            Ok(page) => page
                .items
                .into_iter()
                .filter(|podcast| Some(podcast.id.as_str()) != exclude_id)
                .collect(),
            Err(err) => {
                error!(error = %err, "failed to load recent podcasts");
                Vec::new()
            }
        }
    }

    pub(crate) async fn get(&self, id: &str) -> Result<Podcast, DomainError> {
        self.backend.get_podcast(id).await
    }

    pub(crate) async fn create(
        &self,
        token: &str,
        draft: PodcastDraft,
    ) -> Result<Podcast, DomainError> {
        let podcast = draft.validate()?;
        let created = self.backend.create_podcast(token, podcast).await?;
        info!(podcast_id = %created.id, "podcast created");
        Ok(created)
    }

    /// Stores a replacement thumbnail through the media endpoint, then patches the podcast.
    pub(crate) async fn update(
        &self,
        token: &str,
        id: &str,
        mut edit: PodcastEdit,
    ) -> Result<Podcast, DomainError> {
        edit.validate()?;

        let uploaded = match edit.new_thumbnail.take() {
            Some(file) => Some(self.backend.upload_media(token, file).await?.url),
            None => None,
        };

        let updated = self
            .backend
            .update_podcast(token, id, edit.into_patch(uploaded))
            .await?;
        info!(podcast_id = %id, "podcast updated");
        Ok(updated)
    }

    pub(crate) async fn delete(&self, token: &str, id: &str) -> Result<(), DomainError> {
        self.backend.delete_podcast(token, id).await?;
        info!(podcast_id = %id, "podcast deleted");
        Ok(())
    }
}
