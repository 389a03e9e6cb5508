use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use popcast_client::{
    Admin, Article, ArticlePatch, ArticleStatus, Category, CategoryRef, ListQuery, LoginResponse,
    MediaFile, NewArticle, NewPodcast, Page, Pagination, Podcast, PopcastClientError,
    PodcastPatch, UploadedMedia,
};

use super::backend::ContentBackend;
use crate::domain::error::DomainError;

/// In-memory backend with call capture.
#[derive(Clone, Default)]
pub(crate) struct FakeBackend {
    pub(crate) articles: Arc<Mutex<Vec<Article>>>,
    pub(crate) podcasts: Arc<Mutex<Vec<Podcast>>>,
    pub(crate) admins: Arc<Mutex<Vec<Admin>>>,
    pub(crate) categories: Arc<Mutex<Vec<Category>>>,
    pub(crate) login_result: Arc<Mutex<Option<LoginResponse>>>,
    /// Every call fails with the client error for this status and message when set.
    pub(crate) reject_with: Arc<Mutex<Option<(u16, String)>>>,
    /// Every call answers `Unavailable` when set.
    pub(crate) offline: Arc<Mutex<bool>>,

    pub(crate) calls: Arc<Mutex<Vec<String>>>,
    pub(crate) article_queries: Arc<Mutex<Vec<(ListQuery, Option<String>)>>>,
    pub(crate) podcast_queries: Arc<Mutex<Vec<ListQuery>>>,
    pub(crate) category_kinds: Arc<Mutex<Vec<Option<String>>>>,
    pub(crate) created_articles: Arc<Mutex<Vec<NewArticle>>>,
    pub(crate) created_podcasts: Arc<Mutex<Vec<NewPodcast>>>,
    pub(crate) article_patches: Arc<Mutex<Vec<(String, ArticlePatch)>>>,
    pub(crate) podcast_patches: Arc<Mutex<Vec<(String, PodcastPatch)>>>,
    pub(crate) uploads: Arc<Mutex<Vec<MediaFile>>>,
    pub(crate) password_changes: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_articles(self, articles: Vec<Article>) -> Self {
        *self.articles.lock().expect("articles mutex poisoned") = articles;
        self
    }

    pub(crate) fn with_podcasts(self, podcasts: Vec<Podcast>) -> Self {
        *self.podcasts.lock().expect("podcasts mutex poisoned") = podcasts;
        self
    }

    pub(crate) fn with_login(self, login: LoginResponse) -> Self {
        *self.login_result.lock().expect("login_result mutex poisoned") = Some(login);
        self
    }

    pub(crate) fn rejecting(self, status: u16, message: &str) -> Self {
        *self.reject_with.lock().expect("reject_with mutex poisoned") =
            Some((status, message.to_string()));
        self
    }

    pub(crate) fn offline(self) -> Self {
        *self.offline.lock().expect("offline mutex poisoned") = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    fn enter(&self, call: &str) -> Result<(), DomainError> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(call.to_string());

        if *self.offline.lock().expect("offline mutex poisoned") {
            return Err(DomainError::Unavailable("connection refused".to_string()));
        }
        if let Some((status, message)) = self
            .reject_with
            .lock()
            .expect("reject_with mutex poisoned")
            .clone()
        {
            let message = Some(message);
            let err = match status {
                401 => PopcastClientError::Unauthorized(message),
                403 => PopcastClientError::Forbidden(message),
                404 => PopcastClientError::NotFound,
                _ => PopcastClientError::Api { status, message },
            };
            return Err(err.into());
        }
        Ok(())
    }
}

fn page_of<T: Clone>(items: &[T], query: &ListQuery) -> Page<T> {
    let limit = query.limit.max(1);
    let page = query.page.max(1);
    let total_items = items.len() as u64;
    let total_pages = (items.len() as u32).div_ceil(limit).max(1);
    let start = ((page - 1) * limit) as usize;

    Page {
        items: items
            .iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect(),
        pagination: Pagination {
            current_page: page,
            total_pages,
            total_items,
            limit,
        },
    }
}

#[async_trait]
impl ContentBackend for FakeBackend {
    async fn login(&self, _username: &str, _password: &str) -> Result<LoginResponse, DomainError> {
        self.enter("login")?;
        self.login_result
            .lock()
            .expect("login_result mutex poisoned")
            .clone()
            .ok_or(DomainError::Unauthorized)
    }

    async fn change_password(
        &self,
        _token: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        self.enter("change_password")?;
        self.password_changes
            .lock()
            .expect("password_changes mutex poisoned")
            .push((old_password.to_string(), new_password.to_string()));
        Ok(())
    }

    async fn list_admins(&self, _token: &str) -> Result<Vec<Admin>, DomainError> {
        self.enter("list_admins")?;
        Ok(self.admins.lock().expect("admins mutex poisoned").clone())
    }

    async fn register_admin(
        &self,
        _token: &str,
        username: &str,
        _password: &str,
    ) -> Result<Admin, DomainError> {
        self.enter("register_admin")?;
        let mut admins = self.admins.lock().expect("admins mutex poisoned");
        let admin = Admin {
            id: format!("admin-{}", admins.len() + 1),
            username: username.to_string(),
            is_super_admin: false,
        };
        admins.push(admin.clone());
        Ok(admin)
    }

    async fn delete_admin(&self, _token: &str, id: &str) -> Result<(), DomainError> {
        self.enter("delete_admin")?;
        let mut admins = self.admins.lock().expect("admins mutex poisoned");
        let before = admins.len();
        admins.retain(|admin| admin.id != id);
        if admins.len() == before {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }

    async fn list_articles(
        &self,
        query: &ListQuery,
        token: Option<&str>,
    ) -> Result<Page<Article>, DomainError> {
        self.enter("list_articles")?;
        self.article_queries
            .lock()
            .expect("article_queries mutex poisoned")
            .push((query.clone(), token.map(str::to_string)));

        let articles = self.articles.lock().expect("articles mutex poisoned");
        let matching: Vec<Article> = articles
            .iter()
            .filter(|article| query.status.is_none_or(|status| article.status == status))
            .cloned()
            .collect();
        Ok(page_of(&matching, query))
    }

    async fn get_article(&self, id: &str, _token: Option<&str>) -> Result<Article, DomainError> {
        self.enter("get_article")?;
        self.articles
            .lock()
            .expect("articles mutex poisoned")
            .iter()
            .find(|article| article.id == id)
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    async fn create_article(
        &self,
        _token: &str,
        article: NewArticle,
    ) -> Result<Article, DomainError> {
        self.enter("create_article")?;
        self.created_articles
            .lock()
            .expect("created_articles mutex poisoned")
            .push(article.clone());

        let mut created = sample_article("created", article.status);
        created.title = article.title;
        created.content = article.content;
        Ok(created)
    }

    async fn update_article(
        &self,
        _token: &str,
        id: &str,
        patch: ArticlePatch,
    ) -> Result<Article, DomainError> {
        self.enter("update_article")?;
        self.article_patches
            .lock()
            .expect("article_patches mutex poisoned")
            .push((id.to_string(), patch.clone()));

        let mut updated = sample_article(id, ArticleStatus::Published);
        updated.title = patch.title;
        Ok(updated)
    }

    async fn set_article_status(
        &self,
        _token: &str,
        id: &str,
        status: ArticleStatus,
    ) -> Result<Article, DomainError> {
        self.enter("set_article_status")?;
        let mut articles = self.articles.lock().expect("articles mutex poisoned");
        let article = articles
            .iter_mut()
            .find(|article| article.id == id)
            .ok_or(DomainError::NotFound)?;
        article.status = status;
        Ok(article.clone())
    }

    async fn delete_article(&self, _token: &str, id: &str) -> Result<(), DomainError> {
        self.enter("delete_article")?;
        self.articles
            .lock()
            .expect("articles mutex poisoned")
            .retain(|article| article.id != id);
        Ok(())
    }

    async fn upload_media(
        &self,
        _token: &str,
        file: MediaFile,
    ) -> Result<UploadedMedia, DomainError> {
        self.enter("upload_media")?;
        let url = format!("https://cdn.itspopcast.test/{}", file.file_name);
        self.uploads
            .lock()
            .expect("uploads mutex poisoned")
            .push(file);
        Ok(UploadedMedia { url })
    }

    async fn list_podcasts(&self, query: &ListQuery) -> Result<Page<Podcast>, DomainError> {
        self.enter("list_podcasts")?;
        self.podcast_queries
            .lock()
            .expect("podcast_queries mutex poisoned")
            .push(query.clone());
        let podcasts = self.podcasts.lock().expect("podcasts mutex poisoned");
        Ok(page_of(&podcasts, query))
    }

    async fn get_podcast(&self, id: &str) -> Result<Podcast, DomainError> {
        self.enter("get_podcast")?;
        self.podcasts
            .lock()
            .expect("podcasts mutex poisoned")
            .iter()
            .find(|podcast| podcast.id == id)
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    async fn create_podcast(
        &self,
        _token: &str,
        podcast: NewPodcast,
    ) -> Result<Podcast, DomainError> {
        self.enter("create_podcast")?;
        self.created_podcasts
            .lock()
            .expect("created_podcasts mutex poisoned")
            .push(podcast.clone());

        let mut created = sample_podcast("created");
        created.title = podcast.title;
        Ok(created)
    }

    async fn update_podcast(
        &self,
        _token: &str,
        id: &str,
        patch: PodcastPatch,
    ) -> Result<Podcast, DomainError> {
        self.enter("update_podcast")?;
        self.podcast_patches
            .lock()
            .expect("podcast_patches mutex poisoned")
            .push((id.to_string(), patch.clone()));

        let mut updated = sample_podcast(id);
        updated.title = patch.title;
        Ok(updated)
    }

    async fn delete_podcast(&self, _token: &str, id: &str) -> Result<(), DomainError> {
        self.enter("delete_podcast")?;
        self.podcasts
            .lock()
            .expect("podcasts mutex poisoned")
            .retain(|podcast| podcast.id != id);
        Ok(())
    }

    async fn list_categories(&self, kind: Option<&str>) -> Result<Vec<Category>, DomainError> {
        self.enter("list_categories")?;
        self.category_kinds
            .lock()
            .expect("category_kinds mutex poisoned")
            .push(kind.map(str::to_string));
        Ok(self
            .categories
            .lock()
            .expect("categories mutex poisoned")
            .clone())
    }
}

pub(crate) fn sample_article(id: &str, status: ArticleStatus) -> Article {
    Article {
        id: id.to_string(),
        title: format!("مقال {id}"),
        sub_title: None,
        content: "<p>محتوى المقال</p>".to_string(),
        author: Some("فريق بوب كاست".to_string()),
        category: Some(CategoryRef::Name("موسيقى".to_string())),
        tags: vec!["pop".to_string()],
        status,
        date: Some(Utc::now()),
        thumbnail: None,
        slug: None,
        created_at: Some(Utc::now()),
        updated_at: Some(Utc::now()),
    }
}

pub(crate) fn sample_podcast(id: &str) -> Podcast {
    Podcast {
        id: id.to_string(),
        title: format!("حلقة {id}"),
        description: Some("وصف الحلقة".to_string()),
        audio_url: Some("https://cdn.itspopcast.test/episode.mp3".to_string()),
        video_url: None,
        youtube: Some("https://youtu.be/dQw4w9WgXcQ".to_string()),
        spotify: None,
        anghami: None,
        apple_music: None,
        category: None,
        tags: Vec::new(),
        thumbnail_url: None,
        created_at: Some(Utc::now()),
        updated_at: Some(Utc::now()),
    }
}
