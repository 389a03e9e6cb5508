use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::{PopcastClientError, PopcastClientResult};
use crate::models::{
    Admin, Article, ArticlePatch, ArticleStatus, Category, CategoryRef, ListQuery, LoginResponse,
    MediaFile, NewArticle, NewPodcast, Page, Pagination, Podcast, PodcastPatch, UploadedMedia,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct LoginRequestDto<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequestDto<'a> {
    old_password: &'a str,
    new_password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterAdminRequestDto<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct StatusRequestDto {
    status: ArticleStatus,
}

#[derive(Debug, Serialize)]
struct NewCategoryRequestDto<'a> {
    name: &'a str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CategoryQuery<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponseDto {
    token: Option<String>,
    id: Option<String>,
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    username: Option<String>,
    is_super_admin: Option<bool>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdminDto {
    id: Option<String>,
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    #[serde(default)]
    username: String,
    is_super_admin: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct CategoryDto {
    #[serde(rename = "_id", alias = "id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryRefDto {
    Name(String),
    Category(CategoryDto),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArticleDto {
    #[serde(rename = "_id", alias = "id")]
    id: String,
    title: Option<String>,
    sub_title: Option<String>,
    content: Option<String>,
    author: Option<String>,
    category: Option<CategoryRefDto>,
    tags: Option<Vec<String>>,
    status: Option<ArticleStatus>,
    date: Option<DateTime<Utc>>,
    thumbnail: Option<String>,
    slug: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PodcastDto {
    #[serde(rename = "_id", alias = "id")]
    id: String,
    title: Option<String>,
    description: Option<String>,
    audio_url: Option<String>,
    video_url: Option<String>,
    youtube: Option<String>,
    spotify: Option<String>,
    anghami: Option<String>,
    apple_music: Option<String>,
    category: Option<CategoryRefDto>,
    tags: Option<Vec<String>>,
    thumbnail_url: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaginationDto {
    current_page: Option<u32>,
    total_pages: Option<u32>,
    #[serde(alias = "totalArticles", alias = "totalPodcasts")]
    total_items: Option<u64>,
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ArticleListDto {
    #[serde(default, alias = "items")]
    articles: Vec<ArticleDto>,
    pagination: Option<PaginationDto>,
}

#[derive(Debug, Deserialize)]
struct PodcastListDto {
    #[serde(default, alias = "items")]
    podcasts: Vec<PodcastDto>,
    pagination: Option<PaginationDto>,
}

#[derive(Debug, Deserialize)]
struct UploadedMediaDto {
    url: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl From<CategoryDto> for Category {
    fn from(value: CategoryDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            kind: value.kind,
        }
    }
}

impl CategoryRefDto {
    fn into_model(self) -> Option<CategoryRef> {
        match self {
            Self::Name(name) if name.trim().is_empty() => None,
            Self::Name(name) => Some(CategoryRef::Name(name)),
            Self::Category(category) => Some(CategoryRef::Category(category.into())),
        }
    }
}

impl From<ArticleDto> for Article {
    fn from(value: ArticleDto) -> Self {
        Self {
            id: value.id,
            title: value.title.unwrap_or_default(),
            sub_title: non_empty(value.sub_title),
            content: value.content.unwrap_or_default(),
            author: non_empty(value.author),
            category: value.category.and_then(CategoryRefDto::into_model),
            tags: value.tags.unwrap_or_default(),
            status: value.status.unwrap_or_default(),
            date: value.date,
            thumbnail: non_empty(value.thumbnail),
            slug: non_empty(value.slug),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<PodcastDto> for Podcast {
    fn from(value: PodcastDto) -> Self {
        Self {
            id: value.id,
            title: value.title.unwrap_or_default(),
            description: non_empty(value.description),
            audio_url: non_empty(value.audio_url),
            video_url: non_empty(value.video_url),
            youtube: non_empty(value.youtube),
            spotify: non_empty(value.spotify),
            anghami: non_empty(value.anghami),
            apple_music: non_empty(value.apple_music),
            category: value.category.and_then(CategoryRefDto::into_model),
            tags: value.tags.unwrap_or_default(),
            thumbnail_url: non_empty(value.thumbnail_url),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<AdminDto> for Admin {
    fn from(value: AdminDto) -> Self {
        Self {
            id: value.id.or(value.mongo_id).unwrap_or_default(),
            username: value.username,
            is_super_admin: value.is_super_admin.unwrap_or(false),
        }
    }
}

impl PaginationDto {
    fn into_model(self, fallback_limit: u32) -> Pagination {
        Pagination {
            current_page: self.current_page.unwrap_or(1).max(1),
            total_pages: self.total_pages.unwrap_or(1),
            total_items: self.total_items.unwrap_or(0),
            limit: self.limit.filter(|limit| *limit > 0).unwrap_or(fallback_limit),
        }
    }
}

fn into_page<D, T>(items: Vec<D>, pagination: Option<PaginationDto>, limit: u32) -> Page<T>
where
    T: From<D>,
{
    Page {
        items: items.into_iter().map(T::from).collect(),
        pagination: pagination
            .map(|dto| dto.into_model(limit))
            .unwrap_or_else(|| Pagination::empty(limit)),
    }
}

/// Accepts both a bare document and one wrapped as `{ "<key>": { ... } }`.
fn unwrap_item<T: DeserializeOwned>(value: Value, key: &str) -> PopcastClientResult<T> {
    let inner = match value {
        Value::Object(mut map) => match map.remove(key) {
            Some(inner @ Value::Object(_)) => inner,
            Some(other) => {
                map.insert(key.to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    };
    Ok(serde_json::from_value(inner)?)
}

fn file_part(file: MediaFile) -> PopcastClientResult<Part> {
    let MediaFile {
        file_name,
        content_type,
        bytes,
    } = file;

    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(&content_type)
        .map_err(|err| {
            PopcastClientError::InvalidRequest(format!("invalid content type '{content_type}': {err}"))
        })
}

fn iso_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone)]
/// Client for the PopCast backend REST API.
///
/// Cheap to clone; the underlying connection pool is shared. Protected calls
/// take the bearer token explicitly so one client can serve many sessions.
pub struct PopcastClient {
    base_url: Url,
    client: Client,
}

impl PopcastClient {
    /// Creates a client with the default request timeout.
    pub fn new(base_url: impl AsRef<str>) -> PopcastClientResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(base_url: impl AsRef<str>, timeout: Duration) -> PopcastClientResult<Self> {
        let base_url = Url::parse(base_url.as_ref().trim()).map_err(|err| {
            PopcastClientError::InvalidRequest(format!("invalid backend url: {err}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PopcastClientError::InvalidRequest(format!(
                "backend url '{base_url}' cannot be used as a base"
            )));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()?;

        Ok(Self { base_url, client })
    }

    /// Backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str], token: Option<&str>) -> RequestBuilder {
        let request = self.client.request(method, self.endpoint(segments));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn decode_error(response: reqwest::Response) -> PopcastClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .error
                .or(body.message)
                .filter(|message| !message.trim().is_empty()),
            Err(_) => None,
        };
        PopcastClientError::from_http_status(status, message)
    }

    async fn send(request: RequestBuilder) -> PopcastClientResult<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(PopcastClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> PopcastClientResult<T> {
        Self::send(request)
            .await?
            .json::<T>()
            .await
            .map_err(PopcastClientError::from_reqwest)
    }

    async fn send_item<T: DeserializeOwned>(
        request: RequestBuilder,
        key: &str,
    ) -> PopcastClientResult<T> {
        let value: Value = Self::send_json(request).await?;
        unwrap_item(value, key)
    }

    /// `POST /admin/login`.
    pub async fn login(&self, username: &str, password: &str) -> PopcastClientResult<LoginResponse> {
        let payload = LoginRequestDto { username, password };
        let dto: LoginResponseDto =
            Self::send_json(self.request(Method::POST, &["admin", "login"], None).json(&payload))
                .await?;

        let token = dto
            .token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| PopcastClientError::Unauthorized(dto.message.clone()))?;

        Ok(LoginResponse {
            token,
            id: dto.id.or(dto.mongo_id).unwrap_or_default(),
            username: dto.username.unwrap_or_else(|| username.to_string()),
            is_super_admin: dto.is_super_admin.unwrap_or(false),
        })
    }

    /// `PATCH /admin/change-password`.
    pub async fn change_password(
        &self,
        token: &str,
        old_password: &str,
        new_password: &str,
    ) -> PopcastClientResult<()> {
        let payload = ChangePasswordRequestDto {
            old_password,
            new_password,
        };
        Self::send(
            self.request(Method::PATCH, &["admin", "change-password"], Some(token))
                .json(&payload),
        )
        .await?;
        Ok(())
    }

    /// `GET /admin`.
    pub async fn list_admins(&self, token: &str) -> PopcastClientResult<Vec<Admin>> {
        let dtos: Vec<AdminDto> =
            Self::send_json(self.request(Method::GET, &["admin"], Some(token))).await?;
        Ok(dtos.into_iter().map(Admin::from).collect())
    }

    /// `POST /admin/register`.
    pub async fn register_admin(
        &self,
        token: &str,
        username: &str,
        password: &str,
    ) -> PopcastClientResult<Admin> {
        let payload = RegisterAdminRequestDto { username, password };
        let dto: AdminDto = Self::send_item(
            self.request(Method::POST, &["admin", "register"], Some(token))
                .json(&payload),
            "admin",
        )
        .await?;
        Ok(dto.into())
    }

    /// `DELETE /admin/delete/{id}`.
    pub async fn delete_admin(&self, token: &str, id: &str) -> PopcastClientResult<()> {
        Self::send(self.request(Method::DELETE, &["admin", "delete", id], Some(token))).await?;
        Ok(())
    }

    /// `GET /article` with paging and filters.
    pub async fn list_articles(
        &self,
        query: &ListQuery,
        token: Option<&str>,
    ) -> PopcastClientResult<Page<Article>> {
        let dto: ArticleListDto =
            Self::send_json(self.request(Method::GET, &["article"], token).query(query)).await?;
        Ok(into_page(dto.articles, dto.pagination, query.limit))
    }

    /// `GET /article/{id}`.
    pub async fn get_article(&self, id: &str, token: Option<&str>) -> PopcastClientResult<Article> {
        let dto: ArticleDto =
            Self::send_item(self.request(Method::GET, &["article", id], token), "article").await?;
        Ok(dto.into())
    }

    /// `POST /article` as `multipart/form-data`.
    pub async fn create_article(
        &self,
        token: &str,
        article: NewArticle,
    ) -> PopcastClientResult<Article> {
        let mut form = Form::new()
            .text("title", article.title)
            .text("subTitle", article.sub_title)
            .text("content", article.content)
            .text("author", article.author)
            .text("category", article.category)
            .text("tags", article.tags)
            .text("status", article.status.as_str());
        if let Some(date) = article.date {
            form = form.text("date", iso_date(date));
        }
        if let Some(thumbnail) = article.thumbnail {
            form = form.part("thumbnail", file_part(thumbnail)?);
        }

        let dto: ArticleDto = Self::send_item(
            self.request(Method::POST, &["article"], Some(token))
                .multipart(form),
            "article",
        )
        .await?;
        Ok(dto.into())
    }

    /// `PATCH /article/{id}`.
    pub async fn update_article(
        &self,
        token: &str,
        id: &str,
        patch: &ArticlePatch,
    ) -> PopcastClientResult<Article> {
        let dto: ArticleDto = Self::send_item(
            self.request(Method::PATCH, &["article", id], Some(token))
                .json(patch),
            "article",
        )
        .await?;
        Ok(dto.into())
    }

    /// `PATCH /article/{id}/status`.
    pub async fn set_article_status(
        &self,
        token: &str,
        id: &str,
        status: ArticleStatus,
    ) -> PopcastClientResult<Article> {
        let dto: ArticleDto = Self::send_item(
            self.request(Method::PATCH, &["article", id, "status"], Some(token))
                .json(&StatusRequestDto { status }),
            "article",
        )
        .await?;
        Ok(dto.into())
    }

    /// `DELETE /article/{id}`.
    pub async fn delete_article(&self, token: &str, id: &str) -> PopcastClientResult<()> {
        Self::send(self.request(Method::DELETE, &["article", id], Some(token))).await?;
        Ok(())
    }

    /// `POST /article/upload-media`: stores an editor image or video.
    pub async fn upload_media(
        &self,
        token: &str,
        file: MediaFile,
    ) -> PopcastClientResult<UploadedMedia> {
        let form = Form::new().part("media", file_part(file)?);
        let dto: UploadedMediaDto = Self::send_json(
            self.request(Method::POST, &["article", "upload-media"], Some(token))
                .multipart(form),
        )
        .await?;
        Ok(UploadedMedia { url: dto.url })
    }

    /// `GET /podcast` with paging and filters.
    pub async fn list_podcasts(&self, query: &ListQuery) -> PopcastClientResult<Page<Podcast>> {
        let dto: PodcastListDto =
            Self::send_json(self.request(Method::GET, &["podcast"], None).query(query)).await?;
        Ok(into_page(dto.podcasts, dto.pagination, query.limit))
    }

    /// `GET /podcast/{id}`.
    pub async fn get_podcast(&self, id: &str) -> PopcastClientResult<Podcast> {
        let dto: PodcastDto =
            Self::send_item(self.request(Method::GET, &["podcast", id], None), "podcast").await?;
        Ok(dto.into())
    }

    /// `POST /podcast` as `multipart/form-data`.
    pub async fn create_podcast(
        &self,
        token: &str,
        podcast: NewPodcast,
    ) -> PopcastClientResult<Podcast> {
        let mut form = Form::new()
            .text("title", podcast.title)
            .text("description", podcast.description)
            .text("youtube", podcast.youtube)
            .text("spotify", podcast.spotify)
            .text("anghami", podcast.anghami)
            .text("appleMusic", podcast.apple_music)
            .text("category", podcast.category)
            .text("tags", podcast.tags)
            .text("thumbnailUrl", podcast.thumbnail_url);
        if let Some(audio) = podcast.audio {
            form = form.part("audio", file_part(audio)?);
        }
        if let Some(video) = podcast.video {
            form = form.part("video", file_part(video)?);
        }

        let dto: PodcastDto = Self::send_item(
            self.request(Method::POST, &["podcast"], Some(token))
                .multipart(form),
            "podcast",
        )
        .await?;
        Ok(dto.into())
    }

    /// `PATCH /podcast/{id}`.
    pub async fn update_podcast(
        &self,
        token: &str,
        id: &str,
        patch: &PodcastPatch,
    ) -> PopcastClientResult<Podcast> {
        let dto: PodcastDto = Self::send_item(
            self.request(Method::PATCH, &["podcast", id], Some(token))
                .json(patch),
            "podcast",
        )
        .await?;
        Ok(dto.into())
    }

    /// `DELETE /podcast/{id}`.
    pub async fn delete_podcast(&self, token: &str, id: &str) -> PopcastClientResult<()> {
        Self::send(self.request(Method::DELETE, &["podcast", id], Some(token))).await?;
        Ok(())
    }

    /// `GET /category`, optionally restricted to one `type`.
    pub async fn list_categories(&self, kind: Option<&str>) -> PopcastClientResult<Vec<Category>> {
        let mut request = self.request(Method::GET, &["category"], None);
        if let Some(kind) = kind {
            request = request.query(&CategoryQuery { kind });
        }
        let dtos: Vec<CategoryDto> = Self::send_json(request).await?;
        Ok(dtos.into_iter().map(Category::from).collect())
    }

    /// `POST /category`.
    pub async fn create_category(
        &self,
        token: &str,
        name: &str,
        kind: Option<&str>,
    ) -> PopcastClientResult<Category> {
        let payload = NewCategoryRequestDto { name, kind };
        let dto: CategoryDto = Self::send_item(
            self.request(Method::POST, &["category"], Some(token))
                .json(&payload),
            "category",
        )
        .await?;
        Ok(dto.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = PopcastClient::new("http://localhost:3001/").expect("valid url");
        let full = client.endpoint(&["article", "upload-media"]);
        assert_eq!(full.as_str(), "http://localhost:3001/article/upload-media");
    }

    #[test]
    fn endpoint_keeps_base_path_and_encodes_ids() {
        let client = PopcastClient::new("https://server.itspopcast.com/api").expect("valid url");
        let full = client.endpoint(&["article", "مقال 1"]);
        assert!(full.as_str().starts_with("https://server.itspopcast.com/api/article/"));
        assert!(!full.as_str().contains(' '));
    }

    #[test]
    fn new_rejects_non_base_urls() {
        let err = PopcastClient::new("mailto:someone@example.com").expect_err("must fail");
        assert!(matches!(err, PopcastClientError::InvalidRequest(_)));
    }

    #[test]
    fn article_list_accepts_backend_total_alias() {
        let body = json!({
            "articles": [{
                "_id": "a1",
                "title": "عنوان",
                "content": "<p>نص</p>",
                "tags": ["pop"],
                "status": "published",
                "category": "موسيقى",
                "date": "2024-05-01T10:30:00.000Z"
            }],
            "pagination": { "currentPage": 2, "totalPages": 4, "totalArticles": 31, "limit": 9 }
        });

        let dto: ArticleListDto = serde_json::from_value(body).expect("must decode");
        let page: Page<Article> = into_page(dto.articles, dto.pagination, 9);

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].status, ArticleStatus::Published);
        assert_eq!(
            page.items[0].category.as_ref().map(CategoryRef::name),
            Some("موسيقى")
        );
        assert_eq!(page.pagination.current_page, 2);
        assert_eq!(page.pagination.total_items, 31);
        assert!(page.pagination.has_previous());
        assert!(page.pagination.has_next());
    }

    #[test]
    fn podcast_list_without_pagination_falls_back_to_single_page() {
        let body = json!({
            "podcasts": [{
                "_id": "p1",
                "title": "حلقة",
                "category": { "_id": "c1", "name": "مقابلات" },
                "youtube": ""
            }]
        });

        let dto: PodcastListDto = serde_json::from_value(body).expect("must decode");
        let page: Page<Podcast> = into_page(dto.podcasts, dto.pagination, 6);

        assert_eq!(page.pagination, Pagination::empty(6));
        let podcast = &page.items[0];
        assert!(podcast.youtube.is_none());
        assert_eq!(
            podcast.category.as_ref().map(CategoryRef::form_value),
            Some("c1")
        );
    }

    #[test]
    fn unwrap_item_accepts_wrapped_and_bare_documents() {
        let wrapped = json!({ "message": "ok", "article": { "_id": "a1", "title": "t" } });
        let bare = json!({ "_id": "a2", "title": "t" });

        let first: ArticleDto = unwrap_item(wrapped, "article").expect("wrapped");
        let second: ArticleDto = unwrap_item(bare, "article").expect("bare");
        assert_eq!(first.id, "a1");
        assert_eq!(second.id, "a2");
    }

    #[test]
    fn content_documents_accept_plain_id() {
        let article: ArticleDto =
            serde_json::from_value(json!({ "id": "a3", "title": "t" })).expect("article");
        let podcast: PodcastDto =
            serde_json::from_value(json!({ "id": "p3", "title": "t" })).expect("podcast");
        assert_eq!(article.id, "a3");
        assert_eq!(podcast.id, "p3");
    }

    #[test]
    fn admin_dto_prefers_id_over_mongo_id() {
        let dto: AdminDto =
            serde_json::from_value(json!({ "_id": "m1", "username": "root" })).expect("decode");
        let admin = Admin::from(dto);
        assert_eq!(admin.id, "m1");
        assert!(!admin.is_super_admin);
    }

    #[test]
    fn file_part_rejects_invalid_mime() {
        let file = MediaFile {
            file_name: "x.bin".to_string(),
            content_type: "not a mime".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert!(matches!(
            file_part(file),
            Err(PopcastClientError::InvalidRequest(_))
        ));
    }

    #[test]
    fn iso_date_matches_javascript_format() {
        let date = DateTime::parse_from_rfc3339("2024-05-01T10:30:00Z")
            .expect("valid date")
            .with_timezone(&Utc);
        assert_eq!(iso_date(date), "2024-05-01T10:30:00.000Z");
    }
}
