use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Publication state of an article.
pub enum ArticleStatus {
    /// Not visible to the public.
    #[default]
    Draft,
    /// Visible on the public site.
    Published,
    /// Withdrawn from the public site.
    Archived,
}

impl ArticleStatus {
    /// All statuses in display order.
    pub const ALL: [ArticleStatus; 3] = [Self::Published, Self::Draft, Self::Archived];

    /// Wire representation (`draft`, `published`, `archived`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    /// Arabic label used by the site.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "مسودة",
            Self::Published => "منشور",
            Self::Archived => "مؤرشف",
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            other => Err(format!("unknown article status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Content category.
pub struct Category {
    /// Backend identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional scope, e.g. `podcast`.
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Category as attached to content: either a bare name or a populated object.
pub enum CategoryRef {
    /// Plain category name.
    Name(String),
    /// Populated category document.
    Category(Category),
}

impl CategoryRef {
    /// Name to display.
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Category(category) => &category.name,
        }
    }

    /// Value to put back into a form field: the id when populated, the name otherwise.
    pub fn form_value(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Category(category) => &category.id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Article view shape.
pub struct Article {
    /// Backend identifier, also used in URLs.
    pub id: String,
    /// Title.
    pub title: String,
    /// Optional sub-title.
    pub sub_title: Option<String>,
    /// Body as an HTML string.
    pub content: String,
    /// Author display name.
    pub author: Option<String>,
    /// Category.
    pub category: Option<CategoryRef>,
    /// Tags.
    pub tags: Vec<String>,
    /// Publication state.
    pub status: ArticleStatus,
    /// Publication date.
    pub date: Option<DateTime<Utc>>,
    /// Thumbnail URL.
    pub thumbnail: Option<String>,
    /// Optional slug.
    pub slug: Option<String>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Podcast episode view shape.
pub struct Podcast {
    /// Backend identifier, also used in URLs.
    pub id: String,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Hosted audio file URL.
    pub audio_url: Option<String>,
    /// Hosted video file URL.
    pub video_url: Option<String>,
    /// YouTube link.
    pub youtube: Option<String>,
    /// Spotify link.
    pub spotify: Option<String>,
    /// Anghami link.
    pub anghami: Option<String>,
    /// Apple Music link.
    pub apple_music: Option<String>,
    /// Category.
    pub category: Option<CategoryRef>,
    /// Tags.
    pub tags: Vec<String>,
    /// Thumbnail URL.
    pub thumbnail_url: Option<String>,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Back-office account.
pub struct Admin {
    /// Backend identifier.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Whether the account may see unpublished content.
    pub is_super_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Successful login answer.
pub struct LoginResponse {
    /// Opaque bearer token.
    pub token: String,
    /// Admin identifier.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Super-admin flag.
    pub is_super_admin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Pagination block of a list answer.
pub struct Pagination {
    /// 1-indexed current page.
    pub current_page: u32,
    /// Number of pages.
    pub total_pages: u32,
    /// Number of items across all pages.
    pub total_items: u64,
    /// Page size.
    pub limit: u32,
}

impl Pagination {
    /// Pagination of an empty result.
    pub fn empty(limit: u32) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items: 0,
            limit,
        }
    }

    /// Whether a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[derive(Debug, Clone)]
/// One page of a list answer.
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Pagination info.
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Empty page, used as a fallback when listing fails.
    pub fn empty(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::empty(limit),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Query of `GET /article` and `GET /podcast`.
pub struct ListQuery {
    /// 1-indexed page.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Free-text search or tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Article status filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ArticleStatus>,
    /// Category filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Backend sort expression, e.g. `-date`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// File to send as a multipart part.
pub struct MediaFile {
    /// Original file name.
    pub file_name: String,
    /// MIME type as reported by the browser.
    pub content_type: String,
    /// File content.
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
/// Fields of `POST /article`.
pub struct NewArticle {
    /// Title.
    pub title: String,
    /// Sub-title.
    pub sub_title: String,
    /// HTML body.
    pub content: String,
    /// Author.
    pub author: String,
    /// Category name or id.
    pub category: String,
    /// Comma separated tags, as typed.
    pub tags: String,
    /// Initial status.
    pub status: ArticleStatus,
    /// Publication date.
    pub date: Option<DateTime<Utc>>,
    /// Optional thumbnail image.
    pub thumbnail: Option<MediaFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// JSON body of `PATCH /article/{id}`.
pub struct ArticlePatch {
    /// Title.
    pub title: String,
    /// HTML body.
    pub content: String,
    /// Author.
    pub author: String,
    /// Category name or id.
    pub category: String,
    /// Thumbnail URL, empty string clears it.
    pub thumbnail: String,
    /// Replacement tag list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
/// Fields of `POST /podcast`.
pub struct NewPodcast {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// YouTube link.
    pub youtube: String,
    /// Spotify link.
    pub spotify: String,
    /// Anghami link.
    pub anghami: String,
    /// Apple Music link.
    pub apple_music: String,
    /// Category id.
    pub category: String,
    /// Comma separated tags, as typed.
    pub tags: String,
    /// Thumbnail URL.
    pub thumbnail_url: String,
    /// Audio file.
    pub audio: Option<MediaFile>,
    /// Video file.
    pub video: Option<MediaFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// JSON body of `PATCH /podcast/{id}`; `None` fields are left untouched.
pub struct PodcastPatch {
    /// Title.
    pub title: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Thumbnail URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Spotify link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify: Option<String>,
    /// Apple Music link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apple_music: Option<String>,
    /// Anghami link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anghami: Option<String>,
    /// YouTube link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    /// Hosted audio URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Hosted video URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Replacement tag list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Answer of `POST /article/upload-media`.
pub struct UploadedMedia {
    /// Public URL of the stored file.
    pub url: String,
}
