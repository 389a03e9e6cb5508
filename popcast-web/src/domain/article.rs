use chrono::{DateTime, NaiveDateTime, Utc};
use popcast_client::{Article, ArticlePatch, ArticleStatus, MediaFile, NewArticle};

use super::error::FormErrors;
use super::html::is_blank_html;
use super::media::MediaKind;

const DATETIME_LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Raw fields of the article upload form.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ArticleDraft {
    pub(crate) title: String,
    pub(crate) sub_title: String,
    pub(crate) content: String,
    pub(crate) author: String,
    pub(crate) category: String,
    pub(crate) tags: String,
    pub(crate) status: String,
    /// `datetime-local` value, read as UTC.
    pub(crate) date: String,
    pub(crate) thumbnail: Option<MediaFile>,
}

impl ArticleDraft {
    /// Checks every rule and reports all failures at once.
    pub(crate) fn validate(self) -> Result<NewArticle, FormErrors> {
        let mut errors = FormErrors::new();

        let title = self.title.trim().to_string();
        if title.is_empty() {
            errors.insert("title", "Title is required");
        }

        if is_blank_html(&self.content) {
            errors.insert("content", "Content is required");
        }

        let status = if self.status.trim().is_empty() {
            ArticleStatus::Draft
        } else {
            self.status.parse::<ArticleStatus>().unwrap_or_else(|_| {
                errors.insert("status", "Invalid status");
                ArticleStatus::Draft
            })
        };

        let date = match parse_datetime_local(&self.date) {
            Ok(date) => date,
            Err(()) => {
                errors.insert("date", "Invalid publication date");
                None
            }
        };
        if status == ArticleStatus::Published && date.is_none() {
            errors.insert("date", "Publication date is required for published articles");
        }

        if let Some(thumbnail) = &self.thumbnail
            && !MediaKind::Image.accepts(&thumbnail.content_type)
        {
            errors.insert("thumbnail", "Please select a valid image file");
        }

        errors.into_result(NewArticle {
            title,
            sub_title: self.sub_title.trim().to_string(),
            content: self.content,
            author: self.author.trim().to_string(),
            category: self.category.trim().to_string(),
            tags: self.tags,
            status,
            date,
            thumbnail: self.thumbnail,
        })
    }

    /// Fresh form: draft status, date preset to now.
    pub(crate) fn blank(now: DateTime<Utc>) -> Self {
        Self {
            status: ArticleStatus::Draft.as_str().to_string(),
            date: now.format("%Y-%m-%dT%H:%M").to_string(),
            ..Self::default()
        }
    }
}

/// Blank is `Ok(None)`; anything unparsable is `Err(())`.
fn parse_datetime_local(raw: &str) -> Result<Option<DateTime<Utc>>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(date.with_timezone(&Utc)));
    }
    DATETIME_LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Some(naive.and_utc()))
        .ok_or(())
}

/// Comma separated tags, trimmed, blanks dropped. `None` when nothing was typed.
pub(crate) fn parse_tags(raw: &str) -> Option<Vec<String>> {
    if raw.trim().is_empty() {
        return None;
    }
    Some(
        raw.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Raw fields of the article edit form.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ArticleEdit {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author: String,
    pub(crate) category: String,
    pub(crate) tags: String,
    /// Current thumbnail URL, emptied when the editor removed it.
    pub(crate) thumbnail: String,
    pub(crate) new_thumbnail: Option<MediaFile>,
}

impl ArticleEdit {
    pub(crate) fn from_article(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            content: article.content.clone(),
            author: article.author.clone().unwrap_or_default(),
            category: article
                .category
                .as_ref()
                .map(|category| category.name().to_string())
                .unwrap_or_default(),
            tags: article.tags.join(", "),
            thumbnail: article.thumbnail.clone().unwrap_or_default(),
            new_thumbnail: None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        if self.title.trim().is_empty() {
            errors.insert("title", "Title is required");
        }
        if let Some(file) = &self.new_thumbnail
            && !MediaKind::Image.accepts(&file.content_type)
        {
            errors.insert("thumbnail", "Please select a valid image file");
        }
        errors.into_result(())
    }

    /// `uploaded_thumbnail` replaces the current thumbnail when a new file was stored.
    pub(crate) fn into_patch(self, uploaded_thumbnail: Option<String>) -> ArticlePatch {
        ArticlePatch {
            title: self.title.trim().to_string(),
            content: self.content,
            author: self.author.trim().to_string(),
            category: self.category.trim().to_string(),
            thumbnail: uploaded_thumbnail.unwrap_or(self.thumbnail),
            tags: parse_tags(&self.tags),
        }
    }
}
