use askama::Template;
use axum::response::Html;
use chrono::{DateTime, Utc};
use popcast_client::{Admin, Article, ArticleStatus, Category, Pagination, Podcast};
use url::form_urlencoded;

use crate::domain::article::{ArticleDraft, ArticleEdit};
use crate::domain::error::FormErrors;
use crate::domain::html::{
    EXCERPT_LEN, META_DESCRIPTION_LEN, display_date, excerpt, meta_description,
};
use crate::domain::listing::StatusFilter;
use crate::domain::media::youtube_video_id;
use crate::domain::pagination::{PageItem, item_range, page_window};
use crate::domain::podcast::{PodcastDraft, PodcastEdit};

pub(crate) const SITE_NAME: &str = "بوب كاست";
const SITE_DESCRIPTION: &str =
    "بوب كاست منصة عربية للمقالات وحلقات البودكاست في الثقافة والفن والمجتمع";
const ADMIN_SUFFIX: &str = "PopCast Admin";

pub(crate) fn render_page<T: Template>(page: &T) -> Result<Html<String>, askama::Error> {
    page.render().map(Html)
}

/// Head metadata and navigation state shared by every page.
#[derive(Debug, Clone)]
pub(crate) struct Layout {
    pub(crate) title: String,
    pub(crate) description: String,
    /// Empty when the page has no canonical URL.
    pub(crate) canonical: String,
    pub(crate) image: String,
    pub(crate) og_type: &'static str,
    pub(crate) lang: &'static str,
    pub(crate) dir: &'static str,
    /// Highlighted navigation entry.
    pub(crate) active: &'static str,
    pub(crate) signed_in: bool,
}

impl Layout {
    pub(crate) fn public(title: &str, active: &'static str) -> Self {
        Self {
            title: format!("{title} | {SITE_NAME}"),
            description: SITE_DESCRIPTION.to_string(),
            canonical: String::new(),
            image: String::new(),
            og_type: "website",
            lang: "ar",
            dir: "rtl",
            active,
            signed_in: false,
        }
    }

    pub(crate) fn home() -> Self {
        Self {
            title: SITE_NAME.to_string(),
            ..Self::public(SITE_NAME, "home")
        }
    }

    pub(crate) fn admin(title: &str) -> Self {
        Self {
            title: format!("{title} | {ADMIN_SUFFIX}"),
            lang: "en",
            dir: "ltr",
            active: "admin",
            signed_in: true,
            ..Self::public(title, "admin")
        }
    }

    pub(crate) fn with_canonical(mut self, url: String) -> Self {
        self.canonical = url;
        self
    }

    pub(crate) fn with_description(mut self, description: String) -> Self {
        if !description.is_empty() {
            self.description = description;
        }
        self
    }

    pub(crate) fn with_image(mut self, image: Option<&str>) -> Self {
        self.image = image.unwrap_or_default().to_string();
        self
    }

    pub(crate) fn as_article(mut self) -> Self {
        self.og_type = "article";
        self
    }

    pub(crate) fn signed_in(mut self, signed_in: bool) -> Self {
        self.signed_in = signed_in;
        self
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        if !value.is_empty() {
            query.append_pair(key, value);
        }
    }
    let query = query.finish();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

fn card_date(primary: Option<DateTime<Utc>>, fallback: Option<DateTime<Utc>>) -> String {
    display_date(primary.or(fallback))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TagLink {
    pub(crate) label: String,
    pub(crate) href: String,
}

fn tag_links(base: &str, tags: &[String]) -> Vec<TagLink> {
    tags.iter()
        .map(|tag| TagLink {
            label: tag.clone(),
            href: with_query(base, &[("tags", tag)]),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub(crate) struct ArticleCard {
    pub(crate) href: String,
    pub(crate) title: String,
    pub(crate) excerpt: String,
    pub(crate) thumbnail: Option<String>,
    pub(crate) date: String,
    pub(crate) category: String,
    pub(crate) status_label: &'static str,
    pub(crate) published: bool,
}

impl From<&Article> for ArticleCard {
    fn from(article: &Article) -> Self {
        Self {
            href: format!("/article/{}", article.id),
            title: article.title.clone(),
            excerpt: excerpt(&article.content, EXCERPT_LEN),
            thumbnail: article.thumbnail.clone().filter(|url| !url.is_empty()),
            date: card_date(article.date, article.created_at),
            category: article
                .category
                .as_ref()
                .map(|category| category.name().to_string())
                .unwrap_or_default(),
            status_label: article.status.label(),
            published: article.status == ArticleStatus::Published,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PodcastCard {
    pub(crate) href: String,
    pub(crate) title: String,
    pub(crate) excerpt: String,
    pub(crate) thumbnail: Option<String>,
    pub(crate) date: String,
}

impl From<&Podcast> for PodcastCard {
    fn from(podcast: &Podcast) -> Self {
        Self {
            href: format!("/podcast/{}", podcast.id),
            title: podcast.title.clone(),
            excerpt: excerpt(
                podcast.description.as_deref().unwrap_or_default(),
                EXCERPT_LEN,
            ),
            thumbnail: podcast.thumbnail_url.clone().filter(|url| !url.is_empty()),
            date: card_date(podcast.created_at, None),
        }
    }
}

pub(crate) fn article_cards(articles: &[Article]) -> Vec<ArticleCard> {
    articles.iter().map(ArticleCard::from).collect()
}

pub(crate) fn podcast_cards(podcasts: &[Podcast]) -> Vec<PodcastCard> {
    podcasts.iter().map(PodcastCard::from).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageLink {
    pub(crate) label: String,
    /// Empty for an ellipsis slot.
    pub(crate) href: String,
    pub(crate) current: bool,
}

impl PageLink {
    pub(crate) fn is_gap(&self) -> bool {
        self.href.is_empty()
    }
}

/// Numbered page strip with previous/next links and the "showing a - b of n" caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PaginationView {
    pub(crate) links: Vec<PageLink>,
    pub(crate) previous: Option<String>,
    pub(crate) next: Option<String>,
    pub(crate) caption: String,
}

impl PaginationView {
    /// `params` are carried over to every page link; empty values are dropped.
    pub(crate) fn new(pagination: &Pagination, path: &str, params: &[(&str, &str)]) -> Self {
        let href = |page: u32| {
            let page = page.to_string();
            let mut all = params.to_vec();
            if page != "1" {
                all.push(("page", &page));
            }
            with_query(path, &all)
        };

        let links = page_window(pagination.current_page, pagination.total_pages)
            .into_iter()
            .map(|item| match item {
                PageItem::Page(page) => PageLink {
                    label: page.to_string(),
                    href: href(page),
                    current: page == pagination.current_page,
                },
                PageItem::Gap => PageLink {
                    label: "...".to_string(),
                    href: String::new(),
                    current: false,
                },
            })
            .collect();

        let (first, last) = item_range(pagination);
        Self {
            links,
            previous: pagination
                .has_previous()
                .then(|| href(pagination.current_page - 1)),
            next: pagination
                .has_next()
                .then(|| href(pagination.current_page + 1)),
            caption: format!("عرض {first} - {last} من {}", pagination.total_items),
        }
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.links.len() > 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectOption {
    pub(crate) value: String,
    pub(crate) label: String,
    pub(crate) selected: bool,
}

pub(crate) fn status_filter_options(filter: StatusFilter) -> Vec<SelectOption> {
    let mut options = vec![SelectOption {
        value: StatusFilter::All.as_str().to_string(),
        label: "الكل".to_string(),
        selected: filter == StatusFilter::All,
    }];
    options.extend(ArticleStatus::ALL.iter().map(|status| SelectOption {
        value: status.as_str().to_string(),
        label: status.label().to_string(),
        selected: filter == StatusFilter::Only(*status),
    }));
    options
}

fn status_form_options(selected: &str) -> Vec<SelectOption> {
    ArticleStatus::ALL
        .iter()
        .map(|status| SelectOption {
            value: status.as_str().to_string(),
            label: match status {
                ArticleStatus::Draft => "Draft",
                ArticleStatus::Published => "Published",
                ArticleStatus::Archived => "Archived",
            }
            .to_string(),
            selected: status.as_str() == selected,
        })
        .collect()
}

pub(crate) fn category_options(categories: &[Category], selected: &str) -> Vec<SelectOption> {
    categories
        .iter()
        .map(|category| SelectOption {
            value: category.id.clone(),
            label: category.name.clone(),
            selected: category.id == selected,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShareLinks {
    pub(crate) url: String,
    pub(crate) facebook: String,
    pub(crate) twitter: String,
    pub(crate) linkedin: String,
}

impl ShareLinks {
    pub(crate) fn new(url: &str, title: &str) -> Self {
        let encoded = encode(url);
        Self {
            url: url.to_string(),
            facebook: format!("https://www.facebook.com/sharer/sharer.php?u={encoded}"),
            twitter: format!(
                "https://twitter.com/intent/tweet?url={encoded}&text={}",
                encode(title)
            ),
            linkedin: format!("https://www.linkedin.com/sharing/share-offsite/?url={encoded}"),
        }
    }
}

/// Sidebar of detail pages.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecentContent {
    pub(crate) articles: Vec<ArticleCard>,
    pub(crate) podcasts: Vec<PodcastCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatusAction {
    pub(crate) value: &'static str,
    pub(crate) label: &'static str,
    pub(crate) current: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct ArticleView {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) sub_title: Option<String>,
    /// Editor HTML, rendered unescaped.
    pub(crate) content: String,
    pub(crate) author: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) tags: Vec<TagLink>,
    pub(crate) date: String,
    pub(crate) thumbnail: Option<String>,
    pub(crate) status_label: &'static str,
    pub(crate) published: bool,
    pub(crate) status_actions: Vec<StatusAction>,
}

impl From<&Article> for ArticleView {
    fn from(article: &Article) -> Self {
        let non_empty = |value: &Option<String>| value.clone().filter(|value| !value.is_empty());
        Self {
            id: article.id.clone(),
            title: article.title.clone(),
            sub_title: non_empty(&article.sub_title),
            content: article.content.clone(),
            author: non_empty(&article.author),
            category: article
                .category
                .as_ref()
                .map(|category| category.name().to_string())
                .filter(|name| !name.is_empty()),
            tags: tag_links("/article", &article.tags),
            date: card_date(article.date, article.created_at),
            thumbnail: non_empty(&article.thumbnail),
            status_label: article.status.label(),
            published: article.status == ArticleStatus::Published,
            status_actions: ArticleStatus::ALL
                .iter()
                .map(|status| StatusAction {
                    value: status.as_str(),
                    label: match status {
                        ArticleStatus::Draft => "مسودة",
                        ArticleStatus::Published => "نشر",
                        ArticleStatus::Archived => "أرشفة",
                    },
                    current: *status == article.status,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PodcastView {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) date: String,
    pub(crate) thumbnail: Option<String>,
    pub(crate) audio_url: Option<String>,
    pub(crate) video_url: Option<String>,
    pub(crate) youtube_id: Option<String>,
    pub(crate) spotify: Option<String>,
    pub(crate) apple_music: Option<String>,
    pub(crate) anghami: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) tags: Vec<TagLink>,
}

impl PodcastView {
    pub(crate) fn has_platform_links(&self) -> bool {
        self.spotify.is_some() || self.apple_music.is_some() || self.anghami.is_some()
    }
}

impl From<&Podcast> for PodcastView {
    fn from(podcast: &Podcast) -> Self {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        Self {
            id: podcast.id.clone(),
            title: podcast.title.clone(),
            description: non_empty(&podcast.description),
            date: card_date(podcast.created_at, None),
            thumbnail: non_empty(&podcast.thumbnail_url),
            audio_url: non_empty(&podcast.audio_url),
            video_url: non_empty(&podcast.video_url),
            youtube_id: non_empty(&podcast.youtube)
                .as_deref()
                .and_then(youtube_video_id),
            spotify: non_empty(&podcast.spotify),
            apple_music: non_empty(&podcast.apple_music),
            anghami: non_empty(&podcast.anghami),
            category: podcast
                .category
                .as_ref()
                .map(|category| category.name().to_string())
                .filter(|name| !name.is_empty()),
            tags: tag_links("/podcast", &podcast.tags),
        }
    }
}

/// SEO description of an article or podcast body.
pub(crate) fn page_description(html: &str) -> String {
    meta_description(html, META_DESCRIPTION_LEN)
}

#[derive(Template)]
#[template(path = "home.html")]
pub(crate) struct HomePage {
    pub(crate) layout: Layout,
    pub(crate) articles: Vec<ArticleCard>,
    pub(crate) podcasts: Vec<PodcastCard>,
}

#[derive(Template)]
#[template(path = "articles.html")]
pub(crate) struct ArticleListPage {
    pub(crate) layout: Layout,
    pub(crate) cards: Vec<ArticleCard>,
    pub(crate) pagination: PaginationView,
    pub(crate) search: String,
    /// Status selector, only filled for admin viewers.
    pub(crate) status_options: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "article_detail.html")]
pub(crate) struct ArticleDetailPage {
    pub(crate) layout: Layout,
    pub(crate) article: ArticleView,
    pub(crate) recent: RecentContent,
    pub(crate) share: ShareLinks,
    pub(crate) can_manage: bool,
}

#[derive(Template)]
#[template(path = "podcasts.html")]
pub(crate) struct PodcastListPage {
    pub(crate) layout: Layout,
    pub(crate) cards: Vec<PodcastCard>,
    pub(crate) pagination: PaginationView,
    pub(crate) search: String,
    pub(crate) categories: Vec<SelectOption>,
    pub(crate) all_categories: bool,
}

#[derive(Template)]
#[template(path = "podcast_detail.html")]
pub(crate) struct PodcastDetailPage {
    pub(crate) layout: Layout,
    pub(crate) podcast: PodcastView,
    pub(crate) recent: RecentContent,
    pub(crate) share: ShareLinks,
    pub(crate) can_manage: bool,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub(crate) struct ContactPage {
    pub(crate) layout: Layout,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub(crate) struct NotFoundPage {
    pub(crate) layout: Layout,
}

impl NotFoundPage {
    pub(crate) fn new() -> Self {
        Self {
            layout: Layout::public("الصفحة غير موجودة", ""),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub(crate) struct ErrorPage {
    pub(crate) layout: Layout,
    pub(crate) status: u16,
    pub(crate) message: String,
}

impl ErrorPage {
    pub(crate) fn new(status: u16, message: String) -> Self {
        Self {
            layout: Layout::public("حدث خطأ", ""),
            status,
            message,
        }
    }
}

#[derive(Template)]
#[template(path = "admin/login.html")]
pub(crate) struct LoginPage {
    pub(crate) layout: Layout,
    pub(crate) username: String,
    pub(crate) errors: FormErrors,
}

impl LoginPage {
    pub(crate) fn new(username: String, errors: FormErrors) -> Self {
        Self {
            layout: Layout::admin("Login").signed_in(false),
            username,
            errors,
        }
    }
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub(crate) struct DashboardPage {
    pub(crate) layout: Layout,
    pub(crate) username: String,
    pub(crate) errors: FormErrors,
    pub(crate) success: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/article_form.html")]
pub(crate) struct ArticleFormPage {
    pub(crate) layout: Layout,
    pub(crate) form: ArticleDraft,
    pub(crate) statuses: Vec<SelectOption>,
    pub(crate) errors: FormErrors,
    pub(crate) success: Option<String>,
    pub(crate) banner: Option<String>,
}

impl ArticleFormPage {
    pub(crate) fn new(form: ArticleDraft, errors: FormErrors) -> Self {
        Self {
            layout: Layout::admin("Upload Article"),
            statuses: status_form_options(&form.status),
            form,
            errors,
            success: None,
            banner: None,
        }
    }
}

#[derive(Template)]
#[template(path = "admin/article_edit.html")]
pub(crate) struct ArticleEditPage {
    pub(crate) layout: Layout,
    pub(crate) id: String,
    pub(crate) form: ArticleEdit,
    pub(crate) errors: FormErrors,
    pub(crate) banner: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/podcast_form.html")]
pub(crate) struct PodcastFormPage {
    pub(crate) layout: Layout,
    pub(crate) form: PodcastDraft,
    pub(crate) categories: Vec<SelectOption>,
    pub(crate) errors: FormErrors,
    pub(crate) success: Option<String>,
    pub(crate) banner: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/podcast_edit.html")]
pub(crate) struct PodcastEditPage {
    pub(crate) layout: Layout,
    pub(crate) id: String,
    pub(crate) form: PodcastEdit,
    pub(crate) categories: Vec<SelectOption>,
    pub(crate) errors: FormErrors,
    pub(crate) banner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AdminRow {
    pub(crate) id: String,
    pub(crate) username: String,
    pub(crate) is_super_admin: bool,
    pub(crate) is_self: bool,
}

pub(crate) fn admin_rows(admins: &[Admin], current_id: &str) -> Vec<AdminRow> {
    admins
        .iter()
        .map(|admin| AdminRow {
            id: admin.id.clone(),
            username: admin.username.clone(),
            is_super_admin: admin.is_super_admin,
            is_self: admin.id == current_id,
        })
        .collect()
}

#[derive(Template)]
#[template(path = "admin/manage_admins.html")]
pub(crate) struct ManageAdminsPage {
    pub(crate) layout: Layout,
    pub(crate) admins: Vec<AdminRow>,
    pub(crate) username: String,
    pub(crate) errors: FormErrors,
    pub(crate) success: Option<String>,
    pub(crate) banner: Option<String>,
}

#[cfg(test)]
mod tests {
    use popcast_client::Pagination;

    use super::{PaginationView, ShareLinks, status_filter_options};
    use crate::domain::listing::StatusFilter;

    fn pagination(current_page: u32, total_pages: u32, total_items: u64) -> Pagination {
        Pagination {
            current_page,
            total_pages,
            total_items,
            limit: 9,
        }
    }

    #[test]
    fn first_page_links_keep_search_and_drop_page_one() {
        let view = PaginationView::new(
            &pagination(1, 10, 90),
            "/article",
            &[("search", "بوب كاست"), ("status", "")],
        );

        let labels: Vec<&str> = view.links.iter().map(|link| link.label.as_str()).collect();
        assert_eq!(labels, ["1", "2", "3", "4", "5", "...", "10"]);
        assert_eq!(view.previous, None);
        assert_eq!(
            view.links[0].href,
            "/article?search=%D8%A8%D9%88%D8%A8+%D9%83%D8%A7%D8%B3%D8%AA"
        );
        assert!(view.links[5].is_gap());
        assert_eq!(
            view.next.as_deref(),
            Some("/article?search=%D8%A8%D9%88%D8%A8+%D9%83%D8%A7%D8%B3%D8%AA&page=2")
        );
        assert_eq!(view.caption, "عرض 1 - 9 من 90");
    }

    #[test]
    fn last_page_caption_is_clamped() {
        let view = PaginationView::new(&pagination(10, 10, 85), "/article", &[]);
        assert_eq!(view.next, None);
        assert_eq!(view.previous.as_deref(), Some("/article?page=9"));
        assert_eq!(view.caption, "عرض 82 - 85 من 85");
        assert!(view.links.last().is_some_and(|link| link.current));
    }

    #[test]
    fn single_page_hides_strip() {
        let view = PaginationView::new(&pagination(1, 1, 3), "/podcast", &[]);
        assert!(!view.is_visible());
    }

    #[test]
    fn share_links_are_url_encoded() {
        let share = ShareLinks::new("https://itspopcast.com/article/a1", "عنوان");
        assert_eq!(
            share.facebook,
            "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fitspopcast.com%2Farticle%2Fa1"
        );
        assert!(share.twitter.ends_with("&text=%D8%B9%D9%86%D9%88%D8%A7%D9%86"));
    }

    #[test]
    fn status_filter_marks_selection() {
        let options = status_filter_options(StatusFilter::All);
        assert_eq!(options.len(), 4);
        assert!(options[0].selected);
        assert!(options.iter().skip(1).all(|option| !option.selected));
    }
}
