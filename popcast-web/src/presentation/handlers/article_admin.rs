use axum::{
    Form,
    extract::{Multipart, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use popcast_client::ArticleStatus;
use serde::Deserialize;

use crate::domain::article::{ArticleDraft, ArticleEdit};
use crate::domain::error::{DomainError, FormErrors};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::handlers::multipart::MultipartForm;
use crate::presentation::middleware::auth::AdminSession;
use crate::presentation::views::{ArticleEditPage, ArticleFormPage, Layout, render_page};

const CREATE_FAILED: &str = "Failed to upload article";
const UPDATE_FAILED: &str = "Failed to update article";

fn draft_from(form: &MultipartForm) -> ArticleDraft {
    ArticleDraft {
        title: form.text("title"),
        sub_title: form.text("subTitle"),
        content: form.text("content"),
        author: form.text("author"),
        category: form.text("category"),
        tags: form.text("tags"),
        status: form.text("status"),
        date: form.text("date"),
        thumbnail: None,
    }
}

pub(crate) async fn new_article_form(_session: AdminSession) -> AppResult<Html<String>> {
    let view = ArticleFormPage::new(ArticleDraft::blank(Utc::now()), FormErrors::new());
    Ok(render_page(&view)?)
}

pub(crate) async fn create_article(
    State(state): State<AppState>,
    session: AdminSession,
    multipart: Multipart,
) -> AppResult<Html<String>> {
    let mut form = MultipartForm::read(multipart).await?;
    let shown = draft_from(&form);
    let draft = ArticleDraft {
        thumbnail: form.take_file("thumbnail"),
        ..shown.clone()
    };

    let view = match state.articles.create(session.token(), draft).await {
        Ok(article) => {
            let success = if article.status == ArticleStatus::Published {
                "Article published successfully!"
            } else {
                "Article saved as draft successfully!"
            };
            ArticleFormPage {
                success: Some(success.to_string()),
                ..ArticleFormPage::new(ArticleDraft::blank(Utc::now()), FormErrors::new())
            }
        }
        Err(DomainError::Invalid(errors)) => ArticleFormPage::new(shown, errors),
        Err(DomainError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(err) => ArticleFormPage {
            banner: Some(err.banner(CREATE_FAILED)),
            ..ArticleFormPage::new(shown, FormErrors::new())
        },
    };
    Ok(render_page(&view)?)
}

fn edit_page(
    id: String,
    form: ArticleEdit,
    errors: FormErrors,
    banner: Option<String>,
) -> ArticleEditPage {
    ArticleEditPage {
        layout: Layout::admin("Edit Article"),
        id,
        form,
        errors,
        banner,
    }
}

pub(crate) async fn edit_article_form(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let article = state.articles.get(&id, Some(session.token())).await?;
    let view = edit_page(id, ArticleEdit::from_article(&article), FormErrors::new(), None);
    Ok(render_page(&view)?)
}

pub(crate) async fn update_article(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Response> {
    let mut form = MultipartForm::read(multipart).await?;
    let shown = ArticleEdit {
        title: form.text("title"),
        content: form.text("content"),
        author: form.text("author"),
        category: form.text("category"),
        tags: form.text("tags"),
        thumbnail: if form.is_checked("removeThumbnail") {
            String::new()
        } else {
            form.text("thumbnail")
        },
        new_thumbnail: None,
    };
    let edit = ArticleEdit {
        new_thumbnail: form.take_file("newThumbnail"),
        ..shown.clone()
    };

    let view = match state.articles.update(session.token(), &id, edit).await {
        Ok(_) => return Ok(Redirect::to(&format!("/article/{id}")).into_response()),
        Err(DomainError::Invalid(errors)) => edit_page(id, shown, errors, None),
        Err(DomainError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(err) => {
            let banner = err.banner(UPDATE_FAILED);
            edit_page(id, shown, FormErrors::new(), Some(banner))
        }
    };
    Ok(render_page(&view)?.into_response())
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusForm {
    pub(crate) status: String,
}

pub(crate) async fn change_article_status(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> AppResult<Redirect> {
    let status = form
        .status
        .parse::<ArticleStatus>()
        .map_err(AppError::BadRequest)?;
    state
        .articles
        .set_status(session.token(), &id, status)
        .await?;
    Ok(Redirect::to(&format!("/article/{id}")))
}

pub(crate) async fn delete_article(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    state.articles.delete(session.token(), &id).await?;
    Ok(Redirect::to("/article"))
}
