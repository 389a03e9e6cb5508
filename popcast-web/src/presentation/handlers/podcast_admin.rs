use axum::{
    extract::{Multipart, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::domain::error::{DomainError, FormErrors};
use crate::domain::podcast::{PodcastDraft, PodcastEdit};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::handlers::multipart::MultipartForm;
use crate::presentation::middleware::auth::AdminSession;
use crate::presentation::views::{
    Layout, PodcastEditPage, PodcastFormPage, category_options, render_page,
};

const CREATE_FAILED: &str = "Failed to upload podcast";
const UPDATE_FAILED: &str = "فشل في تحديث البودكاست";

async fn form_page(
    state: &AppState,
    form: PodcastDraft,
    errors: FormErrors,
) -> PodcastFormPage {
    let categories = state.podcasts.podcast_categories().await;
    PodcastFormPage {
        layout: Layout::admin("Upload Podcast"),
        categories: category_options(&categories, &form.category),
        form,
        errors,
        success: None,
        banner: None,
    }
}

pub(crate) async fn new_podcast_form(
    State(state): State<AppState>,
    _session: AdminSession,
) -> AppResult<Html<String>> {
    let view = form_page(&state, PodcastDraft::default(), FormErrors::new()).await;
    Ok(render_page(&view)?)
}

pub(crate) async fn create_podcast(
    State(state): State<AppState>,
    session: AdminSession,
    multipart: Multipart,
) -> AppResult<Html<String>> {
    let mut form = MultipartForm::read(multipart).await?;
    let shown = PodcastDraft {
        title: form.text("title"),
        description: form.text("description"),
        youtube: form.text("youtube"),
        spotify: form.text("spotify"),
        anghami: form.text("anghami"),
        apple_music: form.text("appleMusic"),
        category: form.text("category"),
        tags: form.text("tags"),
        thumbnail_url: form.text("thumbnailUrl"),
        audio: None,
        video: None,
    };
    let draft = PodcastDraft {
        audio: form.take_file("audio"),
        video: form.take_file("video"),
        ..shown.clone()
    };

    let view = match state.podcasts.create(session.token(), draft).await {
        Ok(_) => PodcastFormPage {
            success: Some("Podcast uploaded successfully!".to_string()),
            ..form_page(&state, PodcastDraft::default(), FormErrors::new()).await
        },
        Err(DomainError::Invalid(errors)) => form_page(&state, shown, errors).await,
        Err(DomainError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(err) => PodcastFormPage {
            banner: Some(err.banner(CREATE_FAILED)),
            ..form_page(&state, shown, FormErrors::new()).await
        },
    };
    Ok(render_page(&view)?)
}

async fn edit_page(
    state: &AppState,
    id: String,
    form: PodcastEdit,
    errors: FormErrors,
    banner: Option<String>,
) -> PodcastEditPage {
    let categories = state.podcasts.podcast_categories().await;
    PodcastEditPage {
        layout: Layout::admin("Edit Podcast"),
        categories: category_options(&categories, &form.category),
        id,
        form,
        errors,
        banner,
    }
}

pub(crate) async fn edit_podcast_form(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let podcast = state.podcasts.get(&id).await?;
    let view = edit_page(
        &state,
        id,
        PodcastEdit::from_podcast(&podcast),
        FormErrors::new(),
        None,
    )
    .await;
    Ok(render_page(&view)?)
}

pub(crate) async fn update_podcast(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Response> {
    let mut form = MultipartForm::read(multipart).await?;
    let shown = PodcastEdit {
        title: form.text("title"),
        description: form.text("description"),
        category: form.text("category"),
        thumbnail_url: form.text("thumbnailUrl"),
        spotify: form.text("spotify"),
        apple_music: form.text("appleMusic"),
        anghami: form.text("anghami"),
        youtube: form.text("youtube"),
        audio_url: form.text("audioUrl"),
        video_url: form.text("videoUrl"),
        tags: form.text("tags"),
        new_thumbnail: None,
    };
    let edit = PodcastEdit {
        new_thumbnail: form.take_file("newThumbnail"),
        ..shown.clone()
    };

    let view = match state.podcasts.update(session.token(), &id, edit).await {
        Ok(_) => return Ok(Redirect::to(&format!("/podcast/{id}")).into_response()),
        Err(DomainError::Invalid(errors)) => edit_page(&state, id, shown, errors, None).await,
        Err(DomainError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(err) => {
            let banner = err.banner(UPDATE_FAILED);
            edit_page(&state, id, shown, FormErrors::new(), Some(banner)).await
        }
    };
    Ok(render_page(&view)?.into_response())
}

pub(crate) async fn delete_podcast(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    state.podcasts.delete(session.token(), &id).await?;
    Ok(Redirect::to("/podcast"))
}
