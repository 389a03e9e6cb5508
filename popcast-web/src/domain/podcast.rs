use popcast_client::{MediaFile, NewPodcast, Podcast, PodcastPatch};

use super::article::parse_tags;
use super::error::{FORM_FIELD, FormErrors};
use super::media::MediaKind;

/// Raw fields of the podcast upload form.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PodcastDraft {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) youtube: String,
    pub(crate) spotify: String,
    pub(crate) anghami: String,
    pub(crate) apple_music: String,
    pub(crate) category: String,
    pub(crate) tags: String,
    pub(crate) thumbnail_url: String,
    pub(crate) audio: Option<MediaFile>,
    pub(crate) video: Option<MediaFile>,
}

impl PodcastDraft {
    pub(crate) fn validate(self) -> Result<NewPodcast, FormErrors> {
        let mut errors = FormErrors::new();

        if self.title.trim().is_empty() {
            errors.insert("title", "Title is required");
        }
        if let Some(audio) = &self.audio
            && !MediaKind::Audio.accepts(&audio.content_type)
        {
            errors.insert("audio", "Please select a valid audio file");
        }
        if let Some(video) = &self.video
            && !MediaKind::Video.accepts(&video.content_type)
        {
            errors.insert("video", "Please select a valid video file");
        }
        if self.audio.is_none() && self.video.is_none() {
            errors.insert(FORM_FIELD, "Please upload at least one audio or video file");
        }

        errors.into_result(NewPodcast {
            title: self.title.trim().to_string(),
            description: self.description,
            youtube: self.youtube.trim().to_string(),
            spotify: self.spotify.trim().to_string(),
            anghami: self.anghami.trim().to_string(),
            apple_music: self.apple_music.trim().to_string(),
            category: self.category.trim().to_string(),
            tags: self.tags,
            thumbnail_url: self.thumbnail_url.trim().to_string(),
            audio: self.audio,
            video: self.video,
        })
    }
}

/// Raw fields of the podcast edit form.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PodcastEdit {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) category: String,
    pub(crate) thumbnail_url: String,
    pub(crate) spotify: String,
    pub(crate) apple_music: String,
    pub(crate) anghami: String,
    pub(crate) youtube: String,
    pub(crate) audio_url: String,
    pub(crate) video_url: String,
    pub(crate) tags: String,
    pub(crate) new_thumbnail: Option<MediaFile>,
}

fn optional(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl PodcastEdit {
    pub(crate) fn from_podcast(podcast: &Podcast) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            title: podcast.title.clone(),
            description: text(&podcast.description),
            category: podcast
                .category
                .as_ref()
                .map(|category| category.form_value().to_string())
                .unwrap_or_default(),
            thumbnail_url: text(&podcast.thumbnail_url),
            spotify: text(&podcast.spotify),
            apple_music: text(&podcast.apple_music),
            anghami: text(&podcast.anghami),
            youtube: text(&podcast.youtube),
            audio_url: text(&podcast.audio_url),
            video_url: text(&podcast.video_url),
            tags: podcast.tags.join(", "),
            new_thumbnail: None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        if self.title.trim().is_empty() {
            errors.insert("title", "الرجاء إدخال عنوان البودكاست");
        }
        if let Some(file) = &self.new_thumbnail
            && !MediaKind::Image.accepts(&file.content_type)
        {
            errors.insert("thumbnail", "Please select a valid image file");
        }
        errors.into_result(())
    }

    /// Blank optional fields are left out of the patch.
    pub(crate) fn into_patch(self, uploaded_thumbnail: Option<String>) -> PodcastPatch {
        PodcastPatch {
            title: self.title.trim().to_string(),
            description: optional(self.description),
            category: optional(self.category),
            thumbnail_url: uploaded_thumbnail.or_else(|| optional(self.thumbnail_url)),
            spotify: optional(self.spotify),
            apple_music: optional(self.apple_music),
            anghami: optional(self.anghami),
            youtube: optional(self.youtube),
            audio_url: optional(self.audio_url),
            video_url: optional(self.video_url),
            tags: parse_tags(&self.tags),
        }
    }
}
