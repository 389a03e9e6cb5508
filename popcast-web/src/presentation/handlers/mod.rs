pub(crate) mod admin;
pub(crate) mod article_admin;
pub(crate) mod articles;
pub(crate) mod auth;
pub(crate) mod contact;
pub(crate) mod home;
pub(crate) mod media;
pub(crate) mod multipart;
pub(crate) mod podcast_admin;
pub(crate) mod podcasts;
