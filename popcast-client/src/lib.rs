//! Client library for the PopCast backend REST API.
//!
//! `PopcastClient` wraps `reqwest` and maps the backend's camelCase,
//! `_id`-keyed JSON onto typed models. Protected
//! operations take the admin bearer token as an argument; the client itself
//! keeps no session state.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{PopcastClientError, PopcastClientResult};
pub use http_client::PopcastClient;
pub use models::{
    Admin, Article, ArticlePatch, ArticleStatus, Category, CategoryRef, ListQuery, LoginResponse,
    MediaFile, NewArticle, NewPodcast, Page, Pagination, Podcast, PodcastPatch, UploadedMedia,
};
