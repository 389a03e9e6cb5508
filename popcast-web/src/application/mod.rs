pub(crate) mod account_service;
pub(crate) mod article_service;
pub(crate) mod contact_service;
pub(crate) mod podcast_service;
