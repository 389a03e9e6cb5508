pub(crate) mod account;
pub(crate) mod article;
pub(crate) mod contact;
pub(crate) mod error;
pub(crate) mod html;
pub(crate) mod listing;
pub(crate) mod media;
pub(crate) mod pagination;
pub(crate) mod podcast;
