use std::collections::HashMap;

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use popcast_client::MediaFile;

use crate::presentation::app_error::AppError;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Text fields and files of a `multipart/form-data` body.
///
/// File inputs left empty by the browser (no file name or no bytes) are dropped.
#[derive(Debug, Default)]
pub(crate) struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, MediaFile>,
}

fn bad_request(err: MultipartError) -> AppError {
    AppError::BadRequest(err.body_text())
}

impl MultipartForm {
    pub(crate) async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or(FALLBACK_CONTENT_TYPE)
                        .to_string();
                    let bytes = field.bytes().await.map_err(bad_request)?;
                    if file_name.is_empty() || bytes.is_empty() {
                        continue;
                    }
                    form.files.insert(
                        name,
                        MediaFile {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        },
                    );
                }
                None => {
                    let value = field.text().await.map_err(bad_request)?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// Value of a text field, empty when absent.
    pub(crate) fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    pub(crate) fn is_checked(&self, name: &str) -> bool {
        self.fields
            .get(name)
            .is_some_and(|value| matches!(value.as_str(), "on" | "true" | "1"))
    }

    pub(crate) fn take_file(&mut self, name: &str) -> Option<MediaFile> {
        self.files.remove(name)
    }
}
