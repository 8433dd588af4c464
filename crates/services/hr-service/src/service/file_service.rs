//! Image upload to public object storage.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use common::{AppError, AppResult};
use domain::{has_allowed_extension, DEFAULT_CONTENT_TYPE, MAX_UPLOAD_BYTES};

use crate::infra::ObjectStorage;

/// One uploaded multipart part.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

#[async_trait]
pub trait FileService: Send + Sync {
    /// Store the file and return its public URI
    async fn upload(&self, file: UploadedFile) -> AppResult<String>;
}

pub struct Uploader {
    storage: Arc<dyn ObjectStorage>,
}

impl Uploader {
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }
}

/// Last path component of a client-supplied file name.
fn base_name(file_name: &str) -> &str {
    file_name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(file_name)
        .trim()
}

fn object_key(timestamp: i64, file_name: &str) -> String {
    format!("{}-{}", timestamp, file_name)
}

#[async_trait]
impl FileService for Uploader {
    async fn upload(&self, file: UploadedFile) -> AppResult<String> {
        let file_name = base_name(&file.file_name);
        if file_name.is_empty() {
            return Err(AppError::field("file", "File name is required"));
        }
        if !has_allowed_extension(file_name) {
            return Err(AppError::field("file", "Only jpg, jpeg and png files are allowed"));
        }
        if file.data.is_empty() {
            return Err(AppError::field("file", "File is empty"));
        }
        if file.data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::field("file", "File must not exceed 100 KiB"));
        }

        let content_type = file
            .content_type
            .as_deref()
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let key = object_key(Utc::now().timestamp(), file_name);

        let stored = self.storage.put(&key, file.data, &content_type).await?;
        Ok(stored.uri)
    }
}
