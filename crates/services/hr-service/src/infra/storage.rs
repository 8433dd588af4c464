//! Public object storage for uploaded images.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{config::Credentials, primitives::ByteStream, types::ObjectCannedAcl};

use common::{AppError, AppResult, StorageConfig};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// An object written to storage and the public URI it is served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub uri: String,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Write a publicly readable object.
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> AppResult<StoredObject>;
}

/// S3-compatible backend.
pub struct S3Storage {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
    public_url: Option<String>,
}

impl S3Storage {
    pub fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "hr-service",
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            region: config.region.clone(),
            public_url: config.public_url.clone(),
        }
    }

    fn public_uri(&self, key: &str) -> String {
        public_uri(self.public_url.as_deref(), &self.bucket, &self.region, key)
    }
}

fn public_uri(public_url: Option<&str>, bucket: &str, region: &str, key: &str) -> String {
    match public_url {
        Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
        None => format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key),
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> AppResult<StoredObject> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("S3 upload failed: {}", e)))?;

        tracing::info!(bucket = %self.bucket, key, "Object uploaded");

        Ok(StoredObject {
            key: key.to_string(),
            uri: self.public_uri(key),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_uri_default_host() {
        assert_eq!(
            public_uri(None, "hr-files", "ap-southeast-1", "1700000000-a.png"),
            "https://hr-files.s3.ap-southeast-1.amazonaws.com/1700000000-a.png"
        );
    }

    #[test]
    fn test_public_uri_custom_base() {
        assert_eq!(
            public_uri(Some("http://localhost:9000/hr-files/"), "hr-files", "us-east-1", "k.jpg"),
            "http://localhost:9000/hr-files/k.jpg"
        );
    }
}
