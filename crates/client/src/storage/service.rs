//! Avatar storage service over Apache OpenDAL.

use std::time::Duration;

use chrono::{DateTime, Utc};
use kasbook_shared::types::UserId;
use opendal::{Operator, services};
use tracing::debug;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Metadata about one stored object.
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    /// Full storage key.
    pub key: String,
    /// Last modification time, when the provider reports one.
    pub last_modified: Option<DateTime<Utc>>,
}

/// Blob storage for user avatars.
///
/// Avatars live under a per-user prefix (`{user_id}/{filename}`); the
/// displayed avatar is the most recently modified object under that prefix.
pub struct AvatarStore {
    operator: Operator,
    config: StorageConfig,
}

impl AvatarStore {
    /// Create a store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
        };

        Ok(operator)
    }

    /// Validate an upload against config constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the size or MIME type is not acceptable.
    pub fn validate_upload(&self, content_type: &str, size: u64) -> Result<(), StorageError> {
        if size > self.config.max_avatar_bytes {
            return Err(StorageError::file_too_large(
                size,
                self.config.max_avatar_bytes,
            ));
        }

        if !self.config.is_mime_type_allowed(content_type) {
            return Err(StorageError::invalid_mime_type(content_type));
        }

        Ok(())
    }

    /// Storage key for a user's avatar file.
    ///
    /// Format: `{user_id}/{sanitized_filename}`
    #[must_use]
    pub fn key_for(user_id: UserId, filename: &str) -> String {
        format!("{user_id}/{}", sanitize_filename(filename))
    }

    /// Uploads an avatar, replacing any object at the same key.
    ///
    /// Returns the storage key of the written object.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the write fails.
    pub async fn upload(
        &self,
        user_id: UserId,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        self.validate_upload(content_type, size)?;

        let key = Self::key_for(user_id, filename);
        self.operator.write(&key, bytes).await?;
        debug!(%key, size, "avatar uploaded");
        Ok(key)
    }

    /// Lists the objects stored under a user's prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<ObjectInfo>, StorageError> {
        let prefix = format!("{user_id}/");
        let entries = self.operator.list(&prefix).await?;

        let mut objects = Vec::with_capacity(entries.len());
        for entry in entries {
            let meta = entry.metadata();
            if meta.is_dir() {
                continue;
            }
            objects.push(ObjectInfo {
                key: entry.path().to_string(),
                last_modified: meta.last_modified(),
            });
        }
        Ok(objects)
    }

    /// Resolves a storage key to a presigned read URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot presign the key.
    pub async fn url_for(&self, key: &str) -> Result<String, StorageError> {
        let ttl = Duration::from_secs(self.config.url_ttl_secs);
        let presigned = self.operator.presign_read(key, ttl).await?;
        Ok(presigned.uri().to_string())
    }

    /// Resolves the user's current avatar to a presigned read URL.
    ///
    /// The current avatar is the most recently modified object under the
    /// user's prefix; returns `None` when the user has none.
    ///
    /// # Errors
    ///
    /// Returns an error if listing or presigning fails.
    pub async fn latest_avatar_url(&self, user_id: UserId) -> Result<Option<String>, StorageError> {
        let mut objects = self.list(user_id).await?;
        objects.sort_by_key(|o| o.last_modified);

        let Some(newest) = objects.pop() else {
            return Ok(None);
        };

        Ok(Some(self.url_for(&newest.key).await?))
    }

    /// Removes the given objects.
    ///
    /// # Errors
    ///
    /// Returns an error if any deletion fails.
    pub async fn remove(&self, keys: &[String]) -> Result<(), StorageError> {
        for key in keys {
            self.operator.delete(key).await?;
        }
        Ok(())
    }
}

/// Sanitize a filename for use in a storage key.
///
/// Only ASCII alphanumeric characters, dots, hyphens, and underscores
/// survive; everything else becomes an underscore.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
