//! Storage configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Default maximum avatar size: 2 MiB.
const DEFAULT_MAX_AVATAR_BYTES: u64 = 2 * 1024 * 1024;

/// Default presigned-URL lifetime in seconds.
const DEFAULT_URL_TTL_SECS: u64 = 3600;

/// Storage provider selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageProvider {
    /// S3-compatible object storage (AWS S3, Cloudflare R2, Supabase).
    S3 {
        /// Endpoint URL.
        endpoint: String,
        /// Bucket name.
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Region.
        region: String,
    },
    /// Local filesystem (development only).
    LocalFs {
        /// Root directory.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// Convenience constructor for local filesystem storage.
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Provider name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local_fs",
        }
    }
}

/// Avatar storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// The storage provider.
    pub provider: StorageProvider,
    /// Maximum accepted avatar size in bytes.
    #[serde(default = "default_max_avatar_bytes")]
    pub max_avatar_bytes: u64,
    /// MIME types accepted for upload.
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
    /// Lifetime of presigned read URLs, in seconds.
    #[serde(default = "default_url_ttl_secs")]
    pub url_ttl_secs: u64,
}

fn default_max_avatar_bytes() -> u64 {
    DEFAULT_MAX_AVATAR_BYTES
}

fn default_allowed_mime_types() -> Vec<String> {
    vec![
        "image/png".to_string(),
        "image/jpeg".to_string(),
        "image/webp".to_string(),
        "image/gif".to_string(),
    ]
}

fn default_url_ttl_secs() -> u64 {
    DEFAULT_URL_TTL_SECS
}

impl StorageConfig {
    /// Creates a config with defaults for the given provider.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            max_avatar_bytes: default_max_avatar_bytes(),
            allowed_mime_types: default_allowed_mime_types(),
            url_ttl_secs: default_url_ttl_secs(),
        }
    }

    /// Overrides the maximum avatar size.
    #[must_use]
    pub fn with_max_avatar_bytes(mut self, bytes: u64) -> Self {
        self.max_avatar_bytes = bytes;
        self
    }

    /// Returns true if the MIME type is accepted for upload.
    #[must_use]
    pub fn is_mime_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_mime_types.iter().any(|m| m == mime_type)
    }
}
