//! Avatar blob storage.
//!
//! A thin, vendor-agnostic layer over object storage for user avatars:
//! - Upload with size and MIME validation
//! - Listing a user's objects and resolving the newest one to a URL
//! - Removal

pub mod config;
pub mod error;
pub mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{AvatarStore, ObjectInfo};
