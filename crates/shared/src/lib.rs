//! Shared types, errors, and configuration for Kasbook.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Profile, identity, and role types
//! - Application-wide error taxonomy
//! - Configuration management

pub mod config;
pub mod error;
pub mod profile;
pub mod types;

pub use config::AppConfig;
pub use error::{AuthError, DataError};
pub use profile::{Identity, Profile, Role, UserStatus};
