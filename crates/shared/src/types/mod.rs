//! Common type definitions.

pub mod id;

pub use id::{CategoryId, TransactionId, UserId};
