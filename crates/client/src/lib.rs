//! Client-side adapters and session state for Kasbook.
//!
//! This crate hosts everything that talks to the hosted backend-as-a-service:
//! - `directory` - the identity-provider contract and its event stream
//! - `ledger` - the transaction/category repository contract
//! - `store` - the session store owning the `(identity, profile, loading)` triple
//! - `storage` - avatar blob storage over OpenDAL
//! - `token` - local persistence of session tokens
//! - `mem` - in-memory adapter implementations for tests and the console

pub mod directory;
pub mod ledger;
pub mod mem;
pub mod storage;
pub mod store;
pub mod token;

pub use directory::{DirectoryService, IdentityEvent, ProfileFilter, SignUpOutcome};
pub use ledger::LedgerRepository;
pub use store::{SessionSnapshot, SessionStore, SignUpError};
