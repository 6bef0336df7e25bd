//! `gatehouse-core`: shared identifiers and the collaborator error model.
//!
//! Nothing in here performs IO; adapters and the auth core both build on it.

pub mod error;
pub mod id;

pub use error::{StoreError, StoreResult};
pub use id::{MenuId, UserId};
