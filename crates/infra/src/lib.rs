//! Infrastructure adapters: user directory and menu catalog implementations.

pub mod catalog;
pub mod directory;
pub mod seed;

pub use catalog::{InMemoryMenuCatalog, PgMenuCatalog};
pub use directory::InMemoryUserDirectory;
pub use seed::{Seed, SeedError};
