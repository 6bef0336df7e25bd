//! Menu catalog adapters.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryMenuCatalog;
pub use postgres::PgMenuCatalog;
