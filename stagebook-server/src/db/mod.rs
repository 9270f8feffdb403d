//! Database layer - schema and record stores
//!
//! # Design Principles
//!
//! - Handlers talk to a `Store` trait object, never a global session
//! - Listings use JOINs for counts and display fields - no N+1 queries
//! - Referential integrity is the storage engine's job
//! - Each write is its own transaction

pub mod memory;
pub mod postgres;
pub mod schema;
pub mod seed;
pub mod store;

pub use memory::MemoryStore;
pub use postgres::{PgStore, DEFAULT_MAX_CONNECTIONS};
pub use store::{DbError, Store};
