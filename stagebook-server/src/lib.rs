//! stagebook-server: HTTP service for venue, artist and show bookings
//!
//! Keeps a catalog of venues and artists, books shows that pair the two at
//! a start time, and splits each record's shows into past and upcoming
//! around the current instant.
//!
//! Layers, bottom up:
//! - [`models`]: records, form parsing and validation
//! - [`db`]: the [`Store`](db::Store) seam with Postgres and in-memory backends
//! - [`booking`]: partitioning, area grouping and result shaping
//! - [`http`]: axum routes, extractors and error mapping

pub mod booking;
pub mod db;
pub mod http;
pub mod models;

pub use booking::{Clock, FixedClock, SystemClock};
pub use db::{DbError, MemoryStore, PgStore, Store};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
