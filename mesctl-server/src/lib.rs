//! mesctl-server: HTTP API and Postgres persistence for work orders
//!
//! Exposes the work-order service over axum routes and provides the
//! relational repository backend. Backend selection and wiring happen in
//! the binary (mesctl-cli); this crate only knows how to build each piece.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, PgWorkOrderRepository};
pub use http::{run_server, ApiError, AppState, ServerConfig};
