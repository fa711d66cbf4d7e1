//! Repository implementations for database access
//!
//! Conflicts are handled via database constraints, not check-then-insert;
//! the service-level pre-check is a courtesy, the constraint is the
//! guarantee.

pub mod work_orders;

pub use work_orders::PgWorkOrderRepository;
