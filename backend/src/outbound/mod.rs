//! Outbound adapters implementing the repository ports.
//!
//! - **memory**: process-local tables, the default store and the one used
//!   by the HTTP tests
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//!
//! Adapters translate between domain types and storage representations.
//! They contain no business logic.

pub mod memory;
pub mod persistence;
