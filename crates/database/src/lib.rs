//! # QA API Database Crate
//!
//! This crate acts as a high-level, application-specific interface to the
//! PostgreSQL database that stores questions and answers.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** This crate encapsulates all database-specific logic. It
//!   provides a clean, abstract API to the rest of the application, hiding
//!   the underlying SQL and database implementation details.
//! - **Tagged errors:** "Row not found" is a distinct `DbError` variant, so
//!   callers can translate it to a 4xx while every other storage failure
//!   becomes a 500. No caller inspects error strings.
//! - **Asynchronous & Pooled:** All operations are asynchronous, and it uses
//!   a connection pool (`PgPool`) for concurrent database access.
//!
//! ## Public API
//!
//! - `connect`: The async function to establish the database connection pool.
//! - `run_migrations` / `reset_migrations`: Apply the embedded schema and
//!   seed migrations, or revert all of them (the destructive development
//!   reset).
//! - `DbRepository`: The main struct that holds the connection pool and
//!   provides all the high-level data access methods.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, reset_migrations, run_migrations};
pub use error::DbError;
pub use repository::{Answer, DbRepository, Question};
