//! # Rigdex Core
//!
//! Storage and validation layer of the rigdex PC-component catalog.
//!
//! ## Overview
//!
//! - **Ports**: async repository traits per record shape, in
//!   [`database::ports`]
//! - **Adapters**: PostgreSQL (behind the `database` feature) and an
//!   in-process store sharing the same cascade and uniqueness behaviour
//! - **Services**: [`catalog`] applies the ordering of existence,
//!   reference, uniqueness and field checks and turns the outcome into
//!   [`error::Violation`]s
//! - **Wiring**: [`application::CatalogUnitOfWork`] bundles the ports for
//!   the HTTP layer
//!
//! ## Feature Flags
//!
//! - `database`: PostgreSQL adapters, pool setup and [`MIGRATOR`]
//! - `e2e`: repository tests against a live PostgreSQL server

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Route constants shared by the server and its tests
pub mod api_routes;

pub mod application;
pub mod catalog;
pub mod database;
pub mod error;

pub use application::CatalogUnitOfWork;
pub use error::{CatalogError, Result, Violation};

/// Embedded schema migrations from `rigdex-core/migrations`.
#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
