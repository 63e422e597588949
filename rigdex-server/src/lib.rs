//! HTTP surface of the rigdex catalog.
//!
//! Every resource under `/api/v1` shares the same list, page, get, create,
//! replace, patch and delete contract; the handlers only differ in how they
//! shape requests and responses around the services in `rigdex-core`.

pub mod db;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::AppState;
pub use routes::create_app;
