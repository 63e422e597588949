//! HTTP request handlers organized by resource shape

pub mod dictionary;
pub mod fan_sizes;
pub mod linked;
pub mod pagination;
pub mod system;

use axum::http::{HeaderMap, HeaderValue, header::LOCATION};

pub use system::{health_handler, ping_handler};

/// Headers for a `201 Created` response pointing at the new row.
pub(crate) fn created(location: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(location) {
        headers.insert(LOCATION, value);
    }
    headers
}
