pub mod app_state;
pub mod config;
pub mod errors;
pub mod extract;

pub use app_state::AppState;
pub use errors::{AppError, AppResult};
