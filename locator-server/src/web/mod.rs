//! HTTP surface: JSON endpoints over the catalog and resolver.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
