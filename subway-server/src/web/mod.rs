//! Web layer for the subway line registry.
//!
//! Provides the HTTP endpoints for station and line management and the
//! section mutations on a line's chain.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
