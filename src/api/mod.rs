//! HTTP API module for the Retention Engine.
//!
//! This module provides the REST endpoint that accepts roster and exit
//! feeds and returns department retention statistics.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{RetentionRequest, YearInput};
pub use response::{ApiError, ApiErrorResponse, RetentionReport};
pub use state::AppState;
