//! HTTP API module for the staffing match engine.
//!
//! This module exposes requirement listing, candidate matching, the
//! revenue dashboard and the nationality import over REST.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::DashboardQuery;
pub use response::{ApiError, ApiErrorResponse, ApiSuccess, DataBody, status_for};
pub use state::{AppState, Clock};
