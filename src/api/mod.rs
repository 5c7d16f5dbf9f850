//! HTTP API module for the salary apportionment engine.
//!
//! This module provides the REST endpoint that apportions a contract's
//! salary over a pay cycle.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ApportionmentRequest, ContractRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
