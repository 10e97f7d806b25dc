//! HTTP API module for the rate card preview service.
//!
//! This module exposes the engine over two endpoints: one previews the
//! charges a contract's rate card produces for a booking, the other turns
//! previewed charges into ledger billing items.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BillingRequest, InstantiationRequest};
pub use response::{ApiError, BillingResponse, InstantiationResponse};
pub use state::AppState;
