//! HTTP API module for the Payslip Engine.
//!
//! This module provides the REST endpoints for maintaining employees and the
//! tax rates table, and for computing monthly payslips.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    EmployeeRequest, EmployeeUpdateRequest, MAX_DECIMAL_PLACES, PayslipQuery, TaxBracketRequest,
    TaxBracketUpdateRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
