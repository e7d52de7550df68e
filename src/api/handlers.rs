//! HTTP request handlers for the Payslip Engine API.
//!
//! This module contains the router and the handler functions for every
//! endpoint: employee and tax-rate maintenance, and payslip computation.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::Redirect,
    routing::get,
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::calculation::{check_coverage, compute_payslip};
use crate::error::EngineError;
use crate::models::{Employee, Payslip, TaxBracket};

use super::request::{
    EmployeeRequest, EmployeeUpdateRequest, PayslipQuery, TaxBracketRequest,
    TaxBracketUpdateRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

type ApiResult<T> = Result<(StatusCode, Json<T>), ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/health") }))
        .route("/health", get(health_handler))
        .route(
            "/employees",
            get(list_employees_handler).post(create_employee_handler),
        )
        .route(
            "/employees/:id",
            get(get_employee_handler)
                .put(update_employee_handler)
                .delete(delete_employee_handler),
        )
        .route(
            "/tax_rates",
            get(list_tax_rates_handler)
                .post(create_tax_rate_handler)
                .delete(delete_all_tax_rates_handler),
        )
        .route("/tax_rates/coverage", get(tax_rate_coverage_handler))
        .route(
            "/tax_rates/:id",
            get(get_tax_rate_handler)
                .put(update_tax_rate_handler)
                .delete(delete_tax_rate_handler),
        )
        .route("/payslip/:id", get(payslip_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for GET /payslip/:id?month=M&year=Y.
///
/// Looks up the employee, resolves the tax bracket and returns the payslip.
async fn payslip_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    query: Result<Query<PayslipQuery>, QueryRejection>,
) -> ApiResult<Payslip> {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    let id = parse_id(path)?;
    let period = match query {
        Ok(Query(query)) => query.into_period().map_err(|err| {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid pay period");
            ApiErrorResponse::from(err)
        })?,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid payslip query"
            );
            return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            )));
        }
    };

    info!(
        correlation_id = %correlation_id,
        employee_id = id,
        month = period.month(),
        year = period.year(),
        "Processing payslip request"
    );

    match compute_payslip(state.store(), id, period) {
        Ok(payslip) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = id,
                gross_income = payslip.gross_income,
                income_tax = payslip.income_tax,
                "Payslip computed"
            );
            Ok((StatusCode::OK, Json(payslip)))
        }
        Err(err) => Err(log_failure(correlation_id, err)),
    }
}

/// Handler for POST /employees.
async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> ApiResult<Employee> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(payload, correlation_id)?;
    let new = request
        .validate()
        .map_err(|err| log_failure(correlation_id, err))?;

    let employee = state.store().create_employee(new);
    info!(correlation_id = %correlation_id, employee_id = employee.id, "Created employee");
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Handler for GET /employees.
async fn list_employees_handler(State(state): State<AppState>) -> Json<Vec<Employee>> {
    Json(state.store().list_employees())
}

/// Handler for GET /employees/:id.
async fn get_employee_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Employee> {
    let id = parse_id(path)?;
    let employee = state.store().get_employee(id)?;
    Ok((StatusCode::OK, Json(employee)))
}

/// Handler for PUT /employees/:id.
async fn update_employee_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<EmployeeUpdateRequest>, JsonRejection>,
) -> ApiResult<Employee> {
    let correlation_id = Uuid::new_v4();
    let id = parse_id(path)?;
    let changes = parse_json(payload, correlation_id)?
        .validate()
        .map_err(|err| log_failure(correlation_id, err))?;

    let employee = state
        .store()
        .update_employee(id, changes)
        .map_err(|err| log_failure(correlation_id, err))?;
    Ok((StatusCode::OK, Json(employee)))
}

/// Handler for DELETE /employees/:id.
async fn delete_employee_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Employee> {
    let id = parse_id(path)?;
    let employee = state.store().delete_employee(id)?;
    Ok((StatusCode::OK, Json(employee)))
}

/// Handler for POST /tax_rates.
async fn create_tax_rate_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaxBracketRequest>, JsonRejection>,
) -> ApiResult<TaxBracket> {
    let correlation_id = Uuid::new_v4();
    let new = parse_json(payload, correlation_id)?
        .validate()
        .map_err(|err| log_failure(correlation_id, err))?;

    let bracket = state
        .store()
        .create_tax_bracket(new)
        .map_err(|err| log_failure(correlation_id, err))?;
    info!(correlation_id = %correlation_id, bracket_id = bracket.id, "Created tax rate");
    Ok((StatusCode::CREATED, Json(bracket)))
}

/// Handler for GET /tax_rates.
///
/// Returns the table ordered by bottom floor.
async fn list_tax_rates_handler(State(state): State<AppState>) -> Json<Vec<TaxBracket>> {
    Json(state.store().list_tax_brackets())
}

/// Handler for GET /tax_rates/coverage.
///
/// Reports overlaps and gaps in the live tax table.
async fn tax_rate_coverage_handler(State(state): State<AppState>) -> Json<Value> {
    let issues = check_coverage(&state.store().list_tax_brackets());
    if !issues.is_empty() {
        warn!(issues = issues.len(), "Tax table coverage check found problems");
    }
    Json(json!({
        "consistent": issues.is_empty(),
        "issues": issues,
    }))
}

/// Handler for GET /tax_rates/:id.
async fn get_tax_rate_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<TaxBracket> {
    let id = parse_id(path)?;
    let bracket = state.store().get_tax_bracket(id)?;
    Ok((StatusCode::OK, Json(bracket)))
}

/// Handler for PUT /tax_rates/:id.
async fn update_tax_rate_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<TaxBracketUpdateRequest>, JsonRejection>,
) -> ApiResult<TaxBracket> {
    let correlation_id = Uuid::new_v4();
    let id = parse_id(path)?;
    let changes = parse_json(payload, correlation_id)?
        .validate()
        .map_err(|err| log_failure(correlation_id, err))?;

    let bracket = state
        .store()
        .update_tax_bracket(id, changes)
        .map_err(|err| log_failure(correlation_id, err))?;
    Ok((StatusCode::OK, Json(bracket)))
}

/// Handler for DELETE /tax_rates.
async fn delete_all_tax_rates_handler(State(state): State<AppState>) -> Json<Value> {
    let deleted = state.store().delete_all_tax_brackets();
    warn!(deleted, "Entire tax rates table deleted");
    Json(json!({ "deleted": deleted }))
}

/// Handler for DELETE /tax_rates/:id.
async fn delete_tax_rate_handler(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<TaxBracket> {
    let id = parse_id(path)?;
    let bracket = state.store().delete_tax_bracket(id)?;
    Ok((StatusCode::OK, Json(bracket)))
}

/// Extracts a positive row id from the path.
fn parse_id(path: Result<Path<u64>, PathRejection>) -> Result<u64, ApiErrorResponse> {
    match path {
        Ok(Path(id)) if id > 0 => Ok(id),
        Ok(Path(id)) => Err(ApiErrorResponse::bad_request(ApiError::invalid_id(
            id.to_string(),
        ))),
        Err(rejection) => Err(ApiErrorResponse::bad_request(ApiError::invalid_id(
            rejection.body_text(),
        ))),
    }
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn parse_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Logs a failed request at a level matching the error and converts it.
///
/// Tax table consistency failures are operator problems and log as errors;
/// everything else is a caller problem and logs as a warning.
fn log_failure(correlation_id: Uuid, err: EngineError) -> ApiErrorResponse {
    if err.is_data_integrity() {
        error!(
            correlation_id = %correlation_id,
            error = %err,
            "Request failed on tax table consistency"
        );
    } else {
        warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    }
    err.into()
}
