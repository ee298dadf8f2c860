// ============================================================================
// API Handlers
// ============================================================================

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
};
use serde::Serialize;
use tracing::{info, warn};

use super::error::WebError;
use super::AppState;
use crate::export::{to_export_text, to_table, EXPORT_FILE_NAME, EXPORT_MIME};
use crate::record::{Category, Language, Record, Row};
use crate::schema::{RecordForm, MAX_DURATION_MONTHS, MIN_DURATION_MONTHS, MIN_TEAM_SIZE, SALARY_STEP};
use crate::store::RecordStore;

/// API Response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

/// One list entry (position is only valid until the next mutation)
#[derive(Serialize)]
pub struct EmployeeEntry {
    index: usize,
    category: Category,
    description: String,
    row: Row,
}

impl EmployeeEntry {
    fn new(index: usize, record: &Record) -> Self {
        Self {
            index,
            category: record.category(),
            description: record.describe(),
            row: record.to_row(),
        }
    }
}

#[derive(Serialize)]
pub struct RemoveResponse {
    removed: String,
    employees: Vec<EmployeeEntry>,
}

/// Choices and bounds for the form controls
#[derive(Serialize)]
pub struct FormOptions {
    categories: Vec<&'static str>,
    languages: Vec<&'static str>,
    salary_step: i64,
    team_size_min: i64,
    duration_min: i64,
    duration_max: i64,
}

fn entries(store: &RecordStore) -> Vec<EmployeeEntry> {
    store
        .all()
        .iter()
        .enumerate()
        .map(|(i, r)| EmployeeEntry::new(i, r))
        .collect()
}

/// GET /api/health - Health check
pub async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/options - Form selector values
pub async fn form_options() -> impl IntoResponse {
    Json(ApiResponse::ok(FormOptions {
        categories: Category::ALL.iter().map(|c| c.as_str()).collect(),
        languages: Language::ALL.iter().map(|l| l.as_str()).collect(),
        salary_step: SALARY_STEP,
        team_size_min: MIN_TEAM_SIZE,
        duration_min: MIN_DURATION_MONTHS,
        duration_max: MAX_DURATION_MONTHS,
    }))
}

/// GET /api/employees - Current list in display order
pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<EmployeeEntry>>>, WebError> {
    let store = state.lock_store()?;
    Ok(Json(ApiResponse::ok(entries(&store))))
}

/// POST /api/employees - Validate and add one record
pub async fn add_employee(
    State(state): State<AppState>,
    payload: Result<Json<RecordForm>, JsonRejection>,
) -> Result<impl IntoResponse, WebError> {
    let Json(form) = payload.map_err(|rejection| {
        warn!(status = %rejection.status(), "form body rejected");
        WebError::from(rejection)
    })?;

    let record = form.build().map_err(|errors| {
        warn!(category = %form.category, count = errors.len(), "form rejected");
        WebError::from(errors)
    })?;

    let mut store = state.lock_store()?;
    store.add(record)?;

    let index = store.len() - 1;
    let entry = store
        .get(index)
        .map(|r| EmployeeEntry::new(index, r))
        .ok_or_else(|| WebError::Internal("added record missing".to_string()))?;

    info!(index, "✅ Employee added: {}", entry.description);
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(entry))))
}

/// DELETE /api/employees/:index - Remove by current position
pub async fn remove_employee(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<ApiResponse<RemoveResponse>>, WebError> {
    let mut store = state.lock_store()?;
    let removed = store.remove_at(index)?;

    info!(index, "Employee removed: {}", removed.describe());
    Ok(Json(ApiResponse::ok(RemoveResponse {
        removed: removed.describe(),
        employees: entries(&store),
    })))
}

/// GET /api/export - employees.csv download
pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, WebError> {
    let text = {
        let store = state.lock_store()?;
        to_export_text(&to_table(&store))?
    };

    let disposition = format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME);
    Ok((
        [
            (header::CONTENT_TYPE, format!("{}; charset=utf-8", EXPORT_MIME)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        text,
    ))
}

/// GET / - Serve index.html
pub async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../../web/index.html"))
}
