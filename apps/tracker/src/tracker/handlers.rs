//! Axum route handlers for the tracker page and the JSON API.

use askama::Template;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Local;
use tracing::warn;

use crate::errors::AppError;
use crate::models::application::ApplicationRecord;
use crate::store::RecordStore;
use crate::state::AppState;
use crate::tracker::form::read_application_form;
use crate::tracker::grouping::{group_by_date, DateGroup};
use crate::tracker::submission::submit;
use crate::tracker::trend::{daily_counts, DailyCount, TrendChart};
use crate::ui::TrackerPage;

// ────────────────────────────────────────────────────────────────────────────
// Page
// ────────────────────────────────────────────────────────────────────────────

/// What the form section shows on this render.
#[derive(Default)]
struct FormEcho {
    company: String,
    job_description: String,
    error: String,
    saved: bool,
}

fn render_page(store: &RecordStore, echo: FormEcho) -> Result<Html<String>, AppError> {
    let page = TrackerPage {
        company: echo.company,
        job_description: echo.job_description,
        error: echo.error,
        saved: echo.saved,
        groups: group_by_date(store.records()),
        chart: TrendChart::from_records(store.records()),
    };
    Ok(Html(page.render()?))
}

/// GET /
pub async fn handle_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let store = state.lock_store()?;
    render_page(&store, FormEcho::default())
}

/// POST /
///
/// On a validation failure the page comes back with status 422, the message
/// inline and the typed text kept. Nothing is written in that case.
pub async fn handle_page_submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = read_application_form(multipart).await?;
    let company = form.company.clone();
    let job_description = form.job_description.clone();

    let mut store = state.lock_store()?;
    match form.validate() {
        Ok(application) => {
            submit(&mut store, application, Local::now().naive_local())?;
            let echo = FormEcho {
                saved: true,
                ..FormEcho::default()
            };
            Ok(render_page(&store, echo)?.into_response())
        }
        Err(e) => {
            warn!("Rejected application form: {e}");
            let echo = FormEcho {
                company,
                job_description,
                error: e.to_string(),
                saved: false,
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, render_page(&store, echo)?).into_response())
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// JSON API
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/applications
pub async fn handle_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApplicationRecord>>, AppError> {
    let store = state.lock_store()?;
    Ok(Json(store.records().to_vec()))
}

/// POST /api/v1/applications
pub async fn handle_create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApplicationRecord>), AppError> {
    let form = read_application_form(multipart).await?;
    let application = form.validate().map_err(|e| {
        warn!("Rejected application form: {e}");
        AppError::from(e)
    })?;

    let mut store = state.lock_store()?;
    let record = submit(&mut store, application, Local::now().naive_local())?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/applications/by-date
pub async fn handle_by_date(
    State(state): State<AppState>,
) -> Result<Json<Vec<DateGroup>>, AppError> {
    let store = state.lock_store()?;
    Ok(Json(group_by_date(store.records())))
}

/// GET /api/v1/applications/trend
pub async fn handle_trend(
    State(state): State<AppState>,
) -> Result<Json<Vec<DailyCount>>, AppError> {
    let store = state.lock_store()?;
    Ok(Json(daily_counts(store.records())))
}
