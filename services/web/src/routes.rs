use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect};
use axum::routing::get;
use axum::{Form, Json, Router};
use dot_matrix::consultants::{
    AssignConsultant, AssignmentForm, Attributes, Consultant, ConsultantForm, CreateConsultant,
};
use dot_matrix::error::AppError;
use dot_matrix::store::{Entity, EntityId, RepositoryError};
use serde_json::json;
use tracing::info;

use crate::infra::{required_params, AppState};
use crate::views;

/// Router for the roster pages plus the operational endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/consultants", get(list_consultants))
        .route("/consultant", get(new_consultant).post(create_consultant))
        .route("/consultant/:id", get(show_consultant))
        .route(
            "/consultant/:id/assignments",
            axum::routing::post(assign_consultant),
        )
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
}

pub(crate) async fn index() -> Html<String> {
    Html(views::greeting())
}

pub(crate) async fn list_consultants(
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let consultants = state.consultants()?.all()?;
    Ok(Html(views::consultant_list(&consultants)))
}

pub(crate) async fn new_consultant() -> Html<String> {
    Html(views::consultant_form())
}

pub(crate) async fn show_consultant(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&raw_id)?;
    let consultant = state
        .consultants()?
        .find(id)?
        .ok_or_else(|| AppError::not_found(Consultant::KIND, id))?;
    Ok(Html(views::consultant_detail(&consultant)))
}

pub(crate) async fn create_consultant(
    State(state): State<AppState>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let values = required_params(&params, ConsultantForm::FIELDS)?;
    let form = ConsultantForm::from_attributes(values)?;

    let consultant = CreateConsultant::new(form, state.consultants()?).run()?;
    let id = consultant.id().ok_or(RepositoryError::Unsaved {
        kind: Consultant::KIND,
    })?;

    info!(%id, "redirecting to new consultant");
    Ok(Redirect::to(&format!("/consultant/{id}")))
}

pub(crate) async fn assign_consultant(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let id = parse_id(&raw_id)?;
    let values = required_params(&params, AssignmentForm::FIELDS)?;
    let form = AssignmentForm::from_attributes(values)?;

    AssignConsultant::new(id, form, state.consultants()?).run()?;
    Ok(Redirect::to(&format!("/consultant/{id}")))
}

fn parse_id(raw: &str) -> Result<EntityId, AppError> {
    raw.parse()
        .map_err(|_| AppError::not_found(Consultant::KIND, raw))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    if state.is_ready() {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        )
    }
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.render_metrics(),
    )
}
