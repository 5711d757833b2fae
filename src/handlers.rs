use crate::errors::AppError;
use crate::issues::{add_issue, list_issues, toggle_issue, update_issue};
use crate::models::{
    ChangesResponse, CreatedResponse, DateQuery, Issue, IssueUpdate, NewIssue, NewProject,
    NewResource, Project, ReportSnapshot, ReportView, Resource,
};
use crate::projects::{add_project, delete_project, list_projects};
use crate::reports::{get_report, list_reports, save_report};
use crate::resources::{add_resource, list_resources};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde_json::json;

pub async fn get_reports(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Response, AppError> {
    let conn = state.db.lock().await;
    match non_empty(query.date) {
        Some(date) => Ok(match get_report(&conn, &date)? {
            Some(report) => Json(report).into_response(),
            None => Json(json!({})).into_response(),
        }),
        None => Ok(Json(list_reports(&conn)?).into_response()),
    }
}

pub async fn post_report(
    State(state): State<AppState>,
    Json(snapshot): Json<ReportSnapshot>,
) -> Result<Json<CreatedResponse>, AppError> {
    let mut conn = state.db.lock().await;
    let outcome = save_report(&mut conn, &snapshot)?;

    Ok(Json(CreatedResponse {
        message: outcome.message().to_string(),
        id: outcome.id(),
    }))
}

pub async fn get_report_view(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Response, AppError> {
    let date = parse_date(&date)?;
    let conn = state.db.lock().await;
    Ok(match get_report(&conn, &date)? {
        Some(report) => Json(ReportView::from(&report)).into_response(),
        None => Json(json!({})).into_response(),
    })
}

pub async fn get_issues(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<Issue>>, AppError> {
    let date = non_empty(query.date);
    let conn = state.db.lock().await;
    Ok(Json(list_issues(&conn, date.as_deref())?))
}

pub async fn post_issue(
    State(state): State<AppState>,
    Json(issue): Json<NewIssue>,
) -> Result<Json<CreatedResponse>, AppError> {
    let conn = state.db.lock().await;
    let id = add_issue(&conn, &issue)?;
    Ok(Json(CreatedResponse {
        message: "Issue created".to_string(),
        id,
    }))
}

pub async fn put_issue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<IssueUpdate>,
) -> Result<Json<ChangesResponse>, AppError> {
    let conn = state.db.lock().await;
    let changes = match update.solution.as_deref() {
        Some(solution) => update_issue(&conn, id, update.is_solved, Some(solution))?,
        None => toggle_issue(&conn, id, update.is_solved)?,
    };
    Ok(Json(ChangesResponse {
        message: "Issue updated".to_string(),
        changes,
    }))
}

pub async fn get_resources(State(state): State<AppState>) -> Result<Json<Vec<Resource>>, AppError> {
    let conn = state.db.lock().await;
    Ok(Json(list_resources(&conn)?))
}

pub async fn post_resource(
    State(state): State<AppState>,
    Json(resource): Json<NewResource>,
) -> Result<Json<CreatedResponse>, AppError> {
    let conn = state.db.lock().await;
    let id = add_resource(&conn, &resource)?;
    Ok(Json(CreatedResponse {
        message: "Resource added".to_string(),
        id,
    }))
}

pub async fn get_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, AppError> {
    let conn = state.db.lock().await;
    Ok(Json(list_projects(&conn)?))
}

pub async fn post_project(
    State(state): State<AppState>,
    Json(project): Json<NewProject>,
) -> Result<Json<CreatedResponse>, AppError> {
    let conn = state.db.lock().await;
    let id = add_project(&conn, &project)?;
    Ok(Json(CreatedResponse {
        message: "Project created".to_string(),
        id,
    }))
}

pub async fn remove_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ChangesResponse>, AppError> {
    let conn = state.db.lock().await;
    let changes = delete_project(&conn, id)?;
    Ok(Json(ChangesResponse {
        message: "Project deleted".to_string(),
        changes,
    }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_date(value: &str) -> Result<String, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|_| AppError::bad_request(format!("invalid date '{value}', expected YYYY-MM-DD")))
}
