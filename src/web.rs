use std::sync::{Mutex, MutexGuard};

use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::assignment::{commit_pair, AssignmentBook, AssignmentError, PointKind};
use crate::catalog::Catalog;
use crate::schedule::{ScheduleBook, ScheduleDraft, ScheduleError};
use crate::transfer::{DualList, TransferError, TransferItem};

// In-memory state for one console session; nothing is persisted
pub struct AppState {
    pub catalog: Catalog,
    pub schedules: Mutex<ScheduleBook>,
    pub assignments: Mutex<AssignmentBook>,
}

impl AppState {
    pub fn new(catalog: Catalog, schedules: ScheduleBook) -> Self {
        Self {
            catalog,
            schedules: Mutex::new(schedules),
            assignments: Mutex::new(AssignmentBook::new()),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRequest {
    point_ids: Vec<String>,
    user_ids: Vec<String>,
}

#[derive(Deserialize)]
pub struct BulkDeleteRequest {
    ids: Vec<String>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| actix_web::error::ErrorInternalServerError("console state lock poisoned"))
}

fn failure(message: impl ToString) -> serde_json::Value {
    json!({"success": false, "error": message.to_string()})
}

fn schedule_error(err: ScheduleError) -> HttpResponse {
    match err {
        ScheduleError::NotFound(_) => HttpResponse::NotFound().json(failure(err)),
        _ => HttpResponse::BadRequest().json(failure(err)),
    }
}

fn assignment_error(err: AssignmentError) -> HttpResponse {
    match err {
        AssignmentError::NotFound(_) => HttpResponse::NotFound().json(failure(err)),
        _ => HttpResponse::BadRequest().json(failure(err)),
    }
}

// Catalog endpoints
async fn list_doors(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(&state.catalog.doors))
}

async fn list_floors(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(&state.catalog.floors))
}

async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(&state.catalog.users))
}

// Schedule endpoints
async fn list_schedules(state: web::Data<AppState>) -> Result<HttpResponse> {
    let book = lock(&state.schedules)?;
    Ok(HttpResponse::Ok().json(book.by_priority()))
}

async fn create_schedule(
    draft: web::Json<ScheduleDraft>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut book = lock(&state.schedules)?;
    match book.add(draft.into_inner()) {
        Ok(schedule) => Ok(HttpResponse::Created().json(schedule)),
        Err(e) => Ok(schedule_error(e)),
    }
}

async fn update_schedule(
    id: web::Path<String>,
    draft: web::Json<ScheduleDraft>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut book = lock(&state.schedules)?;
    match book.update(&id, draft.into_inner()) {
        Ok(schedule) => Ok(HttpResponse::Ok().json(schedule)),
        Err(e) => Ok(schedule_error(e)),
    }
}

async fn delete_schedule(id: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut book = lock(&state.schedules)?;
    match book.remove(&id) {
        Ok(removed) => Ok(HttpResponse::Ok().json(json!({"success": true, "removed": removed}))),
        Err(e) => Ok(schedule_error(e)),
    }
}

async fn duplicate_schedule(id: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut book = lock(&state.schedules)?;
    match book.duplicate(&id) {
        Ok(copy) => Ok(HttpResponse::Created().json(copy)),
        Err(e) => Ok(schedule_error(e)),
    }
}

async fn get_conflicts(state: web::Data<AppState>) -> Result<HttpResponse> {
    let book = lock(&state.schedules)?;
    Ok(HttpResponse::Ok().json(book.conflicts()))
}

// Assignment endpoints
async fn list_assignments(
    query: web::Query<SearchQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let book = lock(&state.assignments)?;
    let q = query.q.as_deref().unwrap_or("");
    Ok(HttpResponse::Ok().json(book.search(q)))
}

async fn assign_doors(req: web::Json<CommitRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut doors = DualList::new(state.catalog.doors.clone());
    commit_request(&mut doors, PointKind::Door, &req, &state, |id| state.catalog.door(id).is_some())
}

async fn assign_floors(req: web::Json<CommitRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut floors = DualList::new(state.catalog.floors.clone());
    commit_request(&mut floors, PointKind::Floor, &req, &state, |id| state.catalog.floor(id).is_some())
}

/// Names the first requested point or user id the catalog does not know
fn unknown_id(
    req: &CommitRequest,
    kind: PointKind,
    catalog: &Catalog,
    point_known: impl Fn(&str) -> bool,
) -> Option<String> {
    if let Some(id) = req.point_ids.iter().find(|id| !point_known(id)) {
        return Some(format!("{} {} not found", kind, id));
    }
    req.user_ids
        .iter()
        .find(|id| catalog.user(id).is_none())
        .map(|id| format!("user {} not found", id))
}

/// Replays the operator's picks onto fresh dual lists and commits them
fn commit_request<P: TransferItem + Clone>(
    points: &mut DualList<P>,
    kind: PointKind,
    req: &CommitRequest,
    state: &AppState,
    point_known: impl Fn(&str) -> bool,
) -> Result<HttpResponse> {
    if let Some(message) = unknown_id(req, kind, &state.catalog, point_known) {
        return Ok(HttpResponse::NotFound().json(failure(message)));
    }

    let mut users = DualList::new(state.catalog.users.clone());
    let picked = select_and_assign(points, &req.point_ids)
        .and_then(|_| select_and_assign(&mut users, &req.user_ids));
    if let Err(e) = picked {
        return Ok(HttpResponse::BadRequest().json(failure(e)));
    }

    match commit_pair(points, &mut users, kind, Local::now().date_naive()) {
        Ok(records) => {
            let mut book = lock(&state.assignments)?;
            book.extend(records.clone());
            Ok(HttpResponse::Created().json(records))
        }
        Err(e) => Ok(assignment_error(e)),
    }
}

fn select_and_assign<T: TransferItem + Clone>(list: &mut DualList<T>, ids: &[String]) -> Result<usize, TransferError> {
    for id in ids {
        list.toggle_available_selection(id, true)?;
    }
    Ok(list.assign_selected())
}

async fn delete_assignment(id: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut book = lock(&state.assignments)?;
    match book.remove(&id) {
        Ok(removed) => Ok(HttpResponse::Ok().json(json!({"success": true, "removed": removed}))),
        Err(e) => Ok(assignment_error(e)),
    }
}

async fn delete_assignments(
    req: web::Json<BulkDeleteRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut book = lock(&state.assignments)?;
    let removed = book.remove_many(&req.ids);
    Ok(HttpResponse::Ok().json(json!({"success": true, "removed": removed})))
}

/// Body extraction failures answer with the same JSON shape as validation errors
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(failure(&err));
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/api/doors", web::get().to(list_doors))
        .route("/api/floors", web::get().to(list_floors))
        .route("/api/users", web::get().to(list_users))
        .route("/api/schedules", web::get().to(list_schedules))
        .route("/api/schedules", web::post().to(create_schedule))
        .route("/api/schedules/{id}", web::put().to(update_schedule))
        .route("/api/schedules/{id}", web::delete().to(delete_schedule))
        .route("/api/schedules/{id}/duplicate", web::post().to(duplicate_schedule))
        .route("/api/conflicts", web::get().to(get_conflicts))
        .route("/api/assignments", web::get().to(list_assignments))
        .route("/api/assignments/doors", web::post().to(assign_doors))
        .route("/api/assignments/floors", web::post().to(assign_floors))
        .route("/api/assignments/delete", web::post().to(delete_assignments))
        .route("/api/assignments/{id}", web::delete().to(delete_assignment));
}

pub async fn start_server(bind: &str, port: u16, state: AppState) -> std::io::Result<()> {
    let app_state = web::Data::new(state);
    info!(bind, port, "starting console host");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((bind, port))?
    .run()
    .await
}
