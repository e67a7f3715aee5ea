//! REST API over in-memory court rotation sessions.
//!
//! Every mutating endpoint dispatches an [`Action`] and answers with the new state
//! and the notices it produced, or a 400 with the rejection and its severity.

use crate::config::AppConfig;
use crate::logic::Action;
use crate::models::{
    CourtError, CourtSystem, Gender, Notice, Player, PlayerId, Severity, SystemView,
};
use crate::storage::{self, RosterChanges};
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    HttpResponse, Responder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Instant;
use uuid::Uuid;

/// Unique identifier for a session (one club night, one court system).
pub type SessionId = Uuid;

/// Per-session entry: rotation state + last activity time (for auto-cleanup).
pub struct SessionEntry {
    pub system: CourtSystem,
    pub last_activity: Instant,
}

pub type Sessions = RwLock<HashMap<SessionId, SessionEntry>>;

/// In-memory state: many sessions by ID. Idle entries are removed by the server's cleanup task.
pub type AppState = Data<Sessions>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct NoticeBody<'a> {
    message: String,
    severity: Severity,
    #[serde(flatten)]
    notice: &'a Notice,
}

#[derive(Serialize)]
struct SessionResponse<'a> {
    id: SessionId,
    state: SystemView,
    notices: Vec<NoticeBody<'a>>,
}

impl<'a> SessionResponse<'a> {
    fn new(id: SessionId, system: &CourtSystem, notices: &'a [Notice]) -> Self {
        Self {
            id,
            state: SystemView::from_system(system),
            notices: notices
                .iter()
                .map(|n| NoticeBody {
                    message: n.to_string(),
                    severity: n.severity(),
                    notice: n,
                })
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct CreateSessionBody {
    #[serde(default)]
    court_count: Option<usize>,
    #[serde(default)]
    auto_assign: Option<bool>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default)]
    gender: Gender,
    #[serde(default)]
    level: Option<u8>,
}

#[derive(Deserialize)]
struct CourtCountBody {
    count: usize,
}

#[derive(Deserialize)]
struct AutoAssignBody {
    enabled: bool,
}

/// Path segment: session id (e.g. /api/sessions/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

/// Path segments: session id and player id
#[derive(Deserialize)]
struct SessionPlayerPath {
    id: SessionId,
    player_id: PlayerId,
}

/// Path segments: session id and court id
#[derive(Deserialize)]
struct SessionCourtPath {
    id: SessionId,
    court_id: Uuid,
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn no_session() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" }))
}

fn rejected(e: &CourtError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "error": e.to_string(),
        "severity": e.severity(),
    }))
}

/// Best-effort merge of one session's roster edits into the shared roster file.
/// Callers hold the session write lock, so merges never interleave.
fn persist_roster(config: &AppConfig, before: &[Player], system: &CourtSystem) {
    if let Some(path) = &config.roster_file {
        let changes = RosterChanges::between(before, system.roster());
        if let Err(e) = storage::merge_roster(path, &changes) {
            log::warn!("Failed to save roster to {}: {}", path.display(), e);
        }
    }
}

/// Build a fresh session, seeded from the roster file or a demo roster.
fn new_system(config: &AppConfig, body: Option<&CreateSessionBody>) -> CourtSystem {
    let mut players = config
        .roster_file
        .as_deref()
        .map(storage::load_roster)
        .unwrap_or_default();
    if players.is_empty() && config.demo_players > 0 {
        players = storage::demo_roster(config.demo_players);
    }
    let court_count = body
        .and_then(|b| b.court_count)
        .unwrap_or(config.court_count);
    let auto_assign = body
        .and_then(|b| b.auto_assign)
        .unwrap_or(config.auto_assign);
    CourtSystem::with_players(players, court_count, config.max_courts).with_auto_assign(auto_assign)
}

/// Lock, find the session, dispatch, persist, respond.
fn apply(state: &AppState, config: &AppConfig, id: SessionId, action: Action) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return no_session(),
    };
    entry.last_activity = Instant::now();
    let system = &mut entry.system;
    let before = system.roster().to_vec();
    match system.dispatch(action) {
        Ok(notices) => {
            persist_roster(config, &before, system);
            HttpResponse::Ok().json(SessionResponse::new(id, system, &notices))
        }
        Err(e) => rejected(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "court-rotation-web",
    })
}

/// Front page, embedded at build time.
#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("../templates/index.html"))
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new session (returns it with id; client stores id for subsequent requests).
#[post("/api/sessions")]
async fn api_create_session(
    state: AppState,
    config: Data<AppConfig>,
    body: Option<Json<CreateSessionBody>>,
) -> HttpResponse {
    let system = new_system(&config, body.as_deref());
    let id = Uuid::new_v4();
    let response = HttpResponse::Ok().json(SessionResponse::new(id, &system, &[]));
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.insert(
        id,
        SessionEntry {
            system,
            last_activity: Instant::now(),
        },
    );
    log::info!("Created session {}", id);
    response
}

/// Get a session by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/sessions/{id}")]
async fn api_get_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(SessionResponse::new(path.id, &entry.system, &[]))
        }
        None => no_session(),
    }
}

/// Apply any action (the generic endpoint behind every drag-and-drop gesture).
#[post("/api/sessions/{id}/actions")]
async fn api_dispatch(
    state: AppState,
    config: Data<AppConfig>,
    path: Path<SessionPath>,
    body: Json<Action>,
) -> HttpResponse {
    apply(&state, &config, path.id, body.into_inner())
}

/// Add a player to the roster and standby.
#[post("/api/sessions/{id}/players")]
async fn api_add_player(
    state: AppState,
    config: Data<AppConfig>,
    path: Path<SessionPath>,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let action = Action::AddPlayer {
        name: body.name,
        gender: body.gender,
        level: body.level.unwrap_or(crate::models::DEFAULT_LEVEL),
    };
    apply(&state, &config, path.id, action)
}

/// Remove a player from the roster.
#[delete("/api/sessions/{id}/players/{player_id}")]
async fn api_remove_player(
    state: AppState,
    config: Data<AppConfig>,
    path: Path<SessionPlayerPath>,
) -> HttpResponse {
    let action = Action::RemovePlayer {
        player_id: path.player_id,
    };
    apply(&state, &config, path.id, action)
}

/// Finish the game on a court.
#[post("/api/sessions/{id}/courts/{court_id}/finish")]
async fn api_finish_game(
    state: AppState,
    config: Data<AppConfig>,
    path: Path<SessionCourtPath>,
) -> HttpResponse {
    let action = Action::FinishGame {
        court_id: path.court_id,
    };
    apply(&state, &config, path.id, action)
}

/// Resize the court list.
#[put("/api/sessions/{id}/court-count")]
async fn api_set_court_count(
    state: AppState,
    config: Data<AppConfig>,
    path: Path<SessionPath>,
    body: Json<CourtCountBody>,
) -> HttpResponse {
    apply(&state, &config, path.id, Action::SetCourtCount { count: body.count })
}

/// Turn auto-assign on or off.
#[put("/api/sessions/{id}/auto-assign")]
async fn api_set_auto_assign(
    state: AppState,
    config: Data<AppConfig>,
    path: Path<SessionPath>,
    body: Json<AutoAssignBody>,
) -> HttpResponse {
    apply(
        &state,
        &config,
        path.id,
        Action::SetAutoAssign {
            enabled: body.enabled,
        },
    )
}

/// The session roster as the JSON array that is persisted.
#[get("/api/sessions/{id}/roster")]
async fn api_get_roster(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get(&path.id) {
        Some(entry) => HttpResponse::Ok().json(entry.system.roster()),
        None => no_session(),
    }
}

#[derive(Serialize)]
struct SkippedRow {
    name: String,
    error: String,
}

/// Import players from a CSV body (`name,gender,level`). Rows the roster rejects
/// (e.g. duplicate names) are skipped and reported.
#[post("/api/sessions/{id}/roster/import")]
async fn api_import_roster(
    state: AppState,
    config: Data<AppConfig>,
    path: Path<SessionPath>,
    body: String,
) -> HttpResponse {
    let players = match storage::import_roster_csv(body.as_bytes()) {
        Ok(players) => players,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string(),
                "severity": Severity::Error,
            }))
        }
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_session(),
    };
    entry.last_activity = Instant::now();
    let system = &mut entry.system;
    let before = system.roster().to_vec();
    let mut notices = Vec::new();
    let mut skipped = Vec::new();
    for p in players {
        let action = Action::AddPlayer {
            name: p.name.clone(),
            gender: p.gender,
            level: p.level,
        };
        match system.dispatch(action) {
            Ok(n) => notices.extend(n),
            Err(e) => skipped.push(SkippedRow {
                name: p.name,
                error: e.to_string(),
            }),
        }
    }
    persist_roster(&config, &before, system);
    HttpResponse::Ok().json(serde_json::json!({
        "session": SessionResponse::new(path.id, system, &notices),
        "skipped": skipped,
    }))
}

/// Register the front page and every API route. Static assets are mounted by the binary.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(api_health)
        .service(favicon)
        .service(api_create_session)
        .service(api_get_session)
        .service(api_dispatch)
        .service(api_add_player)
        .service(api_remove_player)
        .service(api_finish_game)
        .service(api_set_court_count)
        .service(api_set_auto_assign)
        .service(api_get_roster)
        .service(api_import_roster);
}

/// Drop sessions idle for at least `timeout`. Returns how many were removed.
pub fn remove_idle_sessions(sessions: &Sessions, timeout: std::time::Duration) -> usize {
    let mut g = match sessions.write() {
        Ok(guard) => guard,
        Err(_) => return 0,
    };
    let before = g.len();
    g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
    before - g.len()
}
