//! Web server: REST API around the schedule generator.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), DEFAULT_GROUP_SIZE (e.g. 4).

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use tournament_schedule::{
    create_tournament, generate_schedule, get_tournament, record_result, register_team,
    update_match_details, ErrorKind, GroupSpec, InMemoryStore, MatchDetails, MatchId, MatchResult,
    ScheduleOptions, ScheduleStore, TournamentError, TournamentFormat, TournamentId,
};

/// Shared store for all tournaments.
type AppState = Data<InMemoryStore>;

/// Settings read from the environment at startup.
#[derive(Clone, Copy)]
struct Settings {
    default_groups: GroupSpec,
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    /// One of knockout, round_robin, league, group_stage.
    format: String,
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
}

#[derive(Deserialize, Default)]
struct GenerateScheduleBody {
    #[serde(default)]
    groups: Option<GroupSpec>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id})
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string(), "retryable": e.is_retryable() });
    match e.kind() {
        ErrorKind::Validation => HttpResponse::BadRequest().json(body),
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::State => HttpResponse::Conflict().json(body),
        ErrorKind::Persistence => HttpResponse::ServiceUnavailable().json(body),
        ErrorKind::Inconsistency => HttpResponse::InternalServerError().json(body),
    }
}

/// Match edits are addressed through their tournament; reject ids from another one.
fn check_match_owner(
    store: &InMemoryStore,
    path: &TournamentMatchPath,
) -> Result<(), TournamentError> {
    match store.get_match(path.match_id) {
        Ok(Some(m)) if m.tournament_id == path.id => Ok(()),
        Ok(_) => Err(TournamentError::MatchNotFound(path.match_id)),
        Err(e) => Err(TournamentError::Persistence(e)),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-schedule",
    })
}

/// Create a new tournament (returns it with id).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let format: TournamentFormat = match body.format.parse() {
        Ok(f) => f,
        Err(e) => return error_response(&TournamentError::Validation(e)),
    };
    match create_tournament(state.get_ref(), &body.name, format) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match get_tournament(state.get_ref(), path.id) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Register a team (only before the schedule is generated).
#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddTeamBody>,
) -> HttpResponse {
    match register_team(state.get_ref(), path.id, &body.name) {
        Ok(team) => HttpResponse::Ok().json(team),
        Err(e) => error_response(&e),
    }
}

/// Generate the schedule. Succeeds once per tournament; later calls get 409.
#[post("/api/tournaments/{id}/schedule")]
async fn api_generate_schedule(
    state: AppState,
    settings: Data<Settings>,
    path: Path<TournamentPath>,
    body: Option<Json<GenerateScheduleBody>>,
) -> HttpResponse {
    let options = ScheduleOptions {
        groups: body
            .and_then(|b| b.into_inner().groups)
            .unwrap_or(settings.default_groups),
    };
    let tournament_id = path.id;
    let store = state.clone();
    let result = tokio::task::spawn_blocking(move || {
        generate_schedule(store.get_ref(), tournament_id, &options)
    })
    .await;
    match result {
        Ok(Ok(matches)) => HttpResponse::Ok().json(matches),
        Ok(Err(e)) => error_response(&e),
        Err(e) => {
            log::error!("Schedule generation task failed: {e}");
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "generation failed" }))
        }
    }
}

/// List a tournament's matches in match number order.
#[get("/api/tournaments/{id}/matches")]
async fn api_list_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    if let Err(e) = get_tournament(state.get_ref(), path.id) {
        return error_response(&e);
    }
    match state.list_matches(path.id) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&TournamentError::Persistence(e)),
    }
}

/// Edit date, venue or status of a match.
#[put("/api/tournaments/{id}/matches/{match_id}")]
async fn api_update_match(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<MatchDetails>,
) -> HttpResponse {
    if let Err(e) = check_match_owner(state.get_ref(), &path) {
        return error_response(&e);
    }
    match update_match_details(state.get_ref(), path.match_id, body.into_inner()) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(&e),
    }
}

/// Record a result; knockout winners move on to their next match.
#[post("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<MatchResult>,
) -> HttpResponse {
    if let Err(e) = check_match_owner(state.get_ref(), &path) {
        return error_response(&e);
    }
    match record_result(state.get_ref(), path.match_id, body.into_inner()) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_group_size() -> usize {
    4
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let group_size: usize = std::env::var("DEFAULT_GROUP_SIZE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(default_group_size);
    let settings = Data::new(Settings {
        default_groups: GroupSpec::Size(group_size),
    });
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{} (default group size {group_size})", bind.0, bind.1);

    let state: AppState = Data::new(InMemoryStore::new());

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(settings.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_team)
            .service(api_generate_schedule)
            .service(api_list_matches)
            .service(api_update_match)
            .service(api_record_result)
    })
    .bind(bind)?
    .run()
    .await
}
