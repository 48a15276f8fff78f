//! Single binary web server exposing league management as a REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use league_manager::{
    standings_to_csv, ClubId, DivisionId, FixtureId, FixtureOptions, InMemoryLeagueRepository,
    LeagueError, LeagueId, LeagueService, LeagueSettings, MatchResult, ScheduleUpdate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Club names registered through the API, used for standings display and tiebreaks.
type ClubNames = RwLock<HashMap<ClubId, String>>;

type AppState = Data<LeagueService<InMemoryLeagueRepository, ClubNames>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateLeagueBody {
    name: String,
    #[serde(default)]
    settings: LeagueSettings,
}

#[derive(Deserialize)]
struct AddDivisionBody {
    name: String,
}

#[derive(Deserialize)]
struct RegisterClubBody {
    club_id: ClubId,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
struct ResultBody {
    home_goals: u32,
    away_goals: u32,
}

#[derive(Deserialize, Default)]
struct DisqualifyBody {
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Serialize)]
struct CreatedDivision {
    id: DivisionId,
}

/// Path segment: league id (e.g. /api/leagues/{id})
#[derive(Deserialize)]
struct LeaguePath {
    id: LeagueId,
}

/// Path segments: league id and division id
#[derive(Deserialize)]
struct DivisionPath {
    id: LeagueId,
    division_id: DivisionId,
}

/// Path segments: league id and club id
#[derive(Deserialize)]
struct ClubPath {
    id: LeagueId,
    club_id: ClubId,
}

/// Path segments: league id and fixture id
#[derive(Deserialize)]
struct FixturePath {
    id: LeagueId,
    fixture_id: FixtureId,
}

fn error_response(e: LeagueError) -> HttpResponse {
    log::warn!("Request rejected: {}", e);
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        LeagueError::LeagueNotFound(_)
        | LeagueError::DivisionNotFound { .. }
        | LeagueError::FixtureNotFound { .. }
        | LeagueError::ClubNotInLeague { .. } => HttpResponse::NotFound().json(body),
        LeagueError::AlreadyGenerated { .. }
        | LeagueError::VersionConflict { .. }
        | LeagueError::FixtureNotScheduled { .. }
        | LeagueError::ClubAlreadyRegistered { .. } => HttpResponse::Conflict().json(body),
        LeagueError::Export(_) => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn respond<T: Serialize>(result: Result<T, LeagueError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(e),
    }
}

/// Respond with the league after a successful mutation.
fn respond_league(state: &AppState, id: LeagueId, result: Result<(), LeagueError>) -> HttpResponse {
    respond(result.and_then(|()| state.league(id)))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "league-manager",
    })
}

/// Create a league in Draft.
#[post("/api/leagues")]
async fn api_create_league(state: AppState, body: Json<CreateLeagueBody>) -> HttpResponse {
    let body = body.into_inner();
    respond(state.create_league(body.name.trim(), body.settings))
}

#[get("/api/leagues/{id}")]
async fn api_get_league(state: AppState, path: Path<LeaguePath>) -> HttpResponse {
    respond(state.league(path.id))
}

/// Add a division (Draft or Registration).
#[post("/api/leagues/{id}/divisions")]
async fn api_add_division(state: AppState, path: Path<LeaguePath>, body: Json<AddDivisionBody>) -> HttpResponse {
    respond(
        state
            .add_division(path.id, body.name.trim())
            .map(|id| CreatedDivision { id }),
    )
}

#[post("/api/leagues/{id}/registration/open")]
async fn api_open_registration(state: AppState, path: Path<LeaguePath>) -> HttpResponse {
    respond_league(&state, path.id, state.open_registration(path.id))
}

#[post("/api/leagues/{id}/registration/close")]
async fn api_close_registration(state: AppState, path: Path<LeaguePath>) -> HttpResponse {
    respond_league(&state, path.id, state.close_registration(path.id))
}

/// Register a club in a division; an optional name is kept for standings display.
#[post("/api/leagues/{id}/divisions/{division_id}/clubs")]
async fn api_register_club(
    state: AppState,
    path: Path<DivisionPath>,
    body: Json<RegisterClubBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let result = state.register_club(path.id, path.division_id, body.club_id.clone());
    if result.is_ok() {
        if let Some(name) = body.name {
            match state.directory().write() {
                Ok(mut names) => {
                    names.insert(body.club_id, name);
                }
                Err(_) => return HttpResponse::InternalServerError().body("lock error"),
            }
        }
    }
    respond_league(&state, path.id, result)
}

/// Withdraw a club before registration closes.
#[delete("/api/leagues/{id}/clubs/{club_id}")]
async fn api_withdraw_club(state: AppState, path: Path<ClubPath>) -> HttpResponse {
    respond_league(&state, path.id, state.withdraw_club(path.id, &path.club_id))
}

/// Generate the division's fixture list (RegistrationClosed, once per division).
#[post("/api/leagues/{id}/divisions/{division_id}/fixtures/generate")]
async fn api_generate_fixtures(
    state: AppState,
    path: Path<DivisionPath>,
    body: Option<Json<FixtureOptions>>,
) -> HttpResponse {
    let options = body.map(Json::into_inner).unwrap_or_default();
    respond(state.generate_fixtures(path.id, path.division_id, options))
}

#[put("/api/leagues/{id}/fixtures/{fixture_id}/result")]
async fn api_record_result(state: AppState, path: Path<FixturePath>, body: Json<ResultBody>) -> HttpResponse {
    let result = MatchResult::new(body.home_goals, body.away_goals);
    respond_league(&state, path.id, state.record_result(path.id, path.fixture_id, result))
}

#[put("/api/leagues/{id}/fixtures/{fixture_id}/schedule")]
async fn api_update_schedule(
    state: AppState,
    path: Path<FixturePath>,
    body: Json<ScheduleUpdate>,
) -> HttpResponse {
    let update = body.into_inner();
    respond_league(
        &state,
        path.id,
        state.update_fixture_schedule(path.id, path.fixture_id, update),
    )
}

#[get("/api/leagues/{id}/divisions/{division_id}/standings")]
async fn api_standings(state: AppState, path: Path<DivisionPath>) -> HttpResponse {
    respond(state.cached_standings(path.id, path.division_id))
}

#[get("/api/leagues/{id}/divisions/{division_id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<DivisionPath>) -> HttpResponse {
    match state
        .calculate_standings(path.id, path.division_id)
        .and_then(|entries| standings_to_csv(&entries))
    {
        Ok(csv) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(csv),
        Err(e) => error_response(e),
    }
}

/// Disqualify a club (RegistrationClosed or Active); returns the cascade outcome.
#[post("/api/leagues/{id}/clubs/{club_id}/disqualify")]
async fn api_disqualify_club(
    state: AppState,
    path: Path<ClubPath>,
    body: Option<Json<DisqualifyBody>>,
) -> HttpResponse {
    let reason = body.map(Json::into_inner).unwrap_or_default().reason;
    respond(state.disqualify_club(path.id, &path.club_id, reason))
}

#[post("/api/leagues/{id}/complete")]
async fn api_complete_league(state: AppState, path: Path<LeaguePath>) -> HttpResponse {
    respond_league(&state, path.id, state.complete_league(path.id))
}

#[post("/api/leagues/{id}/cancel")]
async fn api_cancel_league(state: AppState, path: Path<LeaguePath>) -> HttpResponse {
    respond_league(&state, path.id, state.cancel_league(path.id))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(LeagueService::new(
        InMemoryLeagueRepository::new(),
        ClubNames::default(),
    ));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_league)
            .service(api_get_league)
            .service(api_add_division)
            .service(api_open_registration)
            .service(api_close_registration)
            .service(api_register_club)
            .service(api_withdraw_club)
            .service(api_generate_fixtures)
            .service(api_record_result)
            .service(api_update_schedule)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_disqualify_club)
            .service(api_complete_league)
            .service(api_cancel_league)
    })
    .bind(bind)?
    .run()
    .await
}
