//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. See `kickhub::config` for the environment variables.

use actix_files::Files;
use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get,
    http::StatusCode,
    post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use kickhub::{
    assign_match_position, generate_teams, join_match, record_result, resolve_candidate_name,
    team_sheet_csv, AppConfig, AssignError, ConfigError, JoinError, Match, MatchConfig,
    MatchFormat, MatchId, MatchSettings, MatchStore, PitchSlot, Player, PlayerStats, Position,
    ResultError, RosterState, Score, SplitError, StoreError, UpdateError, Versioned,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

type AppState = Data<MatchStore>;

/// Session key holding the signed-in display name.
const SESSION_DISPLAY_NAME: &str = "display_name";

/// Errors that can be sent back as `{error, code}` with a status.
trait ApiError: Display {
    fn code(&self) -> &'static str;

    fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl ApiError for JoinError {
    fn code(&self) -> &'static str {
        JoinError::code(self)
    }
}

impl ApiError for AssignError {
    fn code(&self) -> &'static str {
        AssignError::code(self)
    }
}

impl ApiError for SplitError {
    fn code(&self) -> &'static str {
        SplitError::code(self)
    }
}

impl ApiError for ResultError {
    fn code(&self) -> &'static str {
        ResultError::code(self)
    }
}

impl ApiError for ConfigError {
    fn code(&self) -> &'static str {
        ConfigError::code(self)
    }
}

impl ApiError for StoreError {
    fn code(&self) -> &'static str {
        StoreError::code(self)
    }

    fn status(&self) -> StatusCode {
        match self {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::VersionConflict { .. } => StatusCode::CONFLICT,
            StoreError::LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl<E: ApiError> ApiError for UpdateError<E> {
    fn code(&self) -> &'static str {
        match self {
            UpdateError::Store(e) => e.code(),
            UpdateError::Rejected(e) => e.code(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            UpdateError::Store(e) => e.status(),
            UpdateError::Rejected(e) => e.status(),
        }
    }
}

fn error_json<E: ApiError>(e: &E) -> HttpResponse {
    HttpResponse::build(e.status()).json(serde_json::json!({
        "error": e.to_string(),
        "code": e.code(),
    }))
}

/// Unparsable request bodies (bad `position`, `format`, dates...) get the same `{error, code}` shape.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = serde_json::json!({
            "error": err.to_string(),
            "code": "malformed_payload",
        });
        actix_web::error::InternalError::from_response(err, HttpResponse::BadRequest().json(body))
            .into()
    })
}

fn missing_name() -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "error": "Please enter your name",
        "code": "missing_name",
    }))
}

/// Match as returned by the API: the stored document plus derived fields.
#[derive(Serialize)]
struct MatchView<'a> {
    #[serde(flatten)]
    game: &'a Match,
    version: u64,
    state: RosterState,
    remaining_slots: usize,
    layout: Vec<PitchSlot>,
}

impl<'a> MatchView<'a> {
    fn new(game: &'a Match, version: u64) -> Self {
        Self {
            game,
            version,
            state: game.roster.state(),
            remaining_slots: game.roster.remaining_slots(),
            layout: game.roster.config().format.layout(),
        }
    }

    fn of(snapshot: &'a Versioned<Match>) -> Self {
        Self::new(&snapshot.value, snapshot.version)
    }
}

#[derive(Serialize)]
struct JoinResponse<'a> {
    player: Player,
    #[serde(rename = "match")]
    game: MatchView<'a>,
}

#[derive(Serialize)]
struct FormatInfo {
    format: MatchFormat,
    capacity: usize,
    team_size: usize,
    layout: Vec<PitchSlot>,
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct SessionResponse {
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct SessionBody {
    display_name: String,
}

/// Settings as sent by the create and edit forms.
#[derive(Deserialize)]
struct MatchSettingsBody {
    #[serde(default)]
    format: MatchFormat,
    /// Defaults to the format's capacity.
    capacity: Option<usize>,
    #[serde(default)]
    allow_substitutes: bool,
    #[serde(default)]
    substitute_limit: u32,
    #[serde(default)]
    auto_assign_positions: bool,
    location: String,
    kickoff: DateTime<Utc>,
}

impl MatchSettingsBody {
    fn config(&self) -> Result<MatchConfig, ConfigError> {
        MatchConfig::from_parts(
            self.format,
            self.capacity,
            self.allow_substitutes,
            self.substitute_limit,
            self.auto_assign_positions,
        )
    }

    fn settings(&self, owner_name: String) -> MatchSettings {
        MatchSettings {
            location: self.location.trim().to_string(),
            kickoff: self.kickoff,
            owner_name,
        }
    }
}

#[derive(Deserialize)]
struct CreateMatchBody {
    #[serde(flatten)]
    settings: MatchSettingsBody,
    /// Used when nobody is signed in.
    owner_name: Option<String>,
}

#[derive(Deserialize)]
struct JoinBody {
    guest_name: Option<String>,
    position: Option<Position>,
}

#[derive(Deserialize)]
struct AssignPositionBody {
    position: Position,
}

#[derive(Deserialize)]
struct ResultBody {
    score: Score,
    #[serde(default)]
    player_stats: BTreeMap<String, PlayerStats>,
}

/// Path segment: match id (e.g. /api/matches/{id})
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

/// Path segments: match id and player name (e.g. /api/matches/{id}/players/{name})
#[derive(Deserialize)]
struct MatchPlayerPath {
    id: MatchId,
    name: String,
}

fn session_display_name(session: &Session) -> Option<String> {
    match session.get::<String>(SESSION_DISPLAY_NAME) {
        Ok(name) => name,
        Err(e) => {
            log::warn!("Unreadable session: {}", e);
            None
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "kickhub",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Formats with their default capacity and pitch layout (for the create form).
#[get("/api/formats")]
async fn api_formats() -> HttpResponse {
    let formats: Vec<FormatInfo> = MatchFormat::ALL
        .iter()
        .map(|&format| FormatInfo {
            format,
            capacity: format.default_capacity(),
            team_size: format.team_size(),
            layout: format.layout(),
        })
        .collect();
    HttpResponse::Ok().json(formats)
}

/// Current signed-in display name, if any.
#[get("/api/session")]
async fn api_get_session(session: Session) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse {
        display_name: session_display_name(&session),
    })
}

/// Sign in with a display name. Joins then use it instead of a guest name.
#[post("/api/session")]
async fn api_sign_in(session: Session, body: Json<SessionBody>) -> HttpResponse {
    let name = body.display_name.trim();
    if name.is_empty() {
        return missing_name();
    }
    if let Err(e) = session.insert(SESSION_DISPLAY_NAME, name) {
        log::error!("Failed to write session: {}", e);
        return HttpResponse::InternalServerError().body("session error");
    }
    HttpResponse::Ok().json(SessionResponse {
        display_name: Some(name.to_string()),
    })
}

#[delete("/api/session")]
async fn api_sign_out(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(SessionResponse { display_name: None })
}

/// Create a new match (returns it with id; client stores id for subsequent requests).
#[post("/api/matches")]
async fn api_create_match(state: AppState, session: Session, body: Json<CreateMatchBody>) -> HttpResponse {
    let owner = match resolve_candidate_name(
        session_display_name(&session).as_deref(),
        body.owner_name.as_deref(),
    ) {
        Some(name) => name,
        None => return missing_name(),
    };
    let config = match body.settings.config() {
        Ok(config) => config,
        Err(e) => return error_json(&e),
    };
    let game = Match::new(body.settings.settings(owner), config);
    match state.insert(game) {
        Ok(snapshot) => {
            log::info!(
                "Created {} match {} at {}",
                snapshot.value.roster.config().format,
                snapshot.value.id,
                snapshot.value.settings.location
            );
            HttpResponse::Ok().json(MatchView::of(&snapshot))
        }
        Err(e) => error_json(&e),
    }
}

/// List matches, soonest kickoff first.
#[get("/api/matches")]
async fn api_list_matches(state: AppState) -> HttpResponse {
    match state.list() {
        Ok(games) => {
            let views: Vec<MatchView> = games.iter().map(MatchView::of).collect();
            HttpResponse::Ok().json(views)
        }
        Err(e) => error_json(&e),
    }
}

/// Get a match by id (404 if not found). Touching it refreshes its activity time.
#[get("/api/matches/{id}")]
async fn api_get_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    match state.read_one(path.id) {
        Ok(snapshot) => HttpResponse::Ok().json(MatchView::of(&snapshot)),
        Err(e) => error_json(&e),
    }
}

/// Edit match settings. A roster-rule change discards drawn teams.
#[put("/api/matches/{id}/settings")]
async fn api_update_settings(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<MatchSettingsBody>,
) -> HttpResponse {
    let result = state.update(path.id, |game| {
        let config = body.config()?;
        let settings = body.settings(game.settings.owner_name.clone());
        game.update_settings(settings, config)
    });
    match result {
        Ok((snapshot, ())) => {
            log::info!("Updated settings of match {}", path.id);
            HttpResponse::Ok().json(MatchView::of(&snapshot))
        }
        Err(e) => error_json(&e),
    }
}

#[delete("/api/matches/{id}")]
async fn api_delete_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    match state.remove(path.id) {
        Ok(_) => {
            log::info!("Deleted match {}", path.id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_json(&e),
    }
}

/// Join a match as the signed-in user or as a named guest.
#[post("/api/matches/{id}/players")]
async fn api_join_match(
    state: AppState,
    session: Session,
    path: Path<MatchPath>,
    body: Json<JoinBody>,
) -> HttpResponse {
    let name = match resolve_candidate_name(
        session_display_name(&session).as_deref(),
        body.guest_name.as_deref(),
    ) {
        Some(name) => name,
        None => return missing_name(),
    };
    let position = body.position;
    match state.update(path.id, |game| join_match(game, &name, position)) {
        Ok((snapshot, player)) => {
            log::info!(
                "{} joined match {} ({}/{})",
                player.display_name,
                path.id,
                snapshot.value.roster.len(),
                snapshot.value.roster.config().capacity
            );
            HttpResponse::Ok().json(JoinResponse {
                player,
                game: MatchView::of(&snapshot),
            })
        }
        Err(e) => error_json(&e),
    }
}

/// Move a player to a pitch position.
#[put("/api/matches/{id}/players/{name}/position")]
async fn api_assign_position(
    state: AppState,
    path: Path<MatchPlayerPath>,
    body: Json<AssignPositionBody>,
) -> HttpResponse {
    let position = body.position;
    match state.update(path.id, |game| assign_match_position(game, &path.name, position)) {
        Ok((snapshot, ())) => HttpResponse::Ok().json(MatchView::of(&snapshot)),
        Err(e) => error_json(&e),
    }
}

/// Draw random teams (roster must be full). Calling again re-draws.
#[post("/api/matches/{id}/teams")]
async fn api_generate_teams(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    match state.update(path.id, |game| generate_teams(game).map(|_| ())) {
        Ok((snapshot, ())) => {
            log::info!("Generated teams for match {}", path.id);
            HttpResponse::Ok().json(MatchView::of(&snapshot))
        }
        Err(e) => error_json(&e),
    }
}

/// Record the final score and player stats. Marks the match completed.
#[put("/api/matches/{id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<ResultBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let result = state.update(path.id, |game| {
        record_result(game, body.score, body.player_stats.clone())
    });
    match result {
        Ok((snapshot, ())) => {
            log::info!(
                "Recorded result {}-{} for match {}",
                body.score.team_a,
                body.score.team_b,
                path.id
            );
            HttpResponse::Ok().json(MatchView::of(&snapshot))
        }
        Err(e) => error_json(&e),
    }
}

/// Download the roster and teams as CSV.
#[get("/api/matches/{id}/team-sheet.csv")]
async fn api_team_sheet(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let snapshot = match state.read_one(path.id) {
        Ok(s) => s,
        Err(e) => return error_json(&e),
    };
    match team_sheet_csv(&snapshot.value) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"team-sheet-{}.csv\"", path.id),
            ))
            .body(bytes),
        Err(e) => {
            log::error!("Failed to write team sheet for match {}: {}", path.id, e);
            HttpResponse::InternalServerError().body("csv error")
        }
    }
}

fn session_key(config: &AppConfig) -> Key {
    match &config.session_key {
        Some(secret) => Key::from(secret.as_bytes()),
        None => {
            log::warn!("SESSION_KEY not set, sessions will not survive a restart");
            Key::generate()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let key = session_key(&config);
    let cookie_secure = config.cookie_secure;
    let state = Data::new(MatchStore::new(config.store_config()));

    // Background task: periodically remove matches nobody has touched within the timeout
    let state_cleanup = state.clone();
    let cleanup_interval = config.cleanup_interval;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            match state_cleanup.purge_inactive() {
                Ok(0) => {}
                Ok(removed) => log::info!("Cleaned up {} inactive match(es)", removed),
                Err(e) => log::error!("Cleanup failed: {}", e),
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(json_config())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_secure(cookie_secure)
                    .build(),
            )
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_formats)
            .service(api_get_session)
            .service(api_sign_in)
            .service(api_sign_out)
            .service(api_create_match)
            .service(api_list_matches)
            .service(api_get_match)
            .service(api_update_settings)
            .service(api_delete_match)
            .service(api_join_match)
            .service(api_assign_position)
            .service(api_generate_teams)
            .service(api_record_result)
            .service(api_team_sheet)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use kickhub::StoreConfig;
    use serde_json::{json, Value};

    fn store_with_match(players: &[&str]) -> (AppState, MatchId) {
        let settings = MatchSettings {
            location: "Field".into(),
            kickoff: Utc::now(),
            owner_name: "Owner".into(),
        };
        let mut game = Match::new(settings, MatchConfig::new(MatchFormat::FiveVFive));
        for name in players {
            join_match(&mut game, name, None).unwrap();
        }
        let store = MatchStore::new(StoreConfig::default());
        let id = store.insert(game).unwrap().value.id;
        (Data::new(store), id)
    }

    #[actix_web::test]
    async fn unknown_position_in_body_returns_tagged_json_error() {
        let (state, id) = store_with_match(&["Alex"]);
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(json_config())
                .service(api_assign_position),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/matches/{}/players/Alex/position", id))
            .set_json(json!({ "position": "sweeper" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "malformed_payload");
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn position_outside_format_is_rejected() {
        let (state, id) = store_with_match(&["Alex"]);
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(json_config())
                .service(api_assign_position),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/matches/{}/players/Alex/position", id))
            .set_json(json!({ "position": "cdm" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "position_not_in_format");
    }

    #[actix_web::test]
    async fn result_is_recorded_and_unknown_players_rejected() {
        let (state, id) = store_with_match(&["Alex", "Sam"]);
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .app_data(json_config())
                .service(api_record_result),
        )
        .await;
        let uri = format!("/api/matches/{}/result", id);

        let req = test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({
                "score": { "team_a": 1, "team_b": 0 },
                "player_stats": { "Nobody": { "goals": 1 } },
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "unknown_player");
        assert!(state.read_one(id).unwrap().value.result.is_none());

        let req = test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({
                "score": { "team_a": 3, "team_b": 2 },
                "player_stats": { "Alex": { "goals": 2, "yellow_cards": 1 } },
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "completed");
        assert_eq!(body["result"]["score"]["team_a"], 3);
        assert_eq!(body["result"]["player_stats"]["Alex"]["goals"], 2);
        assert_eq!(body["result"]["player_stats"]["Alex"]["assists"], 0);
    }
}
