//! Single binary web server: JSON API for predictions, group tables and the knockout bracket.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. See `ServerConfig` for the environment variables.

use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::RwLock;
use std::time::Duration;
use uuid::Uuid;
use wc_predictor::{
    auto_fill, consensus, default_teams, evaluate_user, parse_teams_csv, tournament_from_teams,
    MatchId, MatchResult, Prediction, ScoreSource, ServerConfig, TeamId, Tournament, TournamentError,
    UserId,
};

/// In-memory state: one tournament, every user's prediction sheet.
type AppState = Data<RwLock<Tournament>>;

const USER_KEY: &str = "user_id";
const ADMIN_HEADER: &str = "x-admin-token";

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct PredictionBody {
    home_score: Option<u8>,
    away_score: Option<u8>,
    #[serde(default)]
    winner_id: Option<TeamId>,
}

#[derive(Deserialize)]
struct ResultBody {
    home_score: u8,
    away_score: u8,
    #[serde(default)]
    winner_id: Option<TeamId>,
}

#[derive(Deserialize)]
struct SourceQuery {
    #[serde(default)]
    source: ScoreSource,
}

/// Path segment: match id (e.g. /api/predictions/{match_id})
#[derive(Deserialize)]
struct MatchPath {
    match_id: MatchId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::MatchNotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// The caller's anonymous user id, created on first use.
fn session_user(session: &Session) -> Result<UserId, actix_web::Error> {
    if let Some(id) = session.get::<Uuid>(USER_KEY)? {
        return Ok(id);
    }
    let id = Uuid::new_v4();
    session.insert(USER_KEY, id)?;
    log::info!("New prediction sheet {}", id);
    Ok(id)
}

fn is_admin(req: &HttpRequest, config: &ServerConfig) -> bool {
    match &config.admin_token {
        None => true,
        Some(token) => req
            .headers()
            .get(ADMIN_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == token),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "wc-predictor",
    })
}

#[get("/api/teams")]
async fn api_teams(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(t) => HttpResponse::Ok().json(&t.teams),
        Err(_) => lock_error(),
    }
}

#[get("/api/matches")]
async fn api_matches(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(t) => HttpResponse::Ok().json(&t.matches),
        Err(_) => lock_error(),
    }
}

/// The caller's predictions, keyed by match id.
#[get("/api/predictions")]
async fn api_get_predictions(state: AppState, session: Session) -> actix_web::Result<HttpResponse> {
    let user = session_user(&session)?;
    let t = match state.read() {
        Ok(guard) => guard,
        Err(_) => return Ok(lock_error()),
    };
    Ok(HttpResponse::Ok().json(t.predictions_for(user)))
}

/// Create or replace the caller's prediction for one match.
#[put("/api/predictions/{match_id}")]
async fn api_set_prediction(
    state: AppState,
    session: Session,
    path: Path<MatchPath>,
    body: Json<PredictionBody>,
) -> actix_web::Result<HttpResponse> {
    let user = session_user(&session)?;
    let mut t = match state.write() {
        Ok(guard) => guard,
        Err(_) => return Ok(lock_error()),
    };
    let body = body.into_inner();
    let prediction = Prediction {
        home_score: body.home_score,
        away_score: body.away_score,
        winner_id: body.winner_id.map(|w| w.trim().to_ascii_uppercase()),
        updated_at: None,
    };
    Ok(match t.set_prediction(user, path.match_id, prediction, Utc::now()) {
        Ok(p) => HttpResponse::Ok().json(p),
        Err(e) => error_response(&e),
    })
}

/// Remove the caller's prediction for one match.
#[delete("/api/predictions/{match_id}")]
async fn api_clear_prediction(
    state: AppState,
    session: Session,
    path: Path<MatchPath>,
) -> actix_web::Result<HttpResponse> {
    let user = session_user(&session)?;
    let mut t = match state.write() {
        Ok(guard) => guard,
        Err(_) => return Ok(lock_error()),
    };
    Ok(match t.clear_prediction(user, path.match_id, Utc::now()) {
        Ok(removed) => HttpResponse::Ok().json(serde_json::json!({ "removed": removed })),
        Err(e) => error_response(&e),
    })
}

/// Fill every match the caller has not predicted yet.
#[post("/api/predictions/auto-fill")]
async fn api_auto_fill(state: AppState, session: Session) -> actix_web::Result<HttpResponse> {
    let user = session_user(&session)?;
    let mut t = match state.write() {
        Ok(guard) => guard,
        Err(_) => return Ok(lock_error()),
    };
    let now = Utc::now();
    let filled = auto_fill(&t, &t.predictions_for(user), now, &mut rand::thread_rng());
    match t.set_predictions(user, filled, now) {
        Ok(count) => log::info!("Auto-filled {} predictions for {}", count, user),
        Err(e) => return Ok(error_response(&e)),
    }
    Ok(HttpResponse::Ok().json(t.predictions_for(user)))
}

#[get("/api/standings")]
async fn api_standings(
    state: AppState,
    session: Session,
    query: Query<SourceQuery>,
) -> actix_web::Result<HttpResponse> {
    let user = session_user(&session)?;
    let t = match state.read() {
        Ok(guard) => guard,
        Err(_) => return Ok(lock_error()),
    };
    Ok(HttpResponse::Ok().json(evaluate_user(&t, user, query.source).standings))
}

#[get("/api/third-place")]
async fn api_third_place(
    state: AppState,
    session: Session,
    query: Query<SourceQuery>,
) -> actix_web::Result<HttpResponse> {
    let user = session_user(&session)?;
    let t = match state.read() {
        Ok(guard) => guard,
        Err(_) => return Ok(lock_error()),
    };
    Ok(HttpResponse::Ok().json(evaluate_user(&t, user, query.source).third_place))
}

/// Resolved knockout pairs: `{ "73": { "home": "KOR", "away": null }, ... }`.
#[get("/api/bracket")]
async fn api_bracket(
    state: AppState,
    session: Session,
    query: Query<SourceQuery>,
) -> actix_web::Result<HttpResponse> {
    let user = session_user(&session)?;
    let t = match state.read() {
        Ok(guard) => guard,
        Err(_) => return Ok(lock_error()),
    };
    Ok(HttpResponse::Ok().json(evaluate_user(&t, user, query.source).bracket))
}

/// Standings, third-place ranking and bracket in one response.
#[get("/api/evaluation")]
async fn api_evaluation(
    state: AppState,
    session: Session,
    query: Query<SourceQuery>,
) -> actix_web::Result<HttpResponse> {
    let user = session_user(&session)?;
    let t = match state.read() {
        Ok(guard) => guard,
        Err(_) => return Ok(lock_error()),
    };
    Ok(HttpResponse::Ok().json(evaluate_user(&t, user, query.source)))
}

/// Record a real result (admin only when ADMIN_TOKEN is set).
#[put("/api/results/{match_id}")]
async fn api_set_result(
    req: HttpRequest,
    state: AppState,
    config: Data<ServerConfig>,
    path: Path<MatchPath>,
    body: Json<ResultBody>,
) -> HttpResponse {
    if !is_admin(&req, &config) {
        return HttpResponse::Forbidden().json(serde_json::json!({ "error": "Admin token required" }));
    }
    let mut t = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let body = body.into_inner();
    let result = MatchResult {
        home_score: body.home_score,
        away_score: body.away_score,
        winner_id: body.winner_id.map(|w| w.trim().to_ascii_uppercase()),
        recorded_at: Utc::now(),
    };
    match t.set_result(path.match_id, result) {
        Ok(()) => {
            log::info!("Recorded result for match {}", path.match_id);
            HttpResponse::Ok().json(t.get_match(path.match_id))
        }
        Err(e) => error_response(&e),
    }
}

#[delete("/api/results/{match_id}")]
async fn api_clear_result(
    req: HttpRequest,
    state: AppState,
    config: Data<ServerConfig>,
    path: Path<MatchPath>,
) -> HttpResponse {
    if !is_admin(&req, &config) {
        return HttpResponse::Forbidden().json(serde_json::json!({ "error": "Admin token required" }));
    }
    let mut t = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match t.clear_result(path.match_id) {
        Ok(removed) => HttpResponse::Ok().json(serde_json::json!({ "removed": removed })),
        Err(e) => error_response(&e),
    }
}

/// How everyone predicted one match.
#[get("/api/matches/{match_id}/consensus")]
async fn api_consensus(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let t = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if t.get_match(path.match_id).is_none() {
        return error_response(&TournamentError::MatchNotFound(path.match_id));
    }
    HttpResponse::Ok().json(consensus(path.match_id, &t.sheets))
}

fn load_tournament(config: &ServerConfig) -> Result<Tournament, TournamentError> {
    let teams = match &config.teams_csv {
        Some(path) => {
            log::info!("Loading roster from {}", path.display());
            let file = std::fs::File::open(path).map_err(|e| TournamentError::Csv(e.to_string()))?;
            parse_teams_csv(file)?
        }
        None => default_teams(),
    };
    tournament_from_teams(teams)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let tournament = load_tournament(&config).map_err(|e| {
        log::error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(tournament));
    let config = Data::new(config);
    let session_key = Key::generate();

    // Background task: every 30 minutes, drop sheets idle for SHEET_TTL_HOURS
    let state_cleanup = state.clone();
    let ttl = chrono::Duration::hours(i64::from(config.sheet_ttl_hours));
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let removed = g.remove_inactive_sheets(ttl, Utc::now());
            if removed > 0 {
                log::info!("Cleaned up {} inactive prediction sheet(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                session_key.clone(),
            ))
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_teams)
            .service(api_matches)
            .service(api_consensus)
            .service(api_get_predictions)
            .service(api_auto_fill)
            .service(api_set_prediction)
            .service(api_clear_prediction)
            .service(api_standings)
            .service(api_third_place)
            .service(api_bracket)
            .service(api_evaluation)
            .service(api_set_result)
            .service(api_clear_result)
    })
    .bind(bind)?
    .run()
    .await
}
