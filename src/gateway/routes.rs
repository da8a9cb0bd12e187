use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::blocking;
use crate::db;
use crate::domain::username::{check_availability, normalize_key, UsernameError};
use crate::user_brackets;
use crate::users::{self, PoolUsernameRegistry};

use super::server::GatewayAppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app: &'static str,
    version: &'static str,
    years: Vec<u16>,
}

async fn health(State(state): State<GatewayAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        app: "bracket-hub",
        version: env!("CARGO_PKG_VERSION"),
        years: state.brackets.years(),
    })
}

async fn root() -> &'static str {
    "Bracket Hub is running"
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

// Infra errors carry their kind in the message prefix; map it to a status.
fn coded_error_response(message: String) -> Response {
    let status = if message.starts_with("SEC_INVALID_INPUT") {
        StatusCode::BAD_REQUEST
    } else if message.starts_with("DB_CONSTRAINT") {
        StatusCode::CONFLICT
    } else if message.starts_with("DB_NOT_FOUND") {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    error_response(status, message)
}

#[derive(Debug, Deserialize)]
struct UsernameRequest {
    username: String,
}

async fn username_check(
    State(state): State<GatewayAppState>,
    Json(req): Json<UsernameRequest>,
) -> Response {
    let pool = state.pool.clone();
    let result = blocking::run("username_check", move || {
        let registry = PoolUsernameRegistry::new(pool);
        Ok(check_availability(&registry, &req.username))
    })
    .await;

    match result {
        Ok(Ok(availability)) => (StatusCode::OK, Json(availability)).into_response(),
        Ok(Err(err @ UsernameError::InvalidArgument(_))) => {
            error_response(StatusCode::BAD_REQUEST, err.to_string())
        }
        Ok(Err(err @ UsernameError::Internal(_))) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        Err(msg) => error_response(StatusCode::INTERNAL_SERVER_ERROR, msg),
    }
}

async fn username_claim(
    State(state): State<GatewayAppState>,
    Json(req): Json<UsernameRequest>,
) -> Response {
    let pool = state.pool.clone();
    let result = blocking::run("username_claim", move || {
        let conn = db::get_conn(&pool)?;
        users::claim(&conn, &req.username)
    })
    .await;

    match result {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(msg) => coded_error_response(msg),
    }
}

#[derive(Debug, Deserialize)]
struct SlugQuery {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Serialize)]
struct SlugResponse {
    slug: String,
}

// Total transform: a missing or empty name yields an empty slug, never an error.
async fn team_slug(
    State(state): State<GatewayAppState>,
    Query(query): Query<SlugQuery>,
) -> Json<SlugResponse> {
    Json(SlugResponse {
        slug: state.canonicalizer.canonicalize(&query.name),
    })
}

async fn bracket_year(
    State(state): State<GatewayAppState>,
    Path(year): Path<u16>,
) -> Response {
    match state.brackets.get(year) {
        Some(bracket) => (StatusCode::OK, Json(bracket)).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("DB_NOT_FOUND: no bracket data for year={year}"),
        ),
    }
}

async fn user_bracket_get(
    State(state): State<GatewayAppState>,
    Path((username, year)): Path<(String, u16)>,
) -> Response {
    let key = normalize_key(&username);
    if key.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "SEC_INVALID_INPUT: username must contain at least one alphanumeric character"
                .to_string(),
        );
    }

    let pool = state.pool.clone();
    let result = blocking::run("user_bracket_get", move || {
        let conn = db::get_conn(&pool)?;
        user_brackets::get(&conn, &key, year)
    })
    .await;

    match result {
        Ok(Some(bracket)) => (StatusCode::OK, Json(bracket)).into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            format!("DB_NOT_FOUND: no saved bracket for year={year}"),
        ),
        Err(msg) => coded_error_response(msg),
    }
}

async fn user_bracket_put(
    State(state): State<GatewayAppState>,
    Path((username, year)): Path<(String, u16)>,
    Json(picks): Json<serde_json::Value>,
) -> Response {
    let key = normalize_key(&username);
    if key.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "SEC_INVALID_INPUT: username must contain at least one alphanumeric character"
                .to_string(),
        );
    }

    let pool = state.pool.clone();
    let result = blocking::run("user_bracket_put", move || {
        let conn = db::get_conn(&pool)?;
        user_brackets::upsert(&conn, &key, year, &picks)
    })
    .await;

    match result {
        Ok(bracket) => (StatusCode::OK, Json(bracket)).into_response(),
        Err(msg) => coded_error_response(msg),
    }
}

pub(super) fn build_router(state: GatewayAppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/usernames/check", post(username_check))
        .route("/api/usernames/claim", post(username_claim))
        .route("/api/teams/slug", get(team_slug))
        .route("/api/brackets/:year", get(bracket_year))
        .route(
            "/api/users/:username/brackets/:year",
            get(user_bracket_get).put(user_bracket_put),
        )
        .with_state(state)
}
