use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::{
    domain::{BackendInfo, UserId, UserRecord},
    error::{ApiError, ErrorCode},
    protocol::{NewUserRequest, HEALTH_ROUTE, INFO_ROUTE, USERS_ROUTE},
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
};
use tracing::info;

mod api;
mod app_state;
mod config;

use api::ApiContext;
use app_state::AppState;
use config::load_settings;

const MAX_REQUEST_BODY_BYTES: usize = 16 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let api = ApiContext::new(
        BackendInfo::new(settings.info_message, settings.info_details),
        api::seed_users(),
    );
    let app = build_router(Arc::new(AppState { api }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    // The browser front-end is served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route(HEALTH_ROUTE, get(http_health))
        .route(INFO_ROUTE, get(http_info))
        .route(USERS_ROUTE, get(http_list_users).post(http_create_user))
        .route("/api/users/:user_id", get(http_get_user))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}

fn api_failure(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_health() -> Json<BackendInfo> {
    let now = chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.f")
        .to_string();
    Json(api::health(now))
}

async fn http_info(State(state): State<Arc<AppState>>) -> Json<BackendInfo> {
    Json(api::backend_info(&state.api))
}

async fn http_list_users(State(state): State<Arc<AppState>>) -> Json<Vec<UserRecord>> {
    Json(api::list_users(&state.api).await)
}

async fn http_get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserRecord>, (StatusCode, Json<ApiError>)> {
    api::get_user(&state.api, UserId(user_id))
        .await
        .map(Json)
        .map_err(api_failure)
}

async fn http_create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewUserRequest>,
) -> Result<Json<UserRecord>, (StatusCode, Json<ApiError>)> {
    let user = api::create_user(&state.api, req)
        .await
        .map_err(api_failure)?;
    info!(user_id = %user.id, "user created");
    Ok(Json(user))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
