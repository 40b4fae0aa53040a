use crate::auth::{self, bearer_matches};
use crate::errors::AppError;
use crate::models::{
    LoginRequest, SuccessResponse, VisitLog, VisitRecord, VisitResponse, DIRECT_REFERRER, UNKNOWN,
};
use crate::session::{cleared_cookie, session_cookie, token_from_headers};
use crate::state::AppState;
use crate::ui::{render_dashboard, render_index, render_login};
use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, SecondsFormat, Utc};
use std::net::SocketAddr;
use tracing::{error, info, warn};

pub async fn index() -> Html<&'static str> {
    Html(render_index())
}

/// Public visit beacon. Failures are logged and reported as
/// `{"success": false}`, never as an error status.
pub async fn record_visit(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Json<VisitResponse> {
    let record = build_record(&headers, peer.map(|ConnectInfo(addr)| addr), Utc::now());
    match state.store.record_visit(record).await {
        Ok(total) => Json(VisitResponse::recorded(total)),
        Err(err) => {
            error!("failed to record visit: {err}");
            Json(VisitResponse::failed())
        }
    }
}

/// Operator read of the raw log, gated by the API key.
pub async fn get_visits(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<VisitLog>, AppError> {
    if !bearer_matches(&headers, &state.api_key) {
        warn!("rejected visit log request with missing or wrong API key");
        return Err(AppError::unauthorized());
    }
    Ok(Json(read_or_empty(&state).await))
}

pub async fn login(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let request: LoginRequest = serde_json::from_slice(&body).map_err(|err| {
        warn!("malformed login body: {err}");
        AppError::malformed_input()
    })?;

    let token = auth::login(
        &state.credentials,
        &state.sessions,
        &request.username,
        &request.password,
    )
    .inspect_err(|err| warn!("admin login failed: {err}"))?;

    info!("admin session issued");
    let cookie = session_cookie(&token, state.secure_cookies);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(SuccessResponse { success: true }),
    )
        .into_response())
}

pub async fn logout(State(state): State<AppState>) -> Response {
    (
        [(header::SET_COOKIE, cleared_cookie(state.secure_cookies))],
        Json(SuccessResponse { success: true }),
    )
        .into_response()
}

/// Session-gated read of the log for the admin view. Storage is not touched
/// unless the session checks out.
pub async fn admin_visits(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<VisitLog>, AppError> {
    if !state.sessions.verify(token_from_headers(&headers)) {
        return Err(AppError::unauthorized());
    }
    Ok(Json(read_or_empty(&state).await))
}

pub async fn admin_page(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let claims = token_from_headers(&headers).and_then(|token| state.sessions.claims(token));
    match claims {
        Some(claims) => {
            let log = read_or_empty(&state).await;
            Html(render_dashboard(&claims.username, &log))
        }
        None => Html(render_login()),
    }
}

async fn read_or_empty(state: &AppState) -> VisitLog {
    state.store.read_visit_log().await.unwrap_or_else(|err| {
        error!("failed to read visit log: {err}");
        VisitLog::default()
    })
}

fn build_record(headers: &HeaderMap, peer: Option<SocketAddr>, at: DateTime<Utc>) -> VisitRecord {
    let source_address = header_str(headers, "x-forwarded-for")
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or_else(|| header_str(headers, "x-real-ip"))
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN.to_string());

    VisitRecord {
        timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        user_agent: header_str(headers, header::USER_AGENT.as_str())
            .unwrap_or(UNKNOWN)
            .to_string(),
        referrer: header_str(headers, header::REFERER.as_str())
            .unwrap_or(DIRECT_REFERRER)
            .to_string(),
        source_address,
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
