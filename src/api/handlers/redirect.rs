//! `GET /{code}` redirect handler.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::domain::click_message::ClickMessage;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves the code and answers with a 302 redirect, enqueueing the click
/// for the background recorder on the way out. The enqueue is try_send:
/// a full queue (or a dead worker) costs the analytics row, never the
/// redirect.
pub async fn redirect_handler(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    State(st): State<AppState>,
    Path(code): Path<String>,
) -> Response {
    let target = match st.redirector.resolve(&code).await {
        Ok(target) => target,
        Err(AppError::NotFound { .. }) => {
            return (StatusCode::NOT_FOUND, "Short URL not found").into_response();
        }
        Err(e) => return e.into_response(),
    };

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());
    let ip = extract_ip(&headers, addr);

    if let Err(e) = st
        .click_tx
        .try_send(ClickMessage::new(code.clone(), user_agent, ip))
    {
        tracing::warn!(code = %code, error = %e, "failed to enqueue click event");
    }

    // The redirect contract is 302 Found; axum's Redirect::temporary
    // would answer 307.
    (StatusCode::FOUND, [(header::LOCATION, target)]).into_response()
}

/// Determines the client IP, preferring common proxy headers over the
/// peer socket address.
fn extract_ip(headers: &HeaderMap, addr: SocketAddr) -> Option<String> {
    // X-Forwarded-For can be a comma-separated list; take the first entry.
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok())
        && let Some(ip) = xff.split(',').next().map(str::trim)
        && !ip.is_empty()
    {
        return Some(ip.to_string());
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok())
        && !real_ip.is_empty()
    {
        return Some(real_ip.to_string());
    }

    Some(addr.ip().to_string())
}
