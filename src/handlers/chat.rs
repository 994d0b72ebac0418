use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::locale::detect_locale;
use crate::metrics::{RATE_LIMITED_TOTAL, REQUEST_LATENCY, REQUEST_TOTAL, WEBHOOK_ERRORS};
use crate::models::{ChatRequest, ChatResponse, WebhookPayload, WebhookResponse};
use crate::session::{new_session_id, session_cookie, session_from_headers};
use crate::state::AppState;

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_MESSAGE_CHARS: usize = 2000;

// Chat relay handler: session cookie -> rate limit -> upstream webhook
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ChatRequest>,
) -> Response {
    REQUEST_TOTAL.inc();
    let start_time = Instant::now();

    // Reuse the browser's session id, or mint one on first contact
    let (session_id, issued) = match session_from_headers(&headers) {
        Some(id) => (id, false),
        None => (new_session_id(), true),
    };

    let mut response = handle_message(&state, &session_id, &headers, payload).await;

    // First contact: persist the id so the limiter sees a stable key next time
    if issued {
        if let Ok(value) = session_cookie(&session_id, state.secure_cookies).parse() {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());
    response
}

async fn handle_message(
    state: &AppState,
    session_id: &str,
    headers: &HeaderMap,
    payload: ChatRequest,
) -> Response {
    if payload.message.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Message is required.");
    }
    if payload.message.chars().count() > MAX_MESSAGE_CHARS {
        return error_response(StatusCode::BAD_REQUEST, "Message is too long.");
    }

    let result = state
        .rate_limiter
        .check(session_id, state.rate_limit, state.rate_window_ms);

    // Over the limit: reject without contacting the webhook
    if !result.success {
        RATE_LIMITED_TOTAL.inc();
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({
                "error": "Too many messages. Please wait a moment.",
                "resetTime": result.reset_time,
            })),
        )
            .into_response();
    }

    let locale = detect_locale(
        headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok()),
    );

    relay_to_webhook(state, session_id, locale, payload).await
}

// Forward one accepted message to the upstream webhook
async fn relay_to_webhook(
    state: &AppState,
    session_id: &str,
    locale: &str,
    payload: ChatRequest,
) -> Response {
    let body = WebhookPayload {
        session_id: session_id.to_string(),
        message: payload.message,
        locale: locale.to_string(),
    };

    let result = state
        .client
        .post(&state.webhook_url)
        .timeout(WEBHOOK_TIMEOUT)
        .json(&body)
        .send()
        .await;

    match result {
        Ok(res) if res.status().is_success() => match res.json::<WebhookResponse>().await {
            Ok(answer) => Json(ChatResponse {
                reply: answer.reply,
            })
            .into_response(),
            Err(e) => upstream_error(format!("Parse error: {}", e)),
        },
        Ok(res) => upstream_error(format!("Webhook returned {}", res.status())),
        Err(e) => upstream_error(format!("Request failed: {}", e)),
    }
}

fn upstream_error(detail: String) -> Response {
    WEBHOOK_ERRORS.inc();
    println!("[Chat] Upstream webhook error: {}", detail);
    error_response(
        StatusCode::BAD_GATEWAY,
        "Chat service is unavailable right now.",
    )
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
