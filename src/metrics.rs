use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("chat_requests_total", "Total number of chat requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter = register_counter!(
        "chat_rate_limited_total",
        "Requests rejected by the rate limiter"
    )
    .unwrap();
    pub static ref WEBHOOK_ERRORS: Counter = register_counter!(
        "chat_webhook_errors_total",
        "Failed relays to the upstream webhook"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "chat_request_latency_seconds",
        "Chat request latency in seconds"
    )
    .unwrap();
    pub static ref ACTIVE_SESSIONS: Gauge = register_gauge!(
        "chat_active_sessions",
        "Session entries currently tracked by the rate limiter"
    )
    .unwrap();
}
