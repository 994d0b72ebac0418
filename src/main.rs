use axum::{
    Router,
    routing::{get, post},
};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;

mod config;
mod handlers;
mod locale;
mod metrics;
mod models;
mod rate_limit;
mod session;
mod state;

use config::Args;
use handlers::{chat_handler, health_handler, metrics_handler};
use rate_limit::{RateLimiter, cleanup_task};
use state::AppState;

// This is main async function with tokio
#[tokio::main]
async fn main() {
    // parse cli arguments
    let args = Args::parse();

    let rate_limiter = Arc::new(RateLimiter::new());

    // creating shared state
    let state = Arc::new(AppState {
        client: reqwest::Client::new(),
        webhook_url: args.webhook_url.clone(),
        rate_limiter: rate_limiter.clone(),
        rate_limit: args.rate_limit,
        rate_window_ms: args.rate_window_ms,
        secure_cookies: args.production,
    });

    // spawn the background sweep
    tokio::spawn(cleanup_task(
        rate_limiter,
        Duration::from_secs(args.cleanup_interval),
    ));

    // creating the router with routes
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    println!("Chat gateway running on http://localhost:{}", args.port);
    println!("Forwarding to webhook at {}", args.webhook_url);
    println!(
        "Rate limit: {} requests per {} ms",
        args.rate_limit, args.rate_window_ms
    );
    axum::serve(listener, app).await.unwrap();
}
