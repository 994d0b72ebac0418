use std::sync::Arc;

use crate::rate_limit::RateLimiter;

// App's shared state

pub struct AppState {
    pub client: reqwest::Client,
    pub webhook_url: String,
    pub rate_limiter: Arc<RateLimiter>,
    pub rate_limit: u32,      // max requests allowed per window
    pub rate_window_ms: i64,  // window length in milliseconds
    pub secure_cookies: bool, // add Secure to Set-Cookie behind https
}
