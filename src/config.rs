use clap::Parser;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "chat-gateway")]
#[command(about = "Rate-limited relay gateway for the site chat widget")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Upstream chat webhook URL
    #[arg(
        short,
        long,
        env = "CHAT_WEBHOOK_URL",
        default_value = "http://localhost:5678/webhook/chat"
    )]
    pub webhook_url: String,

    // Rate limit max requests per window
    #[arg(long, env = "RATE_LIMIT_MAX_REQUESTS", default_value_t = 20)]
    pub rate_limit: u32,

    // Rate limit window in milliseconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_MS", default_value_t = 60_000)]
    pub rate_window_ms: i64,

    // Seconds between expired-session sweeps
    #[arg(long, default_value_t = 300)]
    pub cleanup_interval: u64,

    // Mark session cookies Secure (set when serving behind https)
    #[arg(long, env = "PRODUCTION", default_value_t = false)]
    pub production: bool,
}
