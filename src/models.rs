use serde::{Deserialize, Serialize};

// What the chat widget sends
#[derive(Deserialize, Serialize, Clone)]
pub struct ChatRequest {
    pub message: String,
}

// What the widget gets back
#[derive(Deserialize, Serialize, Clone)]
pub struct ChatResponse {
    pub reply: String,
}

// Payload relayed to the upstream chat webhook
#[derive(Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub session_id: String,
    pub message: String,
    pub locale: String,
}

// Upstream webhook answer
#[derive(Deserialize, Serialize, Clone)]
pub struct WebhookResponse {
    pub reply: String,
}
