//! Wire payloads exchanged with the decision backend.

use serde::{Deserialize, Serialize};

pub const HELLO_ENDPOINT: &str = "api/hello";
pub const HEALTH_ENDPOINT: &str = "api/health";
pub const CHAT_ENDPOINT: &str = "api/chat";

#[derive(Debug, Deserialize)]
pub struct HelloResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub user_question: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}
