// src/message.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatRequest {
    // Missing prompt is rejected the same way as a blank one.
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct ChatResponse {
    pub reply: String,
}
