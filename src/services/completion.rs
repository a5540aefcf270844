use serde::{Deserialize, Serialize};

use crate::config::RelayConfig;

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<Message<'a>>,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Serialize)]
pub struct Message<'a> {
    pub role: Role,
    pub content: &'a str,
}

impl<'a> ChatCompletionRequest<'a> {
    /// System instruction first, then the caller's prompt as-is.
    pub fn new(config: &'a RelayConfig, prompt: &'a str) -> Self {
        Self {
            model: &config.model,
            messages: vec![
                Message {
                    role: Role::System,
                    content: &config.system_prompt,
                },
                Message {
                    role: Role::User,
                    content: prompt,
                },
            ],
            max_tokens: config.max_tokens,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// `choices[0].message.content`, or "" when any part is missing.
    pub fn first_content(&self) -> &str {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .unwrap_or_default()
    }
}
