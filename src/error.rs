// src/error.rs
use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Failures of a single relay call.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("completion API key is not configured")]
    Configuration,

    #[error("prompt is required")]
    Validation,

    // The upstream body stays out of Display; it is only logged.
    #[error("completion API returned status {status}")]
    Upstream { status: u16, body: String },

    #[error("failed to reach completion API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode completion API response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// What the inbound caller gets to see.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Configuration => "The completion API key is not configured.",
            Self::Validation => "Prompt is required.",
            Self::Upstream { .. } | Self::Transport(_) | Self::Decode(_) => {
                "Error calling the completion API."
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl ProblemDetails {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            kind: "about:blank",
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            status: status.as_u16(),
            detail: detail.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Relay(err) => (err.status_code(), err.public_message().to_string()),
        };

        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(ProblemDetails::new(status, detail)),
        )
            .into_response()
    }
}
