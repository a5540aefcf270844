// src/state.rs
use std::sync::Arc;

use crate::config::RelayConfig;
use crate::services::relay::ChatRelayService;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub relay: ChatRelayService,
}

impl AppState {
    pub fn new(http: reqwest::Client, config: RelayConfig) -> Self {
        Self {
            relay: ChatRelayService::new(http, config),
        }
    }
}
