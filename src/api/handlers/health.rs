use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::capabilities::CapabilityReport;
use crate::desktop::types::Platform;

use super::super::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub platform: Platform,
    pub capabilities: CapabilityReport,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        platform: state.platform,
        capabilities: state.capabilities.clone(),
    })
}
