//! Desktop automation API handlers

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::desktop::types::ActionResult;

use super::super::state::AppState;

/// Wire form of an ActionResult: status/message plus flattened payload
/// fields.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(flatten)]
    pub payload: Option<Value>,
}

impl From<ActionResult> for ActionResponse {
    fn from(result: ActionResult) -> Self {
        Self {
            status: if result.success { "success" } else { "error" },
            message: result.message,
            payload: result.payload,
        }
    }
}

pub async fn click(
    State(state): State<Arc<AppState>>,
    Json(args): Json<Value>,
) -> Json<ActionResponse> {
    Json(state.dispatcher.dispatch("click", &args).await.into())
}

pub async fn type_text(
    State(state): State<Arc<AppState>>,
    Json(args): Json<Value>,
) -> Json<ActionResponse> {
    Json(state.dispatcher.dispatch("type", &args).await.into())
}

pub async fn press(
    State(state): State<Arc<AppState>>,
    Json(args): Json<Value>,
) -> Json<ActionResponse> {
    Json(state.dispatcher.dispatch("press", &args).await.into())
}

pub async fn screenshot(
    State(state): State<Arc<AppState>>,
    Json(args): Json<Value>,
) -> Json<ActionResponse> {
    Json(state.dispatcher.dispatch("screenshot", &args).await.into())
}

pub async fn list_windows(State(state): State<Arc<AppState>>) -> Json<ActionResponse> {
    Json(
        state
            .dispatcher
            .dispatch("listWindows", &Value::Null)
            .await
            .into(),
    )
}

pub async fn focus(
    State(state): State<Arc<AppState>>,
    Json(args): Json<Value>,
) -> Json<ActionResponse> {
    Json(state.dispatcher.dispatch("focus", &args).await.into())
}

pub async fn locate_image(
    State(state): State<Arc<AppState>>,
    Json(args): Json<Value>,
) -> Json<ActionResponse> {
    Json(state.dispatcher.dispatch("locateImage", &args).await.into())
}

pub async fn click_image(
    State(state): State<Arc<AppState>>,
    Json(args): Json<Value>,
) -> Json<ActionResponse> {
    Json(state.dispatcher.dispatch("clickImage", &args).await.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_response_flattens_payload() {
        let result = ActionResult::ok("Screenshot saved to shot.png")
            .with_payload(json!({ "path": "shot.png" }));
        let response: ActionResponse = result.into();
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(
            value,
            json!({
                "status": "success",
                "message": "Screenshot saved to shot.png",
                "path": "shot.png"
            })
        );
    }

    #[test]
    fn test_action_response_without_payload() {
        let response: ActionResponse = ActionResult::error("Key required").into();
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(
            value,
            json!({ "status": "error", "message": "Key required" })
        );
    }
}
