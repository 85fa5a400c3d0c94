//! Command validation and routing.

use std::path::Path;

use chrono::Utc;
use serde_json::{json, Value};

use super::errors::AutomationError;
use super::input::InputController;
use super::manager::WindowManager;
use super::types::ActionResult;

const DEFAULT_CONFIDENCE: f64 = 0.9;

/// Routes validated commands to the input controller or window manager and
/// produces the uniform result contract.
pub struct AutomationDispatcher {
    input: InputController,
    windows: WindowManager,
}

impl AutomationDispatcher {
    pub fn new() -> Self {
        Self::with_parts(InputController::new(), WindowManager::new())
    }

    pub fn with_parts(input: InputController, windows: WindowManager) -> Self {
        Self { input, windows }
    }

    /// Validate and execute one command against a JSON argument mapping.
    ///
    /// Missing required fields short-circuit before anything is delegated.
    pub async fn dispatch(&self, command: &str, args: &Value) -> ActionResult {
        match command {
            "click" => self.click(args),
            "type" => self.type_text(args),
            "press" => self.press(args),
            "screenshot" => self.screenshot(args),
            "listWindows" => self.list_windows().await,
            "focus" => self.focus(args).await,
            "locateImage" => self.locate_image(args),
            "clickImage" => self.click_image(args),
            other => ActionResult::error(format!("Unknown command: {}", other)),
        }
    }

    fn click(&self, args: &Value) -> ActionResult {
        let x = args.get("x").and_then(Value::as_f64);
        let y = args.get("y").and_then(Value::as_f64);
        match (x, y) {
            (Some(x), Some(y)) => self.input.click(x as i32, y as i32),
            _ => ActionResult::error("X and Y coordinates required"),
        }
    }

    fn type_text(&self, args: &Value) -> ActionResult {
        match require_str(args, "text", "Text required") {
            Ok(text) => self.input.type_text(text),
            Err(e) => ActionResult::error(e.to_string()),
        }
    }

    fn press(&self, args: &Value) -> ActionResult {
        match require_str(args, "key", "Key required") {
            Ok(key) => self.input.press_key(key),
            Err(e) => ActionResult::error(e.to_string()),
        }
    }

    /// A missing path is synthesized from the current time so every
    /// screenshot call has a destination.
    fn screenshot(&self, args: &Value) -> ActionResult {
        let path = match args.get("path").and_then(Value::as_str) {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => format!("screenshot_{}.png", Utc::now().timestamp()),
        };
        self.input
            .screenshot(Path::new(&path))
            .with_payload(json!({ "path": path }))
    }

    async fn list_windows(&self) -> ActionResult {
        let windows = self.windows.list_windows().await;
        ActionResult::ok(format!("Found {} windows", windows.len()))
            .with_payload(json!({ "windows": windows }))
    }

    async fn focus(&self, args: &Value) -> ActionResult {
        let window = match require_str(args, "window", "Window title/handle required") {
            Ok(window) => window,
            Err(e) => return ActionResult::error(e.to_string()),
        };
        if self.windows.focus_window(window).await {
            ActionResult::ok(format!("Focused window: {}", window))
        } else {
            ActionResult::error(format!("Failed to focus window: {}", window))
        }
    }

    fn locate_image(&self, args: &Value) -> ActionResult {
        match image_args(args) {
            Ok((path, confidence)) => self.input.locate_image(Path::new(path), confidence),
            Err(e) => ActionResult::error(e.to_string()),
        }
    }

    fn click_image(&self, args: &Value) -> ActionResult {
        match image_args(args) {
            Ok((path, confidence)) => self.input.click_image(Path::new(path), confidence),
            Err(e) => ActionResult::error(e.to_string()),
        }
    }
}

impl Default for AutomationDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Require a non-empty string field, with the command's exact error message.
fn require_str<'a>(args: &'a Value, key: &str, message: &str) -> Result<&'a str, AutomationError> {
    match args.get(key).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(AutomationError::Validation(message.to_string())),
    }
}

fn image_args(args: &Value) -> Result<(&str, f32), AutomationError> {
    let path = require_str(args, "path", "Image path required")?;
    let confidence = args
        .get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_CONFIDENCE) as f32;
    Ok((path, confidence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::input::InputBackend;
    use anyhow::Result;
    use std::path::Path;

    /// Backend that panics on any call; validation must never reach it.
    struct UnreachableInput;

    impl InputBackend for UnreachableInput {
        fn click(&self, _x: i32, _y: i32) -> Result<()> {
            panic!("input backend invoked despite validation failure");
        }

        fn type_text(&self, _text: &str) -> Result<()> {
            panic!("input backend invoked despite validation failure");
        }

        fn press_key(&self, _key: &str) -> Result<()> {
            panic!("input backend invoked despite validation failure");
        }

        fn locate_image(&self, _path: &Path, _confidence: f32) -> Result<Option<(i32, i32)>> {
            panic!("input backend invoked despite validation failure");
        }

        fn screenshot(&self, _path: &Path) -> Result<()> {
            panic!("input backend invoked despite validation failure");
        }
    }

    fn validation_only_dispatcher() -> AutomationDispatcher {
        AutomationDispatcher::with_parts(
            InputController::with_backend(Box::new(UnreachableInput)),
            WindowManager::with_backend(Box::new(UnfocusableWindows)),
        )
    }

    struct UnfocusableWindows;

    #[async_trait::async_trait]
    impl crate::desktop::platform::WindowBackend for UnfocusableWindows {
        async fn list_windows(&self) -> Result<Vec<crate::desktop::types::WindowInfo>> {
            Ok(Vec::new())
        }

        async fn focus_by_handle(&self, _identifier: &str) -> Result<()> {
            Err(anyhow::anyhow!("no such handle"))
        }

        async fn focus_by_title(&self, _title: &str) -> Result<()> {
            Err(anyhow::anyhow!("no such title"))
        }
    }

    #[test]
    fn test_click_without_coordinates_short_circuits() {
        let dispatcher = validation_only_dispatcher();
        let result = tokio_test::block_on(dispatcher.dispatch("click", &serde_json::json!({})));
        assert!(!result.success);
        assert_eq!(result.message, "X and Y coordinates required");
    }

    #[test]
    fn test_click_rejects_non_numeric_coordinates() {
        let dispatcher = validation_only_dispatcher();
        let args = serde_json::json!({ "x": "ten", "y": 5 });
        let result = tokio_test::block_on(dispatcher.dispatch("click", &args));
        assert!(!result.success);
        assert_eq!(result.message, "X and Y coordinates required");
    }

    #[test]
    fn test_type_requires_non_empty_text() {
        let dispatcher = validation_only_dispatcher();
        for args in [serde_json::json!({}), serde_json::json!({ "text": "" })] {
            let result = tokio_test::block_on(dispatcher.dispatch("type", &args));
            assert!(!result.success);
            assert_eq!(result.message, "Text required");
        }
    }

    #[test]
    fn test_press_requires_key() {
        let dispatcher = validation_only_dispatcher();
        let result = tokio_test::block_on(dispatcher.dispatch("press", &serde_json::json!({})));
        assert!(!result.success);
        assert_eq!(result.message, "Key required");
    }

    #[test]
    fn test_focus_requires_window() {
        let dispatcher = validation_only_dispatcher();
        let result = tokio_test::block_on(dispatcher.dispatch("focus", &serde_json::json!({})));
        assert!(!result.success);
        assert_eq!(result.message, "Window title/handle required");
    }

    #[test]
    fn test_click_image_requires_path() {
        let dispatcher = validation_only_dispatcher();
        let result =
            tokio_test::block_on(dispatcher.dispatch("clickImage", &serde_json::json!({})));
        assert!(!result.success);
        assert_eq!(result.message, "Image path required");
    }

    #[test]
    fn test_unknown_command() {
        let dispatcher = validation_only_dispatcher();
        let result =
            tokio_test::block_on(dispatcher.dispatch("teleport", &serde_json::json!({})));
        assert!(!result.success);
        assert_eq!(result.message, "Unknown command: teleport");
    }

    #[test]
    fn test_focus_failure_echoes_identifier() {
        let dispatcher = validation_only_dispatcher();
        let args = serde_json::json!({ "window": "ghost" });
        let result = tokio_test::block_on(dispatcher.dispatch("focus", &args));
        assert!(!result.success);
        assert_eq!(result.message, "Failed to focus window: ghost");
    }
}
