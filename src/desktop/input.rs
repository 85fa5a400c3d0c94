//! Input simulation: the `InputBackend` seam, the enigo-backed production
//! implementation, and the `ActionResult`-producing controller on top.

use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use enigo::{Button, Coordinate, Direction, Enigo, Keyboard, Mouse, Settings};
use serde_json::json;

use super::errors::AutomationError;
use super::keys;
use super::locate;
use super::screenshot::ScreenCapture;
use super::types::ActionResult;

/// External input-simulation capability.
///
/// One implementation per process; swapped for a stub in tests.
pub trait InputBackend: Send + Sync {
    fn click(&self, x: i32, y: i32) -> Result<()>;
    fn type_text(&self, text: &str) -> Result<()>;
    fn press_key(&self, key: &str) -> Result<()>;
    /// Returns the screen coordinates of the template center, if found.
    fn locate_image(&self, path: &Path, confidence: f32) -> Result<Option<(i32, i32)>>;
    fn screenshot(&self, path: &Path) -> Result<()>;
}

/// Production backend: enigo for input, xcap plus template matching for the
/// screen side.
///
/// The enigo handle is created per call; a missing display surfaces as a
/// per-call failure, never at construction.
pub struct EnigoBackend;

impl EnigoBackend {
    pub fn new() -> Self {
        Self
    }

    fn with_enigo<T>(&self, f: impl FnOnce(&mut Enigo) -> Result<T>) -> Result<T> {
        let mut enigo = Enigo::new(&Settings::default()).map_err(|e| {
            AutomationError::BackendUnavailable(format!("input simulation: {:?}", e))
        })?;
        f(&mut enigo)
    }
}

impl Default for EnigoBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBackend for EnigoBackend {
    fn click(&self, x: i32, y: i32) -> Result<()> {
        self.with_enigo(|enigo| {
            enigo
                .move_mouse(x, y, Coordinate::Abs)
                .map_err(|e| AutomationError::Operation(format!("failed to move mouse: {:?}", e)))?;
            thread::sleep(Duration::from_millis(50)); // Small delay for reliability
            enigo
                .button(Button::Left, Direction::Click)
                .map_err(|e| AutomationError::Operation(format!("failed to click: {:?}", e)))?;
            Ok(())
        })
    }

    fn type_text(&self, text: &str) -> Result<()> {
        self.with_enigo(|enigo| {
            enigo
                .text(text)
                .map_err(|e| AutomationError::Operation(format!("failed to type text: {:?}", e)))?;
            Ok(())
        })
    }

    fn press_key(&self, key: &str) -> Result<()> {
        let parsed = keys::parse(key)
            .ok_or_else(|| AutomationError::Operation(format!("unknown key: {}", key)))?;
        self.with_enigo(|enigo| {
            enigo
                .key(parsed, Direction::Click)
                .map_err(|e| AutomationError::Operation(format!("failed to press key: {:?}", e)))?;
            Ok(())
        })
    }

    fn locate_image(&self, path: &Path, confidence: f32) -> Result<Option<(i32, i32)>> {
        let template = image::open(path)
            .map_err(|e| {
                AutomationError::Operation(format!("failed to read {}: {}", path.display(), e))
            })?
            .to_rgba8();
        let screen = ScreenCapture::capture_primary_screen()?;
        Ok(locate::locate(&screen, &template, confidence))
    }

    fn screenshot(&self, path: &Path) -> Result<()> {
        let screen = ScreenCapture::capture_primary_screen()?;
        ScreenCapture::save_png(&screen, path)
    }
}

/// Issues primitive input events and screen-image queries, converting every
/// backend failure into an error result. No retries, no partial effects.
pub struct InputController {
    backend: Box<dyn InputBackend>,
}

impl InputController {
    pub fn new() -> Self {
        Self::with_backend(Box::new(EnigoBackend::new()))
    }

    pub fn with_backend(backend: Box<dyn InputBackend>) -> Self {
        Self { backend }
    }

    pub fn click(&self, x: i32, y: i32) -> ActionResult {
        match self.backend.click(x, y) {
            Ok(()) => ActionResult::ok(format!("Clicked at coordinates ({}, {})", x, y)),
            Err(e) => {
                tracing::error!("Click failed: {}", e);
                ActionResult::error(format!("Click failed: {}", e))
            }
        }
    }

    pub fn type_text(&self, text: &str) -> ActionResult {
        match self.backend.type_text(text) {
            Ok(()) => ActionResult::ok(format!("Typed text: {}", truncate_echo(text))),
            Err(e) => {
                tracing::error!("Typing failed: {}", e);
                ActionResult::error(format!("Typing failed: {}", e))
            }
        }
    }

    pub fn press_key(&self, key: &str) -> ActionResult {
        match self.backend.press_key(key) {
            Ok(()) => ActionResult::ok(format!("Pressed key: {}", key)),
            Err(e) => {
                tracing::error!("Key press failed: {}", e);
                ActionResult::error(format!("Key press failed: {}", e))
            }
        }
    }

    pub fn locate_image(&self, path: &Path, confidence: f32) -> ActionResult {
        match self.backend.locate_image(path, confidence) {
            Ok(Some((x, y))) => ActionResult::ok(format!("Image found at ({}, {})", x, y))
                .with_payload(json!({ "x": x, "y": y })),
            Ok(None) => {
                ActionResult::error(format!("Image not found on screen: {}", path.display()))
            }
            Err(e) => {
                tracing::error!("Image recognition failed: {}", e);
                ActionResult::error(format!("Image recognition failed: {}", e))
            }
        }
    }

    /// Locate the template, then click its center. A miss fails without
    /// clicking.
    pub fn click_image(&self, path: &Path, confidence: f32) -> ActionResult {
        match self.backend.locate_image(path, confidence) {
            Ok(Some((x, y))) => self.click(x, y),
            Ok(None) => {
                ActionResult::error(format!("Image not found on screen: {}", path.display()))
            }
            Err(e) => {
                tracing::error!("Image recognition failed: {}", e);
                ActionResult::error(format!("Image recognition failed: {}", e))
            }
        }
    }

    /// Capture the primary screen to the given path. The parent directory
    /// must already exist; it is never created here.
    pub fn screenshot(&self, path: &Path) -> ActionResult {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return ActionResult::error(format!(
                    "Screenshot failed: directory {} does not exist",
                    parent.display()
                ));
            }
        }
        match self.backend.screenshot(path) {
            Ok(()) => ActionResult::ok(format!("Screenshot saved to {}", path.display())),
            Err(e) => {
                tracing::error!("Screenshot failed: {}", e);
                ActionResult::error(format!("Screenshot failed: {}", e))
            }
        }
    }
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}

/// First 20 characters of the text, with an ellipsis when truncated.
fn truncate_echo(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(20).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
