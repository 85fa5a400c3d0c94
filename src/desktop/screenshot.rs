//! Primary-screen capture using xcap.

use std::path::Path;

use anyhow::Result;
use image::RgbaImage;
use xcap::Monitor;

use super::errors::AutomationError;

/// Screen capture utilities.
pub struct ScreenCapture;

impl ScreenCapture {
    /// Capture the entire primary monitor.
    pub fn capture_primary_screen() -> Result<RgbaImage> {
        let monitors = Monitor::all()
            .map_err(|e| AutomationError::BackendUnavailable(format!("screen capture: {}", e)))?;

        let primary = monitors
            .into_iter()
            .find(|m| m.is_primary())
            .ok_or_else(|| AutomationError::Operation("no primary monitor found".to_string()))?;

        let image = primary
            .capture_image()
            .map_err(|e| AutomationError::Operation(format!("failed to capture screen: {}", e)))?;

        Ok(image)
    }

    /// Write a captured frame to the given path as PNG.
    pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
        image.save(path).map_err(|e| {
            AutomationError::Operation(format!("failed to write {}: {}", path.display(), e)).into()
        })
    }
}
