//! Cross-platform window management.

use super::platform::{create_backend, WindowBackend};
use super::types::WindowInfo;

/// Uniform interface over the platform window backends.
///
/// Stateless between calls; every operation queries the live OS window state
/// at call time.
pub struct WindowManager {
    backend: Option<Box<dyn WindowBackend>>,
}

impl WindowManager {
    /// Create a manager with the backend for the current platform.
    ///
    /// Backend construction failure is logged, not propagated; a manager
    /// without a backend lists nothing and focuses nothing.
    pub fn new() -> Self {
        let backend = match create_backend() {
            Ok(backend) => Some(backend),
            Err(e) => {
                tracing::warn!("Window backend unavailable: {}", e);
                None
            }
        };
        Self { backend }
    }

    pub fn with_backend(backend: Box<dyn WindowBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Enumerate open windows with a non-empty title.
    ///
    /// Untitled windows are excluded to keep background/helper windows out of
    /// the listing. Enumeration failure degrades to an empty list and is
    /// logged; it never raises.
    pub async fn list_windows(&self) -> Vec<WindowInfo> {
        let Some(backend) = &self.backend else {
            return Vec::new();
        };
        match backend.list_windows().await {
            Ok(windows) => windows
                .into_iter()
                .filter(|w| !w.title.trim().is_empty())
                .collect(),
            Err(e) => {
                tracing::error!("Failed to list windows: {}", e);
                Vec::new()
            }
        }
    }

    /// Focus a window by handle or title.
    ///
    /// The identifier is first treated as a platform handle; any handle
    /// failure falls back to a fuzzy (contains) title match. Returns false on
    /// failure, never raises.
    pub async fn focus_window(&self, identifier: &str) -> bool {
        let Some(backend) = &self.backend else {
            return false;
        };
        match backend.focus_by_handle(identifier).await {
            Ok(()) => true,
            Err(handle_err) => {
                tracing::debug!(
                    "Handle focus for '{}' failed ({}), trying title match",
                    identifier,
                    handle_err
                );
                match backend.focus_by_title(identifier).await {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::error!("Failed to focus window '{}': {}", identifier, e);
                        false
                    }
                }
            }
        }
    }
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}
