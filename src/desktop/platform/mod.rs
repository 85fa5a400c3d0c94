use anyhow::Result;
use async_trait::async_trait;

use super::types::WindowInfo;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "linux")]
pub mod linux;

/// Platform-specific window backend trait
/// Abstracts the native enumeration/focus mechanism behind a common interface
#[async_trait]
pub trait WindowBackend: Send + Sync {
    /// Enumerate top-level windows as the platform reports them.
    async fn list_windows(&self) -> Result<Vec<WindowInfo>>;

    /// Focus a window by its platform handle/ID.
    async fn focus_by_handle(&self, identifier: &str) -> Result<()>;

    /// Focus the first window whose title contains the given text.
    async fn focus_by_title(&self, title: &str) -> Result<()>;
}

/// Create the window backend for the current platform
pub fn create_backend() -> Result<Box<dyn WindowBackend>> {
    #[cfg(target_os = "windows")]
    {
        Ok(Box::new(windows::Win32Backend::new()?))
    }

    #[cfg(target_os = "macos")]
    {
        Ok(Box::new(macos::ScriptingBridgeBackend::new()?))
    }

    #[cfg(target_os = "linux")]
    {
        Ok(Box::new(linux::WmctrlBackend::new()?))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        Err(crate::desktop::errors::AutomationError::BackendUnavailable(
            "no window backend for this platform".to_string(),
        )
        .into())
    }
}
