#![cfg(target_os = "windows")]

//! Windows window backend over the Win32 windowing API.

use anyhow::Result;
use async_trait::async_trait;
use windows::Win32::{
    Foundation::{BOOL, HWND, LPARAM},
    UI::WindowsAndMessaging::{
        EnumWindows, GetWindowTextW, GetWindowThreadProcessId, IsWindow, IsWindowVisible,
        SetForegroundWindow, ShowWindow, SW_RESTORE,
    },
};

use super::WindowBackend;
use crate::desktop::errors::AutomationError;
use crate::desktop::types::{WindowHandle, WindowInfo};

/// Backend over `EnumWindows`/`SetForegroundWindow`. Holds no state; every
/// call reads the live window list.
pub struct Win32Backend;

impl Win32Backend {
    pub fn new() -> Result<Self> {
        Ok(Self)
    }
}

fn enumerate_windows() -> Vec<WindowInfo> {
    let mut windows = Vec::new();

    unsafe {
        unsafe extern "system" fn enum_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
            let windows = &mut *(lparam.0 as *mut Vec<WindowInfo>);

            if !IsWindowVisible(hwnd).as_bool() {
                return BOOL(1);
            }

            let mut title_buf = [0u16; 512];
            let len = GetWindowTextW(hwnd, &mut title_buf);
            if len == 0 {
                return BOOL(1);
            }
            let title = String::from_utf16_lossy(&title_buf[..len as usize]);
            if title.trim().is_empty() {
                return BOOL(1);
            }

            let mut process_id: u32 = 0;
            GetWindowThreadProcessId(hwnd, Some(&mut process_id));

            windows.push(
                WindowInfo::new(title, WindowHandle::Hwnd(hwnd.0 as usize as u64))
                    .with_extra("pid", process_id.to_string()),
            );

            BOOL(1)
        }

        let windows_ptr = LPARAM(&mut windows as *mut Vec<WindowInfo> as isize);
        let _ = EnumWindows(Some(enum_callback), windows_ptr);
    }

    windows
}

fn focus_hwnd(raw: u64) -> Result<()> {
    let hwnd = HWND(raw as usize as *mut core::ffi::c_void);
    unsafe {
        let _ = ShowWindow(hwnd, SW_RESTORE);
        if !SetForegroundWindow(hwnd).as_bool() {
            return Err(AutomationError::Operation(format!(
                "SetForegroundWindow failed for handle {}",
                raw
            ))
            .into());
        }
    }
    Ok(())
}

#[async_trait]
impl WindowBackend for Win32Backend {
    async fn list_windows(&self) -> Result<Vec<WindowInfo>> {
        tokio::task::spawn_blocking(|| Ok(enumerate_windows()))
            .await
            .map_err(|e| AutomationError::Operation(format!("task join error: {}", e)))?
    }

    async fn focus_by_handle(&self, identifier: &str) -> Result<()> {
        let raw: u64 = identifier.trim().parse().map_err(|_| {
            AutomationError::NotFound(format!("not a window handle: {}", identifier))
        })?;

        tokio::task::spawn_blocking(move || {
            unsafe {
                let hwnd = HWND(raw as usize as *mut core::ffi::c_void);
                if !IsWindow(hwnd).as_bool() {
                    return Err(
                        AutomationError::NotFound(format!("no window with handle {}", raw)).into(),
                    );
                }
            }
            focus_hwnd(raw)
        })
        .await
        .map_err(|e| AutomationError::Operation(format!("task join error: {}", e)))?
    }

    async fn focus_by_title(&self, title: &str) -> Result<()> {
        let title = title.to_string();
        tokio::task::spawn_blocking(move || {
            let needle = title.to_lowercase();
            let candidate = enumerate_windows()
                .into_iter()
                .find(|w| w.title.to_lowercase().contains(&needle))
                .ok_or_else(|| {
                    AutomationError::NotFound(format!("no window matching title: {}", title))
                })?;

            match candidate.identifier {
                WindowHandle::Hwnd(raw) => focus_hwnd(raw),
                _ => Err(AutomationError::Operation("unexpected handle form".to_string()).into()),
            }
        })
        .await
        .map_err(|e| AutomationError::Operation(format!("task join error: {}", e)))?
    }
}
